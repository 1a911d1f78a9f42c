//! XRPC plumbing.
//!
//! Endpoint names, request bodies and the HTTP transport the client sends them
//! through.

mod endpoints;
mod transport;

pub use endpoints::RecordQuery;
pub(crate) use endpoints::*;
pub use transport::{RawResponse, ReqwestTransport, Transport};
