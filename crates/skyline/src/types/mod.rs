//! Validated identifier types.

mod at_uri;
mod service_url;

pub use at_uri::AtUri;
pub use service_url::ServiceUrl;
