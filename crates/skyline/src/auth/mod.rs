//! Login credentials.
//!
//! The session produced by a successful login lives in
//! [`crate::resource::Session`]; this module only carries what goes in.

mod credentials;

pub use credentials::Credentials;
