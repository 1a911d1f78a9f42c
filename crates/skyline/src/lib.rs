//! skyline - a minimal Bluesky client.
//!
//! The client authenticates against a PDS, reads profiles and author feeds from
//! the public AppView, creates posts and replies to existing posts. Responses
//! are materialized into [`Resource`] graphs rather than fixed schemas, so
//! callers probe for the fields they need.
//!
//! # Example
//!
//! ```no_run
//! use skyline::{BskyClient, ClientConfig, Credentials, ReplyRef};
//!
//! # async fn example() -> Result<(), skyline::Error> {
//! let mut client = BskyClient::new(ClientConfig::default())?;
//! client.login(Credentials::new("alice.bsky.social", "app-password")).await?;
//!
//! let feed = client.get_user_feed("bob.bsky.social").await?;
//! if let Some(latest) = feed.posts.first() {
//!     println!("{}", ReplyRef::for_post(latest)?);
//!     client.reply_to_post(latest, "nice post").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod reply;
pub mod resource;
pub mod types;
pub mod xrpc;

// Re-export primary types at crate root for convenience
pub use auth::Credentials;
pub use client::{BskyClient, ClientConfig, PostDraft};
pub use error::Error;
pub use reply::{ReplyRef, StrongRef};
pub use resource::{Feed, Field, Post, Profile, Resource, Session};
pub use types::{AtUri, ServiceUrl};
pub use xrpc::{RecordQuery, ReqwestTransport, Transport};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
