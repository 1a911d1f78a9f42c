//! AT URI type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A record address of the form `at://<repo>/<collection>/<rkey>`.
///
/// The repo may be a DID or a handle. Segments are checked for presence and
/// for stray slashes; no further syntax checks are made.
///
/// # Example
///
/// ```
/// use skyline::AtUri;
///
/// let uri = AtUri::new("at://did:plc:z72i7hdynmk6r22z27h6tvur/app.bsky.feed.post/3jui7kd54zh2y").unwrap();
/// assert_eq!(uri.collection(), "app.bsky.feed.post");
/// assert_eq!(uri.rkey(), "3jui7kd54zh2y");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtUri {
    repo: String,
    collection: String,
    rkey: String,
}

impl AtUri {
    /// Parse an AT URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid AT URI format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        Self::parse(s.as_ref())
    }

    /// Create an AT URI from its components.
    pub fn from_parts(
        repo: impl Into<String>,
        collection: impl Into<String>,
        rkey: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            collection: collection.into(),
            rkey: rkey.into(),
        }
    }

    /// Returns the repository (DID or handle).
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the collection NSID.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the record key.
    pub fn rkey(&self) -> &str {
        &self.rkey
    }

    fn parse(s: &str) -> Result<Self, Error> {
        let invalid = |reason: &str| InvalidInputError::AtUri {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let rest = s
            .strip_prefix("at://")
            .ok_or_else(|| invalid("must start with 'at://'"))?;

        let mut parts = rest.split('/');
        let (Some(repo), Some(collection), Some(rkey), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("must have format 'at://<repo>/<collection>/<rkey>'").into());
        };

        if repo.is_empty() || collection.is_empty() || rkey.is_empty() {
            return Err(invalid("repo, collection and rkey must be non-empty").into());
        }

        Ok(Self::from_parts(repo, collection, rkey))
    }
}

impl fmt::Display for AtUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at://{}/{}/{}", self.repo, self.collection, self.rkey)
    }
}
