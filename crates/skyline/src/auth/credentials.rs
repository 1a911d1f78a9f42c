//! Login credentials type.

use std::fmt;

/// Login credentials for `com.atproto.server.createSession`.
///
/// Holds the identifier (handle, DID or email) and the password or app
/// password. The client consumes credentials during login and keeps only the
/// identifier afterwards.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use skyline::Credentials;
///
/// let creds = Credentials::new("alice.bsky.social", "app-password-here");
/// assert_eq!(creds.identifier(), "alice.bsky.social");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Build credentials only when both halves are present.
    pub fn from_parts(identifier: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (identifier, password) {
            (Some(identifier), Some(password)) => Some(Self::new(identifier, password)),
            _ => None,
        }
    }

    /// Returns the identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Only used to build the createSession request body.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("alice.bsky.social", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice.bsky.social"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn from_parts_requires_both() {
        assert!(Credentials::from_parts(Some("alice"), Some("pw")).is_some());
        assert!(Credentials::from_parts(Some("alice"), None).is_none());
        assert!(Credentials::from_parts(None, Some("pw")).is_none());
        assert!(Credentials::from_parts(None, None).is_none());
    }
}
