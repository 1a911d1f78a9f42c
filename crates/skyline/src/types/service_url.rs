//! Base URLs of the services the client talks to.

use std::fmt;

use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// Default PDS used for login and writes.
pub const DEFAULT_PDS_URL: &str = "https://bsky.social";

/// Default public AppView used for unauthenticated reads.
pub const DEFAULT_PUBLIC_URL: &str = "https://public.api.bsky.app";

/// A PDS or AppView base URL, resolved to its `/xrpc/` root.
///
/// Plain HTTP is only accepted for loopback hosts. The base may carry a path
/// prefix but no query or fragment, since method names are appended to it.
///
/// # Example
///
/// ```
/// use skyline::ServiceUrl;
///
/// let pds = ServiceUrl::new("https://bsky.social").unwrap();
/// assert_eq!(pds.xrpc_url("com.atproto.server.createSession"),
///            "https://bsky.social/xrpc/com.atproto.server.createSession");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrl {
    base: Url,
    xrpc_root: String,
}

impl ServiceUrl {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let base = Url::parse(s)
            .map_err(|e| e.to_string())
            .and_then(|url| check_base(&url).map(|()| url))
            .map_err(|reason| InvalidInputError::ServiceUrl {
                value: s.to_string(),
                reason,
            })?;
        Ok(Self::from_base(base))
    }

    /// The default PDS, `https://bsky.social`.
    pub fn default_pds() -> Self {
        Self::builtin(DEFAULT_PDS_URL)
    }

    /// The default public AppView, `https://public.api.bsky.app`.
    pub fn default_public() -> Self {
        Self::builtin(DEFAULT_PUBLIC_URL)
    }

    /// Full URL of an XRPC method on this service.
    pub fn xrpc_url(&self, method: &str) -> String {
        format!("{}{}", self.xrpc_root, method)
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    fn from_base(base: Url) -> Self {
        let xrpc_root = format!("{}/xrpc/", base.as_str().trim_end_matches('/'));
        Self { base, xrpc_root }
    }

    fn builtin(s: &'static str) -> Self {
        match Url::parse(s) {
            Ok(url) => Self::from_base(url),
            Err(e) => unreachable!("built-in service URL {s} is invalid: {e}"),
        }
    }
}

fn check_base(url: &Url) -> Result<(), String> {
    if url.cannot_be_a_base() {
        return Err("must be an absolute URL".into());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("must not have a query or fragment".into());
    }

    let loopback = match url.host() {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => return Err("must have a host".into()),
    };

    match url.scheme() {
        "https" => Ok(()),
        "http" if loopback => Ok(()),
        _ => Err("must use HTTPS (HTTP allowed only for localhost)".into()),
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_xrpc_methods() {
        assert_eq!(
            ServiceUrl::default_pds().xrpc_url("com.atproto.server.createSession"),
            "https://bsky.social/xrpc/com.atproto.server.createSession"
        );
        assert_eq!(
            ServiceUrl::default_public().xrpc_url("app.bsky.actor.getProfile"),
            "https://public.api.bsky.app/xrpc/app.bsky.actor.getProfile"
        );
    }

    #[test]
    fn loopback_may_use_http() {
        for url in ["http://localhost:2583", "http://127.0.0.1:8080", "http://[::1]:2583"] {
            assert!(ServiceUrl::new(url).is_ok(), "{url} rejected");
        }
        assert!(ServiceUrl::new("http://bsky.social").is_err());
    }

    #[test]
    fn path_prefix_is_kept() {
        let pds = ServiceUrl::new("https://example.com/pds/").unwrap();
        assert_eq!(pds.xrpc_url("m"), "https://example.com/pds/xrpc/m");

        let pds = ServiceUrl::new("https://bsky.social/").unwrap();
        assert_eq!(pds.xrpc_url("m"), "https://bsky.social/xrpc/m");
    }

    #[test]
    fn query_or_fragment_is_rejected() {
        for url in ["https://bsky.social/?x=1", "https://bsky.social/#frag", "https://bsky.social?"] {
            let err = ServiceUrl::new(url).unwrap_err();
            assert!(err.to_string().contains("query or fragment"), "{url}: {err}");
        }
    }

    #[test]
    fn non_urls_are_rejected() {
        assert!(ServiceUrl::new("/xrpc/method").is_err());
        assert!(ServiceUrl::new("mailto:alice@example.com").is_err());
    }
}
