//! Reply threading.
//!
//! A reply record carries two strong references: `parent`, the post being
//! answered, and `root`, the first post of the thread. Replying to a reply
//! must keep the original root, so the root is read from the parent's own
//! `reply` field when it has one.

use std::fmt;

use serde::Serialize;

use crate::error::TypeError;
use crate::resource::{Field, Post, Resource};

/// Where a record's `reply` block sits, in lookup order.
///
/// getRecord returns the record body under `value`; feed and thread views
/// put it under `record`.
static THREAD_ROOT_PATHS: [[&str; 3]; 2] = [
    ["value", "reply", "root"],
    ["record", "reply", "root"],
];

/// A `{uri, cid}` pair addressing one version of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrongRef {
    pub uri: String,
    pub cid: String,
}

impl StrongRef {
    pub fn new(uri: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cid: cid.into(),
        }
    }

    /// Read `uri` and `cid` off a resource.
    pub fn from_resource(resource: &Resource) -> Result<Self, TypeError> {
        Ok(Self::new(
            resource.require_str("uri")?,
            resource.require_str("cid")?,
        ))
    }
}

/// The `reply` field of a post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRef {
    pub parent: StrongRef,
    pub root: StrongRef,
}

impl ReplyRef {
    /// Resolve the references for a reply to `post`.
    ///
    /// `parent` is always `post`. `root` is `post` too, unless `post` is
    /// itself a reply, in which case its thread root is carried over. The
    /// root is read from `value.reply.root` (getRecord output) and, failing
    /// that, from `record.reply.root` (feed and thread views).
    ///
    /// # Errors
    ///
    /// Returns a [`TypeError`] if `post` lacks a string `uri` or `cid`, or if
    /// its thread root exists but is not an object with string `uri`/`cid`.
    pub fn for_post(post: &Post) -> Result<Self, TypeError> {
        let parent = StrongRef::from_resource(post)?;

        let root = match thread_root(post) {
            Some((path, Field::Resource(root))) => {
                StrongRef::from_resource(root).map_err(|err| prefix_field(err, path))?
            }
            Some((path, _)) => {
                return Err(TypeError::WrongFieldType {
                    field: path.join("."),
                    expected: "an object",
                });
            }
            None => parent.clone(),
        };

        Ok(Self { parent, root })
    }

    /// Returns true if the reply starts a new thread under its parent.
    pub fn is_top_level(&self) -> bool {
        self.parent == self.root
    }
}

impl fmt::Display for ReplyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parent={} root={}", self.parent.uri, self.root.uri)
    }
}

fn thread_root(post: &Post) -> Option<(&'static [&'static str; 3], &Field)> {
    THREAD_ROOT_PATHS
        .iter()
        .find_map(|path| post.pointer(path).map(|field| (path, field)))
}

fn prefix_field(err: TypeError, path: &[&str]) -> TypeError {
    let prefix = path.join(".");
    match err {
        TypeError::MissingField { field } => TypeError::MissingField {
            field: format!("{prefix}.{field}"),
        },
        TypeError::WrongFieldType { field, expected } => TypeError::WrongFieldType {
            field: format!("{prefix}.{field}"),
            expected,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> Post {
        Post::try_from(value).unwrap()
    }

    #[test]
    fn top_level_post_is_its_own_root() {
        let reply = ReplyRef::for_post(&post(json!({"uri": "u1", "cid": "c1"}))).unwrap();

        assert_eq!(reply.parent, StrongRef::new("u1", "c1"));
        assert_eq!(reply.root, StrongRef::new("u1", "c1"));
        assert!(reply.is_top_level());
    }

    #[test]
    fn reply_to_reply_keeps_thread_root() {
        let reply = ReplyRef::for_post(&post(json!({
            "uri": "u2",
            "cid": "c2",
            "value": {"reply": {"root": {"uri": "u0", "cid": "c0"}}}
        })))
        .unwrap();

        assert_eq!(reply.parent, StrongRef::new("u2", "c2"));
        assert_eq!(reply.root, StrongRef::new("u0", "c0"));
        assert!(!reply.is_top_level());
    }

    #[test]
    fn feed_view_record_reply_is_honoured() {
        let reply = ReplyRef::for_post(&post(json!({
            "uri": "u5",
            "cid": "c5",
            "record": {
                "text": "deep in a thread",
                "reply": {
                    "root": {"uri": "u3", "cid": "c3"},
                    "parent": {"uri": "u4", "cid": "c4"}
                }
            }
        })))
        .unwrap();

        assert_eq!(reply.parent, StrongRef::new("u5", "c5"));
        assert_eq!(reply.root, StrongRef::new("u3", "c3"));
    }

    #[test]
    fn value_without_reply_falls_back_to_post() {
        let reply = ReplyRef::for_post(&post(json!({
            "uri": "u1",
            "cid": "c1",
            "value": {"$type": "app.bsky.feed.post", "text": "root post"}
        })))
        .unwrap();

        assert_eq!(reply.root, StrongRef::new("u1", "c1"));
    }

    #[test]
    fn serializes_to_record_shape() {
        let reply = ReplyRef::for_post(&post(json!({"uri": "u1", "cid": "c1"}))).unwrap();
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "parent": {"uri": "u1", "cid": "c1"},
                "root": {"uri": "u1", "cid": "c1"}
            })
        );
    }

    #[test]
    fn missing_cid_is_type_error() {
        let err = ReplyRef::for_post(&post(json!({"uri": "u1"}))).unwrap_err();
        assert!(matches!(err, TypeError::MissingField { ref field } if field == "cid"));
    }

    #[test]
    fn malformed_root_is_type_error() {
        let err = ReplyRef::for_post(&post(json!({
            "uri": "u2",
            "cid": "c2",
            "value": {"reply": {"root": {"uri": "u0"}}}
        })))
        .unwrap_err();
        assert!(
            matches!(err, TypeError::MissingField { ref field } if field == "value.reply.root.cid")
        );

        let err = ReplyRef::for_post(&post(json!({
            "uri": "u2",
            "cid": "c2",
            "value": {"reply": {"root": "u0"}}
        })))
        .unwrap_err();
        assert!(matches!(err, TypeError::WrongFieldType { expected: "an object", .. }));
    }
}
