//! XRPC endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::AtUri;

// ============================================================================
// Endpoint Names
// ============================================================================

/// com.atproto.server.createSession
pub const CREATE_SESSION: &str = "com.atproto.server.createSession";

/// com.atproto.repo.createRecord
pub const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

/// com.atproto.repo.getRecord
pub const GET_RECORD: &str = "com.atproto.repo.getRecord";

/// app.bsky.feed.getAuthorFeed
pub const GET_AUTHOR_FEED: &str = "app.bsky.feed.getAuthorFeed";

/// app.bsky.actor.getProfile
pub const GET_PROFILE: &str = "app.bsky.actor.getProfile";

/// Collection and `$type` of a regular post.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for createSession.
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Request body for createRecord.
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub record: &'a Map<String, Value>,
}

/// Query parameters for getRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordQuery {
    pub repo: String,
    pub collection: String,
    pub rkey: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
}

impl RecordQuery {
    pub fn new(
        repo: impl Into<String>,
        collection: impl Into<String>,
        rkey: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            collection: collection.into(),
            rkey: rkey.into(),
            cid: None,
        }
    }

    /// Pin the query to one version of the record.
    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    /// Query string pairs, in the order the endpoint documents them.
    pub fn to_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![
            ("repo", self.repo.as_str()),
            ("collection", self.collection.as_str()),
            ("rkey", self.rkey.as_str()),
        ];
        if let Some(cid) = &self.cid {
            pairs.push(("cid", cid.as_str()));
        }
        pairs
    }
}

impl From<&AtUri> for RecordQuery {
    fn from(uri: &AtUri) -> Self {
        Self::new(uri.repo(), uri.collection(), uri.rkey())
    }
}

/// XRPC error response format.
#[derive(Debug, Deserialize)]
pub struct XrpcErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
