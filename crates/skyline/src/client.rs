//! The Bluesky client.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::Result;
use crate::auth::Credentials;
use crate::error::{AuthError, HttpError};
use crate::reply::ReplyRef;
use crate::resource::{Feed, Post, Profile, Resource, Session};
use crate::types::ServiceUrl;
use crate::xrpc::{
    CREATE_RECORD, CREATE_SESSION, CreateRecordRequest, CreateSessionRequest, GET_AUTHOR_FEED,
    GET_PROFILE, GET_RECORD, POST_COLLECTION, RawResponse, RecordQuery, ReqwestTransport,
    Transport,
};

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// PDS used for login, writes and getRecord.
    pub pds_url: ServiceUrl,
    /// AppView used for public profile and feed reads.
    pub public_url: ServiceUrl,
    /// User-Agent sent by the default transport.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn with_pds_url(mut self, pds_url: ServiceUrl) -> Self {
        self.pds_url = pds_url;
        self
    }

    pub fn with_public_url(mut self, public_url: ServiceUrl) -> Self {
        self.public_url = public_url;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pds_url: ServiceUrl::default_pds(),
            public_url: ServiceUrl::default_public(),
            user_agent: concat!("skyline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The arguments of a createRecord call for a post.
///
/// # Example
///
/// ```
/// use skyline::PostDraft;
/// use serde_json::json;
///
/// let draft = PostDraft::new("hello")
///     .created_at("2024-01-01T00:00:00Z")
///     .field("langs", json!(["en"]));
/// assert_eq!(draft.post_type(), "app.bsky.feed.post");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    text: String,
    post_type: String,
    created_at: Option<String>,
    extra: Map<String, Value>,
}

impl PostDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            post_type: POST_COLLECTION.to_string(),
            created_at: None,
            extra: Map::new(),
        }
    }

    /// The record `$type`, which is also the target collection.
    pub fn post_type(&self) -> &str {
        &self.post_type
    }

    /// Post a different record type, e.g. a custom lexicon.
    pub fn with_post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = post_type.into();
        self
    }

    /// Use a fixed `createdAt` instead of the current time.
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Add a record field. Extra fields are applied last and override
    /// `$type`, `text` and `createdAt`.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn fields(mut self, fields: Map<String, Value>) -> Self {
        self.extra.extend(fields);
        self
    }

    /// Build the record body.
    pub fn to_record(&self) -> Map<String, Value> {
        let created_at = self.created_at.clone().unwrap_or_else(now_timestamp);

        let mut record = Map::new();
        record.insert("$type".to_string(), Value::String(self.post_type.clone()));
        record.insert("text".to_string(), Value::String(self.text.clone()));
        record.insert("createdAt".to_string(), Value::String(created_at));
        for (key, value) in &self.extra {
            record.insert(key.clone(), value.clone());
        }
        record
    }
}

/// Current UTC time as RFC 3339 with microseconds and a `Z` suffix.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A client for one Bluesky account.
///
/// Reads of profiles and feeds go to the public AppView and work without a
/// session. Writes need a session from [`BskyClient::login`].
pub struct BskyClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
    identifier: Option<String>,
    session: Option<Session>,
}

impl BskyClient<ReqwestTransport> {
    /// Create an anonymous client using the default transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client and log in when both `identifier` and `password` are
    /// given. Otherwise the client stays anonymous and nothing is sent.
    pub async fn connect(
        config: ClientConfig,
        identifier: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        let mut client = Self::new(config)?;
        if let Some(credentials) = Credentials::from_parts(identifier, password) {
            client.login(credentials).await?;
        }
        Ok(client)
    }
}

impl<T: Transport> BskyClient<T> {
    /// Create an anonymous client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            identifier: None,
            session: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The identifier of the last successful login.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Create a session on the PDS.
    ///
    /// On failure the client keeps whatever session it had before.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier()))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<&Session> {
        debug!("Creating session");

        let request = CreateSessionRequest {
            identifier: credentials.identifier(),
            password: credentials.password(),
        };
        let body = self.procedure(CREATE_SESSION, None, &request).await?;
        let session = Session::try_from(body)?;

        // Both are needed by every authenticated call
        session.access_jwt()?;
        let did = session.did()?;
        debug!(did, "Session created");

        self.identifier = Some(credentials.identifier().to_string());
        let session: &Session = self.session.insert(session);
        Ok(session)
    }

    /// Fetch an author's feed from the public AppView.
    #[instrument(skip(self))]
    pub async fn get_user_feed(&self, handle: &str) -> Result<Feed> {
        let body = self
            .query(&self.config.public_url, GET_AUTHOR_FEED, &[("actor", handle)])
            .await?;
        let feed = Feed::from_response(&Resource::try_from(body)?)?;
        debug!(posts = feed.len(), "Fetched feed");
        Ok(feed)
    }

    /// Fetch a profile from the public AppView.
    #[instrument(skip(self))]
    pub async fn get_user_profile(&self, handle: &str) -> Result<Profile> {
        let body = self
            .query(&self.config.public_url, GET_PROFILE, &[("actor", handle)])
            .await?;
        Ok(Profile::try_from(body)?)
    }

    /// Post `text` as a regular `app.bsky.feed.post`.
    pub async fn create_post(&self, text: &str) -> Result<()> {
        self.create_post_with(PostDraft::new(text)).await
    }

    /// Write a post record.
    ///
    /// The server's response (the new record's URI and CID) is not returned.
    #[instrument(skip(self, draft), fields(post_type = %draft.post_type))]
    pub async fn create_post_with(&self, draft: PostDraft) -> Result<()> {
        let session = self.require_session()?;
        let token = session.access_jwt()?;

        let record = draft.to_record();
        let request = CreateRecordRequest {
            repo: session.did()?,
            collection: &draft.post_type,
            record: &record,
        };

        self.procedure(CREATE_RECORD, Some(token), &request).await?;
        debug!("Post created");
        Ok(())
    }

    /// Fetch a single record from the PDS.
    ///
    /// Sent without credentials, whether or not the client is logged in.
    #[instrument(skip(self), fields(repo = %query.repo, collection = %query.collection, rkey = %query.rkey))]
    pub async fn get_record(&self, query: &RecordQuery) -> Result<Post> {
        let body = self
            .query(&self.config.pds_url, GET_RECORD, &query.to_pairs())
            .await?;
        Ok(Post::try_from(body)?)
    }

    /// Reply to `post`, threading under its root when it is itself a reply.
    #[instrument(skip(self, post, text))]
    pub async fn reply_to_post(&self, post: &Post, text: &str) -> Result<()> {
        self.require_session()?;

        let reply = ReplyRef::for_post(post)?;
        debug!(%reply, "Resolved reply references");

        let draft = PostDraft::new(text).field("reply", serde_json::to_value(&reply)?);
        self.create_post_with(draft).await
    }

    fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    async fn query(
        &self,
        service: &ServiceUrl,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let url = service.xrpc_url(method);
        debug!(method, "XRPC query");
        let response = self.transport.get(&url, params).await?;
        decode(response)
    }

    async fn procedure<B: Serialize>(
        &self,
        method: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<Value> {
        let url = self.config.pds_url.xrpc_url(method);
        debug!(method, "XRPC procedure");
        let body = serde_json::to_value(body)?;
        let response = self.transport.post(&url, bearer, &body).await?;
        decode(response)
    }
}

/// Turn a response into its JSON body, or an [`HttpError`] for non-2xx.
///
/// An empty 2xx body decodes to `null`.
fn decode(response: RawResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(HttpError::new(response.status, response.body).into());
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

impl<T> std::fmt::Debug for BskyClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BskyClient")
            .field("config", &self.config)
            .field("identifier", &self.identifier)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
