//! HTTP transport behind the client.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::Result;

/// Status and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two HTTP calls the client makes.
///
/// Implementations report transport failures as errors and return every
/// response, whatever its status, as a [`RawResponse`]. Status handling is
/// the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET url?query`.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse>;

    /// `POST url` with a JSON body and an optional bearer token.
    async fn post(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!(status, "XRPC response");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self))]
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        debug!("HTTP GET");
        let response = self.client.get(url).query(query).send().await?;
        Self::read(response).await
    }

    #[instrument(skip(self, bearer, body))]
    async fn post(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse> {
        debug!(authenticated = bearer.is_some(), "HTTP POST");
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::read(response).await
    }
}
