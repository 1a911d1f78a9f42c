//! Get record command implementation.

use anyhow::{Context, Result};
use clap::Args;

use skyline::{AtUri, BskyClient, ClientConfig, RecordQuery};

use crate::output;

#[derive(Args, Debug)]
pub struct GetRecordArgs {
    /// AT URI of the record (e.g., at://did:plc:.../app.bsky.feed.post/...)
    pub uri: Option<String>,

    /// Repository DID or handle (alternative to URI)
    #[arg(long, conflicts_with = "uri")]
    pub repo: Option<String>,

    /// Collection NSID (alternative to URI)
    #[arg(long, conflicts_with = "uri")]
    pub collection: Option<String>,

    /// Record key (alternative to URI)
    #[arg(long, conflicts_with = "uri")]
    pub rkey: Option<String>,

    /// Fetch this version of the record
    #[arg(long)]
    pub cid: Option<String>,
}

impl GetRecordArgs {
    fn query(&self) -> Result<RecordQuery> {
        let query = if let Some(uri) = &self.uri {
            let uri = AtUri::new(uri).context("Invalid AT URI")?;
            RecordQuery::from(&uri)
        } else {
            let repo = self
                .repo
                .as_ref()
                .context("Either a URI or --repo is required")?;
            let collection = self
                .collection
                .as_ref()
                .context("Either a URI or --collection is required")?;
            let rkey = self
                .rkey
                .as_ref()
                .context("Either a URI or --rkey is required")?;
            RecordQuery::new(repo, collection, rkey)
        };

        Ok(match &self.cid {
            Some(cid) => query.with_cid(cid),
            None => query,
        })
    }
}

pub async fn run(args: GetRecordArgs, config: ClientConfig) -> Result<()> {
    let query = args.query()?;
    let client = BskyClient::new(config)?;

    let record = client
        .get_record(&query)
        .await
        .context("Failed to get record")?;

    output::resource(&record);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(uri: Option<&str>, parts: Option<(&str, &str, &str)>) -> GetRecordArgs {
        GetRecordArgs {
            uri: uri.map(str::to_string),
            repo: parts.map(|p| p.0.to_string()),
            collection: parts.map(|p| p.1.to_string()),
            rkey: parts.map(|p| p.2.to_string()),
            cid: None,
        }
    }

    #[test]
    fn query_from_uri() {
        let query = args(Some("at://did:plc:abc/app.bsky.feed.post/3k"), None)
            .query()
            .unwrap();
        assert_eq!(query, RecordQuery::new("did:plc:abc", "app.bsky.feed.post", "3k"));
    }

    #[test]
    fn query_from_parts() {
        let query = args(None, Some(("alice.test", "app.bsky.feed.post", "3k")))
            .query()
            .unwrap();
        assert_eq!(query.repo, "alice.test");
    }

    #[test]
    fn query_needs_uri_or_parts() {
        assert!(args(None, None).query().is_err());
        assert!(args(Some("not-a-uri"), None).query().is_err());
    }
}
