//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;

use skyline::{BskyClient, ClientConfig};

use crate::output;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Handle or DID of the author
    pub handle: String,
}

pub async fn run(args: FeedArgs, config: ClientConfig) -> Result<()> {
    let client = BskyClient::new(config)?;

    let feed = client
        .get_user_feed(&args.handle)
        .await
        .context("Failed to get feed")?;

    output::feed(&feed);

    Ok(())
}
