//! Profile command implementation.

use anyhow::{Context, Result};
use clap::Args;

use skyline::{BskyClient, ClientConfig};

use crate::output;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Handle or DID of the actor
    pub handle: String,
}

pub async fn run(args: ProfileArgs, config: ClientConfig) -> Result<()> {
    let client = BskyClient::new(config)?;

    let profile = client
        .get_user_profile(&args.handle)
        .await
        .context("Failed to get profile")?;

    output::resource(&profile);

    Ok(())
}
