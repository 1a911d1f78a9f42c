//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use skyline::{BskyClient, ClientConfig, Credentials};

use crate::cli::AuthArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub auth: AuthArgs,
}

pub async fn run(args: LoginArgs, config: ClientConfig) -> Result<()> {
    let Some(credentials) =
        Credentials::from_parts(args.auth.identifier.as_deref(), args.auth.password.as_deref())
    else {
        bail!("Both --identifier and --password are required");
    };

    let pds = config.pds_url.clone();
    let mut client = BskyClient::new(config)?;
    let session = client.login(credentials).await.context("Failed to login")?;

    output::session(session, &pds)?;

    Ok(())
}
