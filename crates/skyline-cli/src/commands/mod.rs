//! Subcommand implementations.

pub mod feed;
pub mod get_record;
pub mod login;
pub mod post;
pub mod profile;
pub mod reply;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use skyline::{BskyClient, ClientConfig};

use crate::cli::{AuthArgs, Cli, Commands};

pub async fn handle(cli: Cli) -> Result<()> {
    let config = cli.client_config()?;
    debug!(pds = %config.pds_url, public = %config.public_url, "Client configuration");

    match cli.command {
        Commands::Login(args) => login::run(args, config).await,
        Commands::Profile(args) => profile::run(args, config).await,
        Commands::Feed(args) => feed::run(args, config).await,
        Commands::Post(args) => post::run(args, config).await,
        Commands::Reply(args) => reply::run(args, config).await,
        Commands::GetRecord(args) => get_record::run(args, config).await,
    }
}

/// Build a client, logging in when both credentials were supplied.
///
/// Missing credentials are not an error here; commands that need a session
/// fail on the client's own authentication check.
pub(crate) async fn connect(config: ClientConfig, auth: &AuthArgs) -> Result<BskyClient> {
    if auth.identifier.is_some() && auth.password.is_some() {
        eprintln!("{}", "Logging in...".dimmed());
    }

    BskyClient::connect(config, auth.identifier.as_deref(), auth.password.as_deref())
        .await
        .context("Failed to login")
}
