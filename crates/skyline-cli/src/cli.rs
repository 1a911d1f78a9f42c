//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use skyline::{ClientConfig, ServiceUrl};

use crate::commands::{feed, get_record, login, post, profile, reply};

/// Command-line Bluesky client.
#[derive(Parser, Debug)]
#[command(name = "skyline")]
#[command(author, version = env!("SKYLINE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// PDS base URL, used for login, posting and getRecord
    #[arg(long, env = "SKYLINE_PDS", default_value = "https://bsky.social", global = true)]
    pub pds: String,

    /// Public AppView base URL, used for profiles and feeds
    #[arg(
        long,
        env = "SKYLINE_PUBLIC_HOST",
        default_value = "https://public.api.bsky.app",
        global = true
    )]
    pub public_host: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Build the client configuration from the host flags.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let pds = ServiceUrl::new(&self.pds).context("Invalid PDS URL")?;
        let public = ServiceUrl::new(&self.public_host).context("Invalid public host URL")?;
        Ok(ClientConfig::default()
            .with_pds_url(pds)
            .with_public_url(public))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check credentials by creating a session
    Login(login::LoginArgs),

    /// Show an actor's profile
    Profile(profile::ProfileArgs),

    /// List an actor's recent posts
    Feed(feed::FeedArgs),

    /// Publish a post
    Post(post::PostArgs),

    /// Reply to a post
    Reply(reply::ReplyArgs),

    /// Fetch a single record
    GetRecord(get_record::GetRecordArgs),
}

/// Account credentials for commands that write.
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Handle, DID or email to authenticate with
    #[arg(long, env = "SKYLINE_IDENTIFIER")]
    pub identifier: Option<String>,

    /// Account password or app password
    #[arg(long, env = "SKYLINE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn post_parses_fields() {
        let cli = Cli::try_parse_from([
            "skyline",
            "post",
            "hello",
            "--field",
            "langs=[\"en\"]",
            "--pds",
            "http://localhost:2583",
        ])
        .unwrap();

        assert_eq!(cli.pds, "http://localhost:2583");
        let Commands::Post(args) = cli.command else {
            panic!("expected post command");
        };
        assert_eq!(args.text, "hello");
        assert_eq!(args.fields.len(), 1);
        assert_eq!(args.fields[0].0, "langs");
    }

    #[test]
    fn invalid_pds_url_is_rejected() {
        let cli = Cli::try_parse_from(["skyline", "--pds", "http://bsky.social", "profile", "bob"])
            .unwrap();
        assert!(cli.client_config().is_err());
    }

    #[test]
    fn host_with_query_is_rejected() {
        let cli = Cli::try_parse_from([
            "skyline",
            "--public-host",
            "https://public.api.bsky.app/?x=1",
            "profile",
            "bob",
        ])
        .unwrap();

        let err = cli.client_config().unwrap_err();
        assert!(format!("{err:#}").contains("query or fragment"), "{err:#}");
    }
}
