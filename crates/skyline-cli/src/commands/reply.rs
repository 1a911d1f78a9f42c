//! Reply command implementation.

use anyhow::{Context, Result, ensure};
use clap::Args;

use skyline::{AtUri, ClientConfig, RecordQuery, ReplyRef};

use crate::cli::AuthArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ReplyArgs {
    /// AT URI of the post to reply to
    pub uri: String,

    /// Reply text
    pub text: String,

    #[command(flatten)]
    pub auth: AuthArgs,
}

pub async fn run(args: ReplyArgs, config: ClientConfig) -> Result<()> {
    let uri = AtUri::new(&args.uri).context("Invalid AT URI")?;
    let client = super::connect(config, &args.auth).await?;
    ensure!(
        client.is_authenticated(),
        "Replying requires --identifier and --password"
    );

    let post = client
        .get_record(&RecordQuery::from(&uri))
        .await
        .with_context(|| format!("Failed to fetch {uri}"))?;

    let refs = ReplyRef::for_post(&post).context("Post cannot be replied to")?;

    client
        .reply_to_post(&post, &args.text)
        .await
        .context("Failed to reply")?;

    output::replied(&refs);

    Ok(())
}
