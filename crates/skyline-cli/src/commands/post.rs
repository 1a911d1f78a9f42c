//! Post command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use skyline::{ClientConfig, PostDraft};

use crate::cli::AuthArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Post text
    pub text: String,

    /// Record type, also used as the collection
    #[arg(long = "type", short = 't', default_value = "app.bsky.feed.post")]
    pub post_type: String,

    /// Fixed createdAt timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub created_at: Option<String>,

    /// Extra record field as key=value; the value is parsed as JSON when
    /// possible and used as a string otherwise (repeatable)
    #[arg(long = "field", short = 'f', value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,

    #[command(flatten)]
    pub auth: AuthArgs,
}

fn parse_field(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{s}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub async fn run(args: PostArgs, config: ClientConfig) -> Result<()> {
    let client = super::connect(config, &args.auth).await?;

    let mut draft = PostDraft::new(args.text).with_post_type(&args.post_type);
    if let Some(created_at) = args.created_at {
        draft = draft.created_at(created_at);
    }
    for (key, value) in args.fields {
        draft = draft.field(key, value);
    }

    client
        .create_post_with(draft)
        .await
        .context("Failed to create post")?;

    output::posted(&args.post_type);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_values_parse_as_json() {
        assert_eq!(
            parse_field("langs=[\"en\",\"de\"]").unwrap(),
            ("langs".to_string(), json!(["en", "de"]))
        );
        assert_eq!(parse_field("n=3").unwrap().1, json!(3));
    }

    #[test]
    fn field_values_fall_back_to_string() {
        assert_eq!(parse_field("label=hello world").unwrap().1, json!("hello world"));
        assert_eq!(parse_field("empty=").unwrap().1, json!(""));
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }
}
