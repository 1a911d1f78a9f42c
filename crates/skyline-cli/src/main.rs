//! skyline - command-line Bluesky client.
//!
//! A thin wrapper over the `skyline` library: read profiles and feeds,
//! post, and reply from the shell.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    commands::handle(cli).await
}

/// Default filter per `-v` count. `RUST_LOG` overrides it.
///
/// Only the client's own events are raised; dependencies stay at `warn`
/// until `-vvv`, where the HTTP stack joins in.
fn log_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,skyline=info",
        2 => "warn,skyline=debug",
        _ => "warn,skyline=trace,reqwest=debug,hyper_util=debug",
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives(verbosity)));

    // stderr only; stdout carries records
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(verbosity >= 3)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_directives_parse() {
        for verbosity in 0..=4 {
            let directives = log_directives(verbosity);
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "bad filter for -v x{verbosity}: {directives}"
            );
        }
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(log_directives(0), "warn");
        assert!(log_directives(2).contains("skyline=debug"));
    }
}
