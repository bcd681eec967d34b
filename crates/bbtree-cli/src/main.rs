use crate::cmd::{run_command_with_args, Cli};
use clap::Parser;
use std::process::exit;
use tracing::trace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cmd;
mod config;
mod render;
mod tags;
mod tokens;
mod tree;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .with_env_var("BBTREE_LOG")
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set global cli tracing subscriber");

    trace!("starting bbtree {}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    if let Err(e) = run_command_with_args(cli).await {
        eprintln!("{}", error_report(&e));
        exit(1)
    }
}

/// Message printed when a subcommand fails, with the full context chain.
fn error_report(e: &anyhow::Error) -> String {
    format!("bbtree: failed to run command: {e:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_report_has_context_chain() {
        let e = std::fs::read_to_string("/nonexistent/bbtree/input.txt")
            .context("when reading content file")
            .unwrap_err();
        let report = error_report(&e);
        assert!(report.starts_with("bbtree: failed to run command: when reading content file"));
        assert!(report.contains("Caused by"));
    }
}
