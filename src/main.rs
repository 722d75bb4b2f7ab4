//! premium-cleaner binary entry point.

use std::process::ExitCode;

use clap::Parser;
use premium_cleaner::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "premium_cleaner=info".into()),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}
