//! Markdown Preview - command line exporter
//!
//! Exports markdown as PNG, PDF and DOCX and manages the persisted theme,
//! page setup and session state.

mod commands;
mod state;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = commands::Cli::parse();
    commands::run(cli).await
}
