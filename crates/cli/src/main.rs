mod commands;
mod config;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = config::Cli::parse();
    let settings = config::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "vivid={level},client={level}",
            level = settings.level
        ))
        .init();
    tracing::debug!(base_url = %settings.base_url, "configuration loaded");

    commands::run(cli.command, settings).await
}
