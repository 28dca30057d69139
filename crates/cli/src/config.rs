use clap::Parser;
use serde::Deserialize;

use crate::{commands::Command, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/vivid.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub session_path: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            session_path: "config/vivid_session.json".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "vivid",
    about = "Command-line client for the VividExpense tracker",
    disable_version_flag = true
)]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override API base URL (e.g. http://127.0.0.1:8000/api).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override session file path.
    #[arg(long, global = true)]
    pub session_path: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

pub fn load(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("VIVID"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(session_path) = &cli.session_path {
        settings.session_path = session_path.clone();
    }

    Ok(settings)
}
