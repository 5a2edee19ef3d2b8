use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::source::{DEFAULT_MAX_RETRIES, EVENTS_FUNCTION};

#[derive(Parser, Debug, Default)]
#[command(name = "annals", about = "Terminal browser for historical events")]
pub struct Cli {
    /// Parse server base URL (e.g. https://parseapi.back4app.com)
    #[arg(long, env = "PARSE_SERVER_URL")]
    pub server_url: Option<String>,

    /// Parse application id
    #[arg(long, env = "PARSE_APP_ID")]
    pub app_id: Option<String>,

    /// Parse client key
    #[arg(long, env = "PARSE_CLIENT_KEY")]
    pub client_key: Option<String>,

    /// Cloud function that returns the events
    #[arg(long, env = "ANNALS_FUNCTION")]
    pub function: Option<String>,

    /// Retries after the first failed call
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Log file path
    #[arg(long, env = "ANNALS_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub server_url: Option<String>,
    pub app_id: Option<String>,
    pub client_key: Option<String>,
    pub function: Option<String>,
    pub max_retries: Option<u32>,
}

impl ConfigFile {
    pub fn path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("annals").join("config.toml"))
    }

    pub fn load() -> Option<Self> {
        let content = std::fs::read_to_string(Self::path()?).ok()?;
        match toml::from_str(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Ignoring malformed config file: {}", e);
                None
            }
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0} (set --{1} or {2})")]
    Missing(&'static str, &'static str, &'static str),
}

/// Fully resolved settings: command line first, then the config file, then
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub app_id: String,
    pub client_key: Option<String>,
    pub function: String,
    pub max_retries: u32,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: Option<ConfigFile>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let server_url = cli
            .server_url
            .clone()
            .or(file.server_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("server url", "server-url", "PARSE_SERVER_URL"))?;
        let app_id = cli
            .app_id
            .clone()
            .or(file.app_id)
            .filter(|id| !id.trim().is_empty())
            .ok_or(ConfigError::Missing("application id", "app-id", "PARSE_APP_ID"))?;

        Ok(Self {
            server_url,
            app_id,
            client_key: cli.client_key.clone().or(file.client_key),
            function: cli
                .function
                .clone()
                .or(file.function)
                .unwrap_or_else(|| EVENTS_FUNCTION.to_string()),
            max_retries: cli
                .max_retries
                .or(file.max_retries)
                .unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }
}
