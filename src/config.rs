use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub trello: TrelloConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize)]
pub struct TrelloConfig {
    pub developer_public_key: String,
    /// Only needed for signed OAuth flows; token auth ignores it.
    #[allow(dead_code)]
    pub developer_secret: Option<String>,
    pub member_token: String,
    pub username: String,
    #[serde(default)]
    pub boards: Vec<String>,
    #[serde(default)]
    pub auth: AuthKind,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    #[default]
    Query,
    Header,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub recipient: Option<String>,
    pub cc: Option<String>,
    pub client: String,
    #[serde(default)]
    pub client_args: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub include_checklists: bool,
}

impl TrelloConfig {
    /// The board the report is built from. Additional entries are ignored.
    pub fn board_name(&self) -> Result<&str, ReportError> {
        self.boards
            .first()
            .map(String::as_str)
            .ok_or_else(|| ReportError::Configuration("trello.boards is empty".into()))
    }
}

impl EmailConfig {
    pub fn recipient(&self) -> Result<&str, ReportError> {
        self.recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ReportError::Configuration("email.recipient is not set".into()))
    }

    /// CC address(es), `None` when unset or blank.
    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trello2wr")
        .join("config.toml")
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path.to_path_buf()).into());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
