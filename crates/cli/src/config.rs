//! Process configuration read from the environment (and an optional `.env`).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use tradedesk_auth::{AuthError, FileTokenStore, SessionContext};
use tradedesk_client::ApiConfig;
use tradedesk_observability::LogFormat;
use tradedesk_views::DEFAULT_PAGE_SIZE;

pub const ERP_URL: &str = "TRADEDESK_ERP_URL";
pub const PORTAL_URL: &str = "TRADEDESK_PORTAL_URL";
pub const UPLOADS_URL: &str = "TRADEDESK_UPLOADS_URL";
pub const TIMEOUT_SECS: &str = "TRADEDESK_TIMEOUT_SECS";
pub const TOKEN_FILE: &str = "TRADEDESK_TOKEN_FILE";
pub const LOG_FORMAT: &str = "TRADEDESK_LOG_FORMAT";
pub const PAGE_SIZE: &str = "TRADEDESK_PAGE_SIZE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Token location; `None` means the platform data directory.
    pub token_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            token_file: None,
            log_format: LogFormat::Pretty,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ERP_URL) {
            config.api.erp_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(url) = get(PORTAL_URL) {
            config.api.portal_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(url) = get(UPLOADS_URL) {
            config.api.uploads_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(TIMEOUT_SECS, &raw, e.to_string()))?;
            if secs == 0 {
                return Err(invalid(TIMEOUT_SECS, &raw, "must be at least 1"));
            }
            config.api.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = get(TOKEN_FILE) {
            config.token_file = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = get(LOG_FORMAT) {
            config.log_format = raw.parse().map_err(|e: String| invalid(LOG_FORMAT, &raw, e))?;
        }
        if let Some(raw) = get(PAGE_SIZE) {
            let size: usize = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(PAGE_SIZE, &raw, e.to_string()))?;
            if size == 0 {
                return Err(invalid(PAGE_SIZE, &raw, "must be at least 1"));
            }
            config.page_size = size;
        }
        Ok(config)
    }

    /// Session backed by the configured token file.
    pub fn session(&self) -> Result<SessionContext, AuthError> {
        let store = match &self.token_file {
            Some(path) => FileTokenStore::new(path.clone()),
            None => FileTokenStore::in_data_dir()?,
        };
        tracing::debug!("Using token file {}", store.path().display());
        Ok(SessionContext::new(store))
    }
}
