//! Configuration infrastructure
//!
//! Portal endpoint, HTTP client behaviour, page selectors and logging are
//! kept in one serde-backed [`PortalConfig`]. [`ConfigManager`] persists it as
//! JSON in the user's config directory; credentials never go into that file
//! and are supplied separately through [`Credentials`].

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use super::portal_error::{PortalError, PortalResult};
use crate::domain::constants::portal;

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Portal root; the dispatcher lives at `<base_url>/scripts/mgrqispi.dll`
    pub base_url: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Whether to follow HTTP 3xx redirects
    pub follow_redirects: bool,

    /// CSS selectors for the scraped pages
    pub selectors: PageSelectors,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: portal::DEFAULT_BASE_URL.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            follow_redirects: true,
            selectors: PageSelectors::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PortalConfig {
    /// Default configuration pointing at another deployment
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// CSS selectors for the portal pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Semester drop-down entries on the course results page
    pub semester_option: String,

    /// Module result table on the course results page
    pub module_table: String,

    /// Exam table on the result details page
    pub exam_table: String,

    /// Document listing table
    pub document_table: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            semester_option: "option".to_string(),
            module_table: "table.nb.list".to_string(),
            exam_table: "table.tb".to_string(),
            document_table: "table.tb".to_string(),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; next to the executable when unset
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

/// Portal login credentials
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub const USERNAME_VAR: &'static str = "CAMPUSNET_USERNAME";
    pub const PASSWORD_VAR: &'static str = "CAMPUSNET_PASSWORD";

    /// Rejects empty usernames and passwords before anything is sent.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> PortalResult<Self> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(PortalError::MissingCredential("Username"));
        }
        if password.is_empty() {
            return Err(PortalError::MissingCredential("Password"));
        }
        Ok(Self { username, password })
    }

    /// Reads `CAMPUSNET_USERNAME` / `CAMPUSNET_PASSWORD` from the environment.
    pub fn from_env() -> PortalResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PortalResult<Self> {
        let username = lookup(Self::USERNAME_VAR).ok_or(PortalError::MissingCredential("Username"))?;
        let password = lookup(Self::PASSWORD_VAR).ok_or(PortalError::MissingCredential("Password"))?;
        Self::new(username, password)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration manager for loading and saving settings
#[derive(Debug)]
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("campusnet");

        Ok(config_dir)
    }

    /// Configuration manager for the default location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Configuration manager for an explicit file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<PortalConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = PortalConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        match serde_json::from_str::<PortalConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(parse_error) => {
                warn!("Configuration file unreadable: {}", parse_error);
                warn!("Resetting to default configuration");

                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(e) = fs::copy(&self.config_path, &backup_path).await {
                    warn!("Failed to create backup of corrupted config: {}", e);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                let default_config = PortalConfig::default();
                self.save_config(&default_config).await?;
                Ok(default_config)
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &PortalConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Default values
pub mod defaults {
    pub const USER_AGENT: &str = concat!("campusnet/", env!("CARGO_PKG_VERSION"));
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
    pub const LOG_LEVEL: &str = "info";
    pub const CONFIG_FILE_NAME: &str = "campusnet_config.json";
}
