//! Runtime settings.
//!
//! Values are resolved in three layers, later layers winning:
//! 1. Built-in defaults
//! 2. An optional YAML file (`--config settings.yaml`)
//! 3. Command-line flags and their environment variables
//!
//! ```yaml
//! base_url: https://www.azernews.az
//! data_dir: ./data
//! bind: 0.0.0.0:5000
//! request_timeout_secs: 30
//! ```

use crate::cli::Cli;
use crate::models::Category;
use serde::Deserialize;
use std::error::Error;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.azernews.az";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Site origin without a trailing slash.
    pub base_url: String,
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
    /// `None` leaves the HTTP client without a timeout.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

/// Shape of the optional YAML settings file. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub bind: Option<SocketAddr>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl FileSettings {
    /// Parse a YAML settings document.
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl Settings {
    /// Resolve settings from the CLI, reading the YAML file it points at, if any.
    #[instrument(level = "debug", skip_all)]
    pub async fn load(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
                let parsed = FileSettings::from_yaml(&text)?;
                info!(path = %path.display(), "Loaded settings file");
                parsed
            }
            None => FileSettings::default(),
        };
        Self::resolve(file, cli)
    }

    /// Merge file values with CLI overrides on top of the defaults.
    pub fn resolve(file: FileSettings, cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_base_url(&base_url)?;

        let data_dir = cli
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind = match cli.bind_override() {
            Some(addr) => addr,
            None => match file.bind {
                Some(addr) => addr,
                None => DEFAULT_BIND.parse()?,
            },
        };

        let timeout_secs = cli
            .timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        let user_agent = file
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let settings = Self {
            base_url,
            data_dir,
            bind,
            request_timeout,
            user_agent,
        };
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    /// Path of a category's JSON artifact.
    pub fn artifact_path(&self, category: Category) -> PathBuf {
        artifact_path(&self.data_dir, category)
    }
}

/// Path of a category's JSON artifact inside `data_dir`.
pub fn artifact_path(data_dir: &Path, category: Category) -> PathBuf {
    data_dir.join(category.file_name())
}

/// Check that `raw` is an absolute http(s) origin and strip any trailing slash.
pub fn validate_base_url(raw: &str) -> Result<String, Box<dyn Error>> {
    let parsed = Url::parse(raw).map_err(|e| format!("invalid base URL {raw:?}: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(format!("base URL must be an http(s) origin: {raw}").into());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
