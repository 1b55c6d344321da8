//! Configuration loaded from `~/.config/sourcer/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::fingerprint::ClientPlatform;
use crate::http_client::FetcherSettings;
use crate::proxy::DEFAULT_PROXY_URL;

/// Top-level configuration file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcerConfig {
    /// Base URL of the M3U8 proxy.
    pub proxy_url: String,
    /// Platform family of the player.
    pub platform: ClientPlatform,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Outbound proxy for all site requests.
    pub upstream_proxy: Option<String>,
}

impl Default for SourcerConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            platform: ClientPlatform::Desktop,
            timeout_secs: 30,
            upstream_proxy: None,
        }
    }
}

impl SourcerConfig {
    /// Fetcher settings derived from this configuration.
    #[must_use]
    pub fn fetcher_settings(&self) -> FetcherSettings {
        FetcherSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            upstream_proxy: self.upstream_proxy.clone(),
            ..FetcherSettings::default()
        }
    }
}

/// Load configuration from `path`, or from the default location.
///
/// A missing default file yields the defaults; an explicitly given path
/// must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<SourcerConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_path();
            if !default.exists() {
                return Ok(SourcerConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sourcer")
        .join("config.toml")
}
