use crate::error::{Error, Result};
use crate::provider::{BASE_URL_ENV, ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint base URL. Default: `https://api.openai.com/v1`.
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds. None waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds. None leaves it to the OS.
    pub connect_timeout_secs: Option<u64>,
}

impl Config {
    /// `<config_dir>/quip/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("quip").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".quip/config.toml"))
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let config = Self::load_from(path)?.with_env_overrides(|var| std::env::var(var).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// `OPENAI_BASE_URL` replaces the configured base URL when non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            self.base_url = Some(url);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("timeout_secs", self.timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
        ] {
            if value == Some(0) {
                return Err(Error::Config(format!("{key} must be greater than zero")));
            }
        }
        if let Some(url) = &self.base_url
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            return Err(Error::Config(format!("base_url is not an http(s) URL: {url}")));
        }
        Ok(())
    }

    /// Transport settings for the completion client.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}
