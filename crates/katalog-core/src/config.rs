//! Configuration for the backend connection and retry behavior.
//!
//! Configuration is read-only after construction and passed explicitly into
//! every component; nothing in this crate reaches for ambient global state.
//! The CLI loads it from a TOML file with environment variable overrides;
//! tests construct it directly against a mock server.
//!
//! ## File location
//!
//! `Config::load()` looks for `katalog.toml` in the platform config directory:
//!
//! - Linux: `~/.config/katalog/katalog.toml`
//! - macOS: `~/Library/Application Support/id.sharediskon.katalog/katalog.toml`
//! - Windows: `%APPDATA%\sharediskon\katalog\katalog.toml`
//!
//! ## Environment overrides
//!
//! `KATALOG_BASE_URL`, `KATALOG_MEDIA_BASE_URL`, `KATALOG_API_USERNAME`,
//! `KATALOG_API_PASSWORD` override the corresponding file values. A config
//! file is optional when `KATALOG_BASE_URL` is set.
//!
//! ## Example file
//!
//! ```toml
//! [backend]
//! base_url = "https://cms.sharediskon.example"
//! media_base_url = "https://cms.sharediskon.example"
//! page_limit = 100
//! timeout_secs = 30
//!
//! [backend.auth]
//! username = "api"
//! password = "secret"
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 500
//! ```

use crate::retry::RetryPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Top-level configuration: backend connection plus retry policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Retry behavior for transport operations.
    #[serde(default)]
    pub retry: RetrySettings,
}

/// Connection settings for the headless CMS backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the JSON resource API, without a trailing slash.
    pub base_url: String,
    /// Prefix prepended to relative media file URLs. Usually the same origin
    /// as `base_url`, but CDN setups point it elsewhere.
    #[serde(default)]
    pub media_base_url: String,
    /// Optional basic-auth credential applied to every request.
    #[serde(default)]
    pub auth: Option<BasicAuth>,
    /// Page size requested when collecting full collections.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Static basic-auth credential for the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Serializable retry knobs, converted to [`RetryPolicy`] for use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Number of retries after the initial attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds. Doubles per attempt.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Optional cap on any single backoff delay, in milliseconds.
    /// Unset reproduces the historical unbounded doubling.
    #[serde(default)]
    pub max_delay_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            media_base_url: String::new(),
            auth: None,
            page_limit: default_page_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

const fn default_page_limit() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_delay_ms() -> u64 {
    500
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: None,
        }
    }
}

impl RetrySettings {
    /// Converts the serialized knobs into a runtime [`RetryPolicy`].
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: self.max_delay_ms.map(Duration::from_millis),
        }
    }
}

impl Config {
    /// Loads configuration from the default location with env overrides.
    ///
    /// A missing file is not an error as long as `KATALOG_BASE_URL` is set;
    /// a present-but-invalid file is.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = match path {
            Some(ref p) if p.exists() => Self::load_from(p)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file, then applies env
    /// overrides and validates.
    pub fn load_with_overrides(path: &Path) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML config file without overrides or validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Platform config file location, if a home directory can be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "sharediskon", "katalog")
            .map(|dirs| dirs.config_dir().join("katalog.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("KATALOG_BASE_URL") {
            self.backend.base_url = v;
        }
        if let Ok(v) = std::env::var("KATALOG_MEDIA_BASE_URL") {
            self.backend.media_base_url = v;
        }
        if let (Ok(user), Ok(pass)) = (
            std::env::var("KATALOG_API_USERNAME"),
            std::env::var("KATALOG_API_PASSWORD"),
        ) {
            self.backend.auth = Some(BasicAuth {
                username: user,
                password: pass,
            });
        }
    }

    /// Checks that the configured URLs are well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.is_empty() {
            return Err(Error::Config(
                "backend.base_url is not set (file or KATALOG_BASE_URL)".to_string(),
            ));
        }
        Url::parse(&self.backend.base_url)
            .map_err(|e| Error::Config(format!("backend.base_url: {e}")))?;
        if self.backend.media_base_url.is_empty() {
            // Media files are served from the backend origin unless told otherwise.
            return Ok(());
        }
        Url::parse(&self.backend.media_base_url)
            .map_err(|e| Error::Config(format!("backend.media_base_url: {e}")))?;
        Ok(())
    }
}

impl BackendConfig {
    /// Base URL for relative media paths: the explicit media base if set,
    /// otherwise the backend origin.
    #[must_use]
    pub fn media_base(&self) -> &str {
        if self.media_base_url.is_empty() {
            &self.base_url
        } else {
            &self.media_base_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
base_url = "https://cms.example"
media_base_url = "https://cdn.example"
page_limit = 50
timeout_secs = 10

[backend.auth]
username = "api"
password = "secret"

[retry]
max_retries = 5
initial_delay_ms = 250
max_delay_ms = 4000
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "https://cms.example");
        assert_eq!(config.backend.media_base(), "https://cdn.example");
        assert_eq!(config.backend.page_limit, 50);
        assert_eq!(config.backend.auth.as_ref().unwrap().username, "api");

        let policy = config.retry.policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Some(Duration::from_millis(4000)));
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[backend]\nbase_url = \"https://cms.example\"\n").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.backend.page_limit, 100);
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.auth.is_none());
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.max_delay_ms, None);
        // Media base falls back to the backend origin.
        assert_eq!(config.backend.media_base(), "https://cms.example");
        config.validate().unwrap();
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = Config {
            backend: BackendConfig {
                base_url: "not a url".to_string(),
                ..BackendConfig::default()
            },
            retry: RetrySettings::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_missing_base_url() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }
}
