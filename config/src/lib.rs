//! Configuration loading and resolution for Motorlot.
//!
//! Raw TOML deserialization structs (with `Option` fields) stay private to
//! this crate. [`ClientConfig`] is the resolved, validated form the rest of
//! the workspace consumes; constructing one proves the values are usable.
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults (`http://localhost:8080/api`, 30s timeout)
//! 2. `config.toml` in the platform config directory
//! 3. `MOTORLOT_API_URL` / `MOTORLOT_TIMEOUT_SECS` environment variables

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default backend base, matching a locally-run dealership service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: usize = 12;

const ENV_API_URL: &str = "MOTORLOT_API_URL";
const ENV_TIMEOUT_SECS: &str = "MOTORLOT_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid api base url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api base url {0:?} must use http or https")]
    UnsupportedScheme(String),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("default page size must be greater than zero")]
    ZeroPageSize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    default_page_size: Option<usize>,
}

/// Resolved client configuration. Existence of a value is the proof of its
/// validity: the base URL parsed, the timeout is non-zero.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_base_url: Url,
    timeout: Duration,
    default_page_size: usize,
}

impl ClientConfig {
    /// Load from the default config file (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let raw = match Self::path() {
            Some(path) if path.is_file() => read_raw(&path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                RawConfig::default()
            }
            None => RawConfig::default(),
        };
        Self::resolve(raw, &env_overrides())
    }

    /// Load from an explicit file, still honoring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = read_raw(path)?;
        Self::resolve(raw, &env_overrides())
    }

    /// Parse a TOML document without touching the filesystem or
    /// environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::resolve(raw, &Overrides::default())
    }

    /// `~/.config/motorlot/config.toml` (platform equivalent), when a
    /// config directory exists at all.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("motorlot").join("config.toml"))
    }

    fn resolve(raw: RawConfig, overrides: &Overrides) -> Result<Self, ConfigError> {
        let base = overrides
            .api_base_url
            .clone()
            .or(raw.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = parse_base_url(&base)?;

        let timeout_secs = overrides
            .timeout_secs
            .or(raw.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let default_page_size = raw.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(Self {
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
            default_page_size,
        })
    }

    /// Base URL of the backend, including the `/api` prefix. Never ends
    /// with a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Replace the base URL, e.g. from a `--api-url` flag.
    pub fn with_api_base_url(mut self, base: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url(base)?;
        Ok(self)
    }
}

#[derive(Debug, Default)]
struct Overrides {
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

fn env_overrides() -> Overrides {
    let timeout_secs = std::env::var(ENV_TIMEOUT_SECS)
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    Overrides {
        api_base_url: std::env::var(ENV_API_URL).ok(),
        timeout_secs,
    }
}

fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(raw)
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(value.to_owned()));
    }
    Ok(url)
}
