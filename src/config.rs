//! Wake configuration.
//!
//! Loaded from `~/.wake/config.toml`. Every key is optional and a missing
//! file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// GitHub's own cap on `per_page` for the events feed.
pub const MAX_EVENT_COUNT: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Wake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Who to observe when neither `--user` nor `WAKE_USER` is given.
    pub default_identity: Option<String>,

    /// How many feed events to request.
    pub event_count: u32,

    /// Width of the contribution calendar, in weeks.
    pub weeks: u32,

    /// GitHub REST API host.
    pub api_base: String,

    /// GitHub web host, for repository links and synthesized commit links.
    pub web_base: String,

    /// Contributions proxy, queried as `<base>/<identity>?y=last`.
    pub contributions_api: String,

    /// Upper bound on any single request.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_identity: None,
            event_count: 10,
            weeks: 52,
            api_base: "https://api.github.com".to_string(),
            web_base: "https://github.com".to_string(),
            contributions_api: "https://github-contributions-api.jogruber.de/v4".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load config from `~/.wake/config.toml`, falling back to defaults
    /// when there is no home directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The config file path: `~/.wake/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".wake").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.event_count == 0 || self.event_count > MAX_EVENT_COUNT {
            return Err(ConfigError::Invalid(format!(
                "event-count must be between 1 and {MAX_EVENT_COUNT}, got {}",
                self.event_count
            )));
        }
        if self.weeks == 0 {
            return Err(ConfigError::Invalid("weeks must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request-timeout-secs must be at least 1".to_string(),
            ));
        }
        for (key, value) in [
            ("api-base", &self.api_base),
            ("web-base", &self.web_base),
            ("contributions-api", &self.contributions_api),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} is empty")));
            }
        }
        Ok(())
    }
}
