//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file
//! means defaults; unknown keys are rejected by `set`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `http` | `http` (remote API) or `local` (books.json) |
//! | `api-url` | `https://booksapi-0z3z.onrender.com` | Base URL of the books API |
//! | `page-size` | `5` | Books per page |
//! | `timeout-secs` | `30` | HTTP request timeout |

use crate::error::{BookError, Result};
use crate::store::http::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["backend", "api-url", "page-size", "timeout-secs"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Http,
    Local,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Http => write!(f, "http"),
            Backend::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Backend {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" | "remote" => Ok(Backend::Http),
            "local" | "file" => Ok(Backend::Local),
            other => Err(BookError::Config(format!(
                "Unknown backend '{}' (expected http or local)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BooklistConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BooklistConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_url: default_api_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BooklistConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BookError::Io)?;
        let config: BooklistConfig =
            serde_json::from_str(&content).map_err(BookError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BookError::Serialization)?;
        fs::write(config_path, content).map_err(BookError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BookError::Config("page-size must be at least 1".into()));
        }
        if self.api_url.trim().is_empty() {
            return Err(BookError::Config("api-url cannot be empty".into()));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "backend" => Some(self.backend.to_string()),
            "api-url" => Some(self.api_url.clone()),
            "page-size" => Some(self.page_size.to_string()),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |what: &str| BookError::Config(format!("{} must be a number", what));
        match normalize_key(key).as_str() {
            "backend" => self.backend = value.parse()?,
            "api-url" => self.api_url = value.trim().to_string(),
            "page-size" => self.page_size = value.trim().parse().map_err(|_| invalid("page-size"))?,
            "timeout-secs" => {
                self.timeout_secs = value.trim().parse().map_err(|_| invalid("timeout-secs"))?
            }
            other => {
                return Err(BookError::Config(format!(
                    "Unknown config key '{}' (known keys: {})",
                    other,
                    KEYS.join(", ")
                )))
            }
        }
        self.validate()
    }
}

// Accept `page_size` as well as `page-size`.
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}
