//! Runtime configuration.
//!
//! # Responsibility
//! - Describe the tunables of the CRM core (logging, text generator,
//!   avatar template) with compiled defaults.
//! - Layer a TOML file and environment variables on top of the defaults.
//!
//! # Invariants
//! - Resolution order: defaults, then file, then environment.
//! - Secrets (API key) are never included in `Debug` output.
//!
//! ## Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CRM_LOG_LEVEL` | `log_level` |
//! | `CRM_LOG_DIR` | `log_dir` |
//! | `CRM_GENERATOR_ENDPOINT` | `generator.endpoint` |
//! | `CRM_GENERATOR_MODEL` | `generator.model` |
//! | `GEMINI_API_KEY`, `API_KEY` | `generator.api_key` |

use crate::logging::default_log_level;
use crate::store::entity_store::DEFAULT_AVATAR_URL_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_GENERATOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GENERATOR_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Text generator settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATOR_ENDPOINT.to_string(),
            model: DEFAULT_GENERATOR_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_GENERATOR_TIMEOUT_SECS,
        }
    }
}

impl Debug for GeneratorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub avatar_url_template: String,
    pub generator: GeneratorConfig,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            avatar_url_template: DEFAULT_AVATAR_URL_TEMPLATE.to_string(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl CrmConfig {
    /// Loads defaults, then `path` (if given), then process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup` (normally `std::env::var`).
    ///
    /// Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(level) = get("CRM_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(dir) = get("CRM_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(endpoint) = get("CRM_GENERATOR_ENDPOINT") {
            self.generator.endpoint = endpoint;
        }
        if let Some(model) = get("CRM_GENERATOR_MODEL") {
            self.generator.model = model;
        }
        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.generator.api_key = Some(key);
        }
    }
}
