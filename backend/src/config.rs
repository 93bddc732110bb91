//! Application configuration.
//!
//! Settings come from `celestial.toml` when one is found, then environment
//! variables override individual keys. Every key has a default, so running
//! without a file is fine.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3001
//! allowed_origins = ["http://localhost:8080"]
//! body_limit_mb = 50
//!
//! [analysis]
//! max_image_size_mb = 10.0
//!
//! [scoring]
//! policy = "additive"
//!
//! [repository]
//! type = "local"
//! max_sessions = 10000
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::db::{RepositoryType, DEFAULT_MAX_SESSIONS};
use crate::models::ScoringPolicy;
use crate::services::DEFAULT_MAX_IMAGE_SIZE_MB;

/// Config file name looked up by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "celestial.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_max_image_size_mb")]
    pub max_image_size_mb: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub policy: ScoringPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default)]
    pub repo_type: RepositoryType,
    /// Session records kept before the least recently visited is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_body_limit_mb() -> usize {
    50
}

fn default_max_image_size_mb() -> f64 {
    DEFAULT_MAX_IMAGE_SIZE_MB
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: RepositoryType::default(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_image_size_mb: default_max_image_size_mb(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `celestial.toml` from the first standard location that has one.
    ///
    /// Searches the current directory, `backend/`, then the parent
    /// directory. Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// File config (or defaults) with process environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?.unwrap_or_default();
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Override settings from `lookup`, which maps an env var name to its value.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`
    /// - `ALLOWED_ORIGINS`: comma-separated list
    /// - `MAX_IMAGE_SIZE_MB`
    /// - `SCORING_POLICY`: `additive` | `continuous`
    /// - `REPOSITORY_TYPE`: `local`
    /// - `MAX_SESSIONS`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_value("PORT", &port)?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(max) = lookup("MAX_IMAGE_SIZE_MB") {
            self.analysis.max_image_size_mb = parse_value("MAX_IMAGE_SIZE_MB", &max)?;
        }
        if let Some(policy) = lookup("SCORING_POLICY") {
            self.scoring.policy = parse_value("SCORING_POLICY", &policy)?;
        }
        if let Some(repo_type) = lookup("REPOSITORY_TYPE") {
            self.repository.repo_type = parse_value("REPOSITORY_TYPE", &repo_type)?;
        }
        if let Some(max) = lookup("MAX_SESSIONS") {
            self.repository.max_sessions = parse_value("MAX_SESSIONS", &max)?;
        }
        self.validate()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.server.body_limit_mb.saturating_mul(1024 * 1024)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let max = self.analysis.max_image_size_mb;
        if !max.is_finite() || max <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "max_image_size_mb",
                value: max.to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        if self.server.body_limit_mb == 0 {
            return Err(ConfigError::InvalidValue {
                key: "body_limit_mb",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
