use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::memory::recall::DEFAULT_LIMIT;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GhostlyConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub recall: RecallConfig,
    /// Problems found while loading, held until logging is set up.
    #[serde(skip)]
    warnings: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub memory_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecallConfig {
    pub default_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let memory_file = default_ghostly_dir()
            .join("memory.json")
            .to_string_lossy()
            .into_owned();
        Self { memory_file }
    }
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

/// Returns `~/.ghostly/`, or `./.ghostly/` when no home directory is known.
pub fn default_ghostly_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ghostly")
}

/// Returns the default config file path: `~/.ghostly/config.toml`
pub fn default_config_path() -> PathBuf {
    default_ghostly_dir().join("config.toml")
}

impl GhostlyConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, validate it, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            GhostlyConfig::default()
        };

        config.validate();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Warnings collected by [`load_from`](Self::load_from). Emit these once the
    /// tracing subscriber is installed.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Replace values that would make the store unusable with their defaults.
    fn validate(&mut self) {
        if self.recall.default_limit == 0 {
            self.warnings
                .push(format!("recall.default_limit must be positive, using {DEFAULT_LIMIT}"));
            self.recall.default_limit = DEFAULT_LIMIT;
        }
    }

    /// Apply environment variable overrides
    /// (GHOSTLY_MEMORY_FILE, GHOSTLY_LOG_LEVEL, GHOSTLY_RECALL_LIMIT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GHOSTLY_MEMORY_FILE") {
            self.storage.memory_file = val;
        }
        if let Ok(val) = std::env::var("GHOSTLY_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("GHOSTLY_RECALL_LIMIT") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.recall.default_limit = n,
                _ => self
                    .warnings
                    .push(format!("ignoring invalid GHOSTLY_RECALL_LIMIT={val:?}")),
            }
        }
    }

    /// Resolve the memory file path, expanding `~` if needed.
    pub fn resolved_memory_file(&self) -> PathBuf {
        expand_tilde(&self.storage.memory_file)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
