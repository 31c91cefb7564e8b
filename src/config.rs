//! Configuration for Onsave
//!
//! Settings resolve in priority order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ONSAVE_*)
//! 3. Project config (onsave.toml in the working directory)
//! 4. Built-in defaults (paper.tex / make, lowest priority)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OnsaveError, OnsaveResult};

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "onsave.toml";

/// Onsave configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// File to watch
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Command to run when the file is saved
    #[serde(default = "default_command")]
    pub command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            command: default_command(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("paper.tex")
}

fn default_command() -> String {
    "make".to_string()
}

/// Non-fatal warning emitted while loading a config file
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> OnsaveResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> OnsaveResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| OnsaveError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load the project config from `dir` with env overrides applied.
    ///
    /// A missing config file is not an error (defaults are used); a
    /// malformed one is.
    pub fn load_or_default(dir: &Path) -> OnsaveResult<(Self, Vec<ConfigWarning>)> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            let (config, warnings) = Self::load_with_warnings(&path)?;
            Ok((config.with_env_overrides(), warnings))
        } else {
            Ok((Self::default().with_env_overrides(), Vec::new()))
        }
    }

    /// Apply environment variable overrides (ONSAVE_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(file) = std::env::var("ONSAVE_FILE") {
            if !file.is_empty() {
                self.file = PathBuf::from(file);
            }
        }

        if let Ok(command) = std::env::var("ONSAVE_COMMAND") {
            if !command.is_empty() {
                self.command = command;
            }
        }

        self
    }

    /// Apply CLI overrides (highest priority).
    pub fn with_cli_overrides(mut self, file: Option<PathBuf>, command: Option<String>) -> Self {
        if let Some(file) = file {
            self.file = file;
        }
        if let Some(command) = command {
            self.command = command;
        }
        self
    }
}
