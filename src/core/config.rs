// src/core/config.rs

//! Persistence of the key/value configuration that wraps every run.
//!
//! The dispatch lifecycle is strict: the map is loaded once before parsing
//! begins and saved once after parsing completes, on success and failure
//! alike. Nothing else in the process touches the file.

use crate::constants::CONFIG_FILENAME;
use crate::core::paths::{self, PathError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// The persisted configuration: a flat JSON object map. The values are
/// opaque to the dispatch core; the session decides what to store in it.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Represents errors that can occur while loading or saving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Failed to parse config file at '{path}': {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize configuration: {0}")]
    Serialize(serde_json::Error),
}

/// Loads and saves the configuration map at a fixed location on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at the default location (`~/.megacl/config.json`).
    pub fn from_home() -> Result<Self, ConfigError> {
        Ok(Self {
            path: paths::config_dir()?.join(CONFIG_FILENAME),
        })
    }

    /// Creates a store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the configuration map. A missing file is not an error: it
    /// yields an empty map, exactly as a first run should see it.
    pub fn load(&self) -> Result<ConfigMap, ConfigError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigMap::new()),
            Err(e) => return Err(e.into()),
        };
        let map: ConfigMap = serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Loaded {} config entries from {}", map.len(), self.path.display());
        Ok(map)
    }

    /// Writes the configuration map, creating the parent directory if needed.
    /// The map carries session credentials, so the directory is restricted to
    /// the owner on Unix.
    pub fn save(&self, config: &ConfigMap) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
            }
        }
        let raw = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, raw)?;
        log::debug!("Saved {} config entries to {}", config.len(), self.path.display());
        Ok(())
    }
}

// MARK: --- UNIT TESTS ---
