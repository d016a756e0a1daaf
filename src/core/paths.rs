// src/core/paths.rs

use crate::constants::CONFIG_DIR;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur while locating megacl's directories.
#[derive(Error, Debug)]
pub enum PathError {
    /// The user's home directory could not be determined.
    #[error("Could not find the user home directory.")]
    HomeDirNotFound,
}

/// Returns the megacl configuration directory (`~/.megacl`).
///
/// The directory is not created here; `ConfigStore` creates it lazily on the
/// first save.
pub fn config_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR))
        .ok_or(PathError::HomeDirNotFound)
}
