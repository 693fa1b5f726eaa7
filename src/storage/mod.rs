//! Persistent storage
//!
//! This module handles persistence of the user configuration.

pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Get the platform configuration directory for the application
pub fn get_config_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("", "", "snapask")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(StorageError::NoConfigDir)
}
