//! Error types for the settings crate.

use jointkit_engine::EngineError;
use std::io;
use thiserror::Error;

/// Config file and merge errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading the config file failed.
    #[error("Cannot read config: {0}")]
    LoadError(String),

    /// Writing the config file failed.
    #[error("Cannot write config: {0}")]
    SaveError(String),

    /// A config or params value cannot be used.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No config directory, or it could not be created.
    #[error("Config directory: {0}")]
    ConfigDirectory(String),

    /// Only `.json` and `.toml` files are understood.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    /// The engine rejected the merged parameters or the policy.
    #[error("Engine rejected settings: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
