//! JointKit Settings Crate
//!
//! Persisted joint and layout defaults plus the validation policy, stored as
//! JSON or TOML under the platform config directory.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, JointDefaults, LayoutSettings};
pub use error::{Result, SettingsError};
