//! Configuration file
//!
//! A config holds the defaults a user wants on every run: joint sizing,
//! sheet layout and the validation policy. Values given in a params file
//! always win over the config.

use crate::error::{Result, SettingsError};
use jointkit_engine::params::{JointParams, LayoutParams};
use jointkit_engine::{GenerateParams, Policy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Joint sizing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointDefaults {
    /// Target finger width (mm); derived from the thickness when unset
    pub finger_width: Option<f64>,
    pub min_fingers: u32,
    pub finger_count_outer: Option<u32>,
    pub finger_count_vertical: Option<u32>,
}

impl Default for JointDefaults {
    fn default() -> Self {
        let params = JointParams::default();
        Self {
            finger_width: params.finger_width,
            min_fingers: params.min_fingers,
            finger_count_outer: params.finger_count_outer,
            finger_count_vertical: params.finger_count_vertical,
        }
    }
}

impl From<&JointDefaults> for JointParams {
    fn from(defaults: &JointDefaults) -> Self {
        JointParams {
            finger_width: defaults.finger_width,
            min_fingers: defaults.min_fingers,
            finger_count_outer: defaults.finger_count_outer,
            finger_count_vertical: defaults.finger_count_vertical,
        }
    }
}

/// Sheet layout and drawing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Widest row before wrapping (mm)
    pub max_row_width: f64,
    pub padding: f64,
    pub margin: f64,
    pub stroke_width: f64,
    pub labels: bool,
    pub holding_tabs: bool,
    pub holding_tab_width: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            max_row_width: params.max_row_width,
            padding: params.padding,
            margin: params.margin,
            stroke_width: params.stroke_width,
            labels: params.labels,
            holding_tabs: params.holding_tabs,
            holding_tab_width: params.holding_tab_width,
        }
    }
}

impl From<&LayoutSettings> for LayoutParams {
    fn from(settings: &LayoutSettings) -> Self {
        LayoutParams {
            max_row_width: settings.max_row_width,
            padding: settings.padding,
            margin: settings.margin,
            stroke_width: settings.stroke_width,
            labels: settings.labels,
            holding_tabs: settings.holding_tabs,
            holding_tab_width: settings.holding_tab_width,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub joints: JointDefaults,
    pub layout: LayoutSettings,
    pub policy: Policy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load `path` when given, else the default location when it exists,
    /// else the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.joints.min_fingers == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "joints.min_fingers".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        self.policy.validate()?;
        self.base_params().check()?;
        Ok(())
    }

    /// Default parameters with this config's joint and layout values
    pub fn base_params(&self) -> GenerateParams {
        GenerateParams {
            joints: JointParams::from(&self.joints),
            layout: LayoutParams::from(&self.layout),
            ..GenerateParams::default()
        }
    }

    /// Overlay a flat JSON params object on [`Config::base_params`].
    ///
    /// Keys present in `overrides` replace the config value; everything
    /// else keeps the config or engine default.
    pub fn merge_params(&self, overrides: Option<&str>) -> Result<GenerateParams> {
        let mut merged = serde_json::to_value(self.base_params())?;

        if let Some(json) = overrides {
            let patch: Value = serde_json::from_str(json)?;
            let Value::Object(patch) = patch else {
                return Err(SettingsError::InvalidSetting {
                    key: "params".to_string(),
                    reason: "expected a JSON object".to_string(),
                });
            };
            if let Value::Object(base) = &mut merged {
                base.extend(patch);
            }
        }

        let params: GenerateParams = serde_json::from_value(merged)?;
        params.check()?;
        Ok(params)
    }
}

/// `<config dir>/jointkit/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("jointkit").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".to_string())
        })
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
