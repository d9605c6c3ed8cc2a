//! # JointKit
//!
//! Parametric generator for laser-cut boxes and small mechanisms with paired
//! finger joints and fabrication checks.
//!
//! ## Architecture
//!
//! JointKit is organized as a workspace with multiple crates:
//!
//! 1. **jointkit-core** - Points, polygons, bounding boxes, number formatting
//! 2. **jointkit-engine** - Resolver, mechanism library, joint planner,
//!    validator, sheet layout and SVG writer
//! 3. **jointkit-settings** - Persisted defaults and validation policy
//! 4. **jointkit** - Command-line consumer of the engine
//!
//! ## Templates
//!
//! - **tray_open_front**: open-topped tray with a low scooped front
//! - **divider_rack**: tray with slotted dividers
//! - **window_front**: closed box with a window in the front
//! - **card_shoe**: card dispenser with a ramp and draw slot
//! - **rotary_wheel**: pocket wheel between two plates
//! - **rotary_layered**: stacked-plate dispenser (experimental)

pub mod cli;

pub use jointkit_engine::{
    generate, generate_by_id, generate_with_policy, GenerateParams, Generation, Maturity, Metadata,
    Policy, Severity, TemplateId, ValidationFinding,
};
pub use jointkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Human-readable output on stderr so stdout stays free for command output.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
