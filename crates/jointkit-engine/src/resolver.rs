//! Dimension resolution
//!
//! Turns user-entered sizes into the canonical internal cavity. The
//! conversion is an exact affine map on thickness: two opposing walls on
//! width and depth, one base on height. It never clamps. A non-positive
//! cavity is left for the validator to report.

use crate::error::Result;
use crate::joints::JointSettings;
use crate::params::GenerateParams;
use crate::template::TemplateId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How width/depth/height were measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionMode {
    /// Usable space inside the walls
    #[default]
    Internal,
    /// Overall footprint including material
    External,
}

impl fmt::Display for DimensionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionMode::Internal => write!(f, "internal"),
            DimensionMode::External => write!(f, "external"),
        }
    }
}

/// Width, depth and height of a box volume in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cavity {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Cavity {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.depth > 0.0 && self.height > 0.0
    }
}

/// Canonical internal cavity for the given entry mode.
pub fn resolve(mode: DimensionMode, width: f64, depth: f64, height: f64, thickness: f64) -> Cavity {
    match mode {
        DimensionMode::Internal => Cavity::new(width, depth, height),
        DimensionMode::External => Cavity::new(
            width - 2.0 * thickness,
            depth - 2.0 * thickness,
            height - thickness,
        ),
    }
}

/// Inverse of [`resolve`] for external entry
pub fn to_external(cavity: Cavity, thickness: f64) -> Cavity {
    Cavity::new(
        cavity.width + 2.0 * thickness,
        cavity.depth + 2.0 * thickness,
        cavity.height + thickness,
    )
}

/// Thickness, kerf and clearance for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fabrication {
    pub thickness: f64,
    pub kerf: f64,
    pub clearance: f64,
}

/// Immutable parameter snapshot consumed by the mechanism builders
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub template: TemplateId,
    pub mode: DimensionMode,
    pub internal: Cavity,
    pub external: Cavity,
    pub fabrication: Fabrication,
    pub joints: JointSettings,
    /// Template-specific fields, read by the builders
    pub params: GenerateParams,
}

impl ResolvedParams {
    pub fn thickness(&self) -> f64 {
        self.fabrication.thickness
    }
}

/// Check `params` and produce the canonical snapshot for `template`.
pub fn resolve_params(template: TemplateId, params: &GenerateParams) -> Result<ResolvedParams> {
    params.check()?;

    let dims = &params.dimensions;
    let fab = &params.fabrication;
    let internal = resolve(
        dims.dimension_mode,
        dims.width,
        dims.depth,
        dims.height,
        fab.thickness,
    );
    let external = to_external(internal, fab.thickness);
    let joints = JointSettings::from_params(&params.joints, fab.thickness);

    debug!(
        "Resolved {} cavity {}x{}x{} (t={}, target finger {})",
        template, internal.width, internal.depth, internal.height, fab.thickness, joints.target_width
    );

    Ok(ResolvedParams {
        template,
        mode: dims.dimension_mode,
        internal,
        external,
        fabrication: Fabrication {
            thickness: fab.thickness,
            kerf: fab.kerf,
            clearance: fab.clearance,
        },
        joints,
        params: params.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_offsets() {
        let cavity = Cavity::new(135.0, 90.0, 80.0);
        let ext = to_external(cavity, 3.0);
        assert_eq!(ext, Cavity::new(141.0, 96.0, 83.0));
    }

    #[test]
    fn test_external_mode_round_trip() {
        let inner = resolve(DimensionMode::External, 141.0, 96.0, 83.0, 3.0);
        assert_eq!(inner, Cavity::new(135.0, 90.0, 80.0));
        assert_eq!(to_external(inner, 3.0), Cavity::new(141.0, 96.0, 83.0));
    }

    #[test]
    fn test_never_clamps() {
        let inner = resolve(DimensionMode::External, 4.0, 4.0, 2.0, 3.0);
        assert_eq!(inner, Cavity::new(-2.0, -2.0, -1.0));
        assert!(!inner.is_positive());
    }

    #[test]
    fn test_resolve_params_default_finger_width() {
        let resolved =
            resolve_params(TemplateId::TrayOpenFront, &GenerateParams::default()).unwrap();
        assert_eq!(resolved.joints.target_width, 10.0);
        assert_eq!(resolved.external.width, 141.0);

        let mut thick = GenerateParams::default();
        thick.fabrication.thickness = 6.0;
        let resolved = resolve_params(TemplateId::TrayOpenFront, &thick).unwrap();
        assert_eq!(resolved.joints.target_width, 18.0);
    }
}
