//! Mechanism library
//!
//! One builder per [`TemplateId`]. Builders are pure: they read a
//! [`ResolvedParams`] snapshot and declare panels, joints and the
//! template's derived quantities. They never clamp geometry to make it fit;
//! anything out of bounds is left for the validator to report.

pub mod box_shell;
pub mod card_shoe;
pub mod divider_rack;
pub mod rotary_layered;
pub mod rotary_wheel;
pub mod tray;
pub mod window_box;

pub use box_shell::{BoxShell, FrontStyle};

use crate::joints::JointSpec;
use crate::panel::PanelSpec;
use crate::resolver::{Cavity, ResolvedParams};
use crate::template::TemplateId;
use jointkit_core::{Point, Polygon};
use serde::{Deserialize, Serialize};

/// Segments used to approximate circular outlines
pub const CIRCLE_SEGMENTS: usize = 96;

/// Output of a mechanism builder
#[derive(Debug, Clone)]
pub struct Mechanism {
    pub panels: Vec<PanelSpec>,
    pub joints: Vec<JointSpec>,
    pub derived: Derived,
}

impl Mechanism {
    pub fn panel(&self, id: &str) -> Option<&PanelSpec> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_mut(&mut self, id: &str) -> Option<&mut PanelSpec> {
        self.panels.iter_mut().find(|p| p.id == id)
    }
}

/// Shared builder contract
pub trait MechanismBuilder: Sync {
    fn template(&self) -> TemplateId;
    fn build(&self, params: &ResolvedParams) -> Mechanism;
}

/// Builder for a template id
pub fn builder_for(template: TemplateId) -> &'static dyn MechanismBuilder {
    match template {
        TemplateId::TrayOpenFront => &tray::TrayOpenFront,
        TemplateId::DividerRack => &divider_rack::DividerRack,
        TemplateId::WindowFront => &window_box::WindowFront,
        TemplateId::CardShoe => &card_shoe::CardShoe,
        TemplateId::RotaryWheel => &rotary_wheel::RotaryWheel,
        TemplateId::RotaryLayered => &rotary_layered::RotaryLayered,
    }
}

/// Box shell quantities shared by the jointed templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellDerived {
    /// Cavity the shell was built around
    pub cavity: Cavity,
    pub outer_width: f64,
    pub outer_depth: f64,
    pub wall_height: f64,
    /// Front wall height above the floor when lowered
    pub front_height: Option<f64>,
    pub lid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerDerived {
    pub divider_count: u32,
    pub slot_width: f64,
    pub slot_length: f64,
    pub usable_width: f64,
    /// Slot left edges on the bottom panel
    pub slot_positions: Vec<f64>,
    /// Not enough usable width for the requested slots
    pub too_tight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardShoeDerived {
    pub slot_height: f64,
    pub slot_width: f64,
    pub lip_height: f64,
    pub ramp_rise: f64,
    /// Angle actually built once the minimum rise is applied
    pub ramp_angle_deg: f64,
    pub ramp_length: f64,
    pub stabilisers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketWheelDerived {
    pub pocket_diameter: f64,
    pub pocket_count: u32,
    pub pocket_ring_radius: f64,
    pub wheel_diameter: f64,
    /// Material left between neighbouring pockets on the pocket ring
    pub wall_between: f64,
    pub chute_width: f64,
    pub chute_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStackDerived {
    pub plate_width: f64,
    pub plate_height: f64,
    pub layers_total: u32,
    pub wheel_layers: u32,
    pub hopper_layers: u32,
    pub hopper_height: f64,
    pub screw_margin: f64,
}

/// Template-specific quantities echoed in metadata and read by validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Derived {
    Box {
        shell: ShellDerived,
    },
    DividerRack {
        shell: ShellDerived,
        dividers: DividerDerived,
    },
    CardShoe {
        shell: ShellDerived,
        shoe: CardShoeDerived,
    },
    Rotary {
        wheel: PocketWheelDerived,
        plate_width: f64,
    },
    Layered {
        wheel: PocketWheelDerived,
        stack: LayerStackDerived,
    },
}

impl Derived {
    pub fn shell(&self) -> Option<&ShellDerived> {
        match self {
            Derived::Box { shell }
            | Derived::DividerRack { shell, .. }
            | Derived::CardShoe { shell, .. } => Some(shell),
            Derived::Rotary { .. } | Derived::Layered { .. } => None,
        }
    }

    pub fn pocket_wheel(&self) -> Option<&PocketWheelDerived> {
        match self {
            Derived::Rotary { wheel, .. } | Derived::Layered { wheel, .. } => Some(wheel),
            _ => None,
        }
    }
}

/// Polygonal circle of radius `r` sitting in `0..2r` on both axes
pub fn circle_outline(r: f64) -> Polygon {
    let points = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            Point::new(r + r * angle.cos(), r + r * angle.sin())
        })
        .collect();
    Polygon::new(points)
}

/// Label a panel spec by id, used when a builder wants a different label
pub(crate) fn relabel(panels: &mut [PanelSpec], id: &str, label: &str) {
    if let Some(panel) = panels.iter_mut().find(|p| p.id == id) {
        panel.label = Some(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_for_matches_template() {
        for id in TemplateId::ALL {
            assert_eq!(builder_for(id).template(), id);
        }
    }

    #[test]
    fn test_circle_outline_bounds() {
        let circle = circle_outline(10.0);
        assert_eq!(circle.len(), CIRCLE_SEGMENTS);
        let b = circle.bbox().unwrap();
        assert!((b.width() - 20.0).abs() < 1e-9);
        assert!(b.min_x.abs() < 1e-9);
    }
}
