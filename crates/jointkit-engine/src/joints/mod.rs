//! Finger joints
//!
//! A joint is declared once per physical edge shared by two panels. The
//! planner turns it into one [`FingerPlan`], the compensator adjusts that
//! plan for kerf and clearance per side, and the edge drawer renders both
//! panel outlines from the same plan.

pub mod compensate;
pub mod edge;
pub mod plan;

pub use compensate::{compensate, drawn_slot_depth, drawn_slot_width, expected_slot_width, CompensatedPlan};
pub use edge::{draw_rect_outline, EdgeSpan};
pub use plan::{finger_count, FingerPlan, Segment, SegmentKind};

use crate::params::JointParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Joint family, used for per-family finger count overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JointFamily {
    /// Base or lid to wall
    Outer,
    /// Wall to wall corner
    Vertical,
}

impl fmt::Display for JointFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointFamily::Outer => write!(f, "OUTER"),
            JointFamily::Vertical => write!(f, "VERTICAL"),
        }
    }
}

/// Which side of a joint a panel edge draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointRole {
    /// Draws the plan's tabs as material
    Owner,
    /// Draws the complement
    Mate,
}

/// Resolved joint settings for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSettings {
    pub target_width: f64,
    pub min_fingers: u32,
    pub count_outer: Option<u32>,
    pub count_vertical: Option<u32>,
}

impl JointSettings {
    /// Default target finger width for a board thickness
    pub fn default_target_width(thickness: f64) -> f64 {
        10.0_f64.max(3.0 * thickness)
    }

    pub fn from_params(params: &JointParams, thickness: f64) -> Self {
        Self {
            target_width: params
                .finger_width
                .unwrap_or_else(|| Self::default_target_width(thickness)),
            min_fingers: params.min_fingers,
            count_outer: params.finger_count_outer,
            count_vertical: params.finger_count_vertical,
        }
    }

    /// Fixed count override for a family, if any
    pub fn fixed_count(&self, family: JointFamily) -> Option<u32> {
        match family {
            JointFamily::Outer => self.count_outer,
            JointFamily::Vertical => self.count_vertical,
        }
    }
}

/// One side of a declared joint: panel id plus side of its rectangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRef {
    pub panel: String,
    pub side: crate::panel::Side,
}

/// A joint declared by a mechanism builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    pub id: String,
    pub family: JointFamily,
    pub length: f64,
    pub owner: SideRef,
    pub mate: SideRef,
}
