//! Kerf and clearance compensation
//!
//! The beam removes half a kerf on each side of a cut line, so a drawn tab
//! shrinks by one kerf and a drawn slot grows by one. Tabs are drawn
//! `kerf - clearance / 2` wider and slots `clearance / 2 - kerf` wider, which
//! leaves about `clearance` of play after cutting. The drawn segments are then
//! rescaled so the edge keeps its nominal length.

use super::plan::{absorb_drift, FingerPlan, Segment, SegmentKind};
use super::JointRole;
use crate::resolver::Fabrication;

/// Drawn slot width for a board: `t + clearance - kerf`
pub fn drawn_slot_width(fab: &Fabrication) -> f64 {
    fab.thickness + fab.clearance - fab.kerf
}

/// Shallowest recess still drawn when kerf eats the whole slot
pub const MIN_DRAWN_SLOT: f64 = 0.2;

/// Depth a slot is drawn to, floored at [`MIN_DRAWN_SLOT`]
pub fn drawn_slot_depth(fab: &Fabrication) -> f64 {
    drawn_slot_width(fab).max(MIN_DRAWN_SLOT)
}

/// Slot width expected after cutting: `t + clearance`
pub fn expected_slot_width(fab: &Fabrication) -> f64 {
    fab.thickness + fab.clearance
}

/// Width change applied to every drawn tab
pub fn tab_adjust(fab: &Fabrication) -> f64 {
    fab.kerf - fab.clearance / 2.0
}

/// Width change applied to every drawn slot
pub fn slot_adjust(fab: &Fabrication) -> f64 {
    fab.clearance / 2.0 - fab.kerf
}

/// One side's drawn view of a finger plan
#[derive(Debug, Clone, PartialEq)]
pub struct CompensatedPlan {
    pub segments: Vec<Segment>,
    /// How far tabs stand out from the recessed slots on this side
    pub tab_depth: f64,
    /// How far slots are cut into the panel
    pub slot_depth: f64,
}

impl CompensatedPlan {
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.width).sum()
    }
}

/// Drawn segments for `role`, compensated and renormalised to the plan length.
pub fn compensate(plan: &FingerPlan, role: JointRole, fab: &Fabrication) -> CompensatedPlan {
    let tab = tab_adjust(fab);
    let slot = slot_adjust(fab);

    let mut segments: Vec<Segment> = plan
        .segments
        .iter()
        .map(|s| {
            let kind = match role {
                JointRole::Owner => s.kind,
                JointRole::Mate => s.kind.flipped(),
            };
            let adjust = match kind {
                SegmentKind::Tab => tab,
                SegmentKind::Slot => slot,
            };
            Segment {
                kind,
                width: (s.width + adjust).max(0.0),
            }
        })
        .collect();

    let drawn: f64 = segments.iter().map(|s| s.width).sum();
    if drawn > 0.0 {
        let scale = plan.length / drawn;
        for s in &mut segments {
            s.width *= scale;
        }
    }
    absorb_drift(&mut segments, plan.length);

    CompensatedPlan {
        segments,
        tab_depth: fab.thickness,
        slot_depth: drawn_slot_depth(fab),
    }
}
