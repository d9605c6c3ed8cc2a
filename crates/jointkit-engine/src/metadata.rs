//! Generation metadata
//!
//! Machine-readable summary of a design. It is embedded in the SVG as a
//! comment and returned alongside the drawing.

use crate::joints::compensate::{slot_adjust, tab_adjust};
use crate::joints::{drawn_slot_depth, expected_slot_width, FingerPlan, JointFamily, JointSpec, JointSettings};
use crate::layout::LayoutSheet;
use crate::mechanisms::Derived;
use crate::panel::Panel;
use crate::resolver::{Cavity, DimensionMode, Fabrication, ResolvedParams};
use crate::template::{Maturity, TemplateId};
use serde::{Deserialize, Serialize};

/// Joint compensation numbers for the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointRule {
    pub target_finger_width: f64,
    pub min_fingers: u32,
    pub tab_depth: f64,
    pub drawn_slot_depth: f64,
    pub expected_slot_width: f64,
    pub tab_adjust: f64,
    pub slot_adjust: f64,
}

impl JointRule {
    pub fn new(fab: &Fabrication, joints: &JointSettings) -> Self {
        Self {
            target_finger_width: joints.target_width,
            min_fingers: joints.min_fingers,
            tab_depth: fab.thickness,
            drawn_slot_depth: drawn_slot_depth(fab),
            expected_slot_width: expected_slot_width(fab),
            tab_adjust: tab_adjust(fab),
            slot_adjust: slot_adjust(fab),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSummary {
    pub id: String,
    pub family: JointFamily,
    pub owner: String,
    pub mate: String,
    pub length: f64,
    pub count: u32,
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub template: TemplateId,
    pub maturity: Maturity,
    pub generator: String,
    pub dimension_mode: DimensionMode,
    pub internal: Cavity,
    pub external: Cavity,
    pub fabrication: Fabrication,
    pub joint_rule: JointRule,
    pub joints: Vec<JointSummary>,
    pub derived: Derived,
    pub panels: Vec<String>,
    pub sheet: SheetSize,
}

impl Metadata {
    pub fn new(
        resolved: &ResolvedParams,
        maturity: Maturity,
        joints: &[JointSpec],
        plans: &[FingerPlan],
        derived: &Derived,
        panels: &[Panel],
        sheet: &LayoutSheet,
    ) -> Self {
        let joints = joints
            .iter()
            .zip(plans)
            .map(|(joint, plan)| JointSummary {
                id: joint.id.clone(),
                family: joint.family,
                owner: format!("{}.{:?}", joint.owner.panel, joint.owner.side).to_uppercase(),
                mate: format!("{}.{:?}", joint.mate.panel, joint.mate.side).to_uppercase(),
                length: plan.length,
                count: plan.count,
                pitch: plan.pitch(),
            })
            .collect();

        Self {
            template: resolved.template,
            maturity,
            generator: format!("jointkit {}", env!("CARGO_PKG_VERSION")),
            dimension_mode: resolved.mode,
            internal: resolved.internal,
            external: resolved.external,
            fabrication: resolved.fabrication,
            joint_rule: JointRule::new(&resolved.fabrication, &resolved.joints),
            joints,
            derived: derived.clone(),
            panels: panels.iter().map(|p| p.id.clone()).collect(),
            sheet: SheetSize {
                width: sheet.width,
                height: sheet.height,
            },
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
