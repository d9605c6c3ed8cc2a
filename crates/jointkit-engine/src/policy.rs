//! Validation policy
//!
//! Thresholds the validator applies, kept as data so a consumer can tune
//! them from its config file without touching the rule code.

use crate::error::{EngineError, Result};
use crate::template::{Maturity, TemplateId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Thinnest wall between wheel pockets (mm)
    pub min_pocket_wall: f64,
    /// Chute must be this many times the piece for uniform pieces
    pub bridging_ratio_uniform: f64,
    /// Same for irregular pieces
    pub bridging_ratio_irregular: f64,
    pub min_fingers_warn: u32,
    /// Smallest finger pitch before warning (mm)
    pub min_pitch: f64,
    /// Pitch below this multiple of the thickness is fragile
    pub fragile_pitch_ratio: f64,
    pub clearance_loose_ratio: f64,
    pub clearance_loose_floor: f64,
    pub slot_depth_min_ratio: f64,
    pub min_padding: f64,
    /// Wall height over thickness beyond which walls flex
    pub flex_ratio: f64,
    pub ramp_angle_min: f64,
    pub ramp_angle_max: f64,
    /// Card shoe height over width ratio that needs stabilisers
    pub tippy_ratio: f64,
    /// Templates reported as experimental
    pub experimental: Vec<TemplateId>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_pocket_wall: 2.0,
            bridging_ratio_uniform: 4.0,
            bridging_ratio_irregular: 5.0,
            min_fingers_warn: 3,
            min_pitch: 6.0,
            fragile_pitch_ratio: 1.2,
            clearance_loose_ratio: 0.6,
            clearance_loose_floor: 1.0,
            slot_depth_min_ratio: 0.5,
            min_padding: 3.0,
            flex_ratio: 40.0,
            ramp_angle_min: 10.0,
            ramp_angle_max: 15.0,
            tippy_ratio: 2.0,
            experimental: vec![TemplateId::RotaryLayered],
        }
    }
}

impl Policy {
    pub fn maturity(&self, template: TemplateId) -> Maturity {
        if self.experimental.contains(&template) {
            Maturity::Experimental
        } else {
            Maturity::Stable
        }
    }

    /// Bridging ratio for the piece shape
    pub fn bridging_ratio(&self, irregular: bool) -> f64 {
        if irregular {
            self.bridging_ratio_irregular
        } else {
            self.bridging_ratio_uniform
        }
    }

    /// Reject thresholds that would make the rules meaningless
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("min_pocket_wall", self.min_pocket_wall),
            ("bridging_ratio_uniform", self.bridging_ratio_uniform),
            ("bridging_ratio_irregular", self.bridging_ratio_irregular),
            ("min_pitch", self.min_pitch),
            ("fragile_pitch_ratio", self.fragile_pitch_ratio),
            ("clearance_loose_ratio", self.clearance_loose_ratio),
            ("clearance_loose_floor", self.clearance_loose_floor),
            ("slot_depth_min_ratio", self.slot_depth_min_ratio),
            ("min_padding", self.min_padding),
            ("flex_ratio", self.flex_ratio),
            ("tippy_ratio", self.tippy_ratio),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::out_of_range(name, value, 0.0, f64::MAX));
            }
        }
        if !(0.0..=90.0).contains(&self.ramp_angle_min) {
            return Err(EngineError::out_of_range("ramp_angle_min", self.ramp_angle_min, 0.0, 90.0));
        }
        if !(self.ramp_angle_min..=90.0).contains(&self.ramp_angle_max) {
            return Err(EngineError::out_of_range(
                "ramp_angle_max",
                self.ramp_angle_max,
                self.ramp_angle_min,
                90.0,
            ));
        }
        Ok(())
    }
}
