//! Template identifiers

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of mechanism templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// Stacking access tray with a lowered front lip
    TrayOpenFront,
    /// Tray with slotted removable dividers
    DividerRack,
    /// Closed box with a front window and lid
    WindowFront,
    /// Front-draw card shoe with an internal ramp
    CardShoe,
    /// Rotary pocket-wheel dispenser built from plates
    RotaryWheel,
    /// Layered rotary dispenser held together with screws
    RotaryLayered,
}

/// Template maturity reported in metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Stable,
    Experimental,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [
        TemplateId::TrayOpenFront,
        TemplateId::DividerRack,
        TemplateId::WindowFront,
        TemplateId::CardShoe,
        TemplateId::RotaryWheel,
        TemplateId::RotaryLayered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::TrayOpenFront => "tray_open_front",
            TemplateId::DividerRack => "divider_rack",
            TemplateId::WindowFront => "window_front",
            TemplateId::CardShoe => "card_shoe",
            TemplateId::RotaryWheel => "rotary_wheel",
            TemplateId::RotaryLayered => "rotary_layered",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateId::TrayOpenFront => "Open-front stacking tray with optional scoop notch",
            TemplateId::DividerRack => "Tray with floor slots and removable dividers",
            TemplateId::WindowFront => "Closed storage box with a windowed front",
            TemplateId::CardShoe => "Front-draw card shoe with ramp and retention lip",
            TemplateId::RotaryWheel => "Rotary pocket-wheel dispenser for small pieces",
            TemplateId::RotaryLayered => "Layered screw-stack rotary dispenser with hopper",
        }
    }

    /// Whether width/depth/height describe the cavity for this template.
    ///
    /// The card shoe derives its cavity from the card size and the rotary
    /// templates from the piece size.
    pub fn uses_cavity(&self) -> bool {
        matches!(
            self,
            TemplateId::TrayOpenFront | TemplateId::DividerRack | TemplateId::WindowFront
        )
    }

    /// Panel ids that must exist in every build of this template
    pub fn required_panels(&self) -> &'static [&'static str] {
        match self {
            TemplateId::TrayOpenFront => &["BOTTOM", "LEFT", "RIGHT", "BACK", "FRONT_LIP"],
            TemplateId::DividerRack => &["BOTTOM", "LEFT", "RIGHT", "BACK", "FRONT"],
            TemplateId::WindowFront => &["BOTTOM", "LEFT", "RIGHT", "BACK", "FRONT", "TOP"],
            TemplateId::CardShoe => &["BOTTOM", "LEFT", "RIGHT", "BACK", "FRONT"],
            TemplateId::RotaryWheel => &[
                "BASE_PLATE",
                "WHEEL",
                "SPACER_RING_1",
                "SPACER_RING_2",
                "TOP_PLATE",
                "KNOB",
            ],
            TemplateId::RotaryLayered => &["FRONT_ACRYLIC", "BACK_PLATE", "WHEEL", "KNOB"],
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maturity::Stable => f.write_str("stable"),
            Maturity::Experimental => f.write_str("experimental"),
        }
    }
}

impl FromStr for TemplateId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "candy_machine_rotary_layered" => Ok(TemplateId::RotaryLayered),
            _ => TemplateId::ALL
                .iter()
                .copied()
                .find(|id| id.as_str() == key)
                .ok_or_else(|| EngineError::UnknownTemplate(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for id in TemplateId::ALL {
            assert_eq!(id.as_str().parse::<TemplateId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_alias_and_case() {
        assert_eq!(
            "candy_machine_rotary_layered".parse::<TemplateId>().unwrap(),
            TemplateId::RotaryLayered
        );
        assert_eq!(
            " Card_Shoe ".parse::<TemplateId>().unwrap(),
            TemplateId::CardShoe
        );
    }

    #[test]
    fn test_unknown_template() {
        let err = "gumball".parse::<TemplateId>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownTemplate(ref s) if s == "gumball"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TemplateId::RotaryWheel).unwrap();
        assert_eq!(json, "\"rotary_wheel\"");
    }
}
