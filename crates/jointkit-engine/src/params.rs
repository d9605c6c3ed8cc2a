//! Generation parameters
//!
//! [`GenerateParams`] is the flat record accepted by `generate`. It is built
//! from several sections flattened into one serde map, so a params file is a
//! single JSON object such as `{"width": 120, "kerf": 0.15}` and any field
//! left out takes its default.

use crate::error::{ParameterError, Result};
use crate::resolver::DimensionMode;
use serde::{Deserialize, Serialize};

/// Cavity dimensions as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionParams {
    pub dimension_mode: DimensionMode,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Default for DimensionParams {
    fn default() -> Self {
        Self {
            dimension_mode: DimensionMode::Internal,
            width: 135.0,
            depth: 90.0,
            height: 80.0,
        }
    }
}

/// Material and beam values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricationParams {
    pub thickness: f64,
    pub kerf: f64,
    pub clearance: f64,
}

impl Default for FabricationParams {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            kerf: 0.2,
            clearance: 0.15,
        }
    }
}

/// Finger joint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointParams {
    /// Target finger width; `max(10, 3 * thickness)` when unset
    pub finger_width: Option<f64>,
    pub min_fingers: u32,
    /// Fixed finger count for base and lid joints
    pub finger_count_outer: Option<u32>,
    /// Fixed finger count for wall corner joints
    pub finger_count_vertical: Option<u32>,
}

impl Default for JointParams {
    fn default() -> Self {
        Self {
            finger_width: None,
            min_fingers: 3,
            finger_count_outer: None,
            finger_count_vertical: None,
        }
    }
}

/// Sheet packing and drawing controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub max_row_width: f64,
    pub padding: f64,
    pub margin: f64,
    pub stroke_width: f64,
    pub labels: bool,
    pub holding_tabs: bool,
    pub holding_tab_width: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            max_row_width: 340.0,
            padding: 12.0,
            margin: 10.0,
            stroke_width: 0.2,
            labels: true,
            holding_tabs: false,
            holding_tab_width: 2.0,
        }
    }
}

/// Open tray and divider rack fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayParams {
    /// Front wall height above the floor; template default when unset
    pub front_height: Option<f64>,
    pub scoop: bool,
    pub scoop_radius: f64,
    pub scoop_depth: f64,
    pub divider_count: u32,
}

impl Default for TrayParams {
    fn default() -> Self {
        Self {
            front_height: None,
            scoop: true,
            scoop_radius: 22.0,
            scoop_depth: 16.0,
            divider_count: 3,
        }
    }
}

/// Window box fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    pub window_margin: f64,
    pub window_corner_radius: f64,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            window_margin: 12.0,
            window_corner_radius: 8.0,
        }
    }
}

/// Card shoe fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardShoeParams {
    pub card_width: f64,
    pub card_height: f64,
    pub card_thickness: f64,
    pub capacity: u32,
    pub ramp_angle_deg: f64,
    pub stabilisers: bool,
}

impl Default for CardShoeParams {
    fn default() -> Self {
        Self {
            card_width: 63.0,
            card_height: 88.0,
            card_thickness: 0.35,
            capacity: 60,
            ramp_angle_deg: 12.0,
            stabilisers: true,
        }
    }
}

/// Rotary dispenser fields shared by both rotary templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotaryParams {
    /// Largest piece dimension to dispense
    pub max_piece: f64,
    /// Irregular pieces get a wider safety margin
    pub irregular: bool,
    /// Axle diameter; 3.2 for the plate wheel, 6.0 for the layered stack
    pub axle_diameter: Option<f64>,
    pub pocket_count: Option<u32>,
    pub chute_width: Option<f64>,
    pub hopper_height: f64,
    /// Spacer layers between the front and back plates
    pub layers_total: u32,
    /// Spacer layers forming the wheel chamber
    pub wheel_layers: u32,
    pub screw_diameter: f64,
    pub screw_margin: f64,
    pub feet: bool,
}

impl Default for RotaryParams {
    fn default() -> Self {
        Self {
            max_piece: 18.0,
            irregular: false,
            axle_diameter: None,
            pocket_count: None,
            chute_width: None,
            hopper_height: 120.0,
            layers_total: 8,
            wheel_layers: 3,
            screw_diameter: 3.0,
            screw_margin: 10.0,
            feet: false,
        }
    }
}

/// Flat parameter record for one generation request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateParams {
    #[serde(flatten)]
    pub dimensions: DimensionParams,
    #[serde(flatten)]
    pub fabrication: FabricationParams,
    #[serde(flatten)]
    pub joints: JointParams,
    #[serde(flatten)]
    pub layout: LayoutParams,
    #[serde(flatten)]
    pub tray: TrayParams,
    #[serde(flatten)]
    pub window: WindowParams,
    #[serde(flatten)]
    pub card_shoe: CardShoeParams,
    #[serde(flatten)]
    pub rotary: RotaryParams,
}

impl GenerateParams {
    /// Parse a JSON params object; unknown keys are ignored
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject values the engine cannot compute with.
    ///
    /// Physically doubtful values (zero thickness, kerf above thickness)
    /// pass here and are reported as findings instead.
    pub fn check(&self) -> Result<()> {
        let d = &self.dimensions;
        let f = &self.fabrication;
        let l = &self.layout;
        let t = &self.tray;
        let w = &self.window;
        let c = &self.card_shoe;
        let r = &self.rotary;

        let finite = [
            ("width", d.width),
            ("depth", d.depth),
            ("height", d.height),
            ("thickness", f.thickness),
            ("kerf", f.kerf),
            ("clearance", f.clearance),
            ("max_row_width", l.max_row_width),
            ("padding", l.padding),
            ("margin", l.margin),
            ("stroke_width", l.stroke_width),
            ("holding_tab_width", l.holding_tab_width),
            ("scoop_radius", t.scoop_radius),
            ("scoop_depth", t.scoop_depth),
            ("window_margin", w.window_margin),
            ("window_corner_radius", w.window_corner_radius),
            ("card_width", c.card_width),
            ("card_height", c.card_height),
            ("card_thickness", c.card_thickness),
            ("ramp_angle_deg", c.ramp_angle_deg),
            ("max_piece", r.max_piece),
            ("hopper_height", r.hopper_height),
            ("screw_diameter", r.screw_diameter),
            ("screw_margin", r.screw_margin),
        ];
        for (name, value) in finite {
            require_finite(name, value)?;
        }
        for (name, value) in [
            ("finger_width", self.joints.finger_width),
            ("front_height", t.front_height),
            ("axle_diameter", r.axle_diameter),
            ("chute_width", r.chute_width),
        ] {
            if let Some(v) = value {
                require_finite(name, v)?;
            }
        }

        // Magnitudes past these limits would size plans and panel lists
        // beyond what a cutter can use; signs are left to the validator.
        for (name, value) in finite {
            if !LENGTH_EXEMPT.contains(&name) {
                require_range(name, value, -MAX_LENGTH, MAX_LENGTH)?;
            }
        }
        for (name, value) in [
            ("front_height", t.front_height),
            ("axle_diameter", r.axle_diameter),
            ("chute_width", r.chute_width),
        ] {
            if let Some(v) = value {
                require_range(name, v, -MAX_LENGTH, MAX_LENGTH)?;
            }
        }
        for (name, value) in [
            ("min_fingers", Some(self.joints.min_fingers)),
            ("finger_count_outer", self.joints.finger_count_outer),
            ("finger_count_vertical", self.joints.finger_count_vertical),
            ("divider_count", Some(t.divider_count)),
            ("layers_total", Some(r.layers_total)),
            ("wheel_layers", Some(r.wheel_layers)),
        ] {
            if let Some(n) = value {
                require_range(name, f64::from(n), 0.0, f64::from(MAX_COUNT))?;
            }
        }
        require_range("capacity", f64::from(c.capacity), 0.0, f64::from(MAX_CAPACITY))?;

        if let Some(fw) = self.joints.finger_width {
            require_range("finger_width", fw, 0.1, 10_000.0)?;
        }
        require_range("max_row_width", l.max_row_width, 1.0, 100_000.0)?;
        require_range("padding", l.padding, 0.0, 10_000.0)?;
        require_range("margin", l.margin, 0.0, 10_000.0)?;
        require_range("stroke_width", l.stroke_width, 0.001, 100.0)?;
        require_range("holding_tab_width", l.holding_tab_width, 0.0, 100.0)?;
        require_range("ramp_angle_deg", c.ramp_angle_deg, 0.0, 60.0)?;
        if let Some(n) = r.pocket_count {
            require_range("pocket_count", f64::from(n), 1.0, 1_000.0)?;
        }
        Ok(())
    }
}

/// Largest absolute length accepted for any dimension (mm)
pub const MAX_LENGTH: f64 = 10_000.0;
/// Largest finger, divider or layer count
pub const MAX_COUNT: u32 = 1_000;
/// Largest card shoe capacity
pub const MAX_CAPACITY: u32 = 10_000;

/// Layout values with their own ranges below
const LENGTH_EXEMPT: [&str; 5] = [
    "max_row_width",
    "padding",
    "margin",
    "stroke_width",
    "holding_tab_width",
];

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite {
            name: name.to_string(),
        }
        .into())
    }
}

fn require_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max {
        return Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        }
        .into());
    }
    Ok(())
}
