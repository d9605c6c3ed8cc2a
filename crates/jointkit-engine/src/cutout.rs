//! Cutout features attached to panels
//!
//! Coordinates are panel-local. Polygonal cutouts are written through the
//! shared polygon path writer and can take holding tabs; curved ones are
//! written as arc paths and always cut fully.

use jointkit_core::{BBox, Point, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cutout {
    /// Axis-aligned rectangular slot (draw slot, tab slot)
    RectSlot {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Circular hole (axle, screw)
    Hole { cx: f64, cy: f64, radius: f64 },
    /// U-shaped notch hanging down from `top_y`, `depth` deep with a round bottom
    Notch {
        center_x: f64,
        top_y: f64,
        radius: f64,
        depth: f64,
    },
    /// Rounded-rectangle window
    Window {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    /// Floor slot receiving a divider tongue
    DividerSlot {
        x: f64,
        y: f64,
        width: f64,
        length: f64,
    },
    /// Rectangular slot rotated about its centre, locating a ramp tongue
    RampSlot {
        cx: f64,
        cy: f64,
        length: f64,
        width: f64,
        angle_deg: f64,
    },
    /// Pocket carrying one piece in a rotary wheel
    WheelPocket { cx: f64, cy: f64, radius: f64 },
    /// Rounded-rectangle passage for dispensed pieces
    ChutePath {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
    },
}

impl Cutout {
    /// Short name used in findings
    pub fn kind_name(&self) -> &'static str {
        match self {
            Cutout::RectSlot { .. } => "rect_slot",
            Cutout::Hole { .. } => "hole",
            Cutout::Notch { .. } => "notch",
            Cutout::Window { .. } => "window",
            Cutout::DividerSlot { .. } => "divider_slot",
            Cutout::RampSlot { .. } => "ramp_slot",
            Cutout::WheelPocket { .. } => "wheel_pocket",
            Cutout::ChutePath { .. } => "chute_path",
        }
    }

    /// Nominal extents before placement: width and height, diameter for
    /// round features, length and width for slots
    pub fn size(&self) -> (f64, f64) {
        match *self {
            Cutout::RectSlot { width, height, .. }
            | Cutout::Window { width, height, .. }
            | Cutout::ChutePath { width, height, .. } => (width, height),
            Cutout::Hole { radius, .. } | Cutout::WheelPocket { radius, .. } => {
                (2.0 * radius, 2.0 * radius)
            }
            Cutout::Notch { radius, depth, .. } => (2.0 * radius, depth),
            Cutout::DividerSlot { width, length, .. } => (width, length),
            Cutout::RampSlot { length, width, .. } => (length, width),
        }
    }

    pub fn bounds(&self) -> BBox {
        match *self {
            Cutout::RectSlot {
                x,
                y,
                width,
                height,
            } => BBox::from_rect(x, y, width, height),
            Cutout::Hole { cx, cy, radius } | Cutout::WheelPocket { cx, cy, radius } => {
                BBox::new(cx - radius, cy - radius, cx + radius, cy + radius)
            }
            Cutout::Notch {
                center_x,
                top_y,
                radius,
                depth,
            } => BBox::new(center_x - radius, top_y, center_x + radius, top_y + depth),
            Cutout::Window {
                x,
                y,
                width,
                height,
                ..
            }
            | Cutout::ChutePath {
                x,
                y,
                width,
                height,
                ..
            } => BBox::from_rect(x, y, width, height),
            Cutout::DividerSlot {
                x,
                y,
                width,
                length,
            } => BBox::from_rect(x, y, width, length),
            Cutout::RampSlot { .. } => self
                .polygon()
                .and_then(|p| p.bbox())
                .unwrap_or_else(|| BBox::new(0.0, 0.0, 0.0, 0.0)),
        }
    }

    /// Whether the cutout is drawn with arcs
    pub fn is_curved(&self) -> bool {
        match *self {
            Cutout::Hole { .. } | Cutout::WheelPocket { .. } | Cutout::Notch { .. } => true,
            Cutout::Window {
                width,
                height,
                corner_radius,
                ..
            }
            | Cutout::ChutePath {
                width,
                height,
                corner_radius,
                ..
            } => effective_corner_radius(width, height, corner_radius) > 0.0,
            Cutout::RectSlot { .. } | Cutout::DividerSlot { .. } | Cutout::RampSlot { .. } => {
                false
            }
        }
    }

    /// Polygon loop for straight-sided cutouts, `None` for curved ones
    pub fn polygon(&self) -> Option<Polygon> {
        if self.is_curved() {
            return None;
        }
        match *self {
            Cutout::RectSlot {
                x,
                y,
                width,
                height,
            } => Some(Polygon::rect(x, y, width, height)),
            Cutout::DividerSlot {
                x,
                y,
                width,
                length,
            } => Some(Polygon::rect(x, y, width, length)),
            Cutout::Window {
                x,
                y,
                width,
                height,
                ..
            }
            | Cutout::ChutePath {
                x,
                y,
                width,
                height,
                ..
            } => Some(Polygon::rect(x, y, width, height)),
            Cutout::RampSlot {
                cx,
                cy,
                length,
                width,
                angle_deg,
            } => {
                let center = Point::new(cx, cy);
                let angle = angle_deg.to_radians();
                let rect = Polygon::rect(cx - length / 2.0, cy - width / 2.0, length, width);
                Some(Polygon::new(
                    rect.points
                        .iter()
                        .map(|p| p.rotate_about(center, angle))
                        .collect(),
                ))
            }
            Cutout::Hole { .. } | Cutout::WheelPocket { .. } | Cutout::Notch { .. } => None,
        }
    }
}

/// Corner radius actually drawable on a `width` x `height` rectangle
pub fn effective_corner_radius(width: f64, height: f64, radius: f64) -> f64 {
    radius.min(width / 2.0).min(height / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notch_bounds() {
        let notch = Cutout::Notch {
            center_x: 50.0,
            top_y: 0.0,
            radius: 10.0,
            depth: 16.0,
        };
        let b = notch.bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (40.0, 0.0, 60.0, 16.0));
        assert!(notch.is_curved());
        assert!(notch.polygon().is_none());
    }

    #[test]
    fn test_size_keeps_sign() {
        let slot = Cutout::DividerSlot {
            x: 10.0,
            y: 9.0,
            width: 2.95,
            length: -2.0,
        };
        assert_eq!(slot.size(), (2.95, -2.0));

        let hole = Cutout::Hole {
            cx: 0.0,
            cy: 0.0,
            radius: 1.5,
        };
        assert_eq!(hole.size(), (3.0, 3.0));
    }

    #[test]
    fn test_square_window_is_polygonal() {
        let window = Cutout::Window {
            x: 5.0,
            y: 5.0,
            width: 20.0,
            height: 10.0,
            corner_radius: 0.0,
        };
        assert!(!window.is_curved());
        assert_eq!(window.polygon().unwrap().len(), 4);
    }

    #[test]
    fn test_ramp_slot_bounds_grow_with_angle() {
        let flat = Cutout::RampSlot {
            cx: 50.0,
            cy: 20.0,
            length: 40.0,
            width: 3.0,
            angle_deg: 0.0,
        };
        let tilted = Cutout::RampSlot {
            cx: 50.0,
            cy: 20.0,
            length: 40.0,
            width: 3.0,
            angle_deg: -12.0,
        };
        assert!((flat.bounds().height() - 3.0).abs() < 1e-9);
        assert!(tilted.bounds().height() > 8.0);
        assert!((tilted.bounds().min_x + tilted.bounds().max_x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_tag() {
        let hole = Cutout::Hole {
            cx: 1.0,
            cy: 2.0,
            radius: 3.0,
        };
        let json = serde_json::to_value(&hole).unwrap();
        assert_eq!(json["kind"], "hole");
    }
}
