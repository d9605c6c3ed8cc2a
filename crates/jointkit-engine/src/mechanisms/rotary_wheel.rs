//! Rotary pocket-wheel dispenser built from stacked plates
//!
//! A pocket wheel turns between a base plate and a top plate, separated by
//! two spacer rings. The top plate feeds the pocket at the top of the
//! wheel; the base plate drops the piece in the bottom pocket.

use super::{circle_outline, Derived, Mechanism, MechanismBuilder, PocketWheelDerived};
use crate::cutout::Cutout;
use crate::panel::PanelSpec;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;
use jointkit_core::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

pub const DEFAULT_AXLE: f64 = 3.2;
/// Pocket ring sits this many pocket diameters inside the wheel rim
pub const RIM_FACTOR: f64 = 0.85;

const MIN_POCKETS: u32 = 6;
const MIN_RING: f64 = 30.0;
const RING_SPREAD: f64 = 1.35;
const CHUTE_PLAY: f64 = 2.0;
const CHUTE_RADIUS: f64 = 2.0;

/// Pocket diameter for the largest piece
pub fn pocket_diameter(max_piece: f64, irregular: bool) -> f64 {
    max_piece + if irregular { 2.0 } else { 1.0 }
}

/// Round a pocket count and bump it to the next even number
pub(crate) fn even_pocket_count(raw: f64, min: u32) -> u32 {
    let n = (raw.round().max(0.0) as u32).max(min);
    if n % 2 == 1 {
        n + 1
    } else {
        n
    }
}

/// Material left between neighbouring pockets on the pocket ring
pub fn wall_between(ring_radius: f64, count: u32, pocket_diameter: f64) -> f64 {
    TAU * ring_radius / f64::from(count.max(1)) - pocket_diameter
}

/// Pockets spaced around `center`, the first one straight up
pub(crate) fn pocket_cutouts(center: Point, ring_radius: f64, count: u32, diameter: f64) -> Vec<Cutout> {
    (0..count)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * f64::from(i) / f64::from(count);
            Cutout::WheelPocket {
                cx: center.x + ring_radius * angle.cos(),
                cy: center.y + ring_radius * angle.sin(),
                radius: diameter / 2.0,
            }
        })
        .collect()
}

pub struct RotaryWheel;

impl MechanismBuilder for RotaryWheel {
    fn template(&self) -> TemplateId {
        TemplateId::RotaryWheel
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let rotary = &params.params.rotary;
        let pd = pocket_diameter(rotary.max_piece, rotary.irregular);
        let auto_count = even_pocket_count(TAU * 1.5 * pd / pd.max(6.0), MIN_POCKETS);
        let count = rotary.pocket_count.unwrap_or(auto_count);

        let ring_r = (MIN_RING - RIM_FACTOR * pd)
            .max(f64::from(auto_count) * pd * RING_SPREAD / TAU);
        let wheel_r = ring_r + RIM_FACTOR * pd;
        let chute_w = rotary.chute_width.unwrap_or(pd + CHUTE_PLAY);
        let chute_h = (0.8 * pd).max(10.0);
        let axle_d = rotary.axle_diameter.unwrap_or(DEFAULT_AXLE);
        let axle_r = axle_d / 2.0;

        let ring_outer = wheel_r + pd + 6.0;
        let ring_inner = wheel_r + 2.0;
        let plate = 2.0 * ring_outer + 10.0;
        let c = plate / 2.0;

        let axle = |at: f64| Cutout::Hole {
            cx: at,
            cy: at,
            radius: axle_r,
        };
        let chute = |cy: f64| Cutout::ChutePath {
            x: c - chute_w / 2.0,
            y: cy - chute_h / 2.0,
            width: chute_w,
            height: chute_h,
            corner_radius: CHUTE_RADIUS,
        };

        let mut wheel_cutouts = vec![axle(wheel_r)];
        wheel_cutouts.extend(pocket_cutouts(Point::new(wheel_r, wheel_r), ring_r, count, pd));

        let mut panels = vec![
            PanelSpec::rect("BASE_PLATE", plate, plate).with_cutouts(vec![axle(c), chute(c + ring_r)]),
            PanelSpec::outline("WHEEL", circle_outline(wheel_r)).with_cutouts(wheel_cutouts),
        ];
        for i in 1..=2 {
            panels.push(
                PanelSpec::outline(format!("SPACER_RING_{i}"), circle_outline(ring_outer)).with_cutouts(vec![
                    Cutout::Hole {
                        cx: ring_outer,
                        cy: ring_outer,
                        radius: ring_inner,
                    },
                ]),
            );
        }
        panels.push(PanelSpec::rect("TOP_PLATE", plate, plate).with_cutouts(vec![axle(c), chute(c - ring_r)]));
        let knob_r = (2.5 * axle_d).max(12.0);
        panels.push(PanelSpec::outline("KNOB", circle_outline(knob_r)).with_cutouts(vec![axle(knob_r)]));

        Mechanism {
            panels,
            joints: Vec::new(),
            derived: Derived::Rotary {
                wheel: PocketWheelDerived {
                    pocket_diameter: pd,
                    pocket_count: count,
                    pocket_ring_radius: ring_r,
                    wheel_diameter: 2.0 * wheel_r,
                    wall_between: wall_between(ring_r, count, pd),
                    chute_width: chute_w,
                    chute_height: chute_h,
                },
                plate_width: plate,
            },
        }
    }
}
