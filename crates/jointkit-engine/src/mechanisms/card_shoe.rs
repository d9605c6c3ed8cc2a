//! Front-draw card shoe
//!
//! Cards rest on a ramp plate tilted down toward the front. One card at a
//! time leaves through a draw slot at floor level; a retention lip above the
//! slot holds the rest of the stack back. The ramp plate tongues locate in
//! angled slots cut into both side walls.

use super::{relabel, BoxShell, CardShoeDerived, Derived, Mechanism, MechanismBuilder};
use crate::cutout::Cutout;
use crate::joints::compensate::{slot_adjust, tab_adjust};
use crate::joints::drawn_slot_width;
use crate::panel::PanelSpec;
use crate::resolver::{Cavity, ResolvedParams};
use crate::template::TemplateId;
use jointkit_core::{Point, Polygon};

/// Side play around the card width
pub const WIDTH_PLAY: f64 = 2.0;
/// Play around the card length
pub const DEPTH_PLAY: f64 = 1.5;
/// Headroom above a full stack
pub const HEADROOM: f64 = 10.0;
/// Material kept between the draw slot and the window
pub const LIP_HEIGHT: f64 = 10.0;
/// Smallest rise the ramp is built with
pub const MIN_RAMP_RISE: f64 = 8.0;
/// Slot height bounds
pub const SLOT_MIN: f64 = 1.0;
pub const SLOT_MAX: f64 = 2.0;
/// Slot height above the card thickness before clamping
pub const SLOT_PLAY: f64 = 0.6;
/// Draw slot width as a share of the card width
pub const SLOT_WIDTH_RATIO: f64 = 0.85;

const BLOCK_LENGTH: f64 = 25.0;
const BACK_BAR_MAX: f64 = 12.0;
const STABILISER_DEPTH: f64 = 14.0;
const STABILISER_RATIO: f64 = 0.8;
const WINDOW_MAX: f64 = 70.0;
const WINDOW_RATIO: f64 = 0.45;
const WINDOW_MIN: f64 = 10.0;
const WINDOW_RADIUS: f64 = 6.0;

/// Draw slot height for a card thickness
pub fn draw_slot_height(card_thickness: f64) -> f64 {
    (card_thickness + SLOT_PLAY).clamp(SLOT_MIN, SLOT_MAX)
}

pub struct CardShoe;

impl MechanismBuilder for CardShoe {
    fn template(&self) -> TemplateId {
        TemplateId::CardShoe
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let card = &params.params.card_shoe;
        let fab = &params.fabrication;
        let t = fab.thickness;

        let w_in = card.card_width + WIDTH_PLAY;
        let d_in = card.card_height + DEPTH_PLAY;
        let rise = (d_in * card.ramp_angle_deg.to_radians().tan()).max(MIN_RAMP_RISE);
        let angle = (rise / d_in).atan();
        let h_in = f64::from(card.capacity) * card.card_thickness + rise + HEADROOM;

        let shell = BoxShell::new(Cavity::new(w_in, d_in, h_in), t);
        let (mut panels, joints) = shell.build();
        relabel(&mut panels, "FRONT", "FRONT (DRAW)");

        let w_out = shell.outer_width();
        let d_out = shell.outer_depth();
        let wall_h = shell.wall_height();
        let floor_y = wall_h - t;

        let slot_h = draw_slot_height(card.card_thickness);
        let slot_w = card.card_width * SLOT_WIDTH_RATIO;
        let slot_y = floor_y - slot_h;
        let notch_r = (slot_w * 0.18).min(10.0);

        let mut front_cutouts = vec![
            Cutout::RectSlot {
                x: (w_out - slot_w) / 2.0,
                y: slot_y,
                width: slot_w,
                height: slot_h,
            },
            Cutout::Notch {
                center_x: w_out / 2.0,
                top_y: 0.0,
                radius: notch_r,
                depth: notch_r,
            },
        ];
        let window_bottom = slot_y - LIP_HEIGHT;
        let window_h = WINDOW_MAX
            .min(wall_h * WINDOW_RATIO)
            .min(window_bottom - (notch_r + 4.0));
        if window_h >= WINDOW_MIN {
            let margin_x = ((w_out - slot_w) / 2.0 - 4.0).max(8.0);
            front_cutouts.push(Cutout::Window {
                x: margin_x,
                y: window_bottom - window_h,
                width: w_out - 2.0 * margin_x,
                height: window_h,
                corner_radius: WINDOW_RADIUS,
            });
        }
        if let Some(front) = panels.iter_mut().find(|p| p.id == "FRONT") {
            front.cutouts.extend(front_cutouts);
        }

        // Ramp plate spans the cavity width; its tongues pass through both walls.
        let ramp_len = d_in / angle.cos();
        let tongue = ramp_len / 2.0 + tab_adjust(fab);
        let ramp_slot = |angle_deg: f64| Cutout::RampSlot {
            cx: d_out / 2.0,
            cy: floor_y - rise / 2.0 - t / (2.0 * angle.cos()),
            length: ramp_len / 2.0 + slot_adjust(fab),
            width: drawn_slot_width(fab),
            angle_deg,
        };
        // LEFT is seen from outside with the front at x = 0, RIGHT with the back there.
        for (id, sign) in [("LEFT", -1.0), ("RIGHT", 1.0)] {
            if let Some(side) = panels.iter_mut().find(|p| p.id == id) {
                side.cutouts.push(ramp_slot(sign * angle.to_degrees()));
            }
        }

        panels.push(PanelSpec::outline(
            "RAMP_PLATE",
            ramp_plate_outline(ramp_len, w_in, tongue, t),
        ));
        for i in 1..=2 {
            panels.push(PanelSpec::rect(format!("RAMP_BLOCK_{i}"), BLOCK_LENGTH, rise));
        }
        panels.push(PanelSpec::rect(
            "RAMP_BACK_BAR",
            w_in,
            rise.min(BACK_BAR_MAX),
        ));
        if card.stabilisers {
            for i in 1..=2 {
                panels.push(PanelSpec::rect(
                    format!("STABILISER_{i}"),
                    w_out * STABILISER_RATIO,
                    STABILISER_DEPTH,
                ));
            }
        }

        Mechanism {
            panels,
            joints,
            derived: Derived::CardShoe {
                shell: shell.derived(),
                shoe: CardShoeDerived {
                    slot_height: slot_h,
                    slot_width: slot_w,
                    lip_height: LIP_HEIGHT,
                    ramp_rise: rise,
                    ramp_angle_deg: angle.to_degrees(),
                    ramp_length: ramp_len,
                    stabilisers: card.stabilisers,
                },
            },
        }
    }
}

/// Ramp plate `length` long and `width` wide with a centred tongue on each long edge
fn ramp_plate_outline(length: f64, width: f64, tongue: f64, depth: f64) -> Polygon {
    let a = (length - tongue) / 2.0;
    let b = a + tongue;
    let top = depth;
    let bottom = depth + width;
    Polygon::new(vec![
        Point::new(0.0, top),
        Point::new(a, top),
        Point::new(a, 0.0),
        Point::new(b, 0.0),
        Point::new(b, top),
        Point::new(length, top),
        Point::new(length, bottom),
        Point::new(b, bottom),
        Point::new(b, bottom + depth),
        Point::new(a, bottom + depth),
        Point::new(a, bottom),
        Point::new(0.0, bottom),
    ])
}
