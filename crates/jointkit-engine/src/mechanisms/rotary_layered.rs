//! Layered rotary dispenser
//!
//! Full-size plates are screwed together through four corner holes. From
//! front to back: a clear front plate with the dispense opening, hopper
//! spacers forming the hopper, wheel spacers forming the wheel chamber with
//! its feed window, exit window and chute channel, then the back plate.

use super::rotary_wheel::{even_pocket_count, pocket_cutouts, pocket_diameter, wall_between, RIM_FACTOR};
use super::{circle_outline, Derived, LayerStackDerived, Mechanism, MechanismBuilder, PocketWheelDerived};
use crate::cutout::Cutout;
use crate::panel::PanelSpec;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;
use jointkit_core::Point;
use std::f64::consts::TAU;

pub const DEFAULT_AXLE: f64 = 6.0;
/// Narrowest plate the stack is built with
pub const MIN_PLATE_WIDTH: f64 = 140.0;
/// Shortest hopper opening cut into the hopper spacers
pub const MIN_HOPPER_CUT: f64 = 40.0;

const MIN_POCKETS: u32 = 8;
const MIN_RING: f64 = 28.0;
const RING_SPREAD: f64 = 1.25;
const FOOT_DEPTH: f64 = 12.0;

/// Rounded-rectangle opening helper
fn opening(x: f64, y: f64, width: f64, height: f64, corner_radius: f64) -> Cutout {
    Cutout::ChutePath {
        x,
        y,
        width,
        height,
        corner_radius,
    }
}

fn hole(center: Point, radius: f64) -> Cutout {
    Cutout::Hole {
        cx: center.x,
        cy: center.y,
        radius,
    }
}

pub struct RotaryLayered;

impl MechanismBuilder for RotaryLayered {
    fn template(&self) -> TemplateId {
        TemplateId::RotaryLayered
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let rotary = &params.params.rotary;
        let p = rotary.max_piece;
        let pd = pocket_diameter(p, rotary.irregular);
        let auto_count = even_pocket_count(TAU * 1.6 * pd / pd.max(10.0), MIN_POCKETS);
        let count = rotary.pocket_count.unwrap_or(auto_count);

        let ring_r = (MIN_RING - RIM_FACTOR * pd)
            .max(f64::from(auto_count) * pd * RING_SPREAD / TAU);
        let wheel_r = ring_r + RIM_FACTOR * pd;

        let feed_w = (0.85 * pd).max(1.2 * p);
        let feed_h = (0.9 * pd).max(10.0);
        let chute_w = rotary
            .chute_width
            .unwrap_or(pd + if rotary.irregular { 3.0 } else { 2.0 });
        let chute_h = (1.1 * pd).max(12.0);
        let axle_d = rotary.axle_diameter.unwrap_or(DEFAULT_AXLE);

        // Plate sizing: hopper above, wheel chamber below.
        let screw_d = rotary.screw_diameter;
        let screw_margin = rotary.screw_margin;
        let side_wall = (screw_margin + screw_d).max(10.0);
        let wheel_clear = (params.fabrication.clearance + 0.6).max(2.0);
        let cavity_r = wheel_r + wheel_clear;
        let bottom_margin = (screw_margin + screw_d + 4.0).max(14.0);
        let wheel_top = side_wall + (0.2 * rotary.hopper_height).max(12.0);
        let cy = wheel_top + cavity_r;
        let plate_w = (2.0 * cavity_r + 2.0 * side_wall).max(MIN_PLATE_WIDTH);
        let plate_h = (cy + cavity_r + bottom_margin)
            .max(2.0 * wheel_r + rotary.hopper_height + 2.0 * side_wall);
        let cx = plate_w / 2.0;
        let center = Point::new(cx, cy);

        let hopper_cut_h = rotary
            .hopper_height
            .min(plate_h - 2.0 * side_wall - 0.6 * cavity_r)
            .max(MIN_HOPPER_CUT);
        let hopper_cut = opening(side_wall, side_wall, plate_w - 2.0 * side_wall, hopper_cut_h, 6.0);
        let feed = opening(
            cx - feed_w / 2.0,
            side_wall + hopper_cut_h - 0.6 * feed_h,
            feed_w,
            feed_h,
            3.0,
        );

        let exit_w = chute_w.max(0.9 * pd);
        let exit_h = (0.8 * pd).max(10.0);
        let exit_y = cy + cavity_r - 0.4 * exit_h;
        let exit = opening(cx - exit_w / 2.0, exit_y, exit_w, exit_h, 3.0);
        let chute_y = (exit_y + 0.7 * exit_h).min(plate_h - bottom_margin - chute_h);
        let chute = opening(cx - chute_w / 2.0, chute_y, chute_w, chute_h, 3.0);

        let open_w = (chute_w + 6.0).max(24.0);
        let open_h = (0.8 * chute_h).max(14.0);
        let dispense = opening(cx - open_w / 2.0, plate_h - bottom_margin - open_h, open_w, open_h, 3.0);

        let screw_r = (screw_d / 2.0).max(0.6);
        let screws: Vec<Cutout> = [
            (screw_margin, screw_margin),
            (plate_w - screw_margin, screw_margin),
            (screw_margin, plate_h - screw_margin),
            (plate_w - screw_margin, plate_h - screw_margin),
        ]
        .into_iter()
        .map(|(x, y)| hole(Point::new(x, y), screw_r))
        .collect();
        let with_screws = |extra: Vec<Cutout>| {
            let mut cutouts = screws.clone();
            cutouts.extend(extra);
            cutouts
        };

        let axle = hole(center, axle_d / 2.0);
        let hopper_layers = rotary.layers_total.saturating_sub(rotary.wheel_layers);

        let mut panels = vec![
            PanelSpec::rect("FRONT_ACRYLIC", plate_w, plate_h)
                .with_cutouts(with_screws(vec![axle.clone(), dispense])),
            PanelSpec::rect("BACK_PLATE", plate_w, plate_h).with_cutouts(with_screws(vec![axle])),
        ];
        for i in 1..=hopper_layers {
            panels.push(
                PanelSpec::rect(format!("HOPPER_SPACER_{i}"), plate_w, plate_h)
                    .with_cutouts(with_screws(vec![hole(center, axle_d / 2.0 + 0.6), hopper_cut.clone()])),
            );
        }
        // The chamber already clears the axle.
        let chamber = vec![hole(center, cavity_r), feed, exit, chute];
        for i in 1..=rotary.wheel_layers {
            panels.push(
                PanelSpec::rect(format!("WHEEL_SPACER_{i}"), plate_w, plate_h)
                    .with_cutouts(with_screws(chamber.clone())),
            );
        }

        let wheel_center = Point::new(wheel_r, wheel_r);
        let mut wheel_cutouts = vec![hole(wheel_center, axle_d / 2.0)];
        wheel_cutouts.extend(pocket_cutouts(wheel_center, ring_r, count, pd));
        panels.push(PanelSpec::outline("WHEEL", circle_outline(wheel_r)).with_cutouts(wheel_cutouts));

        let knob_r = (2.2 * axle_d).max(14.0);
        panels.push(
            PanelSpec::outline("KNOB", circle_outline(knob_r))
                .with_cutouts(vec![hole(Point::new(knob_r, knob_r), axle_d / 2.0)]),
        );
        if rotary.feet {
            let foot_w = (0.28 * plate_w).max(30.0);
            for i in 1..=2 {
                panels.push(PanelSpec::rect(format!("FOOT_{i}"), foot_w, FOOT_DEPTH));
            }
        }

        Mechanism {
            panels,
            joints: Vec::new(),
            derived: Derived::Layered {
                wheel: PocketWheelDerived {
                    pocket_diameter: pd,
                    pocket_count: count,
                    pocket_ring_radius: ring_r,
                    wheel_diameter: 2.0 * wheel_r,
                    wall_between: wall_between(ring_r, count, pd),
                    chute_width: chute_w,
                    chute_height: chute_h,
                },
                stack: LayerStackDerived {
                    plate_width: plate_w,
                    plate_height: plate_h,
                    layers_total: rotary.layers_total,
                    wheel_layers: rotary.wheel_layers,
                    hopper_layers,
                    hopper_height: rotary.hopper_height,
                    screw_margin,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GenerateParams;
    use crate::resolver::resolve_params;

    fn build(params: &GenerateParams) -> Mechanism {
        let resolved = resolve_params(TemplateId::RotaryLayered, params).unwrap();
        RotaryLayered.build(&resolved)
    }

    fn stack(mech: &Mechanism) -> &LayerStackDerived {
        match &mech.derived {
            Derived::Layered { stack, .. } => stack,
            other => panic!("unexpected derived {other:?}"),
        }
    }

    #[test]
    fn test_default_stack() {
        let mech = build(&GenerateParams::default());
        assert_eq!(stack(&mech).hopper_layers, 5);
        assert!(mech.panel("HOPPER_SPACER_5").is_some());
        assert!(mech.panel("HOPPER_SPACER_6").is_none());
        assert!(mech.panel("WHEEL_SPACER_3").is_some());
        assert!(mech.panel("FOOT_1").is_none());
        assert_eq!(stack(&mech).plate_width, MIN_PLATE_WIDTH);

        let w = mech.derived.pocket_wheel().unwrap();
        assert_eq!(w.pocket_count, 10);
        assert_eq!(w.chute_width, 21.0);
        assert!(w.wall_between > 2.0);
    }

    #[test]
    fn test_screw_holes_on_every_plate() {
        let mech = build(&GenerateParams::default());
        for panel in mech.panels.iter().filter(|p| p.id.contains("PLATE") || p.id.contains("SPACER")) {
            let screws = panel
                .cutouts
                .iter()
                .filter(|c| matches!(c, Cutout::Hole { radius, .. } if *radius == 1.5))
                .count();
            assert_eq!(screws, 4, "{}", panel.id);
        }
    }

    #[test]
    fn test_no_hopper_layers_when_wheel_takes_all() {
        let mut params = GenerateParams::default();
        params.rotary.layers_total = 3;
        params.rotary.wheel_layers = 4;
        params.rotary.feet = true;
        let mech = build(&params);
        assert_eq!(stack(&mech).hopper_layers, 0);
        assert!(mech.panel("HOPPER_SPACER_1").is_none());
        assert!(mech.panel("FOOT_2").is_some());
    }

    #[test]
    fn test_chamber_inside_plate() {
        let mech = build(&GenerateParams::default());
        let spacer = mech.panel("WHEEL_SPACER_1").unwrap();
        let (w, h) = spacer.size();
        for cutout in &spacer.cutouts {
            let b = cutout.bounds();
            assert!(b.min_x >= 0.0 && b.max_x <= w, "{cutout:?}");
            assert!(b.min_y >= 0.0 && b.max_y <= h, "{cutout:?}");
        }
    }
}
