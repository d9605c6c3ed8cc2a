//! Tray with removable dividers
//!
//! The bottom carries one slot per divider; each divider has a tongue on
//! its lower edge that drops into a slot.

use super::{relabel, BoxShell, Derived, DividerDerived, FrontStyle, Mechanism, MechanismBuilder};
use crate::cutout::Cutout;
use crate::joints::drawn_slot_width;
use crate::panel::PanelSpec;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;
use jointkit_core::{Point, Polygon};

/// Keep-out at each end of the bottom, measured from the inner walls
pub const SLOT_MARGIN: f64 = 10.0;
/// Distance from the inner back and front walls to the slot ends
pub const SLOT_INSET: f64 = 6.0;
/// Front height as a share of the cavity height
pub const FRONT_RATIO: f64 = 0.6;
/// Dividers stop this far below the wall tops
pub const DIVIDER_HEADROOM: f64 = 2.0;

pub struct DividerRack;

impl MechanismBuilder for DividerRack {
    fn template(&self) -> TemplateId {
        TemplateId::DividerRack
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let t = params.thickness();
        let inner = params.internal;
        let fab = &params.fabrication;
        let count = params.params.tray.divider_count;
        let front_h = params
            .params
            .tray
            .front_height
            .unwrap_or(inner.height * FRONT_RATIO);

        let shell = BoxShell::new(inner, t).with_front(FrontStyle::Lowered(front_h), "FRONT");
        let (mut panels, joints) = shell.build();
        relabel(&mut panels, "FRONT", "FRONT (LOW)");

        let slot_w = drawn_slot_width(fab);
        let slot_len = inner.depth - 2.0 * SLOT_INSET;
        let usable = inner.width - 2.0 * SLOT_MARGIN;
        let too_tight = usable <= f64::from(count.saturating_sub(1)) * slot_w;

        let mut slot_positions = Vec::new();
        if !too_tight && count > 0 {
            let gap = usable / f64::from(count);
            for i in 1..count {
                slot_positions.push(t + SLOT_MARGIN + f64::from(i) * gap - slot_w / 2.0);
            }
        }
        if let Some(bottom) = panels.iter_mut().find(|p| p.id == "BOTTOM") {
            for x in &slot_positions {
                bottom.cutouts.push(Cutout::DividerSlot {
                    x: *x,
                    y: t + SLOT_INSET,
                    width: slot_w,
                    length: slot_len,
                });
            }
        }

        let div_w = inner.depth;
        let div_h = inner.height - DIVIDER_HEADROOM;
        let tongue = slot_len - fab.clearance;
        for i in 0..count.saturating_sub(1) {
            let id = format!("DIVIDER_{}", i + 1);
            panels.push(PanelSpec::outline(id, divider_outline(div_w, div_h, tongue, t)));
        }

        Mechanism {
            panels,
            joints,
            derived: Derived::DividerRack {
                shell: shell.derived(),
                dividers: DividerDerived {
                    divider_count: count,
                    slot_width: slot_w,
                    slot_length: slot_len,
                    usable_width: usable,
                    slot_positions,
                    too_tight,
                },
            },
        }
    }
}

/// Divider body with a centred tongue hanging below its lower edge
fn divider_outline(width: f64, height: f64, tongue: f64, depth: f64) -> Polygon {
    let mut points = vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
    ];
    if tongue > 0.0 && tongue < width {
        let a = (width - tongue) / 2.0;
        let b = a + tongue;
        points.extend([
            Point::new(b, height),
            Point::new(b, height + depth),
            Point::new(a, height + depth),
            Point::new(a, height),
        ]);
    }
    points.push(Point::new(0.0, height));
    Polygon::new(points)
}
