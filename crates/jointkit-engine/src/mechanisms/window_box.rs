//! Lidded storage box with a windowed front

use super::{relabel, BoxShell, Derived, Mechanism, MechanismBuilder};
use crate::cutout::Cutout;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;

/// Smallest window edge the builder will draw
pub const MIN_WINDOW: f64 = 10.0;

pub struct WindowFront;

impl MechanismBuilder for WindowFront {
    fn template(&self) -> TemplateId {
        TemplateId::WindowFront
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let window = &params.params.window;
        let shell = BoxShell::new(params.internal, params.thickness()).with_lid();
        let (mut panels, joints) = shell.build();
        relabel(&mut panels, "FRONT", "FRONT (WINDOW)");

        let m = window.window_margin;
        let w = shell.outer_width();
        let h = shell.front_panel_height();
        if let Some(front) = panels.iter_mut().find(|p| p.id == "FRONT") {
            front.cutouts.push(Cutout::Window {
                x: m,
                y: m,
                width: (w - 2.0 * m).max(MIN_WINDOW),
                height: (h - 2.0 * m).max(MIN_WINDOW),
                corner_radius: window.window_corner_radius,
            });
        }

        Mechanism {
            panels,
            joints,
            derived: Derived::Box {
                shell: shell.derived(),
            },
        }
    }
}
