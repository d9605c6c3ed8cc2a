//! Open-front stacking tray

use super::{BoxShell, Derived, FrontStyle, Mechanism, MechanismBuilder};
use crate::cutout::Cutout;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;

/// Default lip height above the floor
pub const DEFAULT_FRONT_HEIGHT: f64 = 30.0;

pub struct TrayOpenFront;

impl MechanismBuilder for TrayOpenFront {
    fn template(&self) -> TemplateId {
        TemplateId::TrayOpenFront
    }

    fn build(&self, params: &ResolvedParams) -> Mechanism {
        let tray = &params.params.tray;
        let front_h = tray.front_height.unwrap_or(DEFAULT_FRONT_HEIGHT);
        let shell = BoxShell::new(params.internal, params.thickness())
            .with_front(FrontStyle::Lowered(front_h), "FRONT_LIP");
        let (mut panels, joints) = shell.build();

        if tray.scoop {
            let w = shell.outer_width();
            let radius = tray.scoop_radius.min(w / 4.0);
            let depth = tray.scoop_depth.min(front_h - 2.0);
            if radius > 0.0 && depth > 0.0 {
                if let Some(lip) = panels.iter_mut().find(|p| p.id == "FRONT_LIP") {
                    lip.cutouts.push(Cutout::Notch {
                        center_x: w / 2.0,
                        top_y: 0.0,
                        radius,
                        depth,
                    });
                }
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GenerateParams;
    use crate::resolver::resolve_params;

    #[test]
    fn test_scoop_limited_by_width_and_lip() {
        let mut params = GenerateParams::default();
        params.dimensions.width = 40.0;
        params.tray.front_height = Some(10.0);
        let resolved = resolve_params(TemplateId::TrayOpenFront, &params).unwrap();
        let mech = TrayOpenFront.build(&resolved);
        let lip = mech.panel("FRONT_LIP").unwrap();
        match lip.cutouts[0] {
            Cutout::Notch { radius, depth, .. } => {
                assert!((radius - 11.5).abs() < 1e-9);
                assert!((depth - 8.0).abs() < 1e-9);
            }
            ref other => panic!("unexpected cutout {other:?}"),
        }
    }

    #[test]
    fn test_no_scoop() {
        let mut params = GenerateParams::default();
        params.tray.scoop = false;
        let resolved = resolve_params(TemplateId::TrayOpenFront, &params).unwrap();
        let mech = TrayOpenFront.build(&resolved);
        assert!(mech.panel("FRONT_LIP").unwrap().cutouts.is_empty());
        assert_eq!(mech.panels.len(), 5);
    }
}
