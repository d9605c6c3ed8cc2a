//! Finger-jointed box shell shared by the box templates
//!
//! Panels are drawn at their outer size. The bottom owns the four base
//! joints, the back and front own the vertical corners and the lid, when
//! present, owns the four top joints. Local frames: on LEFT, x = 0 is the
//! front edge; on RIGHT, x = 0 is the back edge; walls have the floor at
//! y = height.

use crate::joints::{JointFamily, JointRole, JointSpec, SideRef};
use crate::panel::{PanelSpec, Side, SpanSpec};
use crate::resolver::Cavity;

use super::ShellDerived;

/// How the front wall is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrontStyle {
    /// Front as tall as the other walls
    Full,
    /// Front wall `height` above the floor
    Lowered(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxShell {
    pub cavity: Cavity,
    pub thickness: f64,
    pub front: FrontStyle,
    pub front_id: &'static str,
    pub lid: bool,
}

impl BoxShell {
    pub fn new(cavity: Cavity, thickness: f64) -> Self {
        Self {
            cavity,
            thickness,
            front: FrontStyle::Full,
            front_id: "FRONT",
            lid: false,
        }
    }

    pub fn with_front(mut self, front: FrontStyle, id: &'static str) -> Self {
        self.front = front;
        self.front_id = id;
        self
    }

    pub fn with_lid(mut self) -> Self {
        self.lid = true;
        self
    }

    pub fn outer_width(&self) -> f64 {
        self.cavity.width + 2.0 * self.thickness
    }

    pub fn outer_depth(&self) -> f64 {
        self.cavity.depth + 2.0 * self.thickness
    }

    /// Wall height including the base, and the lid when present
    pub fn wall_height(&self) -> f64 {
        let lid = if self.lid { self.thickness } else { 0.0 };
        self.cavity.height + self.thickness + lid
    }

    /// Height of the front panel
    pub fn front_panel_height(&self) -> f64 {
        match self.front {
            FrontStyle::Full => self.wall_height(),
            FrontStyle::Lowered(h) => h + self.thickness,
        }
    }

    pub fn derived(&self) -> ShellDerived {
        ShellDerived {
            cavity: self.cavity,
            outer_width: self.outer_width(),
            outer_depth: self.outer_depth(),
            wall_height: self.wall_height(),
            front_height: match self.front {
                FrontStyle::Full => None,
                FrontStyle::Lowered(h) => Some(h),
            },
            lid: self.lid,
        }
    }

    /// Panels BOTTOM, LEFT, RIGHT, BACK, front, and TOP with a lid, plus their joints.
    pub fn build(&self) -> (Vec<PanelSpec>, Vec<JointSpec>) {
        let w = self.outer_width();
        let d = self.outer_depth();
        let h = self.wall_height();
        let front_h = self.front_panel_height();
        let front = self.front_id;

        let mut panels = vec![
            PanelSpec::rect("BOTTOM", w, d),
            PanelSpec::rect("LEFT", d, h),
            PanelSpec::rect("RIGHT", d, h),
            PanelSpec::rect("BACK", w, h),
            PanelSpec::rect(front, w, front_h),
        ];
        if self.lid {
            panels.push(PanelSpec::rect("TOP", w, d));
        }
        let mut joints = Vec::new();

        let mut join = |panels: &mut Vec<PanelSpec>,
                        family: JointFamily,
                        length: f64,
                        owner: (&str, Side),
                        mate: (&str, Side)|
         -> usize {
            let index = joints.len();
            joints.push(JointSpec {
                id: format!("{}/{}", owner.0, mate.0),
                family,
                length,
                owner: SideRef {
                    panel: owner.0.to_string(),
                    side: owner.1,
                },
                mate: SideRef {
                    panel: mate.0.to_string(),
                    side: mate.1,
                },
            });
            for (id, side, role) in [
                (owner.0, owner.1, JointRole::Owner),
                (mate.0, mate.1, JointRole::Mate),
            ] {
                if let Some(panel) = panels.iter_mut().find(|p| p.id == id) {
                    panel.set_edge(side, vec![SpanSpec::Joint { joint: index, role }]);
                }
            }
            index
        };

        join(&mut panels, JointFamily::Outer, w, ("BOTTOM", Side::Top), ("BACK", Side::Bottom));
        join(&mut panels, JointFamily::Outer, d, ("BOTTOM", Side::Right), ("RIGHT", Side::Bottom));
        join(&mut panels, JointFamily::Outer, w, ("BOTTOM", Side::Bottom), (front, Side::Bottom));
        join(&mut panels, JointFamily::Outer, d, ("BOTTOM", Side::Left), ("LEFT", Side::Bottom));

        join(&mut panels, JointFamily::Vertical, h, ("BACK", Side::Left), ("LEFT", Side::Right));
        join(&mut panels, JointFamily::Vertical, h, ("BACK", Side::Right), ("RIGHT", Side::Left));

        // Front corners only cover the shorter of the two walls.
        let corner = front_h.min(h);
        let left = join(&mut panels, JointFamily::Vertical, corner, (front, Side::Left), ("LEFT", Side::Left));
        let right = join(&mut panels, JointFamily::Vertical, corner, (front, Side::Right), ("RIGHT", Side::Right));
        for (id, panel_h, role) in [
            (front, front_h, JointRole::Owner),
            ("LEFT", h, JointRole::Mate),
            ("RIGHT", h, JointRole::Mate),
        ] {
            let rest = panel_h - corner;
            if rest <= 0.0 {
                continue;
            }
            if let Some(panel) = panels.iter_mut().find(|p| p.id == id) {
                // Left sides run upward from the floor, right sides downward.
                if id != "RIGHT" {
                    panel.set_edge(
                        Side::Left,
                        vec![SpanSpec::Joint { joint: left, role }, SpanSpec::Free(rest)],
                    );
                }
                if id != "LEFT" {
                    panel.set_edge(
                        Side::Right,
                        vec![SpanSpec::Free(rest), SpanSpec::Joint { joint: right, role }],
                    );
                }
            }
        }

        if self.lid {
            join(&mut panels, JointFamily::Outer, w, ("TOP", Side::Top), ("BACK", Side::Top));
            join(&mut panels, JointFamily::Outer, d, ("TOP", Side::Right), ("RIGHT", Side::Top));
            join(&mut panels, JointFamily::Outer, w, ("TOP", Side::Bottom), (front, Side::Top));
            join(&mut panels, JointFamily::Outer, d, ("TOP", Side::Left), ("LEFT", Side::Top));
        }

        (panels, joints)
    }
}
