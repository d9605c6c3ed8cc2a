//! Panels
//!
//! Builders describe panels as [`PanelSpec`]s: a nominal rectangle whose
//! sides reference declared joints, or a fixed outline for parts without
//! joints. [`finish_panels`] draws the final outlines once every joint has
//! its plan.

use crate::cutout::Cutout;
use crate::joints::{compensate, draw_rect_outline, CompensatedPlan, EdgeSpan, FingerPlan, JointRole};
use crate::resolver::Fabrication;
use jointkit_core::{BBox, Polygon};
use serde::{Deserialize, Serialize};

/// Side of a rectangular panel, clockwise from the top in a y-down frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(&self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }
}

/// Part of a side as declared by a builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpanSpec {
    Free(f64),
    /// Index into the mechanism's joint list
    Joint { joint: usize, role: JointRole },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelShape {
    Rect {
        width: f64,
        height: f64,
        edges: [Vec<SpanSpec>; 4],
    },
    Outline(Polygon),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub id: String,
    pub shape: PanelShape,
    pub cutouts: Vec<Cutout>,
    pub label: Option<String>,
}

impl PanelSpec {
    /// Plain rectangle; sides are straight until a joint is attached
    pub fn rect(id: impl Into<String>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            label: Some(id.clone()),
            id,
            shape: PanelShape::Rect {
                width,
                height,
                edges: Default::default(),
            },
            cutouts: Vec::new(),
        }
    }

    /// Part with a fixed outline and no joints
    pub fn outline(id: impl Into<String>, outline: Polygon) -> Self {
        let id = id.into();
        Self {
            label: Some(id.clone()),
            id,
            shape: PanelShape::Outline(outline),
            cutouts: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_cutouts(mut self, cutouts: Vec<Cutout>) -> Self {
        self.cutouts.extend(cutouts);
        self
    }

    /// Replace the spans on one side; ignored for fixed outlines
    pub fn set_edge(&mut self, side: Side, spans: Vec<SpanSpec>) {
        if let PanelShape::Rect { edges, .. } = &mut self.shape {
            edges[side.index()] = spans;
        }
    }

    /// Nominal width and height
    pub fn size(&self) -> (f64, f64) {
        match &self.shape {
            PanelShape::Rect { width, height, .. } => (*width, *height),
            PanelShape::Outline(outline) => outline
                .bbox()
                .map_or((0.0, 0.0), |b| (b.width(), b.height())),
        }
    }
}

/// Engrave-layer text in panel-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Finished panel ready for validation, packing and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub outline: Polygon,
    pub cutouts: Vec<Cutout>,
    pub label: Option<Label>,
    pub width: f64,
    pub height: f64,
}

impl Panel {
    /// Nominal rectangle `0..width`, `0..height`
    pub fn nominal_bounds(&self) -> BBox {
        BBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Bounds of the drawn outline, falling back to the nominal rectangle
    pub fn bounds(&self) -> BBox {
        self.outline.bbox().unwrap_or_else(|| self.nominal_bounds())
    }
}

/// Draw every panel, borrowing each joint's plan for both of its sides.
pub fn finish_panels(specs: &[PanelSpec], plans: &[FingerPlan], fab: &Fabrication) -> Vec<Panel> {
    let drawn: Vec<[CompensatedPlan; 2]> = plans
        .iter()
        .map(|plan| {
            [
                compensate(plan, JointRole::Owner, fab),
                compensate(plan, JointRole::Mate, fab),
            ]
        })
        .collect();

    specs
        .iter()
        .map(|spec| {
            let (width, height) = spec.size();
            let outline = match &spec.shape {
                PanelShape::Outline(outline) => outline.clone(),
                PanelShape::Rect { edges, .. } => {
                    let spans: Vec<Vec<EdgeSpan<'_>>> = edges
                        .iter()
                        .map(|side| {
                            side.iter()
                                .map(|span| match *span {
                                    SpanSpec::Free(len) => EdgeSpan::Free(len),
                                    SpanSpec::Joint { joint, role } => match drawn.get(joint) {
                                        Some(pair) => EdgeSpan::Joint(match role {
                                            JointRole::Owner => &pair[0],
                                            JointRole::Mate => &pair[1],
                                        }),
                                        None => EdgeSpan::Free(0.0),
                                    },
                                })
                                .collect()
                        })
                        .collect();
                    draw_rect_outline(width, height, [&spans[0], &spans[1], &spans[2], &spans[3]])
                }
            };
            let label = spec.label.as_ref().map(|text| {
                let origin = outline.bbox().map_or((0.0, 0.0), |b| (b.min_x, b.min_y));
                Label {
                    text: text.clone(),
                    x: origin.0 + width * 0.35,
                    y: origin.1 + height * 0.55,
                }
            });
            Panel {
                id: spec.id.clone(),
                outline,
                cutouts: spec.cutouts.clone(),
                label,
                width,
                height,
            }
        })
        .collect()
}
