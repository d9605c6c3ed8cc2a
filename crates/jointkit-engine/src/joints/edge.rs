//! Rectangular outlines with finger-jointed edges
//!
//! A panel is drawn at its nominal size. Tabs stay on the boundary and slots
//! are recessed inward by the slot depth, so an outline never leaves its
//! nominal rectangle. Each side is walked clockwise in its own frame and the
//! sides are stitched at the corners: the corner point is moved inward by the
//! recess of both adjoining segments, which keeps the outline Manhattan.

use super::compensate::CompensatedPlan;
use super::plan::SegmentKind;
use crate::panel::Side;
use jointkit_core::{push_unique_point, Point, Polygon};

/// Part of one side of a rectangular panel
#[derive(Debug, Clone, Copy)]
pub enum EdgeSpan<'a> {
    /// Straight edge of the given length
    Free(f64),
    /// Finger joint drawn from a compensated plan
    Joint(&'a CompensatedPlan),
}

/// Stretch of a side at a constant inward offset
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    start: f64,
    end: f64,
    offset: f64,
}

struct SideFrame {
    origin: Point,
    dir: Point,
    inward: Point,
    length: f64,
}

impl SideFrame {
    fn new(side: Side, width: f64, height: f64) -> Self {
        let (origin, dir, inward, length) = match side {
            Side::Top => (Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0), width),
            Side::Right => (Point::new(width, 0.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0), height),
            Side::Bottom => (Point::new(width, height), Point::new(-1.0, 0.0), Point::new(0.0, -1.0), width),
            Side::Left => (Point::new(0.0, height), Point::new(0.0, -1.0), Point::new(1.0, 0.0), height),
        };
        Self {
            origin,
            dir,
            inward,
            length,
        }
    }

    fn at(&self, along: f64, offset: f64) -> Point {
        self.origin + self.dir * along + self.inward * offset
    }
}

fn runs_for(spans: &[EdgeSpan<'_>], length: f64) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut cursor = 0.0;

    let push = |runs: &mut Vec<Run>, width: f64, offset: f64, cursor: &mut f64| {
        let start = *cursor;
        *cursor += width;
        match runs.last_mut() {
            Some(last) if (last.offset - offset).abs() < 1e-9 => last.end = *cursor,
            _ => runs.push(Run {
                start,
                end: *cursor,
                offset,
            }),
        }
    };

    for span in spans {
        match span {
            EdgeSpan::Free(len) => push(&mut runs, *len, 0.0, &mut cursor),
            EdgeSpan::Joint(plan) => {
                for segment in &plan.segments {
                    let offset = match segment.kind {
                        SegmentKind::Tab => 0.0,
                        SegmentKind::Slot => plan.slot_depth,
                    };
                    push(&mut runs, segment.width, offset, &mut cursor);
                }
            }
        }
    }
    if cursor < length {
        push(&mut runs, length - cursor, 0.0, &mut cursor);
    }
    if runs.is_empty() {
        runs.push(Run {
            start: 0.0,
            end: length,
            offset: 0.0,
        });
    }
    runs
}

/// Outline of a `width` x `height` panel whose sides carry `edges`.
///
/// `edges` is indexed by [`Side::index`] (top, right, bottom, left). Spans on
/// a side are listed in clockwise order; a side whose spans fall short of its
/// length is finished with a straight run.
pub fn draw_rect_outline(width: f64, height: f64, edges: [&[EdgeSpan<'_>]; 4]) -> Polygon {
    let frames: Vec<SideFrame> = Side::ALL
        .iter()
        .map(|side| SideFrame::new(*side, width, height))
        .collect();
    let runs: Vec<Vec<Run>> = frames
        .iter()
        .zip(edges.iter())
        .map(|(frame, spans)| runs_for(spans, frame.length))
        .collect();

    let mut points: Vec<Point> = Vec::new();
    for i in 0..4 {
        let prev_offset = runs[(i + 3) % 4].last().map_or(0.0, |r| r.offset);
        let next_offset = runs[(i + 1) % 4].first().map_or(0.0, |r| r.offset);
        let frame = &frames[i];
        let lo = prev_offset;
        let hi = frame.length - next_offset;

        for run in &runs[i] {
            let start = run.start.max(lo);
            let end = run.end.min(hi);
            if end < start {
                continue;
            }
            push_unique_point(&mut points, frame.at(start, run.offset));
            push_unique_point(&mut points, frame.at(end, run.offset));
        }
    }

    if points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if first.distance(&last) < 1e-6 {
            points.pop();
        }
    }
    Polygon::new(points)
}
