//! Finger plan computation

use super::{JointFamily, JointSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Tab,
    Slot,
}

impl SegmentKind {
    pub fn flipped(self) -> Self {
        match self {
            SegmentKind::Tab => SegmentKind::Slot,
            SegmentKind::Slot => SegmentKind::Tab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub width: f64,
}

/// Shared finger layout for one physical edge.
///
/// Segments are given from the owner's point of view: they alternate
/// starting and ending with a tab, so the count is always odd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerPlan {
    pub family: JointFamily,
    pub length: f64,
    pub count: u32,
    pub segments: Vec<Segment>,
}

/// Number of segments on an edge of `length`.
///
/// `max(min_fingers, floor(length / target))`, or the family override when
/// set, then bumped up to the next odd value.
pub fn finger_count(length: f64, family: JointFamily, settings: &JointSettings) -> u32 {
    let base = match settings.fixed_count(family) {
        Some(fixed) => fixed,
        None => {
            let fit = if settings.target_width > 0.0 && length > 0.0 {
                (length / settings.target_width).floor()
            } else {
                0.0
            };
            // Saturating cast; lengths are bounded by the sheet.
            fit.min(f64::from(u32::MAX - 1)) as u32
        }
    };
    let n = base.max(settings.min_fingers).max(1);
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

impl FingerPlan {
    pub fn new(length: f64, family: JointFamily, settings: &JointSettings) -> Self {
        let count = finger_count(length, family, settings);
        let pitch = length / f64::from(count);

        let mut segments: Vec<Segment> = (0..count)
            .map(|i| Segment {
                kind: if i % 2 == 0 {
                    SegmentKind::Tab
                } else {
                    SegmentKind::Slot
                },
                width: pitch,
            })
            .collect();
        absorb_drift(&mut segments, length);

        Self {
            family,
            length,
            count,
            segments,
        }
    }

    /// Nominal width of one segment
    pub fn pitch(&self) -> f64 {
        self.length / f64::from(self.count)
    }

    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.width).sum()
    }

    pub fn tab_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Tab)
            .count()
    }
}

/// Give the middle segment whatever the others leave of `length`.
///
/// End segments are never touched, and an odd count keeps the sequence
/// symmetric so both traversal directions draw the same edge.
pub(crate) fn absorb_drift(segments: &mut [Segment], length: f64) {
    if segments.is_empty() {
        return;
    }
    let mid = segments.len() / 2;
    let others: f64 = segments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != mid)
        .map(|(_, s)| s.width)
        .sum();
    segments[mid].width = length - others;
}
