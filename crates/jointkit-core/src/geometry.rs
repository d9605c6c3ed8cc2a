//! 2D geometry primitives
//!
//! Every coordinate is in millimetres with x to the right and y downward,
//! which is the orientation of the emitted vector drawing.

use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Distance under which two consecutive points are treated as one.
pub const POINT_EPSILON: f64 = 1e-6;

/// Holding tabs are skipped on edges not longer than `2 * width + HOLDING_TAB_SLACK`.
pub const HOLDING_TAB_SLACK: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate around `center` by `angle_rad` (positive turns x toward y)
    pub fn rotate_about(&self, center: Point, angle_rad: f64) -> Point {
        let (sin, cos) = angle_rad.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Append `point` unless it repeats the last point of `path`.
pub fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if last.approx_eq(&point) {
            return;
        }
    }
    path.push(point);
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box covering `x..x+w`, `y..y+h`
    pub fn from_rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x.min(x + w), y.min(y + h), x.max(x + w), y.max(y + h))
    }

    /// Bounds of a point set, `None` when empty
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when `other` lies inside `self`, allowing `tolerance` of overhang.
    pub fn contains(&self, other: &BBox, tolerance: f64) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Closed polygon loop.
///
/// Segment `i` runs from `points[i]` to `points[(i + 1) % len]`. When
/// `open_segment` is set, that segment is left uncut so the part stays
/// tacked to the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_segment: Option<usize>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            open_segment: None,
        }
    }

    /// Axis-aligned rectangle wound clockwise from `(x, y)`
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ])
    }

    /// Build from raw points, dropping consecutive duplicates and a closing
    /// point equal to the first.
    pub fn try_from_points(raw: impl IntoIterator<Item = Point>) -> Result<Self> {
        let mut points = Vec::new();
        for p in raw {
            if !p.is_finite() {
                return Err(GeometryError::NonFinite {
                    context: "polygon".to_string(),
                }
                .into());
            }
            push_unique_point(&mut points, p);
        }
        if points.len() > 1 && points[0].approx_eq(&points[points.len() - 1]) {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::DegeneratePolygon {
                points: points.len(),
            }
            .into());
        }
        Ok(Self::new(points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }

    /// Shoelace area; positive for clockwise loops in a y-down frame
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    /// Endpoints of segment `index`
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        let n = self.points.len();
        if n < 2 || index >= n {
            return None;
        }
        Some((self.points[index], self.points[(index + 1) % n]))
    }

    /// Index and length of the longest segment; ties go to the first.
    pub fn longest_segment(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.points.len() {
            if let Some((a, b)) = self.segment(i) {
                let len = a.distance(&b);
                match best {
                    Some((_, l)) if l >= len => {}
                    _ => best = Some((i, len)),
                }
            }
        }
        best
    }

    /// Copy with a `width` gap opened in the middle of the longest edge.
    ///
    /// Loops whose longest edge is too short to keep material on both sides
    /// of the gap come back unchanged.
    pub fn with_holding_tab(&self, width: f64) -> Polygon {
        let Some((index, len)) = self.longest_segment() else {
            return self.clone();
        };
        if width <= 0.0 || len <= 2.0 * width + HOLDING_TAB_SLACK {
            return self.clone();
        }
        let Some((a, b)) = self.segment(index) else {
            return self.clone();
        };

        let dir = (b - a) * (1.0 / len);
        let mid = (a + b) * 0.5;
        let gap_start = mid - dir * (width / 2.0);
        let gap_end = mid + dir * (width / 2.0);

        let mut points = Vec::with_capacity(self.points.len() + 2);
        points.extend_from_slice(&self.points[..=index]);
        points.push(gap_start);
        points.push(gap_end);
        points.extend_from_slice(&self.points[index + 1..]);

        Polygon {
            points,
            open_segment: Some(index + 1),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Polygon {
        Polygon {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
            open_segment: self.open_segment,
        }
    }

    /// Points in drawing order for a path writer.
    ///
    /// Closed loops start at the first point. Open loops start at the end of
    /// the open segment and stop at its start, so the gap is never drawn.
    pub fn drawing_order(&self) -> Vec<Point> {
        let n = self.points.len();
        match self.open_segment {
            Some(open) if open < n => (1..=n)
                .map(|k| self.points[(open + k) % n])
                .collect(),
            _ => self.points.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_point_skips_repeats() {
        let mut path = Vec::new();
        push_unique_point(&mut path, Point::new(1.0, 1.0));
        push_unique_point(&mut path, Point::new(1.0, 1.0 + 1e-9));
        push_unique_point(&mut path, Point::new(2.0, 1.0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_rect_area_and_bbox() {
        let rect = Polygon::rect(0.0, 0.0, 10.0, 5.0);
        assert!((rect.signed_area() - 50.0).abs() < 1e-9);
        let bbox = rect.bbox().unwrap();
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 5.0);
    }

    #[test]
    fn test_try_from_points_rejects_degenerate() {
        let err = Polygon::try_from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap_err();
        assert!(err.is_geometry_error());

        let nan = Polygon::try_from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 0.0),
            Point::new(1.0, 1.0),
        ]);
        assert!(nan.is_err());
    }

    #[test]
    fn test_holding_tab_on_longest_edge() {
        let rect = Polygon::rect(0.0, 0.0, 40.0, 10.0);
        let tabbed = rect.with_holding_tab(2.0);
        assert_eq!(tabbed.len(), 6);
        assert_eq!(tabbed.open_segment, Some(1));

        let (a, b) = tabbed.segment(1).unwrap();
        assert!((a.x - 19.0).abs() < 1e-9);
        assert!((b.x - 21.0).abs() < 1e-9);

        let order = tabbed.drawing_order();
        assert_eq!(order.first(), Some(&Point::new(21.0, 0.0)));
        assert_eq!(order.last(), Some(&Point::new(19.0, 0.0)));
    }

    #[test]
    fn test_holding_tab_skips_short_loops() {
        let small = Polygon::rect(0.0, 0.0, 4.0, 4.0);
        let tabbed = small.with_holding_tab(2.0);
        assert_eq!(tabbed, small);
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotate_about(Point::default(), std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }
}
