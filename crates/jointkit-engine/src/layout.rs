//! Sheet layout
//!
//! Row-fill packer: panels go left to right in builder order and wrap to a
//! new row when the next one would pass `max_row_width`. A panel wider than
//! the row still gets placed, alone on its row.

use crate::panel::Panel;
use serde::{Deserialize, Serialize};

/// Where one panel lands on the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub panel_id: String,
    /// Sheet position of the panel's bounding box
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Translation applied to panel-local coordinates
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSheet {
    pub placements: Vec<Placement>,
    pub width: f64,
    pub height: f64,
}

impl LayoutSheet {
    pub fn placement(&self, panel_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.panel_id == panel_id)
    }
}

struct LayoutCursor {
    x: f64,
    y: f64,
    row_height: f64,
    row_items: usize,
    margin: f64,
    padding: f64,
}

impl LayoutCursor {
    fn new(margin: f64, padding: f64) -> Self {
        Self {
            x: margin,
            y: margin,
            row_height: 0.0,
            row_items: 0,
            margin,
            padding,
        }
    }

    fn fits(&self, width: f64, max_row_width: f64) -> bool {
        self.row_items == 0 || (self.x - self.margin) + width <= max_row_width
    }

    fn place(&mut self, width: f64, height: f64) -> (f64, f64) {
        let position = (self.x, self.y);
        self.x += width + self.padding;
        self.row_height = self.row_height.max(height);
        self.row_items += 1;
        position
    }

    fn next_row(&mut self) {
        self.y += self.row_height + self.padding;
        self.x = self.margin;
        self.row_height = 0.0;
        self.row_items = 0;
    }
}

/// Pack `panels` onto one sheet
pub fn pack(panels: &[Panel], max_row_width: f64, padding: f64, margin: f64) -> LayoutSheet {
    let mut cursor = LayoutCursor::new(margin, padding);
    let mut placements = Vec::with_capacity(panels.len());
    let mut extent = (0.0_f64, 0.0_f64);

    for panel in panels {
        let bounds = panel.bounds();
        let (w, h) = (bounds.width(), bounds.height());
        if !cursor.fits(w, max_row_width) {
            cursor.next_row();
        }
        let (x, y) = cursor.place(w, h);
        extent = (extent.0.max(x + w), extent.1.max(y + h));
        placements.push(Placement {
            panel_id: panel.id.clone(),
            x,
            y,
            width: w,
            height: h,
            offset_x: x - bounds.min_x,
            offset_y: y - bounds.min_y,
        });
    }

    let (width, height) = if placements.is_empty() {
        (2.0 * margin, 2.0 * margin)
    } else {
        (extent.0 + margin, extent.1 + margin)
    };
    LayoutSheet {
        placements,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jointkit_core::Polygon;

    fn panel(id: &str, w: f64, h: f64) -> Panel {
        Panel {
            id: id.to_string(),
            outline: Polygon::rect(0.0, 0.0, w, h),
            cutouts: Vec::new(),
            label: None,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_row_wrap() {
        let panels = [panel("A", 100.0, 50.0), panel("B", 100.0, 80.0), panel("C", 100.0, 20.0)];
        let sheet = pack(&panels, 220.0, 10.0, 5.0);
        let c = sheet.placement("C").unwrap();
        assert_eq!((c.x, c.y), (5.0, 95.0));
        assert_eq!(sheet.placement("B").unwrap().x, 115.0);
        assert_eq!(sheet.width, 220.0);
        assert_eq!(sheet.height, 120.0);
    }

    #[test]
    fn test_wide_panel_alone_on_row() {
        let panels = [panel("A", 50.0, 10.0), panel("WIDE", 500.0, 10.0), panel("B", 50.0, 10.0)];
        let sheet = pack(&panels, 200.0, 10.0, 0.0);
        let wide = sheet.placement("WIDE").unwrap();
        assert_eq!((wide.x, wide.y), (0.0, 20.0));
        assert_eq!(sheet.placement("B").unwrap().y, 40.0);
    }

    #[test]
    fn test_offset_normalises_outline_origin() {
        let mut p = panel("A", 10.0, 10.0);
        p.outline = p.outline.translated(-3.0, 2.0);
        let sheet = pack(&[p], 100.0, 5.0, 10.0);
        let a = sheet.placement("A").unwrap();
        assert_eq!((a.offset_x, a.offset_y), (13.0, 8.0));
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = pack(&[], 100.0, 5.0, 10.0);
        assert!(sheet.placements.is_empty());
        assert_eq!((sheet.width, sheet.height), (20.0, 20.0));
    }
}
