//! SVG writer
//!
//! Output is byte-stable for equal inputs: panels come in layout order and
//! every number goes through [`format_mm`]. All straight-sided loops, panel
//! outlines and polygonal cutouts alike, go through [`polygon_path`], which
//! is also where holding-tab gaps are honoured.

use crate::cutout::{effective_corner_radius, Cutout};
use crate::layout::LayoutSheet;
use crate::panel::Panel;
use crate::params::LayoutParams;
use jointkit_core::{format_mm, Polygon};

/// Rendering switches taken from the layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub stroke_width: f64,
    pub labels: bool,
    pub holding_tabs: bool,
    pub holding_tab_width: f64,
}

impl From<&LayoutParams> for SvgOptions {
    fn from(layout: &LayoutParams) -> Self {
        Self {
            stroke_width: layout.stroke_width,
            labels: layout.labels,
            holding_tabs: layout.holding_tabs,
            holding_tab_width: layout.holding_tab_width,
        }
    }
}

/// Path data for a polygon loop, leaving its open segment uncut
pub fn polygon_path(polygon: &Polygon) -> String {
    let points = polygon.drawing_order();
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{} {} {}", cmd, format_mm(p.x), format_mm(p.y)));
    }
    if polygon.open_segment.is_none() && !points.is_empty() {
        d.push_str(" Z");
    }
    d
}

fn circle_path(cx: f64, cy: f64, r: f64) -> String {
    let (r_s, y) = (format_mm(r), format_mm(cy));
    format!(
        "M {left} {y} A {r} {r} 0 1 0 {right} {y} A {r} {r} 0 1 0 {left} {y} Z",
        left = format_mm(cx - r),
        right = format_mm(cx + r),
        r = r_s,
        y = y
    )
}

fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, r: f64) -> String {
    let f = format_mm;
    let arc = |to_x: f64, to_y: f64| format!(" A {} {} 0 0 1 {} {}", f(r), f(r), f(to_x), f(to_y));
    let mut d = format!("M {} {}", f(x + r), f(y));
    d.push_str(&format!(" L {} {}", f(x + w - r), f(y)));
    d.push_str(&arc(x + w, y + r));
    d.push_str(&format!(" L {} {}", f(x + w), f(y + h - r)));
    d.push_str(&arc(x + w - r, y + h));
    d.push_str(&format!(" L {} {}", f(x + r), f(y + h)));
    d.push_str(&arc(x, y + h - r));
    d.push_str(&format!(" L {} {}", f(x), f(y + r)));
    d.push_str(&arc(x + r, y));
    d.push_str(" Z");
    d
}

/// U-shaped notch open at `top_y`; a notch shallower than its radius gets an
/// elliptical bottom.
fn notch_path(center_x: f64, top_y: f64, r: f64, depth: f64) -> String {
    let f = format_mm;
    let (left, right) = (center_x - r, center_x + r);
    if depth < r {
        return format!(
            "M {} {} A {} {} 0 0 0 {} {} Z",
            f(left),
            f(top_y),
            f(r),
            f(depth),
            f(right),
            f(top_y)
        );
    }
    let arc_y = top_y + depth - r;
    format!(
        "M {l} {top} L {l} {a} A {r} {r} 0 0 0 {rt} {a} L {rt} {top} Z",
        l = f(left),
        rt = f(right),
        top = f(top_y),
        a = f(arc_y),
        r = f(r)
    )
}

/// Path data for one cutout
pub fn cutout_path(cutout: &Cutout, options: &SvgOptions) -> String {
    if let Some(polygon) = cutout.polygon() {
        let polygon = if options.holding_tabs {
            polygon.with_holding_tab(options.holding_tab_width)
        } else {
            polygon
        };
        return polygon_path(&polygon);
    }
    match *cutout {
        Cutout::Hole { cx, cy, radius } | Cutout::WheelPocket { cx, cy, radius } => {
            circle_path(cx, cy, radius)
        }
        Cutout::Notch {
            center_x,
            top_y,
            radius,
            depth,
        } => notch_path(center_x, top_y, radius, depth),
        Cutout::Window {
            x,
            y,
            width,
            height,
            corner_radius,
        }
        | Cutout::ChutePath {
            x,
            y,
            width,
            height,
            corner_radius,
        } => rounded_rect_path(x, y, width, height, effective_corner_radius(width, height, corner_radius)),
        // Straight-sided kinds always have a polygon.
        Cutout::RectSlot { .. } | Cutout::DividerSlot { .. } | Cutout::RampSlot { .. } => String::new(),
    }
}

/// Escape text for element content and attribute values
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make JSON safe inside an XML comment; `--` may not appear there.
fn comment_safe(json: &str) -> String {
    json.replace("--", "-\\u002d")
}

/// Write the full document
pub fn render(panels: &[Panel], sheet: &LayoutSheet, options: &SvgOptions, desc: &str, meta_json: &str) -> String {
    let w = format_mm(sheet.width);
    let h = format_mm(sheet.height);
    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n"
    ));
    svg.push_str(&format!("  <desc>{}</desc>\n", xml_escape(desc)));
    svg.push_str(&format!("  <!-- meta: {} -->\n", comment_safe(meta_json)));

    svg.push_str(&format!(
        "  <g id=\"CUT\" fill=\"none\" stroke=\"red\" stroke-width=\"{}\">\n",
        format_mm(options.stroke_width)
    ));
    let mut labels = Vec::new();
    for placement in &sheet.placements {
        let Some(panel) = panels.iter().find(|p| p.id == placement.panel_id) else {
            continue;
        };
        let (dx, dy) = (placement.offset_x, placement.offset_y);
        svg.push_str(&format!(
            "    <g id=\"{}\" transform=\"translate({},{})\">\n",
            xml_escape(&panel.id),
            format_mm(dx),
            format_mm(dy)
        ));
        let outline = if options.holding_tabs {
            panel.outline.with_holding_tab(options.holding_tab_width)
        } else {
            panel.outline.clone()
        };
        svg.push_str(&format!("      <path d=\"{}\"/>\n", polygon_path(&outline)));
        for cutout in &panel.cutouts {
            svg.push_str(&format!("      <path d=\"{}\"/>\n", cutout_path(cutout, options)));
        }
        svg.push_str("    </g>\n");

        if let Some(label) = &panel.label {
            labels.push(format!(
                "    <text x=\"{}\" y=\"{}\">{}</text>\n",
                format_mm(label.x + dx),
                format_mm(label.y + dy),
                xml_escape(&label.text)
            ));
        }
    }
    svg.push_str("  </g>\n");

    if options.labels && !labels.is_empty() {
        svg.push_str("  <g id=\"ENGRAVE\" fill=\"black\" font-family=\"Arial\" font-size=\"4\">\n");
        for text in labels {
            svg.push_str(&text);
        }
        svg.push_str("  </g>\n");
    }
    svg.push_str("</svg>\n");
    svg
}
