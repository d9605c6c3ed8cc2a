//! Rule functions
//!
//! Each rule inspects a finished [`Design`] and returns its findings in a
//! fixed order. Rules never fail; anything they cannot judge is skipped.

use super::finding::ValidationFinding;
use super::Design;
use crate::cutout::Cutout;
use crate::joints::{drawn_slot_depth, expected_slot_width};
use crate::mechanisms::Derived;
use crate::policy::Policy;
use crate::template::{Maturity, TemplateId};
use jointkit_core::{format_mm, Polygon, POINT_EPSILON};

pub type Rule = fn(&Design<'_>, &Policy) -> Vec<ValidationFinding>;

const TRAY_RULES: &[Rule] = &[structural, fit, joint_fit, tray, layout, flex, maturity];
const DIVIDER_RULES: &[Rule] = &[structural, fit, joint_fit, dividers, layout, flex, maturity];
const WINDOW_RULES: &[Rule] = &[structural, fit, joint_fit, layout, flex, maturity];
const CARD_SHOE_RULES: &[Rule] = &[structural, fit, joint_fit, card_shoe, layout, flex, maturity];
const ROTARY_RULES: &[Rule] = &[structural, fit, pocket_wheel, bridging, layout, maturity];
const LAYERED_RULES: &[Rule] = &[structural, fit, layer_stack, bridging, layout, maturity];

/// Rule table for a template, in evaluation order
pub fn rules_for(template: TemplateId) -> &'static [Rule] {
    match template {
        TemplateId::TrayOpenFront => TRAY_RULES,
        TemplateId::DividerRack => DIVIDER_RULES,
        TemplateId::WindowFront => WINDOW_RULES,
        TemplateId::CardShoe => CARD_SHOE_RULES,
        TemplateId::RotaryWheel => ROTARY_RULES,
        TemplateId::RotaryLayered => LAYERED_RULES,
    }
}

pub fn structural(design: &Design<'_>, _policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let resolved = design.resolved;
    let non_positive = |what: String| {
        ValidationFinding::error("STRUCT_NON_POSITIVE_DIMENSION", format!("{what} must be > 0"))
    };

    if resolved.thickness() <= 0.0 {
        out.push(non_positive(format!("Thickness ({}mm)", format_mm(resolved.thickness()))));
    }
    if design.template.uses_cavity() && !resolved.internal.is_positive() {
        let c = resolved.internal;
        out.push(
            non_positive(format!(
                "Internal cavity ({} x {} x {}mm)",
                format_mm(c.width),
                format_mm(c.depth),
                format_mm(c.height)
            ))
            .with_fix("Increase the dimensions or switch to internal mode"),
        );
    }
    if let Some(shell) = design.derived.shell() {
        if design.template == TemplateId::CardShoe && !shell.cavity.is_positive() {
            out.push(non_positive("Card shoe cavity".to_string()).with_fix("Check the card size and capacity"));
        }
    }
    if design.derived.pocket_wheel().is_some() && resolved.params.rotary.max_piece <= 0.0 {
        out.push(non_positive("max_piece".to_string()));
    }
    for panel in design.panels {
        if panel.width <= 0.0 || panel.height <= 0.0 {
            out.push(non_positive(format!(
                "Panel {} ({} x {}mm)",
                panel.id,
                format_mm(panel.width),
                format_mm(panel.height)
            )));
        }
    }

    for id in design.template.required_panels() {
        if !design.panels.iter().any(|p| p.id == *id) {
            out.push(ValidationFinding::error("STRUCT_MISSING_PART", format!("Required part {id} is missing")));
        }
    }

    for panel in design.panels {
        if let Err(e) = Polygon::try_from_points(panel.outline.points.iter().copied()) {
            out.push(ValidationFinding::error(
                "GEOM_DEGENERATE_OUTLINE",
                format!("Outline of {} cannot be cut: {e}", panel.id),
            ));
        }
        let bounds = panel.nominal_bounds();
        for cutout in &panel.cutouts {
            let (w, h) = cutout.size();
            if !(w > 0.0 && h > 0.0) {
                out.push(
                    non_positive(format!(
                        "{} on {} ({} x {}mm)",
                        cutout.kind_name(),
                        panel.id,
                        format_mm(w),
                        format_mm(h)
                    ))
                    .with_fix("Enlarge the cavity or the material values that size this feature"),
                );
                continue;
            }
            if !bounds.contains(&cutout.bounds(), POINT_EPSILON) {
                out.push(
                    ValidationFinding::error(
                        "GEOM_CUTOUT_OUTSIDE_PANEL",
                        format!("{} on {} extends beyond the panel", cutout.kind_name(), panel.id),
                    )
                    .with_fix("Enlarge the panel or reduce the feature size"),
                );
            }
        }
    }
    out
}

/// Beam and fit checks that apply to every template
pub fn fit(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let fab = &design.resolved.fabrication;

    if fab.kerf >= fab.thickness {
        out.push(
            ValidationFinding::error(
                "FIT_KERF_GE_THICKNESS",
                format!(
                    "Kerf {}mm is not smaller than thickness {}mm",
                    format_mm(fab.kerf),
                    format_mm(fab.thickness)
                ),
            )
            .with_fix("Measure the kerf again; it is usually 0.1 to 0.3mm"),
        );
    }
    if fab.kerf < 0.0 {
        out.push(ValidationFinding::error(
            "FIT_NEGATIVE_KERF",
            format!("Kerf {}mm is negative", format_mm(fab.kerf)),
        ));
    }
    let loose = policy.clearance_loose_floor.max(policy.clearance_loose_ratio * fab.thickness);
    if fab.clearance.abs() > loose {
        out.push(
            ValidationFinding::warn(
                "FIT_CLEARANCE_LOOSE",
                format!(
                    "Clearance {}mm exceeds {}mm; joints will rattle",
                    format_mm(fab.clearance),
                    format_mm(loose)
                ),
            )
            .with_fix("Use 0.1 to 0.2mm for a snug fit"),
        );
    }
    out
}

/// Finger joint checks for templates with jointed panels
pub fn joint_fit(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    if design.plans.is_empty() {
        return out;
    }
    let fab = &design.resolved.fabrication;
    let t = fab.thickness;
    let slot_depth = drawn_slot_depth(fab);

    if slot_depth < policy.slot_depth_min_ratio * t {
        out.push(ValidationFinding::warn(
            "FIT_SLOT_DEPTH_TINY",
            format!("Drawn slot depth {}mm is shallow for {}mm board", format_mm(slot_depth), format_mm(t)),
        ));
    }
    if design.resolved.joints.min_fingers < policy.min_fingers_warn {
        out.push(
            ValidationFinding::warn(
                "FIT_FEW_FINGERS",
                format!("min_fingers is {}", design.resolved.joints.min_fingers),
            )
            .with_fix(format!("Use at least {} fingers per edge", policy.min_fingers_warn)),
        );
    }

    let smallest = design
        .plans
        .iter()
        .map(|plan| plan.pitch())
        .fold(f64::INFINITY, f64::min);
    if smallest < policy.min_pitch {
        out.push(
            ValidationFinding::warn(
                "FIT_PITCH_SMALL",
                format!("Smallest finger pitch is {}mm", format_mm(smallest)),
            )
            .with_fix("Increase finger_width or lower the finger count"),
        );
    }
    if smallest < policy.fragile_pitch_ratio * t {
        out.push(ValidationFinding::warn(
            "FIT_PITCH_FRAGILE",
            format!(
                "Smallest finger pitch {}mm is under {}x the thickness",
                format_mm(smallest),
                policy.fragile_pitch_ratio
            ),
        ));
    }

    out.push(ValidationFinding::info(
        "FIT_JOINT_RULE",
        format!(
            "Drawn slot {}mm, expected after cutting {}mm",
            format_mm(drawn_slot_depth(fab)),
            format_mm(expected_slot_width(fab))
        ),
    ));
    out
}

pub fn tray(design: &Design<'_>, _policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    if let Some(shell) = design.derived.shell() {
        if let Some(front) = shell.front_height {
            if front >= shell.cavity.height {
                out.push(
                    ValidationFinding::warn(
                        "TRAY_FRONT_TOO_TALL",
                        format!(
                            "Front height {}mm reaches the wall height {}mm",
                            format_mm(front),
                            format_mm(shell.cavity.height)
                        ),
                    )
                    .with_fix("Reduce front_height"),
                );
            }
        }
    }
    out
}

pub fn dividers(design: &Design<'_>, _policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let Derived::DividerRack { dividers, .. } = design.derived else {
        return out;
    };

    if dividers.divider_count < 2 {
        out.push(
            ValidationFinding::error("DIV_TOO_FEW", "divider_count must be >= 2").with_fix("Increase divider_count"),
        );
        return out;
    }
    if dividers.too_tight {
        out.push(
            ValidationFinding::error(
                "DIV_TOO_TIGHT",
                format!(
                    "{}mm usable width cannot fit {} slots",
                    format_mm(dividers.usable_width),
                    dividers.divider_count - 1
                ),
            )
            .with_fix("Reduce divider_count or increase width"),
        );
    }
    let has_slots = design
        .panels
        .iter()
        .filter(|p| p.id == "BOTTOM")
        .flat_map(|p| &p.cutouts)
        .any(|c| matches!(c, Cutout::DividerSlot { .. }));
    if !has_slots {
        out.push(ValidationFinding::error("DIV_NO_SLOTS", "Bottom divider slots are missing"));
    }
    if !design.panels.iter().any(|p| p.id.starts_with("DIVIDER_")) {
        out.push(ValidationFinding::error("DIV_NO_DIVIDERS", "Divider parts are missing"));
    }
    out
}

pub fn card_shoe(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let Derived::CardShoe { shell, shoe } = design.derived else {
        return out;
    };
    let card_t = design.resolved.params.card_shoe.card_thickness;

    if shoe.slot_height < card_t + 0.3 {
        out.push(
            ValidationFinding::warn(
                "CS_SLOT_JAM_RISK",
                format!(
                    "Draw slot {}mm is tight for {}mm cards",
                    format_mm(shoe.slot_height),
                    format_mm(card_t)
                ),
            )
            .with_fix("Check the card thickness"),
        );
    }
    if shoe.slot_height > card_t + 2.5 {
        out.push(ValidationFinding::warn(
            "CS_SLOT_MULTI_CARD",
            format!(
                "Draw slot {}mm may pass several {}mm cards",
                format_mm(shoe.slot_height),
                format_mm(card_t)
            ),
        ));
    }
    let width = shell.cavity.width;
    if width > 0.0 && shell.cavity.height / width > policy.tippy_ratio && !shoe.stabilisers {
        out.push(
            ValidationFinding::warn(
                "CS_TIPPY",
                format!("Height to width ratio {:.2} may tip when drawing", shell.cavity.height / width),
            )
            .with_fix("Enable stabilisers"),
        );
    }
    let angle = design.resolved.params.card_shoe.ramp_angle_deg;
    if angle < policy.ramp_angle_min || angle > policy.ramp_angle_max {
        out.push(ValidationFinding::warn(
            "CS_RAMP_ANGLE_RANGE",
            format!(
                "Ramp angle {}° is outside {}° to {}°",
                format_mm(angle),
                format_mm(policy.ramp_angle_min),
                format_mm(policy.ramp_angle_max)
            ),
        ));
    }
    if !design.panels.iter().any(|p| p.id == "RAMP_PLATE") {
        out.push(ValidationFinding::error("CS_NO_RAMP", "Ramp plate is missing"));
    }
    if !design.panels.iter().any(|p| p.id == "FRONT" && p.cutouts.len() >= 2) {
        out.push(ValidationFinding::error("CS_NO_FRONT_FEATURES", "Front draw slot and window are missing"));
    }
    out
}

pub fn pocket_wheel(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let Some(wheel) = design.derived.pocket_wheel() else {
        return out;
    };
    let piece = design.resolved.params.rotary.max_piece;

    if wheel.chute_width <= piece {
        out.push(
            ValidationFinding::error(
                "RW_CHUTE_TOO_NARROW",
                format!(
                    "Chute {}mm is not wider than the {}mm piece",
                    format_mm(wheel.chute_width),
                    format_mm(piece)
                ),
            )
            .with_fix("Increase chute_width"),
        );
    }
    if wheel.wall_between < policy.min_pocket_wall {
        out.push(
            ValidationFinding::error(
                "RW_POCKET_WALL_TOO_THIN",
                format!(
                    "Wall between pockets is {}mm (< {}mm)",
                    format_mm(wheel.wall_between),
                    format_mm(policy.min_pocket_wall)
                ),
            )
            .with_fix("Reduce pocket_count or max_piece"),
        );
    }
    out
}

/// Chute width against the piece size, for both rotary templates
pub fn bridging(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let Some(wheel) = design.derived.pocket_wheel() else {
        return out;
    };
    let rotary = &design.resolved.params.rotary;
    let ratio = policy.bridging_ratio(rotary.irregular);
    if wheel.chute_width < ratio * rotary.max_piece {
        out.push(
            ValidationFinding::warn(
                "RW_BRIDGING_RISK",
                format!(
                    "Chute {}mm is under {}x the {}mm piece; pieces may bridge",
                    format_mm(wheel.chute_width),
                    format_mm(ratio),
                    format_mm(rotary.max_piece)
                ),
            )
            .with_fix(format!("Use a chute of at least {}mm", format_mm(ratio * rotary.max_piece))),
        );
    }
    out
}

pub fn layer_stack(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let Derived::Layered { wheel, stack } = design.derived else {
        return out;
    };
    let piece = design.resolved.params.rotary.max_piece;

    if stack.hopper_height < 40.0 {
        out.push(
            ValidationFinding::warn(
                "CM_HOPPER_LOW",
                format!("Hopper height {}mm leaves little capacity", format_mm(stack.hopper_height)),
            )
            .with_fix("Increase hopper_height"),
        );
    }
    if stack.layers_total < 2 {
        out.push(ValidationFinding::error("CM_LAYERS_TOO_FEW", "layers_total must be >= 2").with_fix("Use 8 layers for 3mm board"));
    }
    if stack.wheel_layers < 1 {
        out.push(ValidationFinding::error("CM_WHEEL_LAYERS_TOO_FEW", "wheel_layers must be >= 1"));
    }
    if stack.layers_total >= 2 && stack.wheel_layers >= stack.layers_total {
        out.push(
            ValidationFinding::error("CM_LAYER_SPLIT_INVALID", "wheel_layers must be less than layers_total")
                .with_fix("Leave at least one hopper layer"),
        );
    }
    if wheel.chute_width <= 1.1 * piece {
        out.push(ValidationFinding::error(
            "CM_CHUTE_TOO_NARROW",
            format!(
                "Chute {}mm is too close to the {}mm piece",
                format_mm(wheel.chute_width),
                format_mm(piece)
            ),
        ));
    }
    if wheel.wall_between < policy.min_pocket_wall {
        out.push(
            ValidationFinding::error(
                "CM_POCKET_WALL_TOO_THIN",
                format!("Wall between pockets is {}mm", format_mm(wheel.wall_between)),
            )
            .with_fix("Reduce pocket_count or max_piece"),
        );
    }
    if stack.screw_margin < 6.0 {
        out.push(
            ValidationFinding::warn("CM_SCREW_MARGIN_SMALL", "Screw holes sit close to the plate edge")
                .with_fix("Use a screw_margin of 10 to 12mm"),
        );
    }
    if stack.screw_margin > stack.plate_width.min(stack.plate_height) / 3.0 {
        out.push(ValidationFinding::warn("CM_SCREW_MARGIN_LARGE", "Screw margin makes the plates oversized"));
    }
    if stack.hopper_layers == 0 {
        out.push(
            ValidationFinding::error("CM_NO_HOPPER_LAYERS", "No hopper spacer layers were generated")
                .with_fix("Increase layers_total or reduce wheel_layers"),
        );
    }
    out
}

pub fn layout(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let layout = &design.resolved.params.layout;
    if layout.padding < policy.min_padding {
        out.push(ValidationFinding::warn(
            "LAYOUT_PADDING_SMALL",
            format!("Padding {}mm may fuse neighbouring parts", format_mm(layout.padding)),
        ));
    }
    for panel in design.panels {
        let width = panel.bounds().width();
        if width > layout.max_row_width {
            out.push(ValidationFinding::warn(
                "LAYOUT_PANEL_WIDER_THAN_ROW",
                format!(
                    "{} is {}mm wide, over the {}mm row",
                    panel.id,
                    format_mm(width),
                    format_mm(layout.max_row_width)
                ),
            ));
        }
    }
    out
}

pub fn flex(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let mut out = Vec::new();
    let t = design.resolved.thickness();
    if let Some(shell) = design.derived.shell() {
        if t > 0.0 && shell.wall_height > policy.flex_ratio * t {
            out.push(
                ValidationFinding::warn(
                    "FLEX_TALL_THIN_WALL",
                    format!(
                        "{}mm walls in {}mm board may flex",
                        format_mm(shell.wall_height),
                        format_mm(t)
                    ),
                )
                .with_fix("Use thicker board or add a lid"),
            );
        }
    }
    out
}

pub fn maturity(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    match policy.maturity(design.template) {
        Maturity::Experimental => vec![ValidationFinding::info(
            "TEMPLATE_EXPERIMENTAL",
            format!("{} is experimental; test-cut before a full run", design.template),
        )],
        Maturity::Stable => Vec::new(),
    }
}
