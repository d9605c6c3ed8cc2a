//! End-to-end scenarios through `generate`.

use jointkit_engine::mechanisms::Derived;
use jointkit_engine::{generate, generate_with_policy, GenerateParams, Policy, Severity, TemplateId};

fn codes(template: TemplateId, params: &GenerateParams) -> Vec<String> {
    generate(template, params)
        .unwrap()
        .findings
        .into_iter()
        .map(|f| f.code)
        .collect()
}

#[test]
fn test_joint_rule_for_tall_tray() {
    let mut params = GenerateParams::default();
    params.dimensions.width = 135.0;
    params.dimensions.depth = 90.0;
    params.dimensions.height = 225.0;

    let generation = generate(TemplateId::TrayOpenFront, &params).unwrap();
    let rule = &generation.metadata.joint_rule;
    assert!((rule.drawn_slot_depth - 2.95).abs() < 1e-9);
    assert!((rule.expected_slot_width - 3.15).abs() < 1e-9);

    let info = generation
        .findings
        .iter()
        .find(|f| f.code == "FIT_JOINT_RULE")
        .unwrap();
    assert_eq!(info.severity, Severity::Info);
    assert!(info.message.contains("2.95"));
    assert!(info.message.contains("3.15"));
}

#[test]
fn test_kerf_equal_to_thickness_is_blocking() {
    let mut params = GenerateParams::default();
    params.fabrication.kerf = params.fabrication.thickness;
    let generation = generate(TemplateId::WindowFront, &params).unwrap();
    assert!(generation.has_blocking_errors());
    assert!(generation
        .findings
        .iter()
        .any(|f| f.code == "FIT_KERF_GE_THICKNESS" && f.severity == Severity::Error));
}

#[test]
fn test_negative_kerf() {
    let mut params = GenerateParams::default();
    params.fabrication.kerf = -0.1;
    assert!(codes(TemplateId::TrayOpenFront, &params).contains(&"FIT_NEGATIVE_KERF".to_string()));
}

#[test]
fn test_crowded_wheel_has_thin_walls() {
    let mut params = GenerateParams::default();
    params.rotary.pocket_count = Some(40);
    let generation = generate(TemplateId::RotaryWheel, &params).unwrap();
    assert!(generation
        .findings
        .iter()
        .any(|f| f.code == "RW_POCKET_WALL_TOO_THIN" && f.severity == Severity::Error));
    assert!(generation.has_blocking_errors());
}

#[test]
fn test_thin_cards_get_minimum_slot() {
    let mut params = GenerateParams::default();
    params.card_shoe.card_thickness = 0.35;
    let generation = generate(TemplateId::CardShoe, &params).unwrap();
    match &generation.metadata.derived {
        Derived::CardShoe { shoe, .. } => assert_eq!(shoe.slot_height, 1.0),
        other => panic!("unexpected derived {other:?}"),
    }
}

#[test]
fn test_bridging_risk_follows_chute_ratio() {
    let mut params = GenerateParams::default();
    params.rotary.max_piece = 10.0;

    params.rotary.chute_width = Some(39.0);
    assert!(codes(TemplateId::RotaryWheel, &params).contains(&"RW_BRIDGING_RISK".to_string()));

    params.rotary.chute_width = Some(40.0);
    assert!(!codes(TemplateId::RotaryWheel, &params).contains(&"RW_BRIDGING_RISK".to_string()));

    params.rotary.irregular = true;
    assert!(codes(TemplateId::RotaryWheel, &params).contains(&"RW_BRIDGING_RISK".to_string()));
}

#[test]
fn test_bridging_ratio_comes_from_policy() {
    let mut params = GenerateParams::default();
    params.rotary.max_piece = 10.0;
    params.rotary.chute_width = Some(25.0);
    let policy = Policy {
        bridging_ratio_uniform: 2.0,
        ..Policy::default()
    };
    let generation = generate_with_policy(TemplateId::RotaryWheel, &params, &policy).unwrap();
    assert!(!generation.findings.iter().any(|f| f.code == "RW_BRIDGING_RISK"));
}

#[test]
fn test_chute_narrower_than_piece() {
    let mut params = GenerateParams::default();
    params.rotary.chute_width = Some(params.rotary.max_piece);
    assert!(codes(TemplateId::RotaryWheel, &params).contains(&"RW_CHUTE_TOO_NARROW".to_string()));
}

#[test]
fn test_generation_is_deterministic() {
    for id in TemplateId::ALL {
        let params = GenerateParams::default();
        let a = generate(id, &params).unwrap();
        let b = generate(id, &params).unwrap();
        assert_eq!(a.drawing, b.drawing, "{id}");
        assert_eq!(a.findings, b.findings, "{id}");
    }
}

#[test]
fn test_non_positive_cavity_reported_not_clamped() {
    let mut params = GenerateParams::default();
    params.dimensions.dimension_mode = jointkit_engine::DimensionMode::External;
    params.dimensions.width = 4.0;
    let generation = generate(TemplateId::TrayOpenFront, &params).unwrap();
    assert!(generation.metadata.internal.width < 0.0);
    assert!(generation
        .findings
        .iter()
        .any(|f| f.code == "STRUCT_NON_POSITIVE_DIMENSION"));
}

#[test]
fn test_tray_front_too_tall() {
    let mut params = GenerateParams::default();
    params.tray.front_height = Some(90.0);
    assert!(codes(TemplateId::TrayOpenFront, &params).contains(&"TRAY_FRONT_TOO_TALL".to_string()));
}

#[test]
fn test_tight_dividers() {
    let mut params = GenerateParams::default();
    params.tray.divider_count = 12;
    params.dimensions.width = 40.0;
    let found = codes(TemplateId::DividerRack, &params);
    assert!(found.contains(&"DIV_TOO_TIGHT".to_string()));
    assert!(found.contains(&"DIV_NO_SLOTS".to_string()));
}

#[test]
fn test_layer_split_invalid() {
    let mut params = GenerateParams::default();
    params.rotary.layers_total = 4;
    params.rotary.wheel_layers = 4;
    let found = codes(TemplateId::RotaryLayered, &params);
    assert!(found.contains(&"CM_LAYER_SPLIT_INVALID".to_string()));
    assert!(found.contains(&"CM_NO_HOPPER_LAYERS".to_string()));
    assert!(found.contains(&"TEMPLATE_EXPERIMENTAL".to_string()));
}

#[test]
fn test_tall_thin_walls_flex() {
    let mut params = GenerateParams::default();
    params.dimensions.height = 200.0;
    assert!(codes(TemplateId::WindowFront, &params).contains(&"FLEX_TALL_THIN_WALL".to_string()));
}

#[test]
fn test_ramp_angle_outside_range() {
    let mut params = GenerateParams::default();
    params.card_shoe.ramp_angle_deg = 20.0;
    assert!(codes(TemplateId::CardShoe, &params).contains(&"CS_RAMP_ANGLE_RANGE".to_string()));
}

#[test]
fn test_shallow_divider_rack_reports_collapsed_slots() {
    let mut params = GenerateParams::default();
    params.dimensions.depth = 10.0;
    let generation = generate(TemplateId::DividerRack, &params).unwrap();

    match &generation.metadata.derived {
        Derived::DividerRack { dividers, .. } => assert!(dividers.slot_length <= 0.0),
        other => panic!("unexpected derived {other:?}"),
    }
    let collapsed: Vec<_> = generation
        .findings
        .iter()
        .filter(|f| f.code == "STRUCT_NON_POSITIVE_DIMENSION" && f.message.contains("divider_slot"))
        .collect();
    assert!(!collapsed.is_empty());
    assert!(collapsed.iter().all(|f| f.severity == Severity::Error));
    assert!(generation.has_blocking_errors());
}

#[test]
fn test_window_wider_than_front_is_reported_and_drawn() {
    let mut params = GenerateParams::default();
    params.dimensions.width = 10.0;
    let generation = generate(TemplateId::WindowFront, &params).unwrap();

    let outside = generation
        .findings
        .iter()
        .find(|f| f.code == "GEOM_CUTOUT_OUTSIDE_PANEL")
        .unwrap();
    assert_eq!(outside.severity, Severity::Error);
    assert!(outside.message.contains("FRONT"));
    assert!(generation.has_blocking_errors());
    assert!(generation.drawing.contains("<g id=\"FRONT\""));
}

#[test]
fn test_loose_clearance() {
    let mut params = GenerateParams::default();
    params.fabrication.clearance = 2.0;
    assert!(codes(TemplateId::TrayOpenFront, &params).contains(&"FIT_CLEARANCE_LOOSE".to_string()));

    params.fabrication.clearance = 0.15;
    assert!(!codes(TemplateId::TrayOpenFront, &params).contains(&"FIT_CLEARANCE_LOOSE".to_string()));
}

#[test]
fn test_few_fingers() {
    let mut params = GenerateParams::default();
    params.joints.min_fingers = 1;
    assert!(codes(TemplateId::WindowFront, &params).contains(&"FIT_FEW_FINGERS".to_string()));
}

#[test]
fn test_thick_cards_risk_jamming() {
    let mut params = GenerateParams::default();
    params.card_shoe.card_thickness = 1.8;
    let generation = generate(TemplateId::CardShoe, &params).unwrap();
    let jam = generation
        .findings
        .iter()
        .find(|f| f.code == "CS_SLOT_JAM_RISK")
        .unwrap();
    assert_eq!(jam.severity, Severity::Warn);
}

#[test]
fn test_tall_shoe_without_stabilisers_is_tippy() {
    let mut params = GenerateParams::default();
    params.card_shoe.capacity = 400;
    params.card_shoe.stabilisers = false;
    assert!(codes(TemplateId::CardShoe, &params).contains(&"CS_TIPPY".to_string()));

    params.card_shoe.stabilisers = true;
    assert!(!codes(TemplateId::CardShoe, &params).contains(&"CS_TIPPY".to_string()));
}

#[test]
fn test_panel_wider_than_row() {
    let mut params = GenerateParams::default();
    params.layout.max_row_width = 100.0;
    let generation = generate(TemplateId::TrayOpenFront, &params).unwrap();
    let wide = generation
        .findings
        .iter()
        .find(|f| f.code == "LAYOUT_PANEL_WIDER_THAN_ROW")
        .unwrap();
    assert_eq!(wide.severity, Severity::Warn);
    assert!(!generation.has_blocking_errors());
}
