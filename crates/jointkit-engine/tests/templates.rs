//! Template library checks across every template.

use jointkit_engine::{generate, GenerateParams, Maturity, Severity, TemplateId};

#[test]
fn test_ids_round_trip_through_strings() {
    for id in TemplateId::ALL {
        let parsed: TemplateId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
        let upper: TemplateId = id.as_str().to_uppercase().parse().unwrap();
        assert_eq!(upper, id);
    }
    assert!("".parse::<TemplateId>().is_err());
}

#[test]
fn test_defaults_have_no_blocking_findings() {
    for id in TemplateId::ALL {
        let generation = generate(id, &GenerateParams::default()).unwrap();
        let blocking: Vec<_> = generation
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        assert!(blocking.is_empty(), "{id}: {blocking:?}");
    }
}

#[test]
fn test_defaults_keep_cutouts_inside_panels() {
    for id in TemplateId::ALL {
        let generation = generate(id, &GenerateParams::default()).unwrap();
        assert!(
            !generation.findings.iter().any(|f| f.code == "GEOM_CUTOUT_OUTSIDE_PANEL"),
            "{id}"
        );
    }
}

#[test]
fn test_shell_templates_declare_joints() {
    for id in [
        TemplateId::TrayOpenFront,
        TemplateId::DividerRack,
        TemplateId::WindowFront,
        TemplateId::CardShoe,
    ] {
        let meta = generate(id, &GenerateParams::default()).unwrap().metadata;
        assert!(meta.joints.len() >= 8, "{id}");
        for joint in &meta.joints {
            assert_eq!(joint.count % 2, 1, "{}", joint.id);
            assert!(joint.count >= 3, "{}", joint.id);
        }
    }
}

#[test]
fn test_rotary_templates_have_no_joints() {
    for id in [TemplateId::RotaryWheel, TemplateId::RotaryLayered] {
        let meta = generate(id, &GenerateParams::default()).unwrap().metadata;
        assert!(meta.joints.is_empty(), "{id}");
    }
}

#[test]
fn test_maturity_in_metadata() {
    let layered = generate(TemplateId::RotaryLayered, &GenerateParams::default()).unwrap();
    assert_eq!(layered.metadata.maturity, Maturity::Experimental);
    let tray = generate(TemplateId::TrayOpenFront, &GenerateParams::default()).unwrap();
    assert_eq!(tray.metadata.maturity, Maturity::Stable);
}

#[test]
fn test_external_mode_shrinks_cavity() {
    let mut params = GenerateParams::default();
    params.dimensions.dimension_mode = jointkit_engine::DimensionMode::External;
    let meta = generate(TemplateId::WindowFront, &params).unwrap().metadata;
    assert_eq!(meta.internal.width, 129.0);
    assert_eq!(meta.internal.depth, 84.0);
    assert_eq!(meta.internal.height, 77.0);
    assert_eq!(meta.external.width, 135.0);
}

#[test]
fn test_sheet_respects_row_width() {
    let mut params = GenerateParams::default();
    params.layout.max_row_width = 200.0;
    let meta = generate(TemplateId::WindowFront, &params).unwrap().metadata;
    // Widest window-box panel is 141 mm; rows never exceed the limit plus margins.
    assert!(meta.sheet.width <= 200.0 + 2.0 * params.layout.margin);
}
