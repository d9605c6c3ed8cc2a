//! Property tests for the finger planner, compensator and resolver.

use jointkit_engine::joints::SegmentKind;
use jointkit_engine::{
    compensate, resolve, to_external, Cavity, DimensionMode, Fabrication, FingerPlan, JointFamily, JointRole,
    JointSettings,
};
use proptest::prelude::*;

fn settings(target: f64, min: u32) -> JointSettings {
    JointSettings {
        target_width: target,
        min_fingers: min,
        count_outer: None,
        count_vertical: None,
    }
}

fn family() -> impl Strategy<Value = JointFamily> {
    prop_oneof![Just(JointFamily::Outer), Just(JointFamily::Vertical)]
}

/// Multiples of 1/64 mm: sums and differences of these stay exact in f64.
fn dyadic(max_mm: u32) -> impl Strategy<Value = f64> {
    (0..max_mm * 64).prop_map(|k| f64::from(k) / 64.0)
}

// =============================================================================
// Finger plans
// =============================================================================

proptest! {
    #[test]
    fn plan_segments_sum_to_length(length in 0.5f64..2000.0, target in 1.0f64..60.0, min in 0u32..15, fam in family()) {
        let plan = FingerPlan::new(length, fam, &settings(target, min));
        prop_assert!((plan.total() - length).abs() <= 1e-9 * length.max(1.0));
        prop_assert_eq!(plan.segments.len(), plan.count as usize);
    }

    #[test]
    fn plan_count_odd_and_at_least_min(length in 0.5f64..2000.0, target in 1.0f64..60.0, min in 0u32..15) {
        let plan = FingerPlan::new(length, JointFamily::Outer, &settings(target, min));
        prop_assert_eq!(plan.count % 2, 1);
        prop_assert!(plan.count >= min);
    }

    #[test]
    fn plan_starts_and_ends_on_tab(length in 5.0f64..800.0, min in 1u32..9) {
        let plan = FingerPlan::new(length, JointFamily::Vertical, &settings(10.0, min));
        prop_assert_eq!(plan.segments.first().map(|s| s.kind), Some(SegmentKind::Tab));
        prop_assert_eq!(plan.segments.last().map(|s| s.kind), Some(SegmentKind::Tab));
        for pair in plan.segments.windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn compensated_sides_keep_length(
        length in 20.0f64..1500.0,
        thickness in 1.0f64..12.0,
        kerf in 0.0f64..0.5,
        clearance in 0.0f64..0.4,
    ) {
        let fab = Fabrication { thickness, kerf, clearance };
        let plan = FingerPlan::new(length, JointFamily::Outer, &settings(10.0_f64.max(3.0 * thickness), 3));
        for role in [JointRole::Owner, JointRole::Mate] {
            let drawn = compensate(&plan, role, &fab);
            prop_assert!((drawn.total() - length).abs() <= 1e-9 * length);
            prop_assert!(drawn.segments.iter().all(|s| s.width >= 0.0));
        }
    }

    #[test]
    fn mate_is_owner_complement(length in 20.0f64..600.0) {
        let fab = Fabrication { thickness: 3.0, kerf: 0.2, clearance: 0.15 };
        let plan = FingerPlan::new(length, JointFamily::Vertical, &settings(10.0, 3));
        let owner = compensate(&plan, JointRole::Owner, &fab);
        let mate = compensate(&plan, JointRole::Mate, &fab);
        for (o, m) in owner.segments.iter().zip(&mate.segments) {
            prop_assert_eq!(o.kind, m.kind.flipped());
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

proptest! {
    #[test]
    fn internal_external_round_trip_is_exact(
        w in dyadic(2000),
        d in dyadic(2000),
        h in dyadic(2000),
        t in dyadic(20),
    ) {
        let internal = Cavity::new(w, d, h);
        let external = to_external(internal, t);
        let back = resolve(DimensionMode::External, external.width, external.depth, external.height, t);
        prop_assert_eq!(back, internal);
    }

    #[test]
    fn round_trip_within_rounding_for_decimals(
        w in 0.0f64..2000.0,
        d in 0.0f64..2000.0,
        h in 0.0f64..2000.0,
        t in 0.1f64..20.0,
    ) {
        let external = to_external(Cavity::new(w, d, h), t);
        let back = resolve(DimensionMode::External, external.width, external.depth, external.height, t);
        prop_assert!((back.width - w).abs() < 1e-9);
        prop_assert!((back.depth - d).abs() < 1e-9);
        prop_assert!((back.height - h).abs() < 1e-9);
    }

    #[test]
    fn resolver_never_clamps(w in -50.0f64..5.0, t in 3.0f64..10.0) {
        let cavity = resolve(DimensionMode::External, w, 100.0, 100.0, t);
        prop_assert_eq!(cavity.width, w - 2.0 * t);
    }
}
