//! Validation engine
//!
//! Runs the template's rule table over a finished design. Findings come back
//! in rule-table order, then in the order each rule emits them.

pub mod finding;
pub mod rules;

pub use finding::{Severity, ValidationFinding};
pub use rules::{rules_for, Rule};

use crate::joints::{FingerPlan, JointSpec};
use crate::mechanisms::Derived;
use crate::panel::Panel;
use crate::policy::Policy;
use crate::resolver::ResolvedParams;
use crate::template::TemplateId;
use tracing::debug;

/// Everything the rules can look at
#[derive(Debug, Clone, Copy)]
pub struct Design<'a> {
    pub template: TemplateId,
    pub resolved: &'a ResolvedParams,
    pub panels: &'a [Panel],
    pub joints: &'a [JointSpec],
    /// One plan per joint, same order as `joints`
    pub plans: &'a [FingerPlan],
    pub derived: &'a Derived,
}

pub fn validate(design: &Design<'_>, policy: &Policy) -> Vec<ValidationFinding> {
    let findings: Vec<ValidationFinding> = rules_for(design.template)
        .iter()
        .flat_map(|rule| rule(design, policy))
        .collect();
    debug!("Validated {}: {} findings", design.template, findings.len());
    findings
}

/// Whether any finding blocks export
pub fn has_blocking(findings: &[ValidationFinding]) -> bool {
    findings.iter().any(ValidationFinding::is_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanisms::builder_for;
    use crate::panel::finish_panels;
    use crate::params::GenerateParams;
    use crate::resolver::resolve_params;

    fn findings(template: TemplateId, params: &GenerateParams) -> Vec<ValidationFinding> {
        let resolved = resolve_params(template, params).unwrap();
        let mech = builder_for(template).build(&resolved);
        let plans: Vec<FingerPlan> = mech
            .joints
            .iter()
            .map(|j| FingerPlan::new(j.length, j.family, &resolved.joints))
            .collect();
        let panels = finish_panels(&mech.panels, &plans, &resolved.fabrication);
        let design = Design {
            template,
            resolved: &resolved,
            panels: &panels,
            joints: &mech.joints,
            plans: &plans,
            derived: &mech.derived,
        };
        validate(&design, &Policy::default())
    }

    fn codes(findings: &[ValidationFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.code.as_str()).collect()
    }

    #[test]
    fn test_default_tray_has_only_joint_rule() {
        let found = findings(TemplateId::TrayOpenFront, &GenerateParams::default());
        assert_eq!(codes(&found), ["FIT_JOINT_RULE"]);
        assert!(!has_blocking(&found));
    }

    #[test]
    fn test_kerf_equal_to_thickness_blocks() {
        let mut params = GenerateParams::default();
        params.fabrication.kerf = 3.0;
        let found = findings(TemplateId::WindowFront, &params);
        assert!(codes(&found).contains(&"FIT_KERF_GE_THICKNESS"));
        assert!(has_blocking(&found));
    }

    #[test]
    fn test_missing_divider_slots() {
        let mut params = GenerateParams::default();
        params.tray.divider_count = 1;
        let found = findings(TemplateId::DividerRack, &params);
        assert!(codes(&found).contains(&"DIV_TOO_FEW"));
    }

    #[test]
    fn test_collapsed_outline_is_reported() {
        let template = TemplateId::WindowFront;
        let resolved = resolve_params(template, &GenerateParams::default()).unwrap();
        let mech = builder_for(template).build(&resolved);
        let plans: Vec<FingerPlan> = mech
            .joints
            .iter()
            .map(|j| FingerPlan::new(j.length, j.family, &resolved.joints))
            .collect();
        let mut panels = finish_panels(&mech.panels, &plans, &resolved.fabrication);
        panels[0].outline = jointkit_core::Polygon::new(vec![
            jointkit_core::Point::new(0.0, 0.0),
            jointkit_core::Point::new(10.0, 0.0),
        ]);
        let design = Design {
            template,
            resolved: &resolved,
            panels: &panels,
            joints: &mech.joints,
            plans: &plans,
            derived: &mech.derived,
        };
        let found = validate(&design, &Policy::default());
        assert!(codes(&found).contains(&"GEOM_DEGENERATE_OUTLINE"));
    }

    #[test]
    fn test_findings_follow_rule_order() {
        let mut params = GenerateParams::default();
        params.fabrication.kerf = 3.0;
        params.layout.padding = 1.0;
        let found = findings(TemplateId::TrayOpenFront, &params);
        let kerf = codes(&found).iter().position(|c| *c == "FIT_KERF_GE_THICKNESS").unwrap();
        let padding = codes(&found).iter().position(|c| *c == "LAYOUT_PADDING_SMALL").unwrap();
        assert!(kerf < padding);
    }

    #[test]
    fn test_layered_is_experimental() {
        let found = findings(TemplateId::RotaryLayered, &GenerateParams::default());
        assert_eq!(found.last().map(|f| f.code.as_str()), Some("TEMPLATE_EXPERIMENTAL"));
    }
}
