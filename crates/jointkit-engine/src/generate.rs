//! Generation pipeline
//!
//! resolve → build → plan joints → draw panels → validate → pack → metadata
//! → SVG. Every stage is a pure function of the previous one, so equal
//! inputs give byte-identical drawings and identical findings.

use crate::error::Result;
use crate::joints::FingerPlan;
use crate::layout::pack;
use crate::mechanisms::builder_for;
use crate::metadata::Metadata;
use crate::panel::finish_panels;
use crate::params::GenerateParams;
use crate::policy::Policy;
use crate::resolver::resolve_params;
use crate::svg::{self, SvgOptions};
use crate::template::TemplateId;
use crate::validation::{has_blocking, validate, Design, ValidationFinding};
use tracing::{debug, info, warn};

/// Result of one generation request
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// SVG document
    pub drawing: String,
    pub findings: Vec<ValidationFinding>,
    pub metadata: Metadata,
}

impl Generation {
    /// Whether export should be refused
    pub fn has_blocking_errors(&self) -> bool {
        has_blocking(&self.findings)
    }
}

/// Generate with the default policy
pub fn generate(template: TemplateId, params: &GenerateParams) -> Result<Generation> {
    generate_with_policy(template, params, &Policy::default())
}

/// Generate from a template id string
pub fn generate_by_id(template: &str, params: &GenerateParams, policy: &Policy) -> Result<Generation> {
    generate_with_policy(template.parse()?, params, policy)
}

pub fn generate_with_policy(template: TemplateId, params: &GenerateParams, policy: &Policy) -> Result<Generation> {
    policy.validate()?;
    let resolved = resolve_params(template, params)?;

    let mechanism = builder_for(template).build(&resolved);
    debug!(
        "Built {}: {} panels, {} joints",
        template,
        mechanism.panels.len(),
        mechanism.joints.len()
    );

    let plans: Vec<FingerPlan> = mechanism
        .joints
        .iter()
        .map(|joint| FingerPlan::new(joint.length, joint.family, &resolved.joints))
        .collect();
    let panels = finish_panels(&mechanism.panels, &plans, &resolved.fabrication);

    let design = Design {
        template,
        resolved: &resolved,
        panels: &panels,
        joints: &mechanism.joints,
        plans: &plans,
        derived: &mechanism.derived,
    };
    let findings = validate(&design, policy);

    let layout = &params.layout;
    let sheet = pack(&panels, layout.max_row_width, layout.padding, layout.margin);
    debug!("Packed {} panels on {}x{} sheet", panels.len(), sheet.width, sheet.height);

    let metadata = Metadata::new(
        &resolved,
        policy.maturity(template),
        &mechanism.joints,
        &plans,
        &mechanism.derived,
        &panels,
        &sheet,
    );
    let desc = format!("{} ({})", template.description(), metadata.generator);
    let drawing = svg::render(&panels, &sheet, &SvgOptions::from(layout), &desc, &metadata.to_json()?);

    let generation = Generation {
        drawing,
        findings,
        metadata,
    };
    info!(
        "Generated {}: {} panels, {} findings",
        template,
        panels.len(),
        generation.findings.len()
    );
    if generation.has_blocking_errors() {
        warn!(
            "{} has blocking findings: {}",
            template,
            generation
                .findings
                .iter()
                .filter(|f| f.is_blocking())
                .map(|f| f.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_generate_every_template() {
        for id in TemplateId::ALL {
            let generation = generate(id, &GenerateParams::default()).unwrap();
            assert!(generation.drawing.contains("<g id=\"CUT\""), "{id}");
            for required in id.required_panels() {
                assert!(generation.metadata.panels.iter().any(|p| p == required), "{id} {required}");
            }
        }
    }

    #[test]
    fn test_unknown_template_id() {
        let err = generate_by_id("bird_feeder", &GenerateParams::default(), &Policy::default()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTemplate(_)));
    }

    #[test]
    fn test_non_finite_param_is_error() {
        let mut params = GenerateParams::default();
        params.dimensions.width = f64::NAN;
        assert!(matches!(
            generate(TemplateId::TrayOpenFront, &params),
            Err(EngineError::Parameter(_))
        ));
    }
}
