//! # JointKit Engine
//!
//! Parametric geometry and validation engine for laser-cut boxes and small
//! mechanisms cut from sheet stock.
//!
//! ## Pipeline
//!
//! - **Resolver**: internal/external dimension entry to a canonical cavity
//! - **Mechanism library**: one builder per template declaring panels, joints
//!   and cutouts
//! - **Finger-joint planner**: one shared plan per physical edge
//! - **Compensator**: kerf and clearance applied per side of a joint
//! - **Validator**: rule table per template producing coded findings
//! - **Layout**: row-fill sheet packing
//! - **SVG writer**: cut and engrave layers with optional holding tabs
//!
//! The engine is stateless. [`generate`] is a pure function of the template,
//! the parameters and the policy.

pub mod cutout;
pub mod error;
pub mod generate;
pub mod joints;
pub mod layout;
pub mod mechanisms;
pub mod metadata;
pub mod panel;
pub mod params;
pub mod policy;
pub mod resolver;
pub mod svg;
pub mod template;
pub mod validation;

pub use cutout::Cutout;
pub use error::{EngineError, ParameterError, Result};
pub use generate::{generate, generate_by_id, generate_with_policy, Generation};
pub use joints::{compensate, finger_count, FingerPlan, JointFamily, JointRole, JointSettings, JointSpec};
pub use layout::{pack, LayoutSheet, Placement};
pub use mechanisms::{builder_for, Derived, Mechanism, MechanismBuilder};
pub use metadata::Metadata;
pub use panel::{Panel, PanelSpec, Side};
pub use params::GenerateParams;
pub use policy::Policy;
pub use resolver::{resolve, resolve_params, to_external, Cavity, DimensionMode, Fabrication, ResolvedParams};
pub use template::{Maturity, TemplateId};
pub use validation::{Severity, ValidationFinding};
