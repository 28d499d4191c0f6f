//! Annotation extraction, structural validation and usage analysis.
//!
//! This crate is the analysis half of primgen. Given an indexed
//! [`primgen_syntax::Compilation`], it:
//! - gates every annotated parameter through the structural validator
//!   (placement and ref-field shape rules),
//! - turns the surviving annotations into [`GeneratedMember`] descriptors,
//!   resolving options against [`primgen_common::GenerationDefaults`],
//! - walks each declaring type's body for illegal direct uses of the
//!   shadowed parameters,
//! - and groups the results per declaring type for the emitter.
//!
//! All failures are diagnostics in the sink; nothing here aborts a run.

pub mod members;
pub use members::{FieldSpec, GeneratedMember, PropertySpec, RefFieldSpec, Setter};

pub mod parents;
pub use parents::{ParentChain, ParentShell};

pub mod extract;
pub use extract::{Extraction, Extractor};

pub mod validate;
pub use validate::validate_parameter;

pub mod walk;
pub use walk::UsageWalker;

pub mod pipeline;
pub use pipeline::{AnnotatedParameter, TypeGeneration, analyze};
