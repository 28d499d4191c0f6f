//! primgen: companion-member generation for annotated primary parameters.
//!
//! Given an indexed [`Compilation`] whose primary-constructor parameters
//! carry `[Field]`, `[RefField]`, `[Property]` or `[DoNotUse]` annotations,
//! an [`Engine`] run validates placement, synthesizes companion members,
//! diagnoses illegal direct uses of the shadowed parameters, and renders
//! one partial-type companion artifact per declaring type.
//!
//! ```
//! use primgen::{AnnotationNode, Compilation, Engine, ParamDecl, SourceUnit, TypeDecl};
//! use primgen::{CancelToken, GenerationDefaults};
//!
//! let compilation = Compilation::new(SourceUnit::new().namespace("App").ty(
//!     TypeDecl::class("Point")
//!         .partial()
//!         .param(ParamDecl::new("x", "int").annotate(AnnotationNode::field())),
//! ));
//! let mut engine = Engine::new(GenerationDefaults::default());
//! let output = engine.run(&compilation, &CancelToken::new());
//! assert!(output.diagnostics.is_empty());
//! assert!(output.artifacts[0].text.contains("private readonly int _x = x;"));
//! ```
//!
//! Diagnostics are advisory values; the host decides fatality. Code fixes
//! for each diagnostic come from [`fixes_for`].

pub use primgen_common::{
    CancelToken, ConfigSource, Diagnostic, DiagnosticSink, GenerationDefaults, Location, MapConfig,
    NodeId, Severity,
};
pub use primgen_emitter::{Artifact, emit_companion, marker_artifacts};
pub use primgen_engine::{AnnotatedParameter, GeneratedMember, TypeGeneration, analyze};
pub use primgen_fixes::{CodeFix, TreeEdit, apply, fixes_for};
pub use primgen_syntax::{
    AnnotationNode, Compilation, Expr, FieldMember, Member, MethodMember, Modifiers, ParamDecl,
    PropertyMember, SourceUnit, Stmt, TypeDecl, TypeKeyword, TypeRegistry,
};

use tracing::debug;

/// Everything one engine run produced.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// One companion artifact per declaring type with surviving members.
    pub artifacts: Vec<Artifact>,
    /// Diagnostics in report order.
    pub diagnostics: Vec<Diagnostic>,
}

/// A reusable generation engine.
///
/// Holds the host-configured defaults and the per-run diagnostic sink.
/// Restartable: every [`Engine::run`] starts from a clean sink and carries
/// nothing over from previous runs.
pub struct Engine {
    defaults: GenerationDefaults,
    sink: DiagnosticSink,
}

impl Engine {
    #[must_use]
    pub fn new(defaults: GenerationDefaults) -> Self {
        Engine {
            defaults,
            sink: DiagnosticSink::new(),
        }
    }

    #[must_use]
    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }

    /// Analyze one compilation snapshot and emit its companions.
    ///
    /// A cancelled run returns the artifacts of the types completed before
    /// the cancellation was observed; unfinished types contribute neither
    /// artifacts nor diagnostics.
    pub fn run(&mut self, compilation: &Compilation, cancel: &CancelToken) -> RunOutput {
        self.sink.clear();
        let plans = analyze(compilation, &self.defaults, cancel, &mut self.sink);
        let artifacts = plans.iter().map(emit_companion).collect();
        let diagnostics = self.sink.drain();
        debug!(
            plans = plans.len(),
            diagnostics = diagnostics.len(),
            "run finished"
        );
        RunOutput {
            artifacts,
            diagnostics,
        }
    }
}
