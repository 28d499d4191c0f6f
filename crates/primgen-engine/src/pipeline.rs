//! The analysis pipeline: one pass over an indexed compilation producing
//! per-type generation plans plus diagnostics.
//!
//! Ordering is deterministic by construction: types are visited in tree
//! order, parameters in declaration order, annotations in list order. Two
//! runs over identical input produce identical plans and identical
//! diagnostic sequences.

use primgen_common::{CancelToken, DiagnosticSink, GenerationDefaults};
use primgen_syntax::{Compilation, MarkerTypes};
use tracing::{debug, trace};

use crate::extract::Extractor;
use crate::members::GeneratedMember;
use crate::parents::ParentChain;
use crate::validate::validate_parameter;
use crate::walk::UsageWalker;

/// One primary parameter that survived validation, with its member plan.
#[derive(Clone, Debug)]
pub struct AnnotatedParameter {
    pub name: String,
    pub ty: String,
    /// Surviving member descriptors in annotation declaration order.
    pub members: Vec<GeneratedMember>,
    pub allow_in_member_init: bool,
}

/// The generation plan for one declaring type.
#[derive(Clone, Debug)]
pub struct TypeGeneration {
    pub namespace: Option<String>,
    /// Enclosing-type chain, declaring type last.
    pub parents: ParentChain,
    pub params: Vec<AnnotatedParameter>,
}

impl TypeGeneration {
    /// Dotted bare type names, used for artifact naming.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.parents.concat_type_name()
    }
}

/// Run the full analysis over a compilation.
///
/// Returns one plan per declaring type that has at least one member to
/// generate. Validation failures, name collisions and illegal parameter
/// uses land in `sink`; a missing marker-type set makes the whole run a
/// silent no-op.
pub fn analyze(
    compilation: &Compilation,
    defaults: &GenerationDefaults,
    cancel: &CancelToken,
    sink: &mut DiagnosticSink,
) -> Vec<TypeGeneration> {
    let Some(markers) = MarkerTypes::resolve(&compilation.registry) else {
        // the host did not inject the marker declarations; nothing is
        // annotated with them, so there is nothing to do
        debug!("marker types unresolved, skipping run");
        return Vec::new();
    };
    let extractor = Extractor::new(markers, defaults);
    let mut generations = Vec::new();

    compilation.for_each_type(&mut |path| {
        if cancel.is_cancelled() {
            return;
        }
        let ty = path[path.len() - 1];
        let mut params = Vec::new();

        for param in &ty.params {
            if !validate_parameter(ty, param, true, markers, sink) {
                continue;
            }
            let extraction = extractor.extract_parameter(compilation, ty, param, sink);
            trace!(
                ty = %ty.name,
                param = %param.name,
                members = extraction.members.len(),
                "parameter extracted"
            );
            let member_names: Vec<&str> =
                extraction.members.iter().map(GeneratedMember::name).collect();
            UsageWalker::new(&param.name, member_names, extraction.allow_in_member_init)
                .walk_type(ty, sink);
            if !extraction.members.is_empty() {
                params.push(AnnotatedParameter {
                    name: param.name.clone(),
                    ty: param.ty.clone(),
                    members: extraction.members,
                    allow_in_member_init: extraction.allow_in_member_init,
                });
            }
        }

        // annotations on ordinary method parameters are misplacements
        for member in &ty.members {
            if let primgen_syntax::Member::Method(method) = member {
                for param in &method.params {
                    validate_parameter(ty, param, false, markers, sink);
                }
            }
        }

        if !params.is_empty() {
            generations.push(TypeGeneration {
                namespace: compilation.unit.namespace.clone(),
                parents: ParentChain::from_path(path),
                params,
            });
        }
    });

    debug!(
        types = generations.len(),
        diagnostics = sink.len(),
        "analysis complete"
    );
    generations
}

#[cfg(test)]
mod tests {
    use super::*;
    use primgen_syntax::{
        AnnotationNode, Expr, MethodMember, ParamDecl, SourceUnit, TypeDecl, TypeRegistry,
    };

    fn run(unit: SourceUnit) -> (Vec<TypeGeneration>, Vec<primgen_common::Diagnostic>) {
        let compilation = Compilation::new(unit);
        let mut sink = DiagnosticSink::new();
        let plans = analyze(
            &compilation,
            &GenerationDefaults::default(),
            &CancelToken::new(),
            &mut sink,
        );
        (plans, sink.drain())
    }

    #[test]
    fn field_and_property_on_one_parameter_share_a_plan() {
        let (plans, diags) = run(
            SourceUnit::new().namespace("App").ty(
                TypeDecl::class("C").partial().param(
                    ParamDecl::new("i", "int")
                        .annotate(AnnotationNode::field())
                        .annotate(AnnotationNode::property()),
                ),
            ),
        );
        assert!(diags.is_empty());
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].namespace.as_deref(), Some("App"));
        assert_eq!(plans[0].type_name(), "C");
        assert_eq!(plans[0].params.len(), 1);
        let names: Vec<_> = plans[0].params[0]
            .members
            .iter()
            .map(GeneratedMember::name)
            .collect();
        assert_eq!(names, ["_i", "I"]);
    }

    #[test]
    fn do_not_use_parameter_is_walked_but_generates_nothing() {
        let (plans, diags) = run(SourceUnit::new().ty(
            TypeDecl::class("C")
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::do_not_use()))
                .member(MethodMember::new("M", "int").expr_body(Expr::ident("i"))),
        ));
        assert!(plans.is_empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "PG01");
        assert_eq!(diags[0].properties["fields"], "");
    }

    #[test]
    fn method_parameter_annotation_is_flagged() {
        let (plans, diags) = run(SourceUnit::new().ty(TypeDecl::class("C").member(
            MethodMember::new("M", "void")
                .param(ParamDecl::new("x", "int").annotate(AnnotationNode::field())),
        )));
        assert!(plans.is_empty());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "PG02");
    }

    #[test]
    fn nested_declaring_type_carries_its_full_chain() {
        let (plans, _) = run(SourceUnit::new().ty(
            TypeDecl::class("Outer").nested(
                TypeDecl::struct_("Inner")
                    .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
            ),
        ));
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].type_name(), "Outer.Inner");
        assert_eq!(plans[0].parents.depth(), 2);
    }

    #[test]
    fn missing_markers_mean_a_silent_empty_run() {
        let compilation = Compilation::with_registry(
            SourceUnit::new().ty(
                TypeDecl::class("C")
                    .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
            ),
            TypeRegistry::new(),
        );
        let mut sink = DiagnosticSink::new();
        let plans = analyze(
            &compilation,
            &GenerationDefaults::default(),
            &CancelToken::new(),
            &mut sink,
        );
        assert!(plans.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn cancellation_stops_producing_plans() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let compilation = Compilation::new(SourceUnit::new().ty(
            TypeDecl::class("C")
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
        ));
        let mut sink = DiagnosticSink::new();
        let plans = analyze(
            &compilation,
            &GenerationDefaults::default(),
            &cancel,
            &mut sink,
        );
        assert!(plans.is_empty());
    }

    #[test]
    fn identical_inputs_produce_identical_plans() {
        let unit = || {
            SourceUnit::new().namespace("N").ty(
                TypeDecl::class("C").param(
                    ParamDecl::new("a", "int")
                        .annotate(AnnotationNode::field())
                        .annotate(AnnotationNode::property()),
                ),
            )
        };
        let (first, _) = run(unit());
        let (second, _) = run(unit());
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}
