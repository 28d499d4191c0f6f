//! Structural validation: placement and shape rules checked before
//! extraction.
//!
//! Rules, per annotation occurrence:
//! - any recognized annotation on a parameter outside a class/struct
//!   primary parameter list generates nothing (PG02, warning) and the
//!   parameter is skipped entirely — no extraction, no usage walk;
//! - `[RefField]` requires a `ref` struct (PG04, error) and a `ref`
//!   parameter (PG05, error); both are reported independently and either
//!   alone suppresses generation for the parameter.

use primgen_common::{Diagnostic, DiagnosticSink, Location, diagnostics};
use primgen_syntax::{MarkerKind, MarkerTypes, ParamDecl, TypeDecl, TypeKeyword};
use smallvec::SmallVec;

/// Gate one parameter. Returns `true` when extraction may proceed.
///
/// Parameters without any recognized annotation are not candidates and
/// return `false` silently.
pub fn validate_parameter(
    ty: &TypeDecl,
    param: &ParamDecl,
    primary: bool,
    markers: MarkerTypes,
    sink: &mut DiagnosticSink,
) -> bool {
    let recognized: SmallVec<[(&primgen_syntax::AnnotationNode, MarkerKind); 4]> = param
        .annotations()
        .filter_map(|annotation| {
            markers
                .classify(annotation.ty)
                .map(|kind| (annotation, kind))
        })
        .collect();
    if recognized.is_empty() {
        return false;
    }

    if !primary || !ty.keyword.supports_generation() {
        for (annotation, _) in &recognized {
            sink.report(Diagnostic::new(
                &diagnostics::NON_PRIMARY_PARAMETER,
                Location::of(annotation.id),
            ));
        }
        return false;
    }

    let mut suppressed = false;
    let is_ref_struct = ty.keyword == TypeKeyword::Struct && ty.modifiers.is_ref();
    for (annotation, kind) in &recognized {
        if *kind != MarkerKind::RefField {
            continue;
        }
        if !is_ref_struct {
            sink.report(
                Diagnostic::new(
                    &diagnostics::REF_FIELD_IN_NON_REF_STRUCT,
                    Location::of(annotation.id),
                )
                .with_arg(&ty.name),
            );
            suppressed = true;
        }
        if !param.modifiers.is_ref() {
            sink.report(
                Diagnostic::new(
                    &diagnostics::REF_FIELD_ON_NON_REF_PARAM,
                    Location::of(annotation.id),
                )
                .with_arg(&param.name),
            );
            suppressed = true;
        }
    }
    !suppressed
}

#[cfg(test)]
mod tests {
    use super::*;
    use primgen_common::DiagnosticSink;
    use primgen_syntax::{AnnotationNode, Compilation, MarkerTypes, ParamDecl, SourceUnit, TypeDecl};

    fn validate(ty: TypeDecl, primary: bool) -> (bool, Vec<Diagnostic>) {
        let compilation = Compilation::new(SourceUnit::new().ty(ty));
        let markers = MarkerTypes::resolve(&compilation.registry).expect("markers interned");
        let mut sink = DiagnosticSink::new();
        let ty = &compilation.unit.types[0];
        let ok = validate_parameter(ty, &ty.params[0], primary, markers, &mut sink);
        (ok, sink.drain())
    }

    #[test]
    fn plain_field_on_class_passes() {
        let (ok, diags) = validate(
            TypeDecl::class("C").param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
            true,
        );
        assert!(ok);
        assert!(diags.is_empty());
    }

    #[test]
    fn record_primary_parameter_warns_non_primary() {
        let (ok, diags) = validate(
            TypeDecl::record_class("R")
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
            true,
        );
        assert!(!ok);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "PG02");
    }

    #[test]
    fn unannotated_parameter_is_not_a_candidate() {
        let (ok, diags) = validate(TypeDecl::class("C").param(ParamDecl::new("i", "int")), true);
        assert!(!ok);
        assert!(diags.is_empty());
    }

    #[test]
    fn ref_field_in_plain_struct_reports_both_violations() {
        let (ok, diags) = validate(
            TypeDecl::struct_("S")
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::ref_field())),
            true,
        );
        assert!(!ok);
        let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
        assert_eq!(codes, ["PG04", "PG05"]);
        assert_eq!(diags[0].args, ["S"]);
        assert_eq!(diags[1].args, ["i"]);
    }

    #[test]
    fn ref_field_on_ref_param_in_ref_struct_passes() {
        let (ok, diags) = validate(
            TypeDecl::struct_("S")
                .ref_()
                .param(ParamDecl::new("i", "int").ref_().annotate(AnnotationNode::ref_field())),
            true,
        );
        assert!(ok);
        assert!(diags.is_empty());
    }

    #[test]
    fn ref_field_in_ref_record_struct_is_still_invalid() {
        let (ok, diags) = validate(
            TypeDecl::record_struct("S")
                .ref_()
                .param(ParamDecl::new("i", "int").ref_().annotate(AnnotationNode::ref_field())),
            true,
        );
        // record primary parameter lists never generate at all
        assert!(!ok);
        assert_eq!(diags[0].code, "PG02");
    }
}
