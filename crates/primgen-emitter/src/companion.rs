//! Companion artifact rendering for one declaring type.

use primgen_engine::TypeGeneration;
use tracing::debug;

use crate::writer::Writer;

/// One generated source file, addressed by hint name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub hint_name: String,
    pub text: String,
}

/// Render the companion source for one generation plan.
///
/// Layout mirrors the conventional nested-reopening shape:
///
/// ```text
/// // <auto-generated/>
/// namespace N
/// {
///     partial class Outer<T> where T : new()
///     {
///         partial struct Inner
///         {
///             private readonly int _i = i;
///         }
///     }
/// }
/// ```
#[must_use]
pub fn emit_companion(generation: &TypeGeneration) -> Artifact {
    let mut w = Writer::new();
    w.line("// <auto-generated/>");
    let mut scopes = 0usize;

    if let Some(namespace) = &generation.namespace {
        w.line(&format!("namespace {namespace}"));
        w.open();
        scopes += 1;
    }
    for shell in generation.parents.shells() {
        let mut reopening = format!("partial {} {}", shell.keyword, shell.display_name());
        if let Some(constraints) = &shell.constraints {
            reopening.push(' ');
            reopening.push_str(constraints);
        }
        w.line(&reopening);
        w.open();
        scopes += 1;
    }

    for param in &generation.params {
        for member in &param.members {
            // documented members render as several lines; re-indent each
            for line in member.render(&param.name, &param.ty).lines() {
                w.line(line);
            }
        }
    }

    for _ in 0..scopes {
        w.close();
    }

    let hint_name = format!("Primgen.{}.g.cs", generation.type_name());
    let text = w.finish();
    debug!(hint = %hint_name, bytes = text.len(), "companion emitted");
    Artifact { hint_name, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primgen_common::{CancelToken, DiagnosticSink, GenerationDefaults};
    use primgen_engine::analyze;
    use primgen_syntax::{AnnotationNode, Compilation, ParamDecl, SourceUnit, TypeDecl};

    fn emit(unit: SourceUnit) -> Artifact {
        let compilation = Compilation::new(unit);
        let mut sink = DiagnosticSink::new();
        let plans = analyze(
            &compilation,
            &GenerationDefaults::default(),
            &CancelToken::new(),
            &mut sink,
        );
        assert_eq!(plans.len(), 1, "expected exactly one plan");
        emit_companion(&plans[0])
    }

    #[test]
    fn namespaced_class_round_trip() {
        let artifact = emit(SourceUnit::new().namespace("App").ty(
            TypeDecl::class("C")
                .partial()
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
        ));
        assert_eq!(artifact.hint_name, "Primgen.C.g.cs");
        assert_eq!(
            artifact.text,
            "// <auto-generated/>\n\
             namespace App\n\
             {\n\
             \x20   partial class C\n\
             \x20   {\n\
             \x20       private readonly int _i = i;\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn global_namespace_omits_the_block() {
        let artifact = emit(SourceUnit::new().ty(
            TypeDecl::class("C")
                .param(ParamDecl::new("i", "int").annotate(AnnotationNode::field())),
        ));
        assert!(artifact.text.starts_with("// <auto-generated/>\npartial class C\n{\n"));
        assert!(!artifact.text.contains("namespace"));
    }

    #[test]
    fn nested_generic_parents_reopen_with_constraints() {
        let artifact = emit(
            SourceUnit::new().namespace("N").ty(
                TypeDecl::class("Outer")
                    .type_params("<T>")
                    .constraints("where T : new()")
                    .nested(
                        TypeDecl::struct_("Inner").param(
                            ParamDecl::new("i", "int").annotate(AnnotationNode::property()),
                        ),
                    ),
            ),
        );
        assert_eq!(artifact.hint_name, "Primgen.Outer.Inner.g.cs");
        assert!(
            artifact
                .text
                .contains("    partial class Outer<T> where T : new()\n    {\n")
        );
        assert!(artifact.text.contains("        partial struct Inner\n"));
        assert!(
            artifact
                .text
                .contains("            public int I { get; init; } = i;\n")
        );
        // closers for inner, outer, namespace
        assert!(artifact.text.ends_with("        }\n    }\n}\n"));
    }

    #[test]
    fn documented_member_lines_share_the_member_indent() {
        let artifact = emit(SourceUnit::new().ty(TypeDecl::class("C").param(
            ParamDecl::new("i", "int")
                .annotate(AnnotationNode::field().with_str("Summary", "Kept.")),
        )));
        assert!(artifact.text.contains("    /// <summary>\n    /// Kept.\n    /// </summary>\n    private readonly int _i = i;\n"));
    }

    #[test]
    fn identical_plans_emit_identical_bytes() {
        let unit = || {
            SourceUnit::new().namespace("N").ty(
                TypeDecl::class("C").param(
                    ParamDecl::new("a", "int")
                        .annotate(AnnotationNode::field())
                        .annotate(AnnotationNode::property()),
                ),
            )
        };
        assert_eq!(emit(unit()), emit(unit()));
    }
}
