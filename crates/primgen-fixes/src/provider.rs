//! Fix providers, one per diagnostic code.

use primgen_common::Diagnostic;
use primgen_syntax::Compilation;
use serde::Serialize;
use tracing::trace;

use crate::edits::TreeEdit;

/// One offered fix: a stable id for host-side grouping, a user-facing
/// title, and the structural edit to apply.
#[derive(Clone, Debug, Serialize)]
pub struct CodeFix {
    pub title: String,
    pub fix_id: &'static str,
    pub edit: TreeEdit,
}

/// All fixes applicable to one diagnostic.
#[must_use]
pub fn fixes_for(diagnostic: &Diagnostic, compilation: &Compilation) -> Vec<CodeFix> {
    let fixes = match diagnostic.code {
        "PG01" => rename_fixes(diagnostic),
        "PG02" | "PG03" => remove_annotation(diagnostic, compilation).into_iter().collect(),
        "PG04" => {
            let mut fixes = Vec::new();
            if let Some((ty, _)) = declaring_context(diagnostic, compilation) {
                // a non-partial struct cannot be reopened as ref elsewhere
                if ty.modifiers.is_partial() {
                    fixes.push(CodeFix {
                        title: format!("Make '{}' a ref struct", ty.name),
                        fix_id: "primgen.make-ref-struct",
                        edit: TreeEdit::MakeRefStruct { type_node: ty.id },
                    });
                }
            }
            fixes.extend(remove_annotation(diagnostic, compilation));
            fixes
        }
        "PG05" => {
            let mut fixes = Vec::new();
            if let Some((_, param)) = declaring_context(diagnostic, compilation) {
                fixes.push(CodeFix {
                    title: format!("Add 'ref' modifier to '{}'", param.name),
                    fix_id: "primgen.add-ref-modifier",
                    edit: TreeEdit::AddRefModifier { param_node: param.id },
                });
            }
            fixes.extend(remove_annotation(diagnostic, compilation));
            fixes
        }
        _ => Vec::new(),
    };
    trace!(code = diagnostic.code, count = fixes.len(), "fixes computed");
    fixes
}

/// One rename fix per legal replacement name the diagnostic carries.
fn rename_fixes(diagnostic: &Diagnostic) -> Vec<CodeFix> {
    let Some(fields) = diagnostic.properties.get("fields") else {
        return Vec::new();
    };
    fields
        .split_whitespace()
        .map(|name| CodeFix {
            title: format!("Use '{name}'"),
            fix_id: "primgen.use-generated-member",
            edit: TreeEdit::RenameIdentifier {
                node: diagnostic.location.node,
                new_name: name.to_string(),
            },
        })
        .collect()
}

fn remove_annotation(diagnostic: &Diagnostic, compilation: &Compilation) -> Option<CodeFix> {
    let annotation = compilation.enclosing_annotation(diagnostic.location.node)?;
    let bare = annotation
        .ty_name
        .rsplit_once('.')
        .map_or(annotation.ty_name.as_str(), |(_, bare)| bare);
    let bare = bare.strip_suffix("Attribute").unwrap_or(bare);
    Some(CodeFix {
        title: format!("Remove [{bare}]"),
        fix_id: "primgen.remove-annotation",
        edit: TreeEdit::RemoveAnnotation {
            annotation: annotation.id,
        },
    })
}

fn declaring_context<'a>(
    diagnostic: &Diagnostic,
    compilation: &'a Compilation,
) -> Option<(&'a primgen_syntax::TypeDecl, &'a primgen_syntax::ParamDecl)> {
    let annotation = compilation.enclosing_annotation(diagnostic.location.node)?;
    compilation.context_of_annotation(annotation.id)
}
