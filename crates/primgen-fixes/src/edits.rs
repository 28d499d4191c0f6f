//! Structural tree edits and their application.
//!
//! Edits address nodes by the pre-order [`NodeId`]s the compilation's
//! indexing pass assigned. [`apply`] rewrites a deep copy and reindexes it;
//! the input compilation is never mutated, so a host can offer several
//! alternative fixes for one diagnostic without interference.

use primgen_common::NodeId;
use primgen_syntax::{
    AccessorBody, Body, Compilation, Expr, Member, Modifiers, ParamDecl, Stmt, TypeDecl,
};
use serde::Serialize;

/// One structural change to the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum TreeEdit {
    /// Replace an identifier reference's text.
    RenameIdentifier { node: NodeId, new_name: String },
    /// Drop one annotation; its group is dropped too once empty.
    RemoveAnnotation { annotation: NodeId },
    /// Insert the `ref` modifier on a (partial) struct declaration.
    MakeRefStruct { type_node: NodeId },
    /// Insert the `ref` modifier on a parameter declaration.
    AddRefModifier { param_node: NodeId },
}

/// Apply one edit, producing a freshly indexed compilation.
#[must_use]
pub fn apply(edit: &TreeEdit, compilation: &Compilation) -> Compilation {
    let mut unit = compilation.unit.clone();
    for ty in &mut unit.types {
        apply_to_type(edit, ty);
    }
    Compilation::with_registry(unit, compilation.registry.clone())
}

fn apply_to_type(edit: &TreeEdit, ty: &mut TypeDecl) {
    if let TreeEdit::MakeRefStruct { type_node } = edit {
        if ty.id == *type_node {
            ty.modifiers |= Modifiers::REF;
        }
    }
    for param in &mut ty.params {
        apply_to_param(edit, param);
    }
    for arg in &mut ty.base_args {
        apply_to_expr(edit, arg);
    }
    for member in &mut ty.members {
        apply_to_member(edit, member);
    }
    for nested in &mut ty.nested {
        apply_to_type(edit, nested);
    }
}

fn apply_to_param(edit: &TreeEdit, param: &mut ParamDecl) {
    match edit {
        TreeEdit::AddRefModifier { param_node } if param.id == *param_node => {
            param.modifiers |= Modifiers::REF;
        }
        TreeEdit::RemoveAnnotation { annotation } => {
            for list in &mut param.annotation_lists {
                list.annotations.retain(|a| a.id != *annotation);
            }
            param
                .annotation_lists
                .retain(|list| !list.annotations.is_empty());
        }
        _ => {}
    }
    if let Some(default) = &mut param.default_value {
        apply_to_expr(edit, default);
    }
}

fn apply_to_member(edit: &TreeEdit, member: &mut Member) {
    match member {
        Member::Field(field) => {
            if let Some(init) = &mut field.initializer {
                apply_to_expr(edit, init);
            }
        }
        Member::Property(property) => {
            if let Some(init) = &mut property.initializer {
                apply_to_expr(edit, init);
            }
            for accessor in [&mut property.getter, &mut property.setter]
                .into_iter()
                .flatten()
            {
                match accessor {
                    AccessorBody::Auto => {}
                    AccessorBody::Expr(expr) => apply_to_expr(edit, expr),
                    AccessorBody::Block(stmts) => apply_to_stmts(edit, stmts),
                }
            }
            if let Some(body) = &mut property.expr_body {
                apply_to_expr(edit, body);
            }
        }
        Member::Method(method) => {
            for param in &mut method.params {
                apply_to_param(edit, param);
            }
            match &mut method.body {
                Some(Body::Expr(expr)) => apply_to_expr(edit, expr),
                Some(Body::Block(stmts)) => apply_to_stmts(edit, stmts),
                None => {}
            }
        }
    }
}

fn apply_to_stmts(edit: &TreeEdit, stmts: &mut [Stmt]) {
    for stmt in stmts {
        match stmt {
            Stmt::Local { initializer, .. } => {
                if let Some(init) = initializer {
                    apply_to_expr(edit, init);
                }
            }
            Stmt::Expr(expr) => apply_to_expr(edit, expr),
            Stmt::Return(expr) => {
                if let Some(expr) = expr {
                    apply_to_expr(edit, expr);
                }
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                apply_to_expr(edit, condition);
                apply_to_stmts(edit, then_branch);
                apply_to_stmts(edit, else_branch);
            }
        }
    }
}

fn apply_to_expr(edit: &TreeEdit, expr: &mut Expr) {
    match expr {
        Expr::Ident(ident) => {
            if let TreeEdit::RenameIdentifier { node, new_name } = edit {
                if ident.id == *node {
                    ident.name = new_name.clone();
                }
            }
        }
        Expr::NameOf(inner) => apply_to_expr(edit, inner),
        Expr::Call { callee, args } => {
            apply_to_expr(edit, callee);
            for arg in args {
                apply_to_expr(edit, arg);
            }
        }
        Expr::MemberAccess { receiver, .. } => apply_to_expr(edit, receiver),
        Expr::Binary { lhs, rhs, .. } => {
            apply_to_expr(edit, lhs);
            apply_to_expr(edit, rhs);
        }
        Expr::Lit(_) => {}
    }
}
