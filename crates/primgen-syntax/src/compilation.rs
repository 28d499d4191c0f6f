//! A source unit bundled with its type registry and node numbering.
//!
//! `Compilation::new` runs the indexing pass: every addressable node gets a
//! stable pre-order [`NodeId`], and every annotation's type name is resolved
//! against the registry. Identical input trees therefore index identically,
//! which is what makes diagnostics and code-fix targets reproducible.

use primgen_common::NodeId;
use rustc_hash::FxHashSet;

use crate::registry::{TypeRegistry, markers};
use crate::tree::{
    AccessorBody, AnnotationNode, Body, Expr, Member, ParamDecl, SourceUnit, Stmt, TypeDecl,
};

/// An indexed source unit ready for analysis.
#[derive(Clone, Debug)]
pub struct Compilation {
    pub unit: SourceUnit,
    pub registry: TypeRegistry,
}

impl Compilation {
    /// Index a unit. The four marker types are interned up front: a host
    /// front end always injects their declarations before running the
    /// engine, so their presence is part of the contract.
    #[must_use]
    pub fn new(unit: SourceUnit) -> Self {
        let mut registry = TypeRegistry::new();
        for name in [
            markers::FIELD,
            markers::REF_FIELD,
            markers::PROPERTY,
            markers::DO_NOT_USE,
        ] {
            registry.intern(name);
        }
        Self::with_registry(unit, registry)
    }

    /// Index a unit against a caller-provided registry. Used by hosts that
    /// manage their own type universe; with an empty registry the marker
    /// types stay unresolvable and the engine produces no output.
    #[must_use]
    pub fn with_registry(unit: SourceUnit, registry: TypeRegistry) -> Self {
        let mut compilation = Compilation { unit, registry };
        compilation.index();
        compilation
    }

    /// Member names declared directly on a type, for collision checks.
    #[must_use]
    pub fn declared_member_names<'a>(&self, ty: &'a TypeDecl) -> FxHashSet<&'a str> {
        ty.members.iter().map(Member::name).collect()
    }

    /// Visit every type declaration with its full nesting path,
    /// outermost-first; the visited type is the last path element.
    pub fn for_each_type<'a>(&'a self, visit: &mut dyn FnMut(&[&'a TypeDecl])) {
        let mut path = Vec::new();
        for ty in &self.unit.types {
            visit_type(ty, &mut path, visit);
        }
    }

    /// Find the annotation a located node belongs to: either the annotation
    /// node itself or one of its named arguments.
    #[must_use]
    pub fn enclosing_annotation(&self, node: NodeId) -> Option<&AnnotationNode> {
        if node.is_none() {
            return None;
        }
        for ty in &self.unit.types {
            if let Some(found) = search_annotation(ty, node) {
                return Some(found);
            }
        }
        None
    }

    /// Visit every parameter (primary and method) with its type path and
    /// whether it sits in a primary parameter list.
    pub fn for_each_param<'a>(
        &'a self,
        visit: &mut dyn FnMut(&[&'a TypeDecl], &'a ParamDecl, bool),
    ) {
        self.for_each_type(&mut |path| {
            let ty = path[path.len() - 1];
            for param in &ty.params {
                visit(path, param, true);
            }
            for member in &ty.members {
                if let Member::Method(method) = member {
                    for param in &method.params {
                        visit(path, param, false);
                    }
                }
            }
        });
    }

    /// The declaring type and parameter an annotation is attached to.
    #[must_use]
    pub fn context_of_annotation(&self, annotation: NodeId) -> Option<(&TypeDecl, &ParamDecl)> {
        let mut found: Option<(NodeId, NodeId)> = None;
        self.for_each_param(&mut |path, param, _| {
            if param
                .annotations()
                .any(|a| a.id == annotation || a.args.iter().any(|arg| arg.id == annotation))
            {
                found = Some((path[path.len() - 1].id, param.id));
            }
        });
        let (ty_id, param_id) = found?;
        let mut result = None;
        self.for_each_param(&mut |path, param, _| {
            let ty = path[path.len() - 1];
            if ty.id == ty_id && param.id == param_id {
                result = Some((ty, param));
            }
        });
        result
    }

    // =========================================================================
    // Indexing
    // =========================================================================

    fn index(&mut self) {
        let mut next = 0u32;
        let registry = &mut self.registry;
        for ty in &mut self.unit.types {
            index_type(ty, registry, &mut next);
        }
    }
}

fn search_annotation(ty: &TypeDecl, node: NodeId) -> Option<&AnnotationNode> {
    let matches = |annotation: &AnnotationNode| {
        annotation.id == node || annotation.args.iter().any(|arg| arg.id == node)
    };
    for param in &ty.params {
        if let Some(found) = param.annotations().find(|a| matches(a)) {
            return Some(found);
        }
    }
    for member in &ty.members {
        if let Member::Method(method) = member {
            for param in &method.params {
                if let Some(found) = param.annotations().find(|a| matches(a)) {
                    return Some(found);
                }
            }
        }
    }
    for nested in &ty.nested {
        if let Some(found) = search_annotation(nested, node) {
            return Some(found);
        }
    }
    None
}

fn visit_type<'a>(
    ty: &'a TypeDecl,
    path: &mut Vec<&'a TypeDecl>,
    visit: &mut dyn FnMut(&[&'a TypeDecl]),
) {
    path.push(ty);
    visit(path);
    for nested in &ty.nested {
        visit_type(nested, path, visit);
    }
    path.pop();
}

fn index_type(ty: &mut TypeDecl, registry: &mut TypeRegistry, next: &mut u32) {
    ty.id = bump(next);
    for param in &mut ty.params {
        index_param(param, registry, next);
    }
    for arg in &mut ty.base_args {
        index_expr(arg, next);
    }
    for member in &mut ty.members {
        index_member(member, registry, next);
    }
    for nested in &mut ty.nested {
        index_type(nested, registry, next);
    }
}

fn index_param(param: &mut ParamDecl, registry: &mut TypeRegistry, next: &mut u32) {
    param.id = bump(next);
    for list in &mut param.annotation_lists {
        list.id = bump(next);
        for annotation in &mut list.annotations {
            annotation.id = bump(next);
            annotation.ty = registry.intern(&annotation.ty_name);
            for arg in &mut annotation.args {
                arg.id = bump(next);
            }
        }
    }
    if let Some(default) = &mut param.default_value {
        index_expr(default, next);
    }
}

fn index_member(member: &mut Member, registry: &mut TypeRegistry, next: &mut u32) {
    match member {
        Member::Field(field) => {
            if let Some(init) = &mut field.initializer {
                index_expr(init, next);
            }
        }
        Member::Property(property) => {
            if let Some(init) = &mut property.initializer {
                index_expr(init, next);
            }
            for accessor in [&mut property.getter, &mut property.setter]
                .into_iter()
                .flatten()
            {
                index_accessor(accessor, next);
            }
            if let Some(body) = &mut property.expr_body {
                index_expr(body, next);
            }
        }
        Member::Method(method) => {
            for param in &mut method.params {
                index_param(param, registry, next);
            }
            match &mut method.body {
                Some(Body::Expr(expr)) => index_expr(expr, next),
                Some(Body::Block(stmts)) => index_stmts(stmts, next),
                None => {}
            }
        }
    }
}

fn index_accessor(accessor: &mut AccessorBody, next: &mut u32) {
    match accessor {
        AccessorBody::Auto => {}
        AccessorBody::Expr(expr) => index_expr(expr, next),
        AccessorBody::Block(stmts) => index_stmts(stmts, next),
    }
}

fn index_stmts(stmts: &mut [Stmt], next: &mut u32) {
    for stmt in stmts {
        match stmt {
            Stmt::Local { initializer, .. } => {
                if let Some(init) = initializer {
                    index_expr(init, next);
                }
            }
            Stmt::Expr(expr) => index_expr(expr, next),
            Stmt::Return(expr) => {
                if let Some(expr) = expr {
                    index_expr(expr, next);
                }
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                index_expr(condition, next);
                index_stmts(then_branch, next);
                index_stmts(else_branch, next);
            }
        }
    }
}

fn index_expr(expr: &mut Expr, next: &mut u32) {
    match expr {
        Expr::Ident(ident) => ident.id = bump(next),
        Expr::NameOf(inner) => index_expr(inner, next),
        Expr::Call { callee, args } => {
            index_expr(callee, next);
            for arg in args {
                index_expr(arg, next);
            }
        }
        Expr::MemberAccess { receiver, .. } => index_expr(receiver, next),
        Expr::Binary { lhs, rhs, .. } => {
            index_expr(lhs, next);
            index_expr(rhs, next);
        }
        Expr::Lit(_) => {}
    }
}

fn bump(next: &mut u32) -> NodeId {
    let id = NodeId(*next);
    *next += 1;
    id
}
