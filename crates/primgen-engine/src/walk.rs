//! Usage walker: finds illegal direct references to an annotated parameter
//! inside its declaring type's body.
//!
//! A reference is legal when it sits in the parameter list itself (the walk
//! never enters it), is the operand of a `nameof(...)` expression, or —
//! while the parameter's member-initializer exemption holds — appears
//! inside a plain field initializer, the base-constructor argument list, or
//! a property initializer. Property accessor bodies and expression-bodied
//! members are never exempt: initializers run once at construction,
//! accessors may run after the backing value has changed.
//!
//! Local declarations and method/setter parameters shadow the name for
//! their whole block, matching the front end's symbol resolution.

use primgen_common::{Diagnostic, DiagnosticSink, Location, diagnostics};
use primgen_syntax::{AccessorBody, Body, Expr, Member, Stmt, TypeDecl};

/// Per-parameter walker over one declaring type.
pub struct UsageWalker<'a> {
    param_name: &'a str,
    /// Surviving generated member names, in declaration order.
    member_names: Vec<&'a str>,
    allow_in_member_init: bool,
}

impl<'a> UsageWalker<'a> {
    #[must_use]
    pub fn new(param_name: &'a str, member_names: Vec<&'a str>, allow_in_member_init: bool) -> Self {
        UsageWalker {
            param_name,
            member_names,
            allow_in_member_init,
        }
    }

    /// Walk the declaring type's body and base-initializer arguments.
    pub fn walk_type<'t>(&self, ty: &'t TypeDecl, sink: &mut DiagnosticSink) {
        if self.member_names.contains(&self.param_name) {
            // a generated member shares the parameter's name; references
            // resolve to the member, so there is nothing to report
            return;
        }
        let mut shadowed: Vec<&'t str> = Vec::new();
        for arg in &ty.base_args {
            self.visit_expr(arg, self.allow_in_member_init, &mut shadowed, sink);
        }
        for member in &ty.members {
            self.visit_member(member, &mut shadowed, sink);
        }
    }

    fn visit_member<'t>(
        &self,
        member: &'t Member,
        shadowed: &mut Vec<&'t str>,
        sink: &mut DiagnosticSink,
    ) {
        match member {
            Member::Field(field) => {
                if let Some(init) = &field.initializer {
                    self.visit_expr(init, self.allow_in_member_init, shadowed, sink);
                }
            }
            Member::Property(property) => {
                if let Some(init) = &property.initializer {
                    self.visit_expr(init, self.allow_in_member_init, shadowed, sink);
                }
                if let Some(getter) = &property.getter {
                    self.visit_accessor(getter, false, shadowed, sink);
                }
                if let Some(setter) = &property.setter {
                    // the implicit `value` parameter shadows that name
                    self.visit_accessor(setter, true, shadowed, sink);
                }
                if let Some(body) = &property.expr_body {
                    self.visit_expr(body, false, shadowed, sink);
                }
            }
            Member::Method(method) => {
                if method.params.iter().any(|p| p.name == self.param_name) {
                    // the method's own parameter shadows ours everywhere in
                    // its body
                    return;
                }
                match &method.body {
                    Some(Body::Expr(expr)) => self.visit_expr(expr, false, shadowed, sink),
                    Some(Body::Block(stmts)) => self.visit_stmts(stmts, shadowed, sink),
                    None => {}
                }
            }
        }
    }

    fn visit_accessor<'t>(
        &self,
        accessor: &'t AccessorBody,
        is_setter: bool,
        shadowed: &mut Vec<&'t str>,
        sink: &mut DiagnosticSink,
    ) {
        let base = shadowed.len();
        if is_setter {
            shadowed.push("value");
        }
        match accessor {
            AccessorBody::Auto => {}
            AccessorBody::Expr(expr) => self.visit_expr(expr, false, shadowed, sink),
            AccessorBody::Block(stmts) => self.visit_stmts(stmts, shadowed, sink),
        }
        shadowed.truncate(base);
    }

    fn visit_stmts<'t>(
        &self,
        stmts: &'t [Stmt],
        shadowed: &mut Vec<&'t str>,
        sink: &mut DiagnosticSink,
    ) {
        let base = shadowed.len();
        // locals are in scope for the whole block
        for stmt in stmts {
            if let Stmt::Local { name, .. } = stmt {
                shadowed.push(name);
            }
        }
        for stmt in stmts {
            match stmt {
                Stmt::Local { initializer, .. } => {
                    if let Some(init) = initializer {
                        self.visit_expr(init, false, shadowed, sink);
                    }
                }
                Stmt::Expr(expr) => self.visit_expr(expr, false, shadowed, sink),
                Stmt::Return(expr) => {
                    if let Some(expr) = expr {
                        self.visit_expr(expr, false, shadowed, sink);
                    }
                }
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    self.visit_expr(condition, false, shadowed, sink);
                    self.visit_stmts(then_branch, shadowed, sink);
                    self.visit_stmts(else_branch, shadowed, sink);
                }
            }
        }
        shadowed.truncate(base);
    }

    fn visit_expr(
        &self,
        expr: &Expr,
        exempt: bool,
        shadowed: &mut Vec<&str>,
        sink: &mut DiagnosticSink,
    ) {
        match expr {
            Expr::Ident(ident) => {
                if ident.name == self.param_name
                    && !shadowed.contains(&ident.name.as_str())
                    && !exempt
                {
                    sink.report(self.diagnostic(&ident.name, Location::of(ident.id)));
                }
            }
            // nameof yields the identifier's text without evaluating it
            Expr::NameOf(_) => {}
            Expr::Call { callee, args } => {
                self.visit_expr(callee, exempt, shadowed, sink);
                for arg in args {
                    self.visit_expr(arg, exempt, shadowed, sink);
                }
            }
            Expr::MemberAccess { receiver, .. } => {
                self.visit_expr(receiver, exempt, shadowed, sink);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs, exempt, shadowed, sink);
                self.visit_expr(rhs, exempt, shadowed, sink);
            }
            Expr::Lit(_) => {}
        }
    }

    fn diagnostic(&self, name: &str, location: Location) -> Diagnostic {
        let quoted = self
            .member_names
            .iter()
            .map(|member| format!("'{member}'"))
            .collect::<Vec<_>>()
            .join(" or ");
        Diagnostic::new(&diagnostics::ACCESSING_PRIMARY_PARAMETER, location)
            .with_arg(name)
            .with_arg(quoted)
            .with_property("fields", self.member_names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primgen_syntax::{
        Compilation, Expr, FieldMember, MethodMember, ParamDecl, PropertyMember, SourceUnit, Stmt,
        TypeDecl,
    };

    fn walk(ty: TypeDecl, members: Vec<&str>, allow: bool) -> Vec<Diagnostic> {
        let compilation = Compilation::new(SourceUnit::new().ty(ty));
        let mut sink = DiagnosticSink::new();
        UsageWalker::new("i", members, allow).walk_type(&compilation.unit.types[0], &mut sink);
        sink.drain()
    }

    #[test]
    fn method_body_reference_reports_with_replacement_payload() {
        let diags = walk(
            TypeDecl::class("C").member(MethodMember::new("M", "int").expr_body(Expr::ident("i"))),
            vec!["_i", "I"],
            true,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "PG01");
        assert_eq!(diags[0].args, ["i", "'_i' or 'I'"]);
        assert_eq!(diags[0].properties["fields"], "_i I");
    }

    #[test]
    fn one_diagnostic_per_access_site() {
        let diags = walk(
            TypeDecl::class("C").member(MethodMember::new("M", "int").expr_body(Expr::binary(
                "+",
                Expr::ident("i"),
                Expr::ident("i"),
            ))),
            vec!["_i"],
            true,
        );
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn method_parameter_shadows() {
        let diags = walk(
            TypeDecl::class("C").member(
                MethodMember::new("M", "int")
                    .param(ParamDecl::new("i", "int"))
                    .expr_body(Expr::ident("i")),
            ),
            vec!["_i"],
            true,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn local_shadows_for_the_whole_block() {
        let diags = walk(
            TypeDecl::class("C").member(MethodMember::new("M", "int").block(vec![
                Stmt::Local {
                    name: "i".to_string(),
                    initializer: Some(Expr::lit("0")),
                },
                Stmt::Return(Some(Expr::ident("i"))),
            ])),
            vec!["_i"],
            true,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn nameof_is_exempt() {
        let diags = walk(
            TypeDecl::class("C").member(
                MethodMember::new("M", "string").expr_body(Expr::name_of(Expr::ident("i"))),
            ),
            vec!["_i"],
            true,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn field_initializer_exempt_only_when_allowed() {
        let ty = || TypeDecl::class("C").member(FieldMember::new("M", "int").init(Expr::ident("i")));
        assert!(walk(ty(), vec![], true).is_empty());
        assert_eq!(walk(ty(), vec![], false).len(), 1);
    }

    #[test]
    fn base_args_and_property_initializers_follow_the_exemption() {
        let ty = || {
            TypeDecl::class("C")
                .base_arg(Expr::ident("i"))
                .member(PropertyMember::new("P", "int").init(Expr::ident("i")))
        };
        assert!(walk(ty(), vec![], true).is_empty());
        assert_eq!(walk(ty(), vec![], false).len(), 2);
    }

    #[test]
    fn property_accessors_are_never_exempt() {
        let diags = walk(
            TypeDecl::class("C")
                .member(PropertyMember::new("P", "int").getter_expr(Expr::ident("i"))),
            vec![],
            true,
        );
        assert_eq!(diags.len(), 1);
        // no surviving members: the message degrades to an empty offer
        assert_eq!(diags[0].args, ["i", ""]);
        assert_eq!(diags[0].properties["fields"], "");
    }

    #[test]
    fn expression_bodied_property_is_never_exempt() {
        let diags = walk(
            TypeDecl::class("C")
                .member(PropertyMember::new("P", "int").expr_body(Expr::ident("i"))),
            vec!["_i"],
            true,
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn setter_value_identifier_is_shadowed_not_ours() {
        let walker_hits = walk(
            TypeDecl::class("C").member(
                PropertyMember::new("P", "int")
                    .setter_block(vec![Stmt::Expr(Expr::ident("i"))]),
            ),
            vec!["_i"],
            true,
        );
        assert_eq!(walker_hits.len(), 1);
    }

    #[test]
    fn member_sharing_the_parameter_name_suppresses_the_walk() {
        let diags = walk(
            TypeDecl::class("C").member(MethodMember::new("M", "int").expr_body(Expr::ident("i"))),
            vec!["i"],
            true,
        );
        assert!(diags.is_empty());
    }
}
