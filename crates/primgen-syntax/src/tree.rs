//! The queryable syntax tree handed to the engine by the front end.
//!
//! The model is deliberately narrow: it carries exactly what the generation
//! and validation passes query — type declarations with their nesting and
//! primary parameter lists, annotation applications with named arguments,
//! and enough of the member/statement/expression surface for the usage
//! walker to find identifier references. Constructors are builder-style so
//! hosts and tests can assemble trees fluently.
//!
//! Node ids start out as `NodeId::NONE` and are assigned by
//! [`crate::compilation::Compilation`] in a stable pre-order pass.

use primgen_common::NodeId;

use crate::modifiers::Modifiers;
use crate::registry::{TypeId, markers};

// =============================================================================
// Types and parameters
// =============================================================================

/// Declaration keyword of a type shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKeyword {
    Class,
    Struct,
    RecordClass,
    RecordStruct,
}

impl TypeKeyword {
    /// The keyword text as it appears in a declaration.
    #[must_use]
    pub fn render(self) -> &'static str {
        match self {
            TypeKeyword::Class => "class",
            TypeKeyword::Struct => "struct",
            TypeKeyword::RecordClass => "record class",
            TypeKeyword::RecordStruct => "record struct",
        }
    }

    /// Primary parameter lists only generate on plain classes and structs.
    #[must_use]
    pub fn supports_generation(self) -> bool {
        matches!(self, TypeKeyword::Class | TypeKeyword::Struct)
    }
}

/// One compilation unit: an optional (dotted) namespace and its top-level
/// type declarations.
#[derive(Clone, Debug, Default)]
pub struct SourceUnit {
    pub namespace: Option<String>,
    pub types: Vec<TypeDecl>,
}

impl SourceUnit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn ty(mut self, ty: TypeDecl) -> Self {
        self.types.push(ty);
        self
    }
}

/// A type declaration: shell (keyword, name, generics, constraints,
/// modifiers), primary parameter list, base-initializer arguments, body
/// members, and nested types.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub id: NodeId,
    pub keyword: TypeKeyword,
    pub name: String,
    /// Generic parameter list as written, e.g. `"<T, U>"`.
    pub type_params: Option<String>,
    /// Constraint clauses as written, e.g. `"where T : class"`.
    pub constraints: Option<String>,
    pub modifiers: Modifiers,
    pub params: Vec<ParamDecl>,
    /// Arguments of the base-type initialization call, if any.
    pub base_args: Vec<Expr>,
    pub members: Vec<Member>,
    pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
    #[must_use]
    pub fn new(keyword: TypeKeyword, name: impl Into<String>) -> Self {
        TypeDecl {
            id: NodeId::NONE,
            keyword,
            name: name.into(),
            type_params: None,
            constraints: None,
            modifiers: Modifiers::empty(),
            params: Vec::new(),
            base_args: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Class, name)
    }

    #[must_use]
    pub fn struct_(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::Struct, name)
    }

    #[must_use]
    pub fn record_class(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::RecordClass, name)
    }

    #[must_use]
    pub fn record_struct(name: impl Into<String>) -> Self {
        Self::new(TypeKeyword::RecordStruct, name)
    }

    #[must_use]
    pub fn partial(mut self) -> Self {
        self.modifiers |= Modifiers::PARTIAL;
        self
    }

    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.modifiers |= Modifiers::READONLY;
        self
    }

    #[must_use]
    pub fn ref_(mut self) -> Self {
        self.modifiers |= Modifiers::REF;
        self
    }

    #[must_use]
    pub fn type_params(mut self, list: impl Into<String>) -> Self {
        self.type_params = Some(list.into());
        self
    }

    #[must_use]
    pub fn constraints(mut self, clauses: impl Into<String>) -> Self {
        self.constraints = Some(clauses.into());
        self
    }

    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn base_arg(mut self, arg: Expr) -> Self {
        self.base_args.push(arg);
        self
    }

    #[must_use]
    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    #[must_use]
    pub fn nested(mut self, ty: TypeDecl) -> Self {
        self.nested.push(ty);
        self
    }

    /// Name plus generic parameter list, e.g. `"Outer<T>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.type_params {
            Some(params) => format!("{}{params}", self.name),
            None => self.name.clone(),
        }
    }
}

/// One parameter declaration (primary list or method list).
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub id: NodeId,
    pub name: String,
    pub ty: String,
    pub modifiers: Modifiers,
    /// Annotation groups as written: `[Field][Property]` is two groups,
    /// `[Field, Property]` one group of two.
    pub annotation_lists: Vec<AnnotationList>,
    pub default_value: Option<Expr>,
}

impl ParamDecl {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        ParamDecl {
            id: NodeId::NONE,
            name: name.into(),
            ty: ty.into(),
            modifiers: Modifiers::empty(),
            annotation_lists: Vec::new(),
            default_value: None,
        }
    }

    #[must_use]
    pub fn ref_(mut self) -> Self {
        self.modifiers |= Modifiers::REF;
        self
    }

    /// Attach one annotation in its own group.
    #[must_use]
    pub fn annotate(mut self, annotation: AnnotationNode) -> Self {
        self.annotation_lists.push(AnnotationList {
            id: NodeId::NONE,
            annotations: vec![annotation],
        });
        self
    }

    /// Attach several annotations sharing one group.
    #[must_use]
    pub fn annotate_group(mut self, annotations: Vec<AnnotationNode>) -> Self {
        self.annotation_lists.push(AnnotationList {
            id: NodeId::NONE,
            annotations,
        });
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Expr) -> Self {
        self.default_value = Some(value);
        self
    }

    /// All annotations in group order then written order.
    pub fn annotations(&self) -> impl Iterator<Item = &AnnotationNode> {
        self.annotation_lists
            .iter()
            .flat_map(|list| list.annotations.iter())
    }
}

// =============================================================================
// Annotations
// =============================================================================

/// One annotation group (`[...]`) on a parameter.
#[derive(Clone, Debug)]
pub struct AnnotationList {
    pub id: NodeId,
    pub annotations: Vec<AnnotationNode>,
}

/// One applied annotation with its named arguments.
#[derive(Clone, Debug)]
pub struct AnnotationNode {
    pub id: NodeId,
    /// Fully-qualified annotation type name, as resolved by the front end.
    pub ty_name: String,
    /// Registry identity; assigned during compilation indexing.
    pub ty: TypeId,
    pub args: Vec<NamedArg>,
}

impl AnnotationNode {
    #[must_use]
    pub fn new(ty_name: impl Into<String>) -> Self {
        AnnotationNode {
            id: NodeId::NONE,
            ty_name: ty_name.into(),
            ty: TypeId(u32::MAX),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn field() -> Self {
        Self::new(markers::FIELD)
    }

    #[must_use]
    pub fn ref_field() -> Self {
        Self::new(markers::REF_FIELD)
    }

    #[must_use]
    pub fn property() -> Self {
        Self::new(markers::PROPERTY)
    }

    #[must_use]
    pub fn do_not_use() -> Self {
        Self::new(markers::DO_NOT_USE)
    }

    #[must_use]
    pub fn with_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(NamedArg {
            id: NodeId::NONE,
            name: name.into(),
            value: ArgValue::Str(value.into()),
        });
        self
    }

    #[must_use]
    pub fn with_bool(mut self, name: impl Into<String>, value: bool) -> Self {
        self.args.push(NamedArg {
            id: NodeId::NONE,
            name: name.into(),
            value: ArgValue::Bool(value),
        });
        self
    }

    /// A `typeof(...)` argument; the value is the operand's display name.
    #[must_use]
    pub fn with_type_of(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.args.push(NamedArg {
            id: NodeId::NONE,
            name: name.into(),
            value: ArgValue::TypeOf(ty.into()),
        });
        self
    }

    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&NamedArg> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

/// A named annotation argument with its location-bearing node id.
#[derive(Clone, Debug)]
pub struct NamedArg {
    pub id: NodeId,
    pub name: String,
    pub value: ArgValue,
}

/// Constant annotation argument values the engine understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Bool(bool),
    /// `typeof(T)` — carries the operand type's display name.
    TypeOf(String),
}

// =============================================================================
// Members, statements, expressions
// =============================================================================

/// A declared member of a type body.
#[derive(Clone, Debug)]
pub enum Member {
    Field(FieldMember),
    Property(PropertyMember),
    Method(MethodMember),
}

impl Member {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Property(property) => &property.name,
            Member::Method(method) => &method.name,
        }
    }
}

/// A plain field declaration with an optional initializer.
#[derive(Clone, Debug)]
pub struct FieldMember {
    pub name: String,
    pub ty: String,
    pub initializer: Option<Expr>,
}

impl FieldMember {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        FieldMember {
            name: name.into(),
            ty: ty.into(),
            initializer: None,
        }
    }

    #[must_use]
    pub fn init(mut self, value: Expr) -> Self {
        self.initializer = Some(value);
        self
    }
}

impl From<FieldMember> for Member {
    fn from(field: FieldMember) -> Member {
        Member::Field(field)
    }
}

/// A property declaration: optional initializer, accessors, or an
/// expression body.
#[derive(Clone, Debug)]
pub struct PropertyMember {
    pub name: String,
    pub ty: String,
    pub initializer: Option<Expr>,
    pub getter: Option<AccessorBody>,
    pub setter: Option<AccessorBody>,
    /// `=> expr;` form; mutually exclusive with accessors.
    pub expr_body: Option<Expr>,
}

impl PropertyMember {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        PropertyMember {
            name: name.into(),
            ty: ty.into(),
            initializer: None,
            getter: Some(AccessorBody::Auto),
            setter: None,
            expr_body: None,
        }
    }

    #[must_use]
    pub fn init(mut self, value: Expr) -> Self {
        self.initializer = Some(value);
        self
    }

    #[must_use]
    pub fn getter_expr(mut self, body: Expr) -> Self {
        self.getter = Some(AccessorBody::Expr(body));
        self
    }

    #[must_use]
    pub fn setter_block(mut self, body: Vec<Stmt>) -> Self {
        self.setter = Some(AccessorBody::Block(body));
        self
    }

    #[must_use]
    pub fn expr_body(mut self, body: Expr) -> Self {
        self.getter = None;
        self.expr_body = Some(body);
        self
    }
}

impl From<PropertyMember> for Member {
    fn from(property: PropertyMember) -> Member {
        Member::Property(property)
    }
}

/// An accessor body: auto-implemented, expression-bodied, or a block.
#[derive(Clone, Debug)]
pub enum AccessorBody {
    Auto,
    Expr(Expr),
    Block(Vec<Stmt>),
}

/// A method declaration with its own parameter list.
#[derive(Clone, Debug)]
pub struct MethodMember {
    pub name: String,
    pub return_ty: String,
    pub params: Vec<ParamDecl>,
    pub body: Option<Body>,
}

impl MethodMember {
    #[must_use]
    pub fn new(name: impl Into<String>, return_ty: impl Into<String>) -> Self {
        MethodMember {
            name: name.into(),
            return_ty: return_ty.into(),
            params: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn expr_body(mut self, body: Expr) -> Self {
        self.body = Some(Body::Expr(body));
        self
    }

    #[must_use]
    pub fn block(mut self, body: Vec<Stmt>) -> Self {
        self.body = Some(Body::Block(body));
        self
    }
}

impl From<MethodMember> for Member {
    fn from(method: MethodMember) -> Member {
        Member::Method(method)
    }
}

/// A method body.
#[derive(Clone, Debug)]
pub enum Body {
    Expr(Expr),
    Block(Vec<Stmt>),
}

/// The statement surface the usage walker understands.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// A local declaration; shadows the name for the rest of its block.
    Local {
        name: String,
        initializer: Option<Expr>,
    },
    Expr(Expr),
    Return(Option<Expr>),
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
}

/// The expression surface the usage walker understands.
#[derive(Clone, Debug)]
pub enum Expr {
    Ident(IdentExpr),
    /// `nameof(...)`: yields the identifier's text, never evaluates it.
    NameOf(Box<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    MemberAccess {
        receiver: Box<Expr>,
        member: String,
    },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Lit(String),
}

/// An identifier reference; the rename code fix targets these by id.
#[derive(Clone, Debug)]
pub struct IdentExpr {
    pub id: NodeId,
    pub name: String,
}

impl Expr {
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(IdentExpr {
            id: NodeId::NONE,
            name: name.into(),
        })
    }

    #[must_use]
    pub fn name_of(inner: Expr) -> Self {
        Expr::NameOf(Box::new(inner))
    }

    #[must_use]
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    #[must_use]
    pub fn member(receiver: Expr, member: impl Into<String>) -> Self {
        Expr::MemberAccess {
            receiver: Box::new(receiver),
            member: member.into(),
        }
    }

    #[must_use]
    pub fn binary(op: impl Into<String>, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op: op.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Lit(text.into())
    }
}
