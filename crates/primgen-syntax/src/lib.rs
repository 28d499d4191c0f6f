//! Front-end syntax tree contract consumed by the primgen engine.
//!
//! The engine does no parsing of its own: the host compiler (or a test)
//! hands it an already-built tree of type declarations, parameter lists and
//! member bodies, plus a type registry for marker-annotation identity. This
//! crate is that fixed contract:
//! - `tree`: the queryable syntax model (types, parameters, annotations,
//!   members, statements, expressions) with builder-style constructors
//! - `modifiers`: declaration modifier flags (partial / readonly / ref / ...)
//! - `registry`: type-name interning and the four marker annotation types
//! - `compilation`: a source unit bundled with its registry and a stable
//!   pre-order node numbering

pub mod modifiers;
pub use modifiers::Modifiers;

pub mod registry;
pub use registry::{MarkerKind, MarkerTypes, TypeId, TypeRegistry, markers};

pub mod tree;
pub use tree::{
    AccessorBody, AnnotationList, AnnotationNode, ArgValue, Body, Expr, FieldMember, IdentExpr,
    Member, MethodMember, NamedArg, ParamDecl, PropertyMember, SourceUnit, Stmt, TypeDecl,
    TypeKeyword,
};

pub mod compilation;
pub use compilation::Compilation;
