//! Enclosing-type chains for companion emission.
//!
//! A companion declaration must reopen every enclosing type of the
//! declaring type with `partial`, reproducing keyword, name + generic
//! parameter list, and constraints. The chain is built from the nesting
//! path the tree walk already has in hand and stored outermost-first.

use primgen_syntax::TypeDecl;

/// One enclosing type shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentShell {
    /// `class`, `struct`, `record class` or `record struct`.
    pub keyword: &'static str,
    pub name: String,
    pub type_params: Option<String>,
    pub constraints: Option<String>,
}

impl ParentShell {
    /// Name plus generic parameter list, e.g. `"Outer<T>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.type_params {
            Some(params) => format!("{}{params}", self.name),
            None => self.name.clone(),
        }
    }
}

/// The ordered (outermost → innermost) chain of type shells enclosing a
/// declaring type, the declaring type included as the last element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentChain {
    shells: Vec<ParentShell>,
}

impl ParentChain {
    /// Build from a nesting path as produced by
    /// `Compilation::for_each_type` (outermost-first).
    #[must_use]
    pub fn from_path(path: &[&TypeDecl]) -> Self {
        let shells = path
            .iter()
            .map(|ty| ParentShell {
                keyword: ty.keyword.render(),
                name: ty.name.clone(),
                type_params: ty.type_params.clone(),
                constraints: ty.constraints.clone(),
            })
            .collect();
        ParentChain { shells }
    }

    #[must_use]
    pub fn shells(&self) -> &[ParentShell] {
        &self.shells
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.shells.len()
    }

    /// Dotted bare type names, outermost-first: `"Outer.Inner"`. Used for
    /// artifact naming.
    #[must_use]
    pub fn concat_type_name(&self) -> String {
        self.shells
            .iter()
            .map(|shell| shell.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}
