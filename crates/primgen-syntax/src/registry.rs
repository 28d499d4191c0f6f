//! Type-name interning and marker-annotation identity.
//!
//! Annotation classification is driven by type identity, not by name
//! matching on the annotation node itself: the front end resolves every
//! applied annotation to a [`TypeId`], and the engine compares that id
//! against the four marker ids resolved once per run. When the marker types
//! cannot be resolved at all the environment is broken and the engine
//! silently produces no output for the run.

use rustc_hash::FxHashMap;

/// Interned identity of a fully-qualified type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// Fully-qualified names of the four recognized marker annotation types.
pub mod markers {
    pub const FIELD: &str = "Primgen.FieldAttribute";
    pub const REF_FIELD: &str = "Primgen.RefFieldAttribute";
    pub const PROPERTY: &str = "Primgen.PropertyAttribute";
    pub const DO_NOT_USE: &str = "Primgen.DoNotUseAttribute";
}

/// Interner mapping fully-qualified type names to stable [`TypeId`]s.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    names: Vec<String>,
    ids: FxHashMap<String, TypeId>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> TypeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = TypeId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, id: TypeId) -> &str {
        &self.names[id.0 as usize]
    }
}

/// The four recognized annotation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Field,
    RefField,
    Property,
    DoNotUse,
}

/// The marker types resolved against a registry, once per run.
#[derive(Clone, Copy, Debug)]
pub struct MarkerTypes {
    pub field: TypeId,
    pub ref_field: TypeId,
    pub property: TypeId,
    pub do_not_use: TypeId,
}

impl MarkerTypes {
    /// Resolve all four marker types. `None` means the front end did not
    /// provide a minimally valid environment; callers bail out quietly.
    #[must_use]
    pub fn resolve(registry: &TypeRegistry) -> Option<MarkerTypes> {
        Some(MarkerTypes {
            field: registry.lookup(markers::FIELD)?,
            ref_field: registry.lookup(markers::REF_FIELD)?,
            property: registry.lookup(markers::PROPERTY)?,
            do_not_use: registry.lookup(markers::DO_NOT_USE)?,
        })
    }

    /// Classify a resolved annotation type by identity comparison.
    #[must_use]
    pub fn classify(&self, ty: TypeId) -> Option<MarkerKind> {
        if ty == self.field {
            Some(MarkerKind::Field)
        } else if ty == self.ref_field {
            Some(MarkerKind::RefField)
        } else if ty == self.property {
            Some(MarkerKind::Property)
        } else if ty == self.do_not_use {
            Some(MarkerKind::DoNotUse)
        } else {
            None
        }
    }
}
