//! Generation defaults and the build-configuration surface.
//!
//! The original design kept per-kind defaults in process-wide mutable
//! statics written once from build configuration. Here they are a single
//! explicit [`GenerationDefaults`] value constructed before a run and passed
//! by reference into extraction: set once, read many times, no hidden
//! global mutation. Option lookup order during extraction is
//! explicit named argument > per-kind default > hard-coded fallback.

use rustc_hash::FxHashMap;

/// Defaults seeding `[Field]` annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDefaults {
    pub scope: String,
    pub readonly: bool,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        FieldDefaults {
            scope: "private".to_string(),
            readonly: true,
        }
    }
}

/// Defaults seeding `[RefField]` annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefFieldDefaults {
    pub scope: String,
    /// The reference itself is readonly (`readonly ref`).
    pub readonly_ref: bool,
    /// The referent is readonly (`ref readonly`).
    pub ref_readonly: bool,
}

impl Default for RefFieldDefaults {
    fn default() -> Self {
        RefFieldDefaults {
            scope: "private".to_string(),
            readonly_ref: false,
            ref_readonly: false,
        }
    }
}

/// Defaults seeding `[Property]` annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDefaults {
    pub scope: String,
    /// Recognized values: empty = no setter, `"init"` = move-only init,
    /// `"set"` = mutable set.
    pub setter: String,
}

impl Default for PropertyDefaults {
    fn default() -> Self {
        PropertyDefaults {
            scope: "public".to_string(),
            setter: "init".to_string(),
        }
    }
}

/// Process-wide generation defaults, one record per annotation kind.
///
/// Constructed once (optionally from build configuration) before any
/// extraction runs; read-only during generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationDefaults {
    pub field: FieldDefaults,
    pub ref_field: RefFieldDefaults,
    pub property: PropertyDefaults,
}

/// The front end's configuration-options provider, reduced to the one lookup
/// the engine needs. Keys are flat strings; absent and empty values are
/// treated the same (not configured).
pub trait ConfigSource {
    fn raw(&self, key: &str) -> Option<&str>;
}

/// A map-backed [`ConfigSource`] for hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MapConfig {
    values: FxHashMap<String, String>,
}

impl MapConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfig {
    fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl GenerationDefaults {
    /// Read defaults from build configuration, falling back to the
    /// hard-coded values for anything not configured.
    ///
    /// Recognized keys (empty values ignored, booleans parse a
    /// case-insensitive `true`):
    /// `primgen_Field_DefaultScope`, `primgen_Field_DefaultReadonly`,
    /// `primgen_RefField_DefaultScope`, `primgen_RefField_DefaultReadonlyRef`,
    /// `primgen_RefField_DefaultRefReadonly`, `primgen_Property_DefaultScope`,
    /// `primgen_Property_DefaultSetter`.
    #[must_use]
    pub fn from_config(config: &dyn ConfigSource) -> Self {
        let mut defaults = GenerationDefaults::default();

        if let Some(scope) = get_string(config, "primgen_Field_DefaultScope") {
            defaults.field.scope = scope;
        }
        if let Some(readonly) = get_bool(config, "primgen_Field_DefaultReadonly") {
            defaults.field.readonly = readonly;
        }

        if let Some(scope) = get_string(config, "primgen_RefField_DefaultScope") {
            defaults.ref_field.scope = scope;
        }
        if let Some(readonly_ref) = get_bool(config, "primgen_RefField_DefaultReadonlyRef") {
            defaults.ref_field.readonly_ref = readonly_ref;
        }
        if let Some(ref_readonly) = get_bool(config, "primgen_RefField_DefaultRefReadonly") {
            defaults.ref_field.ref_readonly = ref_readonly;
        }

        if let Some(scope) = get_string(config, "primgen_Property_DefaultScope") {
            defaults.property.scope = scope;
        }
        if let Some(setter) = get_string(config, "primgen_Property_DefaultSetter") {
            defaults.property.setter = setter;
        }

        defaults
    }
}

fn get_string(config: &dyn ConfigSource, key: &str) -> Option<String> {
    match config.raw(key) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

fn get_bool(config: &dyn ConfigSource, key: &str) -> Option<bool> {
    get_string(config, key).map(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_coded_fallbacks() {
        let defaults = GenerationDefaults::default();
        assert_eq!(defaults.field.scope, "private");
        assert!(defaults.field.readonly);
        assert_eq!(defaults.ref_field.scope, "private");
        assert!(!defaults.ref_field.readonly_ref);
        assert!(!defaults.ref_field.ref_readonly);
        assert_eq!(defaults.property.scope, "public");
        assert_eq!(defaults.property.setter, "init");
    }

    #[test]
    fn configured_values_override_fallbacks() {
        let config = MapConfig::new()
            .with("primgen_Field_DefaultScope", "protected")
            .with("primgen_Field_DefaultReadonly", "FALSE")
            .with("primgen_Property_DefaultSetter", "set");
        let defaults = GenerationDefaults::from_config(&config);
        assert_eq!(defaults.field.scope, "protected");
        assert!(!defaults.field.readonly);
        assert_eq!(defaults.property.setter, "set");
        // untouched groups keep their fallbacks
        assert_eq!(defaults.ref_field, RefFieldDefaults::default());
    }

    #[test]
    fn empty_values_are_not_configured() {
        let config = MapConfig::new().with("primgen_Field_DefaultScope", "");
        let defaults = GenerationDefaults::from_config(&config);
        assert_eq!(defaults.field.scope, "private");
    }
}
