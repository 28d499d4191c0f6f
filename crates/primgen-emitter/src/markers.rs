//! Fixed marker-attribute boilerplate.
//!
//! A host injects these four sources into the compilation before analysis;
//! the engine then resolves the marker types by their full names. The texts
//! never vary, so they are rendered once and handed out by reference.

use once_cell::sync::Lazy;

use crate::companion::Artifact;

const FIELD: &str = r#"// <auto-generated/>
using global::System;
namespace Primgen
{
    [AttributeUsage(AttributeTargets.Parameter, Inherited = false, AllowMultiple = true)]
    sealed class FieldAttribute : Attribute
    {
        public string Name { get; init; }
        public string AssignFormat { get; init; }
        public Type Type { get; init; }
        public bool IsReadonly { get; init; }
        public string Scope { get; init; }
        public string Summary { get; init; }
    }
}
"#;

const REF_FIELD: &str = r#"// <auto-generated/>
using global::System;
namespace Primgen
{
    [AttributeUsage(AttributeTargets.Parameter, Inherited = false, AllowMultiple = true)]
    sealed class RefFieldAttribute : Attribute
    {
        public string Name { get; init; }
        public string Scope { get; init; }
        public bool IsReadonlyRef { get; init; }
        public bool IsRefReadonly { get; init; }
        public string Summary { get; init; }
    }
}
"#;

const PROPERTY: &str = r#"// <auto-generated/>
using global::System;
namespace Primgen
{
    [AttributeUsage(AttributeTargets.Parameter, Inherited = false, AllowMultiple = true)]
    sealed class PropertyAttribute : Attribute
    {
        public string Name { get; init; }
        public string AssignFormat { get; init; }
        public Type Type { get; init; }
        public string Setter { get; init; }
        public string Scope { get; init; }
        public bool WithoutBackingStorage { get; init; }
        public string Summary { get; init; }
    }
}
"#;

const DO_NOT_USE: &str = r#"// <auto-generated/>
using global::System;
namespace Primgen
{
    [AttributeUsage(AttributeTargets.Parameter, Inherited = false, AllowMultiple = false)]
    sealed class DoNotUseAttribute : Attribute
    {
        public bool AllowInMemberInit { get; init; }
    }
}
"#;

static ARTIFACTS: Lazy<Vec<Artifact>> = Lazy::new(|| {
    [
        ("FieldAttribute.g.cs", FIELD),
        ("RefFieldAttribute.g.cs", REF_FIELD),
        ("PropertyAttribute.g.cs", PROPERTY),
        ("DoNotUseAttribute.g.cs", DO_NOT_USE),
    ]
    .into_iter()
    .map(|(hint_name, text)| Artifact {
        hint_name: hint_name.to_string(),
        text: text.to_string(),
    })
    .collect()
});

/// The four marker-attribute sources, in a fixed order.
#[must_use]
pub fn marker_artifacts() -> &'static [Artifact] {
    &ARTIFACTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use primgen_syntax::markers;

    #[test]
    fn marker_sources_declare_the_resolved_names() {
        let artifacts = marker_artifacts();
        assert_eq!(artifacts.len(), 4);
        for (artifact, full_name) in artifacts.iter().zip([
            markers::FIELD,
            markers::REF_FIELD,
            markers::PROPERTY,
            markers::DO_NOT_USE,
        ]) {
            let (namespace, bare) = full_name
                .rsplit_once('.')
                .unwrap_or(("", full_name));
            assert!(artifact.text.contains(&format!("namespace {namespace}")));
            assert!(artifact.text.contains(&format!("class {bare} : Attribute")));
            assert!(artifact.text.starts_with("// <auto-generated/>\n"));
        }
    }

    #[test]
    fn option_surface_matches_extraction() {
        let [field, ref_field, property, do_not_use] = marker_artifacts() else {
            panic!("expected four marker artifacts");
        };
        for option in ["Name", "AssignFormat", "Type", "IsReadonly", "Scope", "Summary"] {
            assert!(field.text.contains(option), "field missing {option}");
        }
        for option in ["IsReadonlyRef", "IsRefReadonly"] {
            assert!(ref_field.text.contains(option));
        }
        for option in ["Setter", "WithoutBackingStorage"] {
            assert!(property.text.contains(option));
        }
        assert!(do_not_use.text.contains("AllowInMemberInit"));
    }
}
