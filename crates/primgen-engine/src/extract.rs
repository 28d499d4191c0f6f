//! Annotation extraction: from one annotated parameter to its ordered
//! member-descriptor set.
//!
//! Option lookup order per option is: explicit named argument on the
//! annotation > per-kind default in [`GenerationDefaults`] > hard-coded
//! fallback (already baked into the defaults). Field and ref-field readonly
//! flags additionally OR with the declaring type's own `readonly` modifier.
//!
//! Name collisions are resolved here: a name already declared on the type
//! is reported at error severity and dropped; a name already generated for
//! the same parameter this pass is reported at warning severity and the
//! duplicate dropped (first one wins).

use indexmap::IndexSet;
use primgen_common::{
    Diagnostic, DiagnosticSink, GenerationDefaults, Location, Severity, diagnostics,
};
use primgen_syntax::{
    AnnotationNode, ArgValue, Compilation, MarkerKind, MarkerTypes, ParamDecl, TypeDecl,
};
use tracing::trace;

use crate::members::{FieldSpec, GeneratedMember, PropertySpec, RefFieldSpec, Setter};

/// The extraction product for one parameter.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Surviving descriptors in annotation declaration order.
    pub members: Vec<GeneratedMember>,
    /// False only when a `[DoNotUse]` annotation disabled member-initializer
    /// exemption.
    pub allow_in_member_init: bool,
}

/// Builds member descriptors for validated parameters.
pub struct Extractor<'a> {
    markers: MarkerTypes,
    defaults: &'a GenerationDefaults,
}

impl<'a> Extractor<'a> {
    #[must_use]
    pub fn new(markers: MarkerTypes, defaults: &'a GenerationDefaults) -> Self {
        Extractor { markers, defaults }
    }

    /// Extract all members for one parameter of `ty`.
    pub fn extract_parameter(
        &self,
        compilation: &Compilation,
        ty: &TypeDecl,
        param: &ParamDecl,
        sink: &mut DiagnosticSink,
    ) -> Extraction {
        let declared = compilation.declared_member_names(ty);
        let type_readonly = ty.modifiers.is_readonly();
        let mut members: IndexSet<GeneratedMember> = IndexSet::new();
        let mut allow_in_member_init = true;

        for annotation in param.annotations() {
            let Some(kind) = self.markers.classify(annotation.ty) else {
                // unrelated annotation, none of our business
                continue;
            };
            trace!(param = %param.name, ?kind, "extracting annotation");
            match kind {
                MarkerKind::Field => {
                    let (name, name_location) = self.member_name(annotation, param, kind);
                    let readonly = type_readonly
                        || bool_arg(annotation, "IsReadonly").unwrap_or(self.defaults.field.readonly);
                    let member = GeneratedMember::Field(FieldSpec {
                        name,
                        scope: string_arg(annotation, "Scope")
                            .unwrap_or_else(|| self.defaults.field.scope.clone()),
                        readonly,
                        assign_format: string_arg(annotation, "AssignFormat")
                            .unwrap_or_else(|| "{0}".to_string()),
                        ty: type_of_arg(annotation, "Type"),
                    });
                    let member = wrap_summary(annotation, member);
                    push_member(&mut members, &declared, member, name_location, sink);
                }
                MarkerKind::RefField => {
                    let (name, name_location) = self.member_name(annotation, param, kind);
                    let readonly_ref = type_readonly
                        || bool_arg(annotation, "IsReadonlyRef")
                            .unwrap_or(self.defaults.ref_field.readonly_ref);
                    let ref_readonly = bool_arg(annotation, "IsRefReadonly")
                        .unwrap_or(self.defaults.ref_field.ref_readonly);
                    let member = GeneratedMember::RefField(RefFieldSpec {
                        name,
                        scope: string_arg(annotation, "Scope")
                            .unwrap_or_else(|| self.defaults.ref_field.scope.clone()),
                        readonly_ref,
                        ref_readonly,
                    });
                    let member = wrap_summary(annotation, member);
                    push_member(&mut members, &declared, member, name_location, sink);
                }
                MarkerKind::Property => {
                    let (name, name_location) = self.member_name(annotation, param, kind);
                    let setter = string_arg(annotation, "Setter")
                        .unwrap_or_else(|| self.defaults.property.setter.clone());
                    let member = GeneratedMember::Property(PropertySpec {
                        name,
                        scope: string_arg(annotation, "Scope")
                            .unwrap_or_else(|| self.defaults.property.scope.clone()),
                        setter: Setter::parse(&setter),
                        assign_format: string_arg(annotation, "AssignFormat")
                            .unwrap_or_else(|| "{0}".to_string()),
                        ty: type_of_arg(annotation, "Type"),
                        without_backing: bool_arg(annotation, "WithoutBackingStorage")
                            .unwrap_or(false),
                    });
                    let member = wrap_summary(annotation, member);
                    push_member(&mut members, &declared, member, name_location, sink);
                }
                MarkerKind::DoNotUse => {
                    allow_in_member_init &=
                        bool_arg(annotation, "AllowInMemberInit").unwrap_or(true);
                }
            }
        }

        Extraction {
            members: members.into_iter().collect(),
            allow_in_member_init,
        }
    }

    /// The member name with its diagnostic location: the explicit `Name`
    /// argument if present (located at the argument), otherwise the naming
    /// default (located at the annotation).
    fn member_name(
        &self,
        annotation: &AnnotationNode,
        param: &ParamDecl,
        kind: MarkerKind,
    ) -> (String, Location) {
        let fallback = Location::of(annotation.id);
        if let Some(arg) = annotation.arg("Name") {
            if let ArgValue::Str(name) = &arg.value {
                return (name.clone(), Location::of(arg.id).or(fallback));
            }
        }
        let name = match kind {
            MarkerKind::Property => capitalize(&param.name),
            _ => format!("_{}", param.name),
        };
        (name, fallback)
    }
}

fn push_member(
    members: &mut IndexSet<GeneratedMember>,
    declared: &rustc_hash::FxHashSet<&str>,
    member: GeneratedMember,
    name_location: Location,
    sink: &mut DiagnosticSink,
) {
    let name = member.name();
    if declared.contains(name) {
        sink.report(
            Diagnostic::new(&diagnostics::USED_MEMBER_NAME, name_location)
                .with_arg(name)
                .with_severity(Severity::Error),
        );
        return;
    }
    if members.iter().any(|existing| existing.name() == name) {
        sink.report(
            Diagnostic::new(&diagnostics::USED_MEMBER_NAME, name_location).with_arg(name),
        );
        return;
    }
    members.insert(member);
}

fn wrap_summary(annotation: &AnnotationNode, member: GeneratedMember) -> GeneratedMember {
    match string_arg(annotation, "Summary") {
        Some(summary) if !summary.trim().is_empty() => GeneratedMember::Documented {
            summary,
            inner: Box::new(member),
        },
        _ => member,
    }
}

fn string_arg(annotation: &AnnotationNode, name: &str) -> Option<String> {
    match &annotation.arg(name)?.value {
        ArgValue::Str(value) => Some(value.clone()),
        _ => None,
    }
}

fn bool_arg(annotation: &AnnotationNode, name: &str) -> Option<bool> {
    match &annotation.arg(name)?.value {
        ArgValue::Bool(value) => Some(*value),
        _ => None,
    }
}

fn type_of_arg(annotation: &AnnotationNode, name: &str) -> Option<String> {
    match &annotation.arg(name)?.value {
        ArgValue::TypeOf(ty) => Some(ty.clone()),
        _ => None,
    }
}

/// Upper-case the first character, as the property naming default does.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
