//! Generated-member descriptors and their text rendering.
//!
//! One [`GeneratedMember`] describes one synthesized companion member. The
//! descriptors are plain values with structural equality so the extractor
//! can dedupe them in an ordered set; rendering is a pure function of the
//! descriptor plus the parameter it was generated for.

/// Setter kind of a generated property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Setter {
    /// No setter at all: `{ get; }` (or a computed getter without backing
    /// storage).
    #[default]
    None,
    /// Move-only init: `{ get; init; }`.
    Init,
    /// Mutable set: `{ get; set; }`.
    Set,
}

impl Setter {
    /// Parse a configured setter keyword; anything unrecognized (including
    /// the empty string) means "no setter".
    #[must_use]
    pub fn parse(text: &str) -> Setter {
        if text.eq_ignore_ascii_case("init") {
            Setter::Init
        } else if text.eq_ignore_ascii_case("set") {
            Setter::Set
        } else {
            Setter::None
        }
    }
}

/// A generated backing field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: String,
    pub scope: String,
    pub readonly: bool,
    /// Value template; `{0}` is replaced by the parameter identifier.
    pub assign_format: String,
    /// Explicit field type; defaults to the parameter's declared type.
    pub ty: Option<String>,
}

/// A generated reference-bound field. Always binds the parameter directly
/// (`= ref p;`), never through a format template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefFieldSpec {
    pub name: String,
    pub scope: String,
    /// The reference itself is readonly: `readonly ref`.
    pub readonly_ref: bool,
    /// The referent is readonly: `ref readonly`.
    pub ref_readonly: bool,
}

/// A generated property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertySpec {
    pub name: String,
    pub scope: String,
    pub setter: Setter,
    pub assign_format: String,
    pub ty: Option<String>,
    /// Accessors read/write straight through the format-template expression
    /// instead of an auto-initialized backing slot.
    pub without_backing: bool,
}

/// One synthesized companion member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeneratedMember {
    Field(FieldSpec),
    RefField(RefFieldSpec),
    Property(PropertySpec),
    /// A member wrapped with a `<summary>` documentation comment.
    Documented {
        summary: String,
        inner: Box<GeneratedMember>,
    },
}

impl GeneratedMember {
    /// The member's declared name (documentation wrappers are transparent).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            GeneratedMember::Field(field) => &field.name,
            GeneratedMember::RefField(ref_field) => &ref_field.name,
            GeneratedMember::Property(property) => &property.name,
            GeneratedMember::Documented { inner, .. } => inner.name(),
        }
    }

    /// Render the member declaration text for the parameter it was
    /// generated from. Multi-line output (documentation wrappers) is
    /// newline-separated; the emitter re-indents per line.
    #[must_use]
    pub fn render(&self, param_name: &str, param_ty: &str) -> String {
        match self {
            GeneratedMember::Field(field) => {
                let readonly = if field.readonly { "readonly " } else { "" };
                let ty = field.ty.as_deref().unwrap_or(param_ty);
                let value = apply_format(&field.assign_format, param_name);
                format!(
                    "{} {}{} {} = {};",
                    field.scope, readonly, ty, field.name, value
                )
            }
            GeneratedMember::RefField(ref_field) => {
                let readonly_ref = if ref_field.readonly_ref { "readonly " } else { "" };
                let ref_readonly = if ref_field.ref_readonly { "readonly " } else { "" };
                format!(
                    "{} {}ref {}{} {} = ref {};",
                    ref_field.scope, readonly_ref, ref_readonly, param_ty, ref_field.name, param_name
                )
            }
            GeneratedMember::Property(property) => render_property(property, param_name, param_ty),
            GeneratedMember::Documented { summary, inner } => {
                let mut out = String::from("/// <summary>\n");
                for line in summary.lines().filter(|line| !line.trim().is_empty()) {
                    out.push_str("/// ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str("/// </summary>\n");
                out.push_str(&inner.render(param_name, param_ty));
                out
            }
        }
    }
}

fn render_property(property: &PropertySpec, param_name: &str, param_ty: &str) -> String {
    let ty = property.ty.as_deref().unwrap_or(param_ty);
    let value = apply_format(&property.assign_format, param_name);
    if property.without_backing {
        return match property.setter {
            Setter::None => format!(
                "{} {} {} => {};",
                property.scope, ty, property.name, value
            ),
            Setter::Init | Setter::Set => {
                let keyword = if property.setter == Setter::Init { "init" } else { "set" };
                format!(
                    "{} {} {} {{ get => {}; {} => {} = value; }}",
                    property.scope, ty, property.name, value, keyword, value
                )
            }
        };
    }
    let setter = match property.setter {
        Setter::None => "",
        Setter::Init => "init; ",
        Setter::Set => "set; ",
    };
    format!(
        "{} {} {} {{ get; {}}} = {};",
        property.scope, ty, property.name, setter, value
    )
}

/// Substitute the parameter identifier into a `{0}` value template.
#[must_use]
pub fn apply_format(format: &str, param_name: &str) -> String {
    format.replace("{0}", param_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_field(name: &str) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            scope: "private".to_string(),
            readonly: true,
            assign_format: "{0}".to_string(),
            ty: None,
        }
    }

    #[test]
    fn field_renders_with_parameter_type_and_identity_template() {
        let member = GeneratedMember::Field(default_field("_i"));
        assert_eq!(member.render("i", "int"), "private readonly int _i = i;");
    }

    #[test]
    fn field_honors_explicit_type_and_format() {
        let member = GeneratedMember::Field(FieldSpec {
            assign_format: "({0} * 2)".to_string(),
            ty: Some("long".to_string()),
            readonly: false,
            ..default_field("_i")
        });
        assert_eq!(member.render("i", "int"), "private long _i = (i * 2);");
    }

    #[test]
    fn ref_field_renders_both_readonly_positions() {
        let member = GeneratedMember::RefField(RefFieldSpec {
            name: "_i".to_string(),
            scope: "private".to_string(),
            readonly_ref: true,
            ref_readonly: true,
        });
        assert_eq!(
            member.render("i", "int"),
            "private readonly ref readonly int _i = ref i;"
        );
    }

    #[test]
    fn ref_field_without_readonly() {
        let member = GeneratedMember::RefField(RefFieldSpec {
            name: "_i".to_string(),
            scope: "private".to_string(),
            readonly_ref: false,
            ref_readonly: false,
        });
        assert_eq!(member.render("i", "int"), "private ref int _i = ref i;");
    }

    #[test]
    fn property_with_init_setter() {
        let member = GeneratedMember::Property(PropertySpec {
            name: "I".to_string(),
            scope: "public".to_string(),
            setter: Setter::Init,
            assign_format: "{0}".to_string(),
            ty: None,
            without_backing: false,
        });
        assert_eq!(member.render("i", "int"), "public int I { get; init; } = i;");
    }

    #[test]
    fn property_with_empty_setter_has_getter_only() {
        let member = GeneratedMember::Property(PropertySpec {
            name: "I".to_string(),
            scope: "public".to_string(),
            setter: Setter::None,
            assign_format: "{0}".to_string(),
            ty: None,
            without_backing: false,
        });
        assert_eq!(member.render("i", "int"), "public int I { get; } = i;");
    }

    #[test]
    fn property_without_backing_storage_is_computed() {
        let get_only = GeneratedMember::Property(PropertySpec {
            name: "I".to_string(),
            scope: "public".to_string(),
            setter: Setter::None,
            assign_format: "{0}".to_string(),
            ty: None,
            without_backing: true,
        });
        assert_eq!(get_only.render("i", "int"), "public int I => i;");

        let get_set = GeneratedMember::Property(PropertySpec {
            name: "I".to_string(),
            scope: "public".to_string(),
            setter: Setter::Set,
            assign_format: "{0}".to_string(),
            ty: None,
            without_backing: true,
        });
        assert_eq!(
            get_set.render("i", "int"),
            "public int I { get => i; set => i = value; }"
        );
    }

    #[test]
    fn documentation_wrapper_skips_blank_lines_and_is_name_transparent() {
        let member = GeneratedMember::Documented {
            summary: "The value.\n\nStored once.".to_string(),
            inner: Box::new(GeneratedMember::Field(default_field("_i"))),
        };
        assert_eq!(member.name(), "_i");
        assert_eq!(
            member.render("i", "int"),
            "/// <summary>\n/// The value.\n/// Stored once.\n/// </summary>\nprivate readonly int _i = i;"
        );
    }

    #[test]
    fn setter_parsing_is_case_insensitive() {
        assert_eq!(Setter::parse("Init"), Setter::Init);
        assert_eq!(Setter::parse("SET"), Setter::Set);
        assert_eq!(Setter::parse(""), Setter::None);
        assert_eq!(Setter::parse("bogus"), Setter::None);
    }
}
