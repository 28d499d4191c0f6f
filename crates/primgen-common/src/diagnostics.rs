//! Diagnostic types and the per-run diagnostic accumulator.
//!
//! The five canonical diagnostics of the generation engine are declared here
//! as `DiagnosticDescriptor` constants. Diagnostics are plain values: they
//! are collected into a [`DiagnosticSink`] during a run and drained at
//! end-of-run, never thrown. One offending parameter must not prevent
//! generation for its siblings, so nothing in this module aborts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::location::Location;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning = 0,
    Error = 1,
}

/// A diagnostic definition: stable code, title, and message template.
///
/// Templates use `{0}`, `{1}`, ... placeholders filled by
/// [`format_message`].
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

/// PG01: a primary parameter shadowed by generated members was referenced
/// directly inside the type body.
pub const ACCESSING_PRIMARY_PARAMETER: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "PG01",
    title: "Accessing a primary parameter",
    message: "Can't access a primary parameter ('{0}') with a [Field], [RefField], [Property] or [DoNotUse] attribute, use {1}",
    severity: Severity::Error,
};

/// PG02: a marker annotation was applied somewhere it generates nothing.
pub const NON_PRIMARY_PARAMETER: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "PG02",
    title: "Attribute generates nothing",
    message: "Use this attribute only on a primary parameter",
    severity: Severity::Warning,
};

/// PG03: a generated member's name is already taken.
///
/// Reported at `Error` effective severity when the collision is with a
/// pre-existing declared member, `Warning` when two generated members of the
/// same parameter collide (first one wins).
pub const USED_MEMBER_NAME: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "PG03",
    title: "Member name already used",
    message: "This member's name ('{0}') is already used",
    severity: Severity::Warning,
};

/// PG04: `[RefField]` inside a struct that is not declared `ref`.
pub const REF_FIELD_IN_NON_REF_STRUCT: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "PG04",
    title: "RefField in non ref struct",
    message: "Can't apply [RefField] in non ref struct '{0}'",
    severity: Severity::Error,
};

/// PG05: `[RefField]` on a parameter that is not declared `ref`.
pub const REF_FIELD_ON_NON_REF_PARAM: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "PG05",
    title: "RefField on non ref parameter",
    message: "Can't apply [RefField] on non ref parameter '{0}'",
    severity: Severity::Error,
};

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// One reported diagnostic.
///
/// `properties` carries string-keyed structured payload for code-fix
/// consumption (e.g. the space-joined legal replacement names under
/// `"fields"`).
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    /// Effective severity; may be raised above the descriptor's default.
    pub severity: Severity,
    pub location: Location,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(descriptor: &DiagnosticDescriptor, location: Location) -> Self {
        Diagnostic {
            code: descriptor.code,
            severity: descriptor.severity,
            location,
            args: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Raise (or lower) the effective severity above the descriptor default.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Render the human-readable message for this diagnostic.
    #[must_use]
    pub fn message(&self) -> String {
        let template = descriptor_for(self.code).map_or("", |d| d.message);
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        format_message(template, &args)
    }
}

/// Look up a canonical descriptor by its code.
#[must_use]
pub fn descriptor_for(code: &str) -> Option<&'static DiagnosticDescriptor> {
    ALL_DESCRIPTORS.iter().find(|d| d.code == code).copied()
}

pub const ALL_DESCRIPTORS: [&DiagnosticDescriptor; 5] = [
    &ACCESSING_PRIMARY_PARAMETER,
    &NON_PRIMARY_PARAMETER,
    &USED_MEMBER_NAME,
    &REF_FIELD_IN_NON_REF_STRUCT,
    &REF_FIELD_ON_NON_REF_PARAM,
];

// =============================================================================
// Diagnostic Sink
// =============================================================================

/// Per-run diagnostic accumulator.
///
/// Scoped to a single engine instance; must not be read concurrently from
/// two in-flight runs. Drained (and thereby cleared) at end-of-run.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    buffer: Vec<Diagnostic>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.buffer.push(diagnostic);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Diagnostics reported so far, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.buffer
    }

    /// Flush the buffer, leaving the sink empty for the next run.
    #[must_use]
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
