//! Common types and utilities for the primgen generation engine.
//!
//! This crate provides foundational types used across all primgen crates:
//! - Node identity and source locations (`NodeId`, `Location`)
//! - Diagnostic descriptors, diagnostics and the per-run sink
//! - Cooperative cancellation (`CancelToken`)
//! - Generation defaults and the build-configuration surface

// Node identity and location tracking
pub mod location;
pub use location::{Location, NodeId};

// Diagnostic descriptors, diagnostics, and the per-run accumulator
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticDescriptor, DiagnosticSink, Severity, format_message};

// Cooperative cancellation between top-level work items
pub mod cancel;
pub use cancel::CancelToken;

// Default option values seeded into member extraction
pub mod options;
pub use options::{
    ConfigSource, FieldDefaults, GenerationDefaults, MapConfig, PropertyDefaults, RefFieldDefaults,
};
