//! Companion source emission.
//!
//! Turns the engine's per-type generation plans into C# companion source
//! artifacts: a `// <auto-generated/>` header, the namespace block, one
//! `partial` reopening per enclosing type, and one rendered line per
//! generated member. Output is byte-identical for identical plans.
//!
//! Also carries the fixed marker-attribute boilerplate a host injects into
//! the compilation before analysis.

pub mod writer;
pub use writer::Writer;

pub mod companion;
pub use companion::{Artifact, emit_companion};

pub mod markers;
pub use markers::marker_artifacts;
