//! Structural code fixes for the engine's diagnostics.
//!
//! A fix is a pure value: a [`TreeEdit`] describing one structural change,
//! wrapped in a [`CodeFix`] with a user-facing title. Hosts either apply
//! edits to their own representation or use [`apply`] to get a rewritten
//! [`primgen_syntax::Compilation`] and re-run the engine on it.

pub mod edits;
pub use edits::{TreeEdit, apply};

pub mod provider;
pub use provider::{CodeFix, fixes_for};
