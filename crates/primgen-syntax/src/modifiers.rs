//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Modifiers carried by type and parameter declarations.
    ///
    /// Only the modifiers the engine actually queries are modeled; the front
    /// end is free to drop anything else on the floor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const PARTIAL = 1 << 0;
        const READONLY = 1 << 1;
        /// `ref` on a struct (reference-capable) or on a parameter
        /// (by-reference).
        const REF = 1 << 2;
        const STATIC = 1 << 3;
        const PUBLIC = 1 << 4;
    }
}

impl Modifiers {
    #[must_use]
    pub fn is_partial(self) -> bool {
        self.contains(Modifiers::PARTIAL)
    }

    #[must_use]
    pub fn is_readonly(self) -> bool {
        self.contains(Modifiers::READONLY)
    }

    #[must_use]
    pub fn is_ref(self) -> bool {
        self.contains(Modifiers::REF)
    }
}
