//! Node identity and source locations.
//!
//! The engine never sees the host compiler's concrete position types. The
//! front end numbers every addressable syntax node in a stable pre-order
//! pass, and diagnostics, option values and code fixes all point back into
//! the tree through those numbers.

use serde::Serialize;

/// Identity of one addressable syntax node within a compilation.
///
/// Assigned by the front end's indexing pass in pre-order, so ids are
/// deterministic for identical input trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node" (e.g. a default value that was never written
    /// in source and therefore has nowhere to point).
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// A source location carried by diagnostics and resolved option values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub node: NodeId,
}

impl Location {
    pub const NONE: Location = Location {
        node: NodeId::NONE,
    };

    #[must_use]
    pub const fn of(node: NodeId) -> Self {
        Location { node }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self.node.is_none()
    }

    /// Fall back to `other` when this location points nowhere.
    #[must_use]
    pub fn or(self, other: Location) -> Location {
        if self.is_none() { other } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_location_falls_back() {
        let fallback = Location::of(NodeId(7));
        assert_eq!(Location::NONE.or(fallback), fallback);
        assert_eq!(Location::of(NodeId(3)).or(fallback), Location::of(NodeId(3)));
    }
}
