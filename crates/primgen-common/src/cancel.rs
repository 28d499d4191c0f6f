//! Cooperative cancellation.
//!
//! The host may re-invoke the whole pipeline incrementally (on every
//! keystroke in an editor), cancelling superseded runs. Long traversals
//! poll the token between top-level work items — one declaring type at a
//! time — and abandon cleanly, without partial diagnostic emission for a
//! type not yet completed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cheaply cloneable cancellation signal shared between the host and an
/// in-flight run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_signal() {
        let token = CancelToken::new();
        let seen_by_run = token.clone();
        assert!(!seen_by_run.is_cancelled());
        token.cancel();
        assert!(seen_by_run.is_cancelled());
    }
}
