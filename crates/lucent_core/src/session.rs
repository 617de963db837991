//! Session liveness flag
//!
//! The host owns one of these per UI session and flips it exactly once
//! at teardown (script unload, hot reload). Everything that does
//! per-frame work reads it before touching anything else; nothing in
//! the toolkit ever flips it back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the per-session "still alive" bit.
#[derive(Clone, Debug)]
pub struct SessionFlag {
    alive: Arc<AtomicBool>,
}

impl SessionFlag {
    /// A fresh, live session.
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the session dead. Idempotent; there is no way back.
    pub fn invalidate(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            tracing::debug!("session invalidated");
        }
    }
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let flag = SessionFlag::new();
        let clone = flag.clone();
        assert!(clone.is_alive());
        flag.invalidate();
        assert!(!clone.is_alive());
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let flag = SessionFlag::new();
        flag.invalidate();
        flag.invalidate();
        assert!(!flag.is_alive());
    }
}
