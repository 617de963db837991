//! Cancel handles for in-flight animations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Flags shared between a running spring or tween and the handle its
/// requester holds. Atomics so a handle can cancel without taking the
/// scheduler lock.
#[derive(Debug, Default)]
pub(crate) struct AnimFlags {
    canceled: AtomicBool,
    finished: AtomicBool,
}

impl AnimFlags {
    pub(crate) fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Marks the animation retired (converged, replaced, or its target
    /// died). One-way, like cancel.
    pub(crate) fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// Handle to one in-flight spring or tween.
///
/// Dropping the handle does not cancel anything; the animation runs to
/// convergence (or its target's death) on its own.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    flags: Arc<AnimFlags>,
}

impl AnimationHandle {
    pub(crate) fn new(flags: Arc<AnimFlags>) -> Self {
        Self { flags }
    }

    /// A handle attached to nothing, already retired. Returned when a
    /// request degrades to "do nothing": missing property, mismatched
    /// shapes, scheduler already gone.
    pub(crate) fn inert() -> Self {
        let flags = AnimFlags::default();
        flags.finish();
        Self {
            flags: Arc::new(flags),
        }
    }

    /// Abandon the animation mid-flight. The property keeps whatever
    /// value the last tick wrote; there is no snap to the goal. Safe to
    /// call any number of times, including after completion.
    pub fn cancel(&self) {
        self.flags.cancel();
    }

    /// Whether the animation is still being integrated.
    pub fn is_active(&self) -> bool {
        !self.flags.is_canceled() && !self.flags.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_handle_is_never_active() {
        let handle = AnimationHandle::inert();
        assert!(!handle.is_active());
        handle.cancel();
        assert!(!handle.is_active());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let flags = Arc::new(AnimFlags::default());
        let handle = AnimationHandle::new(flags.clone());
        let clone = handle.clone();

        assert!(clone.is_active());
        handle.cancel();
        assert!(!clone.is_active());
        assert!(flags.is_canceled());
    }
}
