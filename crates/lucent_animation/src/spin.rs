//! Gradient spin registry
//!
//! Many rotating gradients, one tick subscription. Entries hold weak
//! references; dead targets are dropped in the same compacting pass
//! that advances live ones, so the registry never accumulates stale
//! entries and never removes while iterating.

use crate::target::{SharedSpinTarget, WeakSpinTarget};
use std::sync::{Arc, Weak};

/// Full circle in degrees; angles always stay in `[0, 360)`.
pub const FULL_TURN_DEG: f32 = 360.0;

struct SpinEntry {
    target: WeakSpinTarget,
    speed_deg_per_sec: f32,
    angle_deg: f32,
}

/// Rotation driver for gradient handles.
#[derive(Default)]
pub struct SpinRegistry {
    entries: Vec<SpinEntry>,
}

impl SpinRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Start (or retune) a continuous rotation on `target`.
    ///
    /// Re-registering a target that is already spinning updates its
    /// speed in place and keeps its phase. New targets start at 0
    /// degrees. Negative speeds spin the other way.
    pub fn register(&mut self, target: &SharedSpinTarget, speed_deg_per_sec: f32) {
        let weak = Arc::downgrade(target);
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| Weak::ptr_eq(&e.target, &weak))
        {
            entry.speed_deg_per_sec = speed_deg_per_sec;
            return;
        }
        self.entries.push(SpinEntry {
            target: weak,
            speed_deg_per_sec,
            angle_deg: 0.0,
        });
    }

    /// Stop driving `target` and drop its entry. No-op for unknown
    /// targets.
    pub fn unregister(&mut self, target: &SharedSpinTarget) {
        let weak = Arc::downgrade(target);
        self.entries.retain(|e| !Weak::ptr_eq(&e.target, &weak));
    }

    /// Entries currently registered, dead-but-unprobed ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (session teardown).
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance every live entry and evict dead ones in one compacting
    /// pass that preserves the relative order of survivors. Returns how
    /// many entries were evicted.
    pub(crate) fn tick(&mut self, dt: f32) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|entry| {
            let Some(target) = entry.target.upgrade() else {
                return false;
            };
            // A poisoned lock means the owner died mid-write; treat it
            // the same as a dead target.
            let Ok(mut target) = target.lock() else {
                return false;
            };
            entry.angle_deg =
                (entry.angle_deg + dt * entry.speed_deg_per_sec).rem_euclid(FULL_TURN_DEG);
            target.set_rotation(entry.angle_deg);
            true
        });
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::trace!(evicted, remaining = self.entries.len(), "spin targets dropped");
        }
        evicted
    }
}
