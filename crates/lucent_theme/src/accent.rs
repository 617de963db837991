//! Accent color publisher
//!
//! Holds the current accent color and fans out changes to listeners.
//! Writes that land within [`ACCENT_DISTANCE_EPSILON`] of the current
//! color are rejected before any listener runs, which keeps the
//! rainbow oscillator from flooding subscribers with imperceptible
//! per-frame updates. A listener that panics is unregistered at the
//! fan-out boundary so one bad callback never blocks the rest.

use lucent_core::Color;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Minimum squared channel distance an accent write must move before
/// listeners are notified. 0.004 per channel, squared.
pub const ACCENT_DISTANCE_EPSILON: f32 = 0.000016;

new_key_type! {
    /// Key for one accent change listener.
    pub struct AccentListenerId;
}

type Listener = Box<dyn FnMut(Color) + Send>;

/// Current accent color plus its change listeners.
pub struct AccentPublisher {
    current: Color,
    listeners: SlotMap<AccentListenerId, Listener>,
    evicted: u64,
}

impl AccentPublisher {
    pub fn new(initial: Color) -> Self {
        Self {
            current: initial,
            listeners: SlotMap::default(),
            evicted: 0,
        }
    }

    /// The color most recently accepted by [`set`](Self::set).
    pub fn current(&self) -> Color {
        self.current
    }

    /// Register `listener` for future accepted writes. The listener is
    /// not called with the current color; only changes are delivered.
    pub fn on_change<F>(&mut self, listener: F) -> AccentListenerId
    where
        F: FnMut(Color) + Send + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    /// Disconnect a listener. Unknown ids are ignored.
    pub fn remove_listener(&mut self, id: AccentListenerId) {
        self.listeners.remove(id);
    }

    /// Listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total listeners dropped after panicking.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Write a new accent color. Returns `true` if the write was
    /// accepted and delivered, `false` if it fell inside the epsilon
    /// gate and the stored color stayed untouched. Each live listener
    /// hears an accepted write exactly once; panicking listeners are
    /// removed before this call returns.
    pub fn set(&mut self, color: Color) -> bool {
        if self.current.distance_sq(color) < ACCENT_DISTANCE_EPSILON {
            return false;
        }
        self.current = color;

        let mut dead: SmallVec<[AccentListenerId; 2]> = SmallVec::new();
        for (id, listener) in self.listeners.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| listener(color))).is_err() {
                dead.push(id);
            }
        }
        for id in dead {
            self.listeners.remove(id);
            self.evicted += 1;
            tracing::warn!("accent listener panicked; unregistered");
        }
        true
    }
}

// ===== Tests =====
