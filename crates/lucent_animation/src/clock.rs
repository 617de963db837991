//! Shared frame clock
//!
//! One tick source per session. Subscribers run in registration order
//! with the clamped frame delta, and the clock keeps a smoothed
//! ticks-per-second estimate for throttling helpers. Nothing else in
//! the toolkit may own a timer.

use smallvec::SmallVec;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Upper bound applied to every delta before any integration. A host
/// stall longer than this advances animations by exactly this much
/// instead of exploding spring velocities.
pub const MAX_TICK_DELTA_SECS: f32 = 0.05;

/// EMA weight of the previous rate estimate; the new sample gets the
/// remainder.
pub const RATE_SMOOTHING: f32 = 0.85;

/// Rate estimate before any tick has been observed.
pub const INITIAL_RATE: f32 = 60.0;

/// Identifier for one tick subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickId(u64);

type TickFn = Box<dyn FnMut(f32) + Send>;

struct TickSubscriber {
    id: TickId,
    callback: TickFn,
}

/// The per-session tick source and dispatch list.
pub struct FrameClock {
    subscribers: Vec<TickSubscriber>,
    next_id: u64,
    rate: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            rate: INITIAL_RATE,
        }
    }

    /// Register a per-frame callback. It receives the clamped delta in
    /// seconds and runs in registration order relative to the other
    /// subscribers.
    pub fn on_tick<F>(&mut self, callback: F) -> TickId
    where
        F: FnMut(f32) + Send + 'static,
    {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(TickSubscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns whether it was present.
    pub fn remove_tick(&mut self, id: TickId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Drop every subscription (session teardown).
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Smoothed ticks-per-second estimate, rounded to whole frames.
    pub fn smoothed_rate(&self) -> u32 {
        self.rate.round().max(0.0) as u32
    }

    /// Feed one raw (unclamped) delta into the rate estimate. The
    /// estimate tracks what the host actually delivers, so clamped
    /// integration deltas must not be fed back here.
    pub(crate) fn observe(&mut self, raw_dt: f32) {
        self.rate = self.rate * RATE_SMOOTHING + (1.0 / raw_dt) * (1.0 - RATE_SMOOTHING);
    }

    /// Dispatch one tick to every subscriber. A panicking subscriber is
    /// unregistered, and the rest still run. Returns how many were
    /// evicted.
    pub(crate) fn dispatch(&mut self, dt: f32) -> usize {
        let mut dead: SmallVec<[TickId; 2]> = SmallVec::new();
        for subscriber in self.subscribers.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(dt))).is_err() {
                tracing::warn!(id = ?subscriber.id, "tick subscriber panicked; unregistered");
                dead.push(subscriber.id);
            }
        }
        let evicted = dead.len();
        for id in dead {
            self.remove_tick(id);
        }
        evicted
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let mut clock = FrameClock::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let log = log.clone();
            clock.on_tick(move |_| log.lock().unwrap().push(name));
        }

        clock.dispatch(0.016);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_tick_stops_dispatch() {
        let mut clock = FrameClock::new();
        let count = Arc::new(Mutex::new(0));

        let count2 = count.clone();
        let id = clock.on_tick(move |_| *count2.lock().unwrap() += 1);

        clock.dispatch(0.016);
        assert!(clock.remove_tick(id));
        assert!(!clock.remove_tick(id));
        clock.dispatch(0.016);

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_panicking_subscriber_is_evicted_others_survive() {
        let mut clock = FrameClock::new();
        let count = Arc::new(Mutex::new(0));

        clock.on_tick(|_| panic!("bad subscriber"));
        let count2 = count.clone();
        clock.on_tick(move |_| *count2.lock().unwrap() += 1);

        assert_eq!(clock.dispatch(0.016), 1);
        assert_eq!(clock.subscriber_count(), 1);

        assert_eq!(clock.dispatch(0.016), 0);
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_rate_estimate_tracks_observed_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.smoothed_rate(), 60);

        // Feed a steady 120Hz cadence; the EMA should close most of the
        // gap from 60 within a second of frames.
        for _ in 0..120 {
            clock.observe(1.0 / 120.0);
        }
        assert!(clock.smoothed_rate() >= 118);
        assert!(clock.smoothed_rate() <= 120);
    }

    #[test]
    fn test_rate_estimate_single_slow_frame_barely_moves() {
        let mut clock = FrameClock::new();
        for _ in 0..120 {
            clock.observe(1.0 / 120.0);
        }
        let before = clock.smoothed_rate();

        // One 10fps hiccup: EMA keeps 85% of the old estimate.
        clock.observe(0.1);
        let after = clock.smoothed_rate();
        assert!(after > before / 2);
        assert!(after < before);
    }
}
