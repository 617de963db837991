//! Theme engine
//!
//! One cloneable object tying the oscillator to the accent publisher.
//! [`ThemeEngine::attach`] registers a single tick subscription on the
//! scheduler; from then on the active oscillator mode drives the accent
//! every frame, with the publisher's epsilon gate deciding which frames
//! actually reach listeners.

use lucent_animation::{AnimationScheduler, TickId};
use lucent_core::Color;
use std::sync::{Arc, Mutex};

use crate::accent::{AccentListenerId, AccentPublisher};
use crate::oscillator::{ThemeMode, ThemeOscillator};

struct EngineInner {
    oscillator: ThemeOscillator,
    accent: AccentPublisher,
}

/// Shared handle to the session's theme state. Clones refer to the
/// same oscillator and publisher.
#[derive(Clone)]
pub struct ThemeEngine {
    inner: Arc<Mutex<EngineInner>>,
}

impl ThemeEngine {
    pub fn new(initial_accent: Color) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                oscillator: ThemeOscillator::new(),
                accent: AccentPublisher::new(initial_accent),
            })),
        }
    }

    /// Subscribe the engine to the scheduler's frame tick. Returns the
    /// subscription id so the host can detach the theme independently
    /// of session teardown.
    pub fn attach(&self, scheduler: &mut AnimationScheduler) -> TickId {
        let inner = self.inner.clone();
        scheduler.on_tick(move |dt| {
            let Ok(mut inner) = inner.lock() else {
                return;
            };
            if let Some(color) = inner.oscillator.tick(dt) {
                inner.accent.set(color);
            }
        })
    }

    /// Select the oscillator mode. Re-selecting any mode restarts its
    /// phase from zero.
    pub fn set_mode(&self, mode: ThemeMode) {
        self.inner.lock().unwrap().oscillator.set_mode(mode);
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.lock().unwrap().oscillator.mode()
    }

    /// Write the accent directly. While an oscillator mode is active
    /// the next frame overwrites this; select [`ThemeMode::Off`] first
    /// for a manual accent to stick.
    pub fn set_accent(&self, color: Color) -> bool {
        self.inner.lock().unwrap().accent.set(color)
    }

    pub fn accent(&self) -> Color {
        self.inner.lock().unwrap().accent.current()
    }

    /// Register an accent change listener. Listeners run under the
    /// engine lock and must not call back into the engine.
    pub fn on_accent_change<F>(&self, listener: F) -> AccentListenerId
    where
        F: FnMut(Color) + Send + 'static,
    {
        self.inner.lock().unwrap().accent.on_change(listener)
    }

    pub fn remove_accent_listener(&self, id: AccentListenerId) {
        self.inner.lock().unwrap().accent.remove_listener(id);
    }

    pub fn accent_listener_count(&self) -> usize {
        self.inner.lock().unwrap().accent.listener_count()
    }

    /// Total accent listeners dropped after panicking.
    pub fn listeners_evicted(&self) -> u64 {
        self.inner.lock().unwrap().accent.evicted()
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clones_share_state() {
        let engine = ThemeEngine::new(Color::BLACK);
        let other = engine.clone();

        engine.set_accent(Color::RED);
        assert_eq!(other.accent(), Color::RED);

        other.set_mode(ThemeMode::Rainbow);
        assert_eq!(engine.mode(), ThemeMode::Rainbow);
    }

    #[test]
    fn test_manual_accent_fires_listeners() {
        let engine = ThemeEngine::new(Color::BLACK);
        let count = Arc::new(AtomicUsize::new(0));

        let count2 = count.clone();
        let id = engine.on_accent_change(move |_| {
            count2.fetch_add(1, Ordering::SeqCst);
        });

        assert!(engine.set_accent(Color::RED));
        assert!(!engine.set_accent(Color::RED));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        engine.remove_accent_listener(id);
        engine.set_accent(Color::BLUE);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
