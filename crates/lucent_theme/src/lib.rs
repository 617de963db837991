//! Lucent Theme System
//!
//! The session-wide accent color and the machinery that animates it:
//!
//! - **Accent Publisher**: the gated accent setter and its change-listener
//!   fan-out; imperceptible writes are dropped before any listener runs
//! - **Theme Oscillator**: rainbow, two-color ping-pong, and three-color
//!   cycle modes, all phase-reset on every mode change
//! - **Theme Engine**: both of the above behind one cloneable object,
//!   driven by a single scheduler tick subscription
//!
//! Widgets subscribe to accent changes and restyle themselves; the
//! oscillator (or a direct [`ThemeEngine::set_accent`]) is the only
//! writer.

pub mod accent;
pub mod engine;
pub mod oscillator;

pub use accent::{AccentListenerId, AccentPublisher, ACCENT_DISTANCE_EPSILON};
pub use engine::ThemeEngine;
pub use oscillator::{
    ThemeMode, ThemeOscillator, DUAL_SWEEP_RATE, RAINBOW_HUE_RATE, TRIPLE_SWEEP_RATE,
};
