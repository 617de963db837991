//! Continuous accent-color oscillator
//!
//! A tick-driven state machine with four modes. `Off` leaves the accent
//! alone; the other three recompute it every frame. Selecting a mode is
//! a total phase reset: switching never resumes mid-phase, so the same
//! mode selected twice restarts from the canonical start both times.
//! The oscillator is advanced only by the shared clock and owns no
//! timer.

use lucent_core::Color;
use serde::{Deserialize, Serialize};

/// Hue revolutions per second in rainbow mode.
pub const RAINBOW_HUE_RATE: f32 = 0.13;

/// Sweep rate in dual mode, as the fraction of the a-to-b span covered
/// per second.
pub const DUAL_SWEEP_RATE: f32 = 0.60;

/// Sweep rate in triple mode, in segments per second.
pub const TRIPLE_SWEEP_RATE: f32 = 0.40;

/// A requested oscillator mode. Carries the palette but no phase;
/// phase lives inside the oscillator and resets on every selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    /// Hold the accent static.
    Off,
    /// Cycle the full hue wheel at full saturation.
    Rainbow,
    /// Ping-pong between two colors.
    Dual(Color, Color),
    /// Cycle a -> b -> c -> a.
    Triple(Color, Color, Color),
}

/// Internal phase-carrying state. Exactly one variant is ever live.
#[derive(Clone, Copy, Debug)]
enum Phase {
    Off,
    Rainbow {
        hue: f32,
    },
    Dual {
        a: Color,
        b: Color,
        t: f32,
        direction: f32,
    },
    Triple {
        a: Color,
        b: Color,
        c: Color,
        t: f32,
    },
}

/// The oscillator state machine. Starts in `Off`.
pub struct ThemeOscillator {
    phase: Phase,
}

impl ThemeOscillator {
    pub fn new() -> Self {
        Self { phase: Phase::Off }
    }

    /// Replace the mode, resetting phase to the canonical start: hue 0,
    /// sweep position 0, direction toward the second color.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        tracing::debug!(?mode, "oscillator mode selected");
        self.phase = match mode {
            ThemeMode::Off => Phase::Off,
            ThemeMode::Rainbow => Phase::Rainbow { hue: 0.0 },
            ThemeMode::Dual(a, b) => Phase::Dual {
                a,
                b,
                t: 0.0,
                direction: 1.0,
            },
            ThemeMode::Triple(a, b, c) => Phase::Triple { a, b, c, t: 0.0 },
        };
    }

    /// The currently selected mode, phase stripped.
    pub fn mode(&self) -> ThemeMode {
        match self.phase {
            Phase::Off => ThemeMode::Off,
            Phase::Rainbow { .. } => ThemeMode::Rainbow,
            Phase::Dual { a, b, .. } => ThemeMode::Dual(a, b),
            Phase::Triple { a, b, c, .. } => ThemeMode::Triple(a, b, c),
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self.phase, Phase::Off)
    }

    /// Advance by `dt` seconds and produce the new accent color, or
    /// `None` in `Off`.
    pub fn tick(&mut self, dt: f32) -> Option<Color> {
        match &mut self.phase {
            Phase::Off => None,
            Phase::Rainbow { hue } => {
                *hue = (*hue + dt * RAINBOW_HUE_RATE).rem_euclid(1.0);
                Some(Color::from_hsv(*hue, 1.0, 1.0))
            }
            Phase::Dual { a, b, t, direction } => {
                *t += *direction * dt * DUAL_SWEEP_RATE;
                if *t >= 1.0 {
                    *t = 1.0;
                    *direction = -1.0;
                } else if *t <= 0.0 {
                    *t = 0.0;
                    *direction = 1.0;
                }
                Some(Color::lerp(*a, *b, *t))
            }
            Phase::Triple { a, b, c, t } => {
                // t lives in [0, 3); the integer part picks the segment
                // and the fraction interpolates within it.
                *t = (*t + dt * TRIPLE_SWEEP_RATE).rem_euclid(3.0);
                let segment = *t as u32;
                let frac = *t - segment as f32;
                Some(match segment {
                    0 => Color::lerp(*a, *b, frac),
                    1 => Color::lerp(*b, *c, frac),
                    _ => Color::lerp(*c, *a, frac),
                })
            }
        }
    }
}

impl Default for ThemeOscillator {
    fn default() -> Self {
        Self::new()
    }
}
