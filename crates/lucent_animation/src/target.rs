//! Target seams for the widget layer
//!
//! The scheduler never owns the things it animates. Widgets hand it
//! `Weak` references, and a failed upgrade IS the liveness probe: the
//! entry is dropped on the next tick, no destructor hook required.
//! Owners that tear down deterministically should still use the
//! explicit `unregister`/`cancel` APIs; the probe is the backstop.

use crate::value::PropValue;
use std::sync::{Arc, Mutex, Weak};

/// A handle whose gradient rotation the spin registry drives.
pub trait SpinTarget: Send {
    /// Write the current rotation in degrees, always in `[0, 360)`.
    fn set_rotation(&mut self, degrees: f32);
}

/// A handle whose named properties the spring and tween engines drive.
pub trait Animatable: Send {
    /// Read the current value of `prop`, or `None` if this target has
    /// no such property.
    fn get(&self, prop: &str) -> Option<PropValue>;

    /// Write a new value for `prop`. Writes for unknown properties are
    /// ignored.
    fn set(&mut self, prop: &str, value: PropValue);
}

pub type SharedSpinTarget = Arc<Mutex<dyn SpinTarget>>;
pub type WeakSpinTarget = Weak<Mutex<dyn SpinTarget>>;

pub type SharedAnimatable = Arc<Mutex<dyn Animatable>>;
pub type WeakAnimatable = Weak<Mutex<dyn Animatable>>;
