//! Lucent Animation System
//!
//! One shared per-frame clock drives everything that moves.
//!
//! # Features
//!
//! - **Frame Clock**: single tick source, clamped deltas, smoothed rate estimate
//! - **Spin Registry**: arbitrarily many rotating gradients on one subscription
//! - **Spring Physics**: damped springs over independent scalar lanes, so
//!   scalars, colors, and placement composites share one integrator
//! - **Tweens**: fixed-duration eased transitions, also the graceful
//!   degradation path for shapes the spring integrator does not cover
//! - **Interruptible**: retargeting replaces the previous animation on the
//!   same property; springs keep their momentum semantics via replacement
//!
//! The [`AnimationScheduler`] owns all of it and is ticked by the host
//! render loop. Nothing in this crate creates its own timer, and every
//! tick checks session liveness before doing any work.

pub mod clock;
pub mod easing;
pub mod handle;
pub mod scheduler;
pub mod spin;
pub mod spring;
pub mod target;
pub mod tween;
pub mod value;

pub use clock::{FrameClock, TickId, INITIAL_RATE, MAX_TICK_DELTA_SECS};
pub use easing::Easing;
pub use handle::AnimationHandle;
pub use scheduler::{
    fps_throttle, AnimationScheduler, SchedulerHandle, SchedulerStats, SharedScheduler,
};
pub use spin::SpinRegistry;
pub use spring::{SpringParams, SpringSet};
pub use target::{
    Animatable, SharedAnimatable, SharedSpinTarget, SpinTarget, WeakAnimatable, WeakSpinTarget,
};
pub use tween::{TweenSet, FALLBACK_TWEEN_SECS};
pub use value::{PropValue, Shape};
