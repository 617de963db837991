//! Damped-spring interpolation
//!
//! Springs integrate toward their goal instead of easing over a fixed
//! duration, so retargeting mid-flight keeps the motion natural. Every
//! springable shape decomposes into independent scalar lanes and runs
//! through one semi-implicit Euler step; a spring retires when its
//! summed position error and summed speed both drop under small fixed
//! thresholds, at which point the goal value is written exactly.

use crate::handle::{AnimFlags, AnimationHandle};
use crate::target::WeakAnimatable;
use crate::value::{Lanes, PropValue, Shape};
use smallvec::SmallVec;
use std::sync::{Arc, Weak};

/// Settle threshold on summed |goal - position| for scalar and color
/// springs.
pub const SETTLE_EPSILON: f32 = 0.001;

/// Settle threshold for placement springs. Four lanes, two of them in
/// pixels, need a little more slack.
pub const SETTLE_EPSILON_DIM2: f32 = 0.002;

/// Settle threshold on summed |velocity|.
pub const SETTLE_SPEED_EPSILON: f32 = 0.01;

/// Spring stiffness and damping. The default is the toolkit's house
/// feel: quick approach with a light overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::snappy()
    }
}

impl SpringParams {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }

    /// Near-critical: settles fast with minimal overshoot. Stable at
    /// the clamped worst-case tick delta.
    pub const fn stiff() -> Self {
        Self::new(350.0, 28.0)
    }

    /// Slow and smooth, no visible overshoot.
    pub const fn gentle() -> Self {
        Self::new(120.0, 16.0)
    }

    /// The default feel.
    pub const fn snappy() -> Self {
        Self::new(200.0, 18.0)
    }

    /// Pronounced bounce.
    pub const fn wobbly() -> Self {
        Self::new(180.0, 10.0)
    }
}

fn settle_epsilon(shape: Shape) -> f32 {
    match shape {
        Shape::Dim2 => SETTLE_EPSILON_DIM2,
        _ => SETTLE_EPSILON,
    }
}

struct SpringEntry {
    target: WeakAnimatable,
    prop: &'static str,
    shape: Shape,
    position: Lanes,
    velocity: Lanes,
    goal: Lanes,
    params: SpringParams,
    flags: Arc<AnimFlags>,
}

impl SpringEntry {
    /// One semi-implicit Euler step across every lane. Returns whether
    /// the spring has settled.
    fn step(&mut self, dt: f32) -> bool {
        let SpringParams { stiffness, damping } = self.params;
        for ((pos, vel), goal) in self
            .position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.goal.iter())
        {
            let force = (goal - *pos) * stiffness - *vel * damping;
            *vel += force * dt;
            *pos += *vel * dt;
        }
        let error: f32 = self
            .position
            .iter()
            .zip(self.goal.iter())
            .map(|(p, g)| (g - p).abs())
            .sum();
        let speed: f32 = self.velocity.iter().map(|v| v.abs()).sum();
        error < settle_epsilon(self.shape) && speed < SETTLE_SPEED_EPSILON
    }
}

/// What one tick of a spring or tween set retired, for the scheduler's
/// counters.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RetireCounts {
    pub completed: usize,
    pub evicted: usize,
    pub canceled: usize,
}

/// The active springs, at most one per `(target, property)` key.
#[derive(Default)]
pub struct SpringSet {
    entries: Vec<SpringEntry>,
}

impl SpringSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove any spring on `(target, prop)`, retiring its handle.
    /// Returns whether one was there.
    pub(crate) fn cancel_key(&mut self, target: &WeakAnimatable, prop: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            let same = Weak::ptr_eq(&entry.target, target) && entry.prop == prop;
            if same {
                entry.flags.finish();
            }
            !same
        });
        self.entries.len() != before
    }

    /// Install a spring from `current` toward `goal`. The caller has
    /// already verified the shapes match and cleared the key.
    pub(crate) fn install(
        &mut self,
        target: WeakAnimatable,
        prop: &'static str,
        current: PropValue,
        goal: PropValue,
        params: SpringParams,
    ) -> AnimationHandle {
        let shape = current.shape();
        let position = current.lanes();
        let velocity: Lanes = SmallVec::from_elem(0.0, position.len());
        let flags = Arc::new(AnimFlags::default());
        self.entries.push(SpringEntry {
            target,
            prop,
            shape,
            position,
            velocity,
            goal: goal.lanes(),
            params,
            flags: flags.clone(),
        });
        AnimationHandle::new(flags)
    }

    /// Retire everything without writing further values (session
    /// teardown).
    pub(crate) fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            entry.flags.finish();
        }
    }

    /// Step every spring, write results, and retire converged,
    /// canceled, and dead-target springs in one compacting pass that
    /// preserves the order of survivors.
    pub(crate) fn tick(&mut self, dt: f32) -> RetireCounts {
        let mut counts = RetireCounts::default();
        self.entries.retain_mut(|entry| {
            if entry.flags.is_canceled() {
                counts.canceled += 1;
                return false;
            }
            let Some(target) = entry.target.upgrade() else {
                entry.flags.finish();
                counts.evicted += 1;
                return false;
            };
            let Ok(mut target) = target.lock() else {
                entry.flags.finish();
                counts.evicted += 1;
                return false;
            };
            if entry.step(dt) {
                // Snap exactly onto the goal so the property never
                // holds an epsilon-sized residue.
                target.set(entry.prop, PropValue::from_lanes(entry.shape, &entry.goal));
                entry.flags.finish();
                counts.completed += 1;
                false
            } else {
                target.set(
                    entry.prop,
                    PropValue::from_lanes(entry.shape, &entry.position),
                );
                true
            }
        });
        counts
    }
}
