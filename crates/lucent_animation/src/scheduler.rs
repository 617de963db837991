//! Animation scheduler
//!
//! One explicitly owned service object per session: the frame clock,
//! the spin registry, the spring set, and the tween set all live here,
//! and the host render loop ticks it once per frame. The widget layer
//! reaches it through cloneable [`SchedulerHandle`]s that quietly no-op
//! once the scheduler is gone.
//!
//! Tick order is fixed: session check, rate bookkeeping, clock
//! subscribers, spins, springs, tweens.

use crate::clock::{FrameClock, TickId, MAX_TICK_DELTA_SECS};
use crate::easing::Easing;
use crate::handle::AnimationHandle;
use crate::spin::SpinRegistry;
use crate::spring::{SpringParams, SpringSet};
use crate::target::{SharedAnimatable, SharedSpinTarget, WeakAnimatable};
use crate::tween::{TweenSet, FALLBACK_TWEEN_SECS};
use crate::value::PropValue;
use lucent_core::SessionFlag;
use std::sync::{Arc, Mutex, Weak};
use std::time::Instant;

/// Counters for everything the scheduler absorbs silently.
/// Observability only; nothing reads these to make decisions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub tick_evictions: u64,
    pub spin_evictions: u64,
    pub springs_completed: u64,
    pub springs_evicted: u64,
    pub springs_canceled: u64,
    pub tweens_completed: u64,
    pub tweens_evicted: u64,
    pub tweens_canceled: u64,
    /// Spring or tween requests that replaced a live animation on the
    /// same `(target, property)` key.
    pub replacements: u64,
    /// Spring requests that degraded to a tween because the integrator
    /// does not cover the property's shape.
    pub shape_fallbacks: u64,
}

/// The shared form the host loop and widget handles use.
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

/// The animation scheduler that ticks all active animations.
pub struct AnimationScheduler {
    session: SessionFlag,
    clock: FrameClock,
    spins: SpinRegistry,
    springs: SpringSet,
    tweens: TweenSet,
    stats: SchedulerStats,
    last_frame: Instant,
    torn_down: bool,
}

impl AnimationScheduler {
    pub fn new(session: SessionFlag) -> Self {
        Self {
            session,
            clock: FrameClock::new(),
            spins: SpinRegistry::new(),
            springs: SpringSet::new(),
            tweens: TweenSet::new(),
            stats: SchedulerStats::default(),
            last_frame: Instant::now(),
            torn_down: false,
        }
    }

    /// Wrap in the shared form and hand the host loop its `Arc`.
    pub fn into_shared(self) -> SharedScheduler {
        Arc::new(Mutex::new(self))
    }

    /// A weak handle for the widget layer.
    pub fn handle(shared: &SharedScheduler) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(shared),
        }
    }

    pub fn session(&self) -> &SessionFlag {
        &self.session
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Smoothed ticks-per-second estimate from the clock.
    pub fn smoothed_rate(&self) -> u32 {
        self.clock.smoothed_rate()
    }

    // ===== Registration surface =====

    /// Register a per-frame callback on the shared clock.
    pub fn on_tick<F>(&mut self, callback: F) -> TickId
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.clock.on_tick(callback)
    }

    /// Remove a tick subscription. Returns whether it was present.
    pub fn remove_tick(&mut self, id: TickId) -> bool {
        self.clock.remove_tick(id)
    }

    /// Start (or retune) a continuous gradient rotation.
    pub fn register_spin(&mut self, target: &SharedSpinTarget, speed_deg_per_sec: f32) {
        self.spins.register(target, speed_deg_per_sec);
    }

    /// Stop driving a gradient rotation.
    pub fn unregister_spin(&mut self, target: &SharedSpinTarget) {
        self.spins.unregister(target);
    }

    /// Spring `prop` on `target` toward `goal`.
    ///
    /// Rules, in order: a target without the property yields an inert
    /// handle; a goal whose shape differs from the property's current
    /// shape yields an inert handle; any live animation on the same
    /// `(target, property)` key is replaced; shapes the integrator does
    /// not cover degrade to a [`FALLBACK_TWEEN_SECS`] eased tween.
    pub fn spring_to(
        &mut self,
        target: &SharedAnimatable,
        prop: &'static str,
        goal: PropValue,
        params: SpringParams,
    ) -> AnimationHandle {
        let Some(current) = Self::probe(target, prop) else {
            tracing::warn!(prop, "spring requested on a missing property; ignoring");
            return AnimationHandle::inert();
        };
        if current.shape() != goal.shape() {
            tracing::warn!(
                prop,
                current = ?current.shape(),
                goal = ?goal.shape(),
                "spring requested across shapes; ignoring"
            );
            return AnimationHandle::inert();
        }
        let weak = Arc::downgrade(target);
        self.replace_key(&weak, prop);
        if !current.springable() {
            self.stats.shape_fallbacks += 1;
            tracing::debug!(prop, "spring shape not integrable; degrading to a timed ease");
            return self
                .tweens
                .install(weak, prop, current, goal, FALLBACK_TWEEN_SECS, Easing::default());
        }
        self.springs.install(weak, prop, current, goal, params)
    }

    /// Tween `prop` on `target` toward `goal` over `duration_secs`.
    /// Same missing-property, shape, and replacement rules as
    /// [`spring_to`](Self::spring_to).
    pub fn tween_to(
        &mut self,
        target: &SharedAnimatable,
        prop: &'static str,
        goal: PropValue,
        duration_secs: f32,
        easing: Easing,
    ) -> AnimationHandle {
        let Some(current) = Self::probe(target, prop) else {
            tracing::warn!(prop, "tween requested on a missing property; ignoring");
            return AnimationHandle::inert();
        };
        if current.shape() != goal.shape() {
            tracing::warn!(
                prop,
                current = ?current.shape(),
                goal = ?goal.shape(),
                "tween requested across shapes; ignoring"
            );
            return AnimationHandle::inert();
        }
        let weak = Arc::downgrade(target);
        self.replace_key(&weak, prop);
        self.tweens
            .install(weak, prop, current, goal, duration_secs, easing)
    }

    // ===== Introspection =====

    pub fn subscriber_count(&self) -> usize {
        self.clock.subscriber_count()
    }

    pub fn spin_count(&self) -> usize {
        self.spins.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Whether any spring or tween is still in flight.
    pub fn has_active_animations(&self) -> bool {
        !self.springs.is_empty() || !self.tweens.is_empty()
    }

    // ===== Ticking =====

    /// Tick from wall-clock time. Call once per rendered frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt);
    }

    /// Advance the world by an explicit delta in seconds. The wall
    /// clock tick and tests both land here.
    ///
    /// Non-positive deltas are ignored outright. The raw delta feeds
    /// the rate estimate; integration uses the delta clamped to
    /// [`MAX_TICK_DELTA_SECS`].
    pub fn advance(&mut self, raw_dt: f32) {
        if !self.session.is_alive() {
            self.teardown();
            return;
        }
        if raw_dt <= 0.0 {
            return;
        }
        self.stats.ticks += 1;
        self.clock.observe(raw_dt);

        let dt = raw_dt.min(MAX_TICK_DELTA_SECS);
        self.stats.tick_evictions += self.clock.dispatch(dt) as u64;
        self.stats.spin_evictions += self.spins.tick(dt) as u64;

        let springs = self.springs.tick(dt);
        self.stats.springs_completed += springs.completed as u64;
        self.stats.springs_evicted += springs.evicted as u64;
        self.stats.springs_canceled += springs.canceled as u64;

        let tweens = self.tweens.tick(dt);
        self.stats.tweens_completed += tweens.completed as u64;
        self.stats.tweens_evicted += tweens.evicted as u64;
        self.stats.tweens_canceled += tweens.canceled as u64;
    }

    /// Read the current value of `prop`, treating a poisoned target
    /// lock the same as a dead target.
    fn probe(target: &SharedAnimatable, prop: &str) -> Option<PropValue> {
        match target.lock() {
            Ok(guard) => guard.get(prop),
            Err(_) => None,
        }
    }

    fn replace_key(&mut self, target: &WeakAnimatable, prop: &str) {
        let replaced = self.springs.cancel_key(target, prop) | self.tweens.cancel_key(target, prop);
        if replaced {
            self.stats.replacements += 1;
        }
    }

    /// Drop every registration. Runs once, on the first tick after the
    /// session flag flips.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        tracing::debug!(
            subscribers = self.clock.subscriber_count(),
            spins = self.spins.len(),
            springs = self.springs.len(),
            tweens = self.tweens.len(),
            "session dead; clearing scheduler"
        );
        self.clock.clear();
        self.spins.clear();
        self.springs.clear();
        self.tweens.clear();
    }
}

/// Weak, cloneable access to a [`SharedScheduler`] for the widget
/// layer. Every operation quietly no-ops (or returns an inert handle)
/// once the scheduler has been dropped; a late caller is
/// indistinguishable from one racing session teardown, and neither may
/// crash.
///
/// Handles lock the scheduler, so they must not be used from inside a
/// tick callback.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<AnimationScheduler>>,
}

impl SchedulerHandle {
    fn with<R>(&self, f: impl FnOnce(&mut AnimationScheduler) -> R) -> Option<R> {
        let shared = self.inner.upgrade()?;
        let mut guard = shared.lock().ok()?;
        Some(f(&mut guard))
    }

    /// Whether the scheduler is still there.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn on_tick<F>(&self, callback: F) -> Option<TickId>
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.with(|s| s.on_tick(callback))
    }

    pub fn remove_tick(&self, id: TickId) -> bool {
        self.with(|s| s.remove_tick(id)).unwrap_or(false)
    }

    pub fn register_spin(&self, target: &SharedSpinTarget, speed_deg_per_sec: f32) {
        self.with(|s| s.register_spin(target, speed_deg_per_sec));
    }

    pub fn unregister_spin(&self, target: &SharedSpinTarget) {
        self.with(|s| s.unregister_spin(target));
    }

    pub fn spring_to(
        &self,
        target: &SharedAnimatable,
        prop: &'static str,
        goal: PropValue,
        params: SpringParams,
    ) -> AnimationHandle {
        self.with(|s| s.spring_to(target, prop, goal, params))
            .unwrap_or_else(AnimationHandle::inert)
    }

    pub fn tween_to(
        &self,
        target: &SharedAnimatable,
        prop: &'static str,
        goal: PropValue,
        duration_secs: f32,
        easing: Easing,
    ) -> AnimationHandle {
        self.with(|s| s.tween_to(target, prop, goal, duration_secs, easing))
            .unwrap_or_else(AnimationHandle::inert)
    }

    /// Smoothed rate, or 0 when the scheduler is gone.
    pub fn smoothed_rate(&self) -> u32 {
        self.with(|s| s.smoothed_rate()).unwrap_or(0)
    }

    pub fn stats(&self) -> Option<SchedulerStats> {
        self.with(|s| s.stats())
    }
}

/// Wrap `callback` so it only runs while the scheduler's smoothed rate
/// is at or above `min_rate`. Widgets wrap cosmetic per-frame work in
/// this so it drops out first when the host is struggling.
pub fn fps_throttle<F>(handle: SchedulerHandle, min_rate: u32, mut callback: F) -> impl FnMut()
where
    F: FnMut(),
{
    move || {
        if handle.smoothed_rate() >= min_rate {
            callback();
        }
    }
}
