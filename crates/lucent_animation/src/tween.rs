//! Fixed-duration eased transitions
//!
//! The time-based counterpart to the spring set, and its graceful
//! degradation path: progress runs `elapsed / duration` through an
//! easing curve, lerping from the captured start to the goal. Tweens
//! share the spring set's `(target, property)` keying, so a property is
//! only ever driven by one animation at a time.

use crate::easing::Easing;
use crate::handle::{AnimFlags, AnimationHandle};
use crate::spring::RetireCounts;
use crate::target::WeakAnimatable;
use crate::value::PropValue;
use std::sync::{Arc, Weak};

/// Duration used when a spring request degrades to a tween.
pub const FALLBACK_TWEEN_SECS: f32 = 0.3;

struct TweenEntry {
    target: WeakAnimatable,
    prop: &'static str,
    from: PropValue,
    goal: PropValue,
    elapsed: f32,
    duration: f32,
    easing: Easing,
    flags: Arc<AnimFlags>,
}

/// The active tweens, keyed like springs.
#[derive(Default)]
pub struct TweenSet {
    entries: Vec<TweenEntry>,
}

impl TweenSet {
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

    /// Remove any tween on `(target, prop)`, retiring its handle.
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

    /// Install a tween from `from` toward `goal`. Non-positive
    /// durations complete on the first tick.
    pub(crate) fn install(
        &mut self,
        target: WeakAnimatable,
        prop: &'static str,
        from: PropValue,
        goal: PropValue,
        duration_secs: f32,
        easing: Easing,
    ) -> AnimationHandle {
        let flags = Arc::new(AnimFlags::default());
        self.entries.push(TweenEntry {
            target,
            prop,
            from,
            goal,
            elapsed: 0.0,
            duration: duration_secs,
            easing,
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

    /// Advance every tween, writing eased values and finishing those
    /// that reached their goal, in one compacting pass.
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
            entry.elapsed += dt;
            let t = if entry.duration > 0.0 {
                (entry.elapsed / entry.duration).min(1.0)
            } else {
                1.0
            };
            if t >= 1.0 {
                target.set(entry.prop, entry.goal);
                entry.flags.finish();
                counts.completed += 1;
                false
            } else {
                let eased = entry.easing.apply(t);
                target.set(entry.prop, PropValue::lerp(entry.from, entry.goal, eased));
                true
            }
        });
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{Animatable, SharedAnimatable};
    use lucent_core::Vec2;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Marker {
        anchor: Vec2,
    }

    impl Animatable for Marker {
        fn get(&self, prop: &str) -> Option<PropValue> {
            match prop {
                "anchor" => Some(PropValue::Vec2(self.anchor)),
                _ => None,
            }
        }

        fn set(&mut self, prop: &str, value: PropValue) {
            if let ("anchor", PropValue::Vec2(v)) = (prop, value) {
                self.anchor = v;
            }
        }
    }

    fn marker() -> (Arc<Mutex<Marker>>, SharedAnimatable) {
        let concrete = Arc::new(Mutex::new(Marker::default()));
        let shared: SharedAnimatable = concrete.clone();
        (concrete, shared)
    }

    #[test]
    fn test_tween_finishes_exactly_on_goal() {
        let (concrete, shared) = marker();
        let mut tweens = TweenSet::new();
        let handle = tweens.install(
            Arc::downgrade(&shared),
            "anchor",
            PropValue::Vec2(Vec2::new(0.0, 0.0)),
            PropValue::Vec2(Vec2::new(1.0, -2.0)),
            0.3,
            Easing::default(),
        );

        // 20 ticks of 1/60 = 1/3s > 0.3s.
        let mut completed = 0;
        for _ in 0..20 {
            completed += tweens.tick(1.0 / 60.0).completed;
        }

        assert_eq!(completed, 1);
        assert!(tweens.is_empty());
        assert!(!handle.is_active());
        assert_eq!(concrete.lock().unwrap().anchor, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_tween_progress_is_monotone_toward_goal() {
        let (concrete, shared) = marker();
        let mut tweens = TweenSet::new();
        tweens.install(
            Arc::downgrade(&shared),
            "anchor",
            PropValue::Vec2(Vec2::new(0.0, 0.0)),
            PropValue::Vec2(Vec2::new(10.0, 0.0)),
            0.5,
            Easing::Linear,
        );

        let mut prev = 0.0f32;
        for _ in 0..10 {
            tweens.tick(0.02);
            let x = concrete.lock().unwrap().anchor.x;
            assert!(x >= prev);
            prev = x;
        }
        // 10 ticks of 0.02 into a 0.5s linear tween is 40%.
        assert!((prev - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_completes_first_tick() {
        let (concrete, shared) = marker();
        let mut tweens = TweenSet::new();
        tweens.install(
            Arc::downgrade(&shared),
            "anchor",
            PropValue::Vec2(Vec2::new(0.0, 0.0)),
            PropValue::Vec2(Vec2::new(5.0, 5.0)),
            0.0,
            Easing::default(),
        );

        let counts = tweens.tick(1.0 / 60.0);
        assert_eq!(counts.completed, 1);
        assert_eq!(concrete.lock().unwrap().anchor, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_dead_target_retires_tween() {
        let mut tweens = TweenSet::new();
        {
            let (concrete, shared) = marker();
            tweens.install(
                Arc::downgrade(&shared),
                "anchor",
                PropValue::Vec2(Vec2::new(0.0, 0.0)),
                PropValue::Vec2(Vec2::new(1.0, 1.0)),
                1.0,
                Easing::default(),
            );
            drop(concrete);
            drop(shared);
        }

        let counts = tweens.tick(1.0 / 60.0);
        assert_eq!(counts.evicted, 1);
        assert!(tweens.is_empty());
    }
}
