//! Spring integrator benchmarks
//!
//! Exercises the scheduler through its public surface the way the host
//! render loop does: many live springs advanced per tick, and the
//! cancel-and-replace path for retargeting.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lucent_animation::{AnimationScheduler, PropValue, SpringParams};
use lucent_core::{Color, Dim2, SessionFlag};
use std::sync::{Arc, Mutex};

struct Panel {
    opacity: f32,
    size: Dim2,
    tint: Color,
}

impl lucent_animation::Animatable for Panel {
    fn get(&self, prop: &str) -> Option<PropValue> {
        match prop {
            "opacity" => Some(PropValue::Scalar(self.opacity)),
            "size" => Some(PropValue::Dim2(self.size)),
            "tint" => Some(PropValue::Color(self.tint)),
            _ => None,
        }
    }

    fn set(&mut self, prop: &str, value: PropValue) {
        match (prop, value) {
            ("opacity", PropValue::Scalar(v)) => self.opacity = v,
            ("size", PropValue::Dim2(v)) => self.size = v,
            ("tint", PropValue::Color(v)) => self.tint = v,
            _ => {}
        }
    }
}

fn panel() -> lucent_animation::SharedAnimatable {
    Arc::new(Mutex::new(Panel {
        opacity: 0.0,
        size: Dim2::default(),
        tint: Color::BLACK,
    }))
}

type Rig = (AnimationScheduler, Vec<lucent_animation::SharedAnimatable>);

fn rig_with_springs(count: usize) -> Rig {
    let mut scheduler = AnimationScheduler::new(SessionFlag::new());
    let targets: Vec<_> = (0..count).map(|_| panel()).collect();
    for target in &targets {
        scheduler.spring_to(
            target,
            "opacity",
            PropValue::Scalar(1.0),
            SpringParams::wobbly(),
        );
        scheduler.spring_to(
            target,
            "size",
            PropValue::Dim2(Dim2::new(1.0, 40.0, 1.0, 40.0)),
            SpringParams::wobbly(),
        );
        scheduler.spring_to(
            target,
            "tint",
            PropValue::Color(Color::WHITE),
            SpringParams::wobbly(),
        );
    }
    (scheduler, targets)
}

fn bench_many_springs(c: &mut Criterion) {
    c.bench_function("tick_64_panels_3_springs_each", |b| {
        b.iter_batched(
            || rig_with_springs(64),
            |(mut scheduler, targets)| {
                for _ in 0..8 {
                    scheduler.advance(1.0 / 120.0);
                }
                black_box((scheduler, targets))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_retarget(c: &mut Criterion) {
    let mut scheduler = AnimationScheduler::new(SessionFlag::new());
    let target = panel();
    let mut flip = false;

    c.bench_function("retarget_and_step_one_spring", |b| {
        b.iter(|| {
            flip = !flip;
            let goal = if flip { 100.0 } else { 0.0 };
            let handle = scheduler.spring_to(
                &target,
                "opacity",
                PropValue::Scalar(goal),
                SpringParams::default(),
            );
            scheduler.advance(1.0 / 120.0);
            black_box(handle)
        });
    });
}

criterion_group!(benches, bench_many_springs, bench_retarget);
criterion_main!(benches);
