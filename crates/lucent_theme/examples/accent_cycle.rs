//! Accent Cycle Demo
//!
//! Run with:
//! `cargo run -p lucent_theme --example accent_cycle`
//!
//! Drives the theme engine from a plain frame loop and prints every
//! accent change the epsilon gate lets through.

use lucent_animation::AnimationScheduler;
use lucent_core::{Color, SessionFlag};
use lucent_theme::{ThemeEngine, ThemeMode};
use std::thread;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let session = SessionFlag::new();
    let mut scheduler = AnimationScheduler::new(session.clone());

    let engine = ThemeEngine::new(Color::from_rgb8(85, 170, 255));
    engine.attach(&mut scheduler);

    engine.on_accent_change(|color| {
        let (r, g, b) = color.to_rgb8();
        println!("accent -> #{r:02x}{g:02x}{b:02x}");
    });

    println!("two-color ping-pong for ~2s");
    engine.set_mode(ThemeMode::Dual(
        Color::from_rgb8(255, 99, 71),
        Color::from_rgb8(64, 224, 208),
    ));
    for _ in 0..120 {
        thread::sleep(Duration::from_millis(16));
        scheduler.tick();
    }

    println!("rainbow for ~2s");
    engine.set_mode(ThemeMode::Rainbow);
    for _ in 0..120 {
        thread::sleep(Duration::from_millis(16));
        scheduler.tick();
    }

    engine.set_mode(ThemeMode::Off);
    session.invalidate();
    scheduler.tick();
    println!("session closed; final accent held at {:?}", engine.accent());
}
