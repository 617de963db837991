//! Lucent Core Primitives
//!
//! This crate provides the foundational primitives for the Lucent UI toolkit:
//!
//! - **Value Types**: [`Color`], [`Dim`]/[`Dim2`] placement composites, [`Vec2`]
//! - **Session Liveness**: the per-session teardown flag every tick checks first
//! - **Event Bus**: topic-keyed listener fan-out with failure eviction
//! - **Cleanup Registry**: LIFO deferred teardown that also runs on drop
//! - **Session Store**: serde-typed key-value storage with JSON snapshots
//!
//! # Example
//!
//! ```rust
//! use lucent_core::{Color, SessionFlag};
//!
//! let session = SessionFlag::new();
//! assert!(session.is_alive());
//!
//! let accent = Color::from_hsv(0.0, 1.0, 1.0);
//! assert_eq!(accent.to_rgb8(), (255, 0, 0));
//!
//! // Script teardown flips the flag exactly once; per-frame work
//! // everywhere checks it before touching anything.
//! session.invalidate();
//! assert!(!session.is_alive());
//! ```

pub mod bus;
pub mod cleanup;
pub mod color;
pub mod geometry;
pub mod session;
pub mod store;

pub use bus::{EventBus, SubscriberId, Subscription};
pub use cleanup::{CleanupId, CleanupRegistry};
pub use color::Color;
pub use geometry::{Dim, Dim2, Vec2};
pub use session::SessionFlag;
pub use store::{Store, StoreError};
