//! Placement primitives
//!
//! `Dim` is the relative-plus-absolute extent widgets are placed with:
//! a fraction of the parent axis plus a pixel offset. `Dim2` pairs one
//! per axis; the spring engine decomposes it into four scalar lanes.
//! `Vec2` is a plain 2-vector (anchor points, pivots).

use serde::{Deserialize, Serialize};

/// One-axis extent: `scale` of the parent plus `offset` pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dim {
    pub scale: f32,
    pub offset: f32,
}

impl Dim {
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// Pixels only.
    pub const fn px(offset: f32) -> Self {
        Self::new(0.0, offset)
    }

    /// Fraction of the parent only.
    pub const fn fraction(scale: f32) -> Self {
        Self::new(scale, 0.0)
    }

    pub fn lerp(from: Dim, to: Dim, t: f32) -> Dim {
        Dim::new(
            from.scale + (to.scale - from.scale) * t,
            from.offset + (to.offset - from.offset) * t,
        )
    }
}

/// Two-axis extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dim2 {
    pub x: Dim,
    pub y: Dim,
}

impl Dim2 {
    pub const fn new(x_scale: f32, x_offset: f32, y_scale: f32, y_offset: f32) -> Self {
        Self {
            x: Dim::new(x_scale, x_offset),
            y: Dim::new(y_scale, y_offset),
        }
    }

    pub const fn from_dims(x: Dim, y: Dim) -> Self {
        Self { x, y }
    }

    pub fn lerp(from: Dim2, to: Dim2, t: f32) -> Dim2 {
        Dim2 {
            x: Dim::lerp(from.x, to.x, t),
            y: Dim::lerp(from.y, to.y, t),
        }
    }
}

/// A plain 2-vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim2_lerp_midpoint() {
        let from = Dim2::new(0.0, 0.0, 0.0, 0.0);
        let to = Dim2::new(1.0, 100.0, 0.5, -40.0);
        let mid = Dim2::lerp(from, to, 0.5);
        assert_eq!(mid, Dim2::new(0.5, 50.0, 0.25, -20.0));
    }

    #[test]
    fn test_dim_constructors() {
        assert_eq!(Dim::px(12.0), Dim::new(0.0, 12.0));
        assert_eq!(Dim::fraction(0.5), Dim::new(0.5, 0.0));
    }

    #[test]
    fn test_vec2_lerp_endpoints() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-3.0, 8.0);
        assert_eq!(Vec2::lerp(a, b, 0.0), a);
        assert_eq!(Vec2::lerp(a, b, 1.0), b);
    }
}
