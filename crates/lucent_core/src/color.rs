//! Color value type
//!
//! Colors are rgb triples with `f32` channels in `[0, 1]`. There is no
//! alpha channel here: in the host widget model transparency is a
//! separate scalar property and animates as its own lane.

use serde::{Deserialize, Serialize};

/// An rgb color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::new(r, g, b)
    }

    /// Create from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit channels, clamping out-of-range values.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (quantize(self.r), quantize(self.g), quantize(self.b))
    }

    /// Convert from HSV. `h` is a hue fraction (1.0 = one full
    /// revolution) and wraps; `s` and `v` are in `[0, 1]`.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h_deg = h.rem_euclid(1.0) * 360.0;
        let c = v * s;
        let x = c * (1.0 - ((h_deg / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h_deg {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new(r + m, g + m, b + m)
    }

    /// Linear interpolation between two colors.
    pub fn lerp(from: Color, to: Color, t: f32) -> Color {
        Color::new(
            from.r + (to.r - from.r) * t,
            from.g + (to.g - from.g) * t,
            from.b + (to.b - from.b) * t,
        )
    }

    /// Squared channel-space distance. Cheap, and monotone with
    /// perceived change at the small scales the accent gate cares
    /// about.
    pub fn distance_sq(self, other: Color) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0).to_rgb8(), (255, 0, 0));
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0).to_rgb8(), (0, 255, 0));
        assert_eq!(Color::from_hsv(2.0 / 3.0, 1.0, 1.0).to_rgb8(), (0, 0, 255));
    }

    #[test]
    fn test_from_hsv_secondaries() {
        assert_eq!(Color::from_hsv(1.0 / 6.0, 1.0, 1.0).to_rgb8(), (255, 255, 0));
        assert_eq!(Color::from_hsv(0.5, 1.0, 1.0).to_rgb8(), (0, 255, 255));
        assert_eq!(Color::from_hsv(5.0 / 6.0, 1.0, 1.0).to_rgb8(), (255, 0, 255));
    }

    #[test]
    fn test_from_hsv_hue_wraps() {
        let base = Color::from_hsv(0.25, 1.0, 1.0);
        let wrapped = Color::from_hsv(1.25, 1.0, 1.0);
        assert!(base.distance_sq(wrapped) < 1e-10);
    }

    #[test]
    fn test_from_hsv_zero_saturation_is_gray() {
        let gray = Color::from_hsv(0.7, 0.0, 0.5);
        assert_eq!(gray.r, 0.5);
        assert_eq!(gray.g, 0.5);
        assert_eq!(gray.b, 0.5);
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xFF8000);
        assert_eq!(c.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Color::new(0.0, 0.2, 1.0);
        let b = Color::new(1.0, 0.8, 0.0);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
        let mid = Color::lerp(a, b, 0.5);
        assert_eq!(mid, Color::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_distance_sq() {
        let a = Color::new(0.0, 0.0, 0.0);
        let b = Color::new(0.3, 0.0, 0.4);
        assert!((a.distance_sq(b) - 0.25).abs() < 1e-6);
        assert_eq!(a.distance_sq(b), b.distance_sq(a));
        assert_eq!(a.distance_sq(a), 0.0);
    }
}
