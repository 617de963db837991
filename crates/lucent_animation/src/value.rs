//! Animated value vocabulary
//!
//! Every animatable property reads and writes as a [`PropValue`]. The
//! spring engine treats springable shapes as N independent scalar
//! lanes; that decomposition lives here, once, so no shape ever grows
//! its own integration loop.

use lucent_core::{Color, Dim2, Vec2};
use smallvec::SmallVec;

/// Lane buffer. No springable shape has more than four lanes, so this
/// never leaves the stack.
pub type Lanes = SmallVec<[f32; 4]>;

/// A property value in one of the toolkit's animatable shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropValue {
    /// A plain number (transparency, rotation, corner radius...).
    Scalar(f32),
    /// Two-axis placement composite: four lanes.
    Dim2(Dim2),
    /// An rgb color: three lanes.
    Color(Color),
    /// A plain 2-vector (anchor points). Lerp-able but not
    /// spring-integrated; spring requests on one degrade to a tween.
    Vec2(Vec2),
}

/// Shape discriminant, used for keying and lane recomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Dim2,
    Color,
    Vec2,
}

impl PropValue {
    pub fn shape(&self) -> Shape {
        match self {
            PropValue::Scalar(_) => Shape::Scalar,
            PropValue::Dim2(_) => Shape::Dim2,
            PropValue::Color(_) => Shape::Color,
            PropValue::Vec2(_) => Shape::Vec2,
        }
    }

    /// Whether the spring integrator covers this shape.
    pub fn springable(&self) -> bool {
        !matches!(self, PropValue::Vec2(_))
    }

    /// Decompose into independent scalar lanes. Lane order is fixed per
    /// shape: `Dim2` is `[x.scale, x.offset, y.scale, y.offset]`,
    /// `Color` is `[r, g, b]`.
    pub fn lanes(&self) -> Lanes {
        match *self {
            PropValue::Scalar(v) => SmallVec::from_slice(&[v]),
            PropValue::Dim2(d) => {
                SmallVec::from_slice(&[d.x.scale, d.x.offset, d.y.scale, d.y.offset])
            }
            PropValue::Color(c) => SmallVec::from_slice(&[c.r, c.g, c.b]),
            PropValue::Vec2(v) => SmallVec::from_slice(&[v.x, v.y]),
        }
    }

    /// Recompose a value of `shape` from its lanes. `lanes` must have
    /// the lane count [`lanes`](Self::lanes) produces for that shape.
    pub fn from_lanes(shape: Shape, lanes: &[f32]) -> PropValue {
        match shape {
            Shape::Scalar => PropValue::Scalar(lanes[0]),
            Shape::Dim2 => PropValue::Dim2(Dim2::new(lanes[0], lanes[1], lanes[2], lanes[3])),
            Shape::Color => PropValue::Color(Color::new(lanes[0], lanes[1], lanes[2])),
            Shape::Vec2 => PropValue::Vec2(Vec2::new(lanes[0], lanes[1])),
        }
    }

    /// Linear interpolation between two values of the same shape. The
    /// engines never build a mismatched pair; if one shows up anyway,
    /// the result is `to`.
    pub fn lerp(from: PropValue, to: PropValue, t: f32) -> PropValue {
        match (from, to) {
            (PropValue::Scalar(a), PropValue::Scalar(b)) => PropValue::Scalar(a + (b - a) * t),
            (PropValue::Dim2(a), PropValue::Dim2(b)) => PropValue::Dim2(Dim2::lerp(a, b, t)),
            (PropValue::Color(a), PropValue::Color(b)) => PropValue::Color(Color::lerp(a, b, t)),
            (PropValue::Vec2(a), PropValue::Vec2(b)) => PropValue::Vec2(Vec2::lerp(a, b, t)),
            (_, to) => to,
        }
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        PropValue::Scalar(v)
    }
}

impl From<Dim2> for PropValue {
    fn from(v: Dim2) -> Self {
        PropValue::Dim2(v)
    }
}

impl From<Color> for PropValue {
    fn from(v: Color) -> Self {
        PropValue::Color(v)
    }
}

impl From<Vec2> for PropValue {
    fn from(v: Vec2) -> Self {
        PropValue::Vec2(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_round_trip_per_shape() {
        let values = [
            PropValue::Scalar(3.5),
            PropValue::Dim2(Dim2::new(0.5, 10.0, 1.0, -20.0)),
            PropValue::Color(Color::new(0.1, 0.2, 0.3)),
            PropValue::Vec2(Vec2::new(4.0, -7.0)),
        ];
        for value in values {
            let lanes = value.lanes();
            assert_eq!(PropValue::from_lanes(value.shape(), &lanes), value);
        }
    }

    #[test]
    fn test_lane_counts() {
        assert_eq!(PropValue::Scalar(0.0).lanes().len(), 1);
        assert_eq!(PropValue::Dim2(Dim2::default()).lanes().len(), 4);
        assert_eq!(PropValue::Color(Color::BLACK).lanes().len(), 3);
        assert_eq!(PropValue::Vec2(Vec2::default()).lanes().len(), 2);
    }

    #[test]
    fn test_only_vec2_is_unspringable() {
        assert!(PropValue::Scalar(1.0).springable());
        assert!(PropValue::Dim2(Dim2::default()).springable());
        assert!(PropValue::Color(Color::WHITE).springable());
        assert!(!PropValue::Vec2(Vec2::default()).springable());
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = PropValue::Scalar(0.0);
        let to = PropValue::Scalar(10.0);
        assert_eq!(PropValue::lerp(from, to, 0.5), PropValue::Scalar(5.0));
    }
}
