//! Foundation helpers shared by every other module.
//!
//! Rounding used for serialized path coordinates, angle conversion, the
//! fixed-precision truncation applied to rotation factors, the `PointD`
//! value type, and the [`PathSink`] drawing interface.

use serde::{Deserialize, Serialize};

// ============================================================================
// Rounding and precision
// ============================================================================

/// Round to the nearest integer, halves toward positive infinity.
///
/// `2.5` becomes `3.0` and `-2.5` becomes `-2.0`. Stored path coordinates
/// are rounded this way so the serialized path stays compact.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round `v` to eight decimal places.
///
/// Applied to the sine and cosine of a shape's rotation so that angles such
/// as 90 degrees produce exact `0.0` / `1.0` factors.
#[inline]
pub fn to_fixed8(v: f64) -> f64 {
    const SCALE: f64 = 1e8;
    (v * SCALE).round() / SCALE
}

// ============================================================================
// Mathematical constants
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg / 180.0 * PI
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// PathSink trait
// ============================================================================

/// Receiver of drawing commands.
///
/// Outline generators (rectangles, rounded rectangles) are written against
/// this trait rather than a concrete builder, so they can feed a
/// [`PathBuilder`](crate::path_builder::PathBuilder) or any recorder.
pub trait PathSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    #[allow(clippy::too_many_arguments)]
    fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
}

/// Blanket implementation so `&mut T` can be handed to outline generators.
impl<T: PathSink> PathSink for &mut T {
    fn move_to(&mut self, x: f64, y: f64) {
        (*self).move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        (*self).line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        (*self).quadratic_curve_to(cpx, cpy, x, y);
    }

    fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        (*self).curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }
}

// ============================================================================
// Tests
// ============================================================================
