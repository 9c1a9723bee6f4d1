//! Affine transformation matrix.
//!
//! Folds a shape's transform list into one matrix for adapters that draw
//! through a matrix (canvas, raster) rather than an SVG `transform`
//! attribute.

use serde::{Deserialize, Serialize};

use crate::basics::deg2rad;

/// Epsilon for affine matrix comparisons.
pub const AFFINE_EPSILON: f64 = 1e-12;

/// 2D affine transformation matrix.
///
/// Stores six components: `[sx, shy, shx, sy, tx, ty]` representing the
/// matrix:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Transform: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`. The SVG
/// `matrix(a, b, c, d, e, f)` maps to `sx = a, shy = b, shx = c, sy = d,
/// tx = e, ty = f`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub fn new() -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Custom matrix from six components.
    pub fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    /// Translation matrix.
    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Non-uniform scaling matrix.
    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Rotation by `deg` degrees about the origin.
    pub fn new_rotation_deg(deg: f64) -> Self {
        let (sa, ca) = deg2rad(deg).sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    /// Rotation by `deg` degrees about `(cx, cy)`.
    pub fn new_rotation_about(deg: f64, cx: f64, cy: f64) -> Self {
        let mut m = Self::new_translation(-cx, -cy);
        m.multiply(&Self::new_rotation_deg(deg));
        m.multiply(&Self::new_translation(cx, cy));
        m
    }

    /// Horizontal shear by `deg` degrees.
    pub fn new_skew_x_deg(deg: f64) -> Self {
        Self::new_custom(1.0, 0.0, deg2rad(deg).tan(), 1.0, 0.0, 0.0)
    }

    /// Vertical shear by `deg` degrees.
    pub fn new_skew_y_deg(deg: f64) -> Self {
        Self::new_custom(1.0, deg2rad(deg).tan(), 0.0, 1.0, 0.0, 0.0)
    }

    // ====================================================================
    // Operations (mutate self)
    // ====================================================================

    /// Post-multiply: `self = self * m`, i.e. apply `self` first, then `m`.
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        let t0 = self.sx * m.sx + self.shy * m.shx;
        let t2 = self.shx * m.sx + self.sy * m.shx;
        let t4 = self.tx * m.sx + self.ty * m.shx + m.tx;
        self.shy = self.sx * m.shy + self.shy * m.sy;
        self.sy = self.shx * m.shy + self.sy * m.sy;
        self.ty = self.tx * m.shy + self.ty * m.sy + m.ty;
        self.sx = t0;
        self.shx = t2;
        self.tx = t4;
        self
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    /// Forward transform of a point.
    #[inline]
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.sx + y * self.shx + self.tx,
            x * self.shy + y * self.sy + self.ty,
        )
    }

    /// The SVG `matrix(a, b, c, d, e, f)` argument order.
    pub fn to_svg_matrix(&self) -> [f64; 6] {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
    }

    /// Check if two matrices are equal within `epsilon`.
    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        self.to_svg_matrix()
            .iter()
            .zip(m.to_svg_matrix().iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

// ============================================================================
// Tests
// ============================================================================
