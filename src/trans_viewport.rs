//! Scene viewport.
//!
//! The rectangle a refit leaves behind: where the rendering surface sits
//! and which part of scene space it shows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounding_rect::Bounds;
use crate::trans_affine::TransAffine;

// ============================================================================
// Viewport
// ============================================================================

/// Surface position and extent in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Viewport covering `bounds`; the zero viewport when there are none.
    pub fn from_bounds(bounds: Option<Bounds>) -> Self {
        match bounds {
            Some(b) => Self::new(b.left, b.top, b.right - b.left, b.bottom - b.top),
            None => Self::default(),
        }
    }

    /// The `viewBox` attribute value: `"left top width height"`.
    pub fn view_box(&self) -> String {
        self.to_string()
    }

    /// Matrix from scene space to surface-local space: the surface is
    /// placed at `(left, top)`, so local coordinates start at its corner.
    pub fn to_affine(&self) -> TransAffine {
        TransAffine::new_translation(-self.left, -self.top)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.width, self.height)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds() {
        let vp = Viewport::from_bounds(Some(Bounds::new(-10.0, 5.0, 90.0, 45.0)));
        assert_eq!(vp, Viewport::new(-10.0, 5.0, 100.0, 40.0));
        assert_eq!(Viewport::from_bounds(None), Viewport::default());
    }

    #[test]
    fn test_view_box_text() {
        let vp = Viewport::new(-10.0, 5.0, 100.0, 40.5);
        assert_eq!(vp.view_box(), "-10 5 100 40.5");
    }

    #[test]
    fn test_to_affine_moves_corner_to_origin() {
        let vp = Viewport::new(20.0, 30.0, 100.0, 100.0);
        let (x, y) = vp.to_affine().transform(20.0, 30.0);
        assert_eq!((x, y), (0.0, 0.0));
    }
}
