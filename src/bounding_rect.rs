//! Bounding rectangle tracking.
//!
//! [`BoundsTracker`] is the running min/max rectangle fed one point at a
//! time by the path builder, and one box at a time by the scene when it
//! refits its viewport. [`Bounds`] is the plain rectangle value handed to
//! callers.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the coordinate space of the points that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// `max(right - left, 0)`.
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// `max(bottom - top, 0)`.
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Grow every edge outward by `amount`.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Shift the rectangle by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Compute the union of two rectangles.
    pub fn union(&self, other: &Bounds) -> Self {
        let mut r = *self;
        if other.left < r.left {
            r.left = other.left;
        }
        if other.top < r.top {
            r.top = other.top;
        }
        if other.right > r.right {
            r.right = other.right;
        }
        if other.bottom > r.bottom {
            r.bottom = other.bottom;
        }
        r
    }
}

/// Running bounding box updated by point insertion.
///
/// Starts empty. The first tracked point initialises all four edges; every
/// later point only widens them. The box never shrinks until [`reset`]
/// is called.
///
/// A NaN edge stays NaN; later finite points do not replace it.
///
/// [`reset`]: BoundsTracker::reset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsTracker {
    rect: Option<Bounds>,
}

impl BoundsTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self { rect: None }
    }

    /// Create a tracker already covering `bounds`.
    pub fn from_bounds(bounds: Bounds) -> Self {
        Self { rect: Some(bounds) }
    }

    /// Widen the box so it contains `(x, y)`.
    pub fn track_point(&mut self, x: f64, y: f64) {
        match self.rect.as_mut() {
            None => self.rect = Some(Bounds::new(x, y, x, y)),
            Some(r) => {
                if x < r.left {
                    r.left = x;
                }
                if x > r.right {
                    r.right = x;
                }
                if y < r.top {
                    r.top = y;
                }
                if y > r.bottom {
                    r.bottom = y;
                }
            }
        }
    }

    /// Widen the box so it contains the whole of `bounds`.
    pub fn track_bounds(&mut self, bounds: &Bounds) {
        self.rect = Some(match self.rect {
            None => *bounds,
            Some(r) => r.union(bounds),
        });
    }

    /// Return to the empty state.
    pub fn reset(&mut self) {
        self.rect = None;
    }

    /// `true` until the first point is tracked.
    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// The tracked box, or `None` while empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.rect
    }

    /// Left edge (0 while empty).
    pub fn left(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.left)
    }

    /// Top edge (0 while empty).
    pub fn top(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.top)
    }

    /// Right edge (0 while empty).
    pub fn right(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.right)
    }

    /// Bottom edge (0 while empty).
    pub fn bottom(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.bottom)
    }

    pub fn width(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.width())
    }

    pub fn height(&self) -> f64 {
        self.rect.map_or(0.0, |r| r.height())
    }
}
