//! Rectangle outline generators.
//!
//! Both outlines are expressed purely through [`PathSink`] moves, lines and
//! quadratic curves. A rounded corner is a single quadratic whose control
//! point is the sharp corner itself, which is close to, but not exactly, a
//! quarter ellipse.

use crate::basics::PathSink;

/// Plain rectangle outline: move to the origin corner, four lines back
/// around to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectOutline {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectOutline {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn emit<S: PathSink>(&self, sink: &mut S) {
        let Self {
            x,
            y,
            width: w,
            height: h,
        } = *self;
        sink.move_to(x, y);
        sink.line_to(x + w, y);
        sink.line_to(x + w, y + h);
        sink.line_to(x, y + h);
        sink.line_to(x, y);
    }
}

/// Rectangle with uniformly rounded corners.
///
/// `ellipse_width` and `ellipse_height` are the horizontal and vertical
/// corner insets. The outline starts on the left edge, runs down, and
/// goes around counter-clockwise in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub ellipse_width: f64,
    pub ellipse_height: f64,
}

impl RoundedRect {
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        ellipse_width: f64,
        ellipse_height: f64,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ellipse_width,
            ellipse_height,
        }
    }

    pub fn emit<S: PathSink>(&self, sink: &mut S) {
        let Self {
            x,
            y,
            width: w,
            height: h,
            ellipse_width: ew,
            ellipse_height: eh,
        } = *self;
        sink.move_to(x, y + eh);
        sink.line_to(x, y + h - eh);
        sink.quadratic_curve_to(x, y + h, x + ew, y + h);
        sink.line_to(x + w - ew, y + h);
        sink.quadratic_curve_to(x + w, y + h, x + w, y + h - eh);
        sink.line_to(x + w, y + eh);
        sink.quadratic_curve_to(x + w, y, x + w - ew, y);
        sink.line_to(x + ew, y);
        sink.quadratic_curve_to(x, y, x, y + eh);
    }
}
