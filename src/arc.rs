//! Wedge tessellation.
//!
//! Approximates a circular or elliptical sweep with quadratic Bezier
//! pieces of at most 45 degrees each and closes it into a pie slice:
//! move to the centre, line to the start of the arc, the quadratic run,
//! then a line back to the centre.
//!
//! Each quadratic's control point sits on the bisector of its sub-sweep at
//! `radius / cos(half_angle)`, which makes the curve touch the true arc at
//! its midpoint.

use crate::basics::{deg2rad, round_half_up, PointD};
use crate::bounding_rect::Bounds;
use crate::path_storage::{Segment, SegmentKind};

/// Largest sweep, in degrees, covered by a single quadratic piece.
pub const MAX_SEGMENT_SWEEP: f64 = 45.0;

/// Parameters of a pie slice.
///
/// Angles are in degrees. A negative `sweep` draws clockwise. `y_radius`
/// defaults to `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeParams {
    pub x: f64,
    pub y: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub radius: f64,
    pub y_radius: Option<f64>,
}

impl WedgeParams {
    pub fn new(x: f64, y: f64, start_angle: f64, sweep: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            start_angle,
            sweep,
            radius,
            y_radius: None,
        }
    }

    /// Use a distinct vertical radius (elliptical wedge).
    pub fn with_y_radius(mut self, y_radius: f64) -> Self {
        self.y_radius = Some(y_radius);
        self
    }

    pub fn effective_y_radius(&self) -> f64 {
        self.y_radius.unwrap_or(self.radius)
    }

    /// The full ellipse extent, regardless of sweep.
    pub fn extent(&self) -> Bounds {
        let ry = self.effective_y_radius();
        Bounds::new(
            self.x - self.radius,
            self.y - ry,
            self.x + self.radius,
            self.y + ry,
        )
    }
}

/// Any sweep larger than a full turn, in either direction, becomes a
/// positive full turn.
fn limit_sweep(sweep: f64) -> f64 {
    if sweep.abs() > 360.0 {
        360.0
    } else {
        sweep
    }
}

/// Number of quadratic pieces needed for `sweep` degrees.
///
/// Zero and NaN sweeps need no pieces.
pub fn segment_count(sweep: f64) -> usize {
    (limit_sweep(sweep).abs() / MAX_SEGMENT_SWEEP).ceil() as usize
}

/// Output of [`tessellate_wedge`].
///
/// `start` and every curve point are already rounded to whole units;
/// `center` is kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    pub center: PointD,
    pub start: PointD,
    /// `(control, end)` pairs, one per quadratic piece.
    pub curves: Vec<(PointD, PointD)>,
}

impl Tessellation {
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Number of quadratic pieces.
    pub fn segment_count(&self) -> usize {
        self.curves.len()
    }

    /// Lay the wedge out as path segments: one move, one line, the
    /// quadratic run and the closing line. Empty for a degenerate sweep.
    pub fn to_segments(&self) -> Vec<Segment> {
        if self.is_empty() {
            return Vec::new();
        }
        let quads = self
            .curves
            .iter()
            .flat_map(|(c, e)| [c.x, c.y, e.x, e.y])
            .collect();
        vec![
            Segment::with_coords(SegmentKind::Move, vec![self.center.x, self.center.y]),
            Segment::with_coords(SegmentKind::Line, vec![self.start.x, self.start.y]),
            Segment::with_coords(SegmentKind::QuadCurve, quads),
            Segment::with_coords(SegmentKind::Line, vec![self.center.x, self.center.y]),
        ]
    }
}

/// Tessellate a wedge into quadratic pieces.
pub fn tessellate_wedge(params: &WedgeParams) -> Tessellation {
    let WedgeParams {
        x,
        y,
        start_angle,
        radius,
        ..
    } = *params;
    let y_radius = params.effective_y_radius();
    let sweep = limit_sweep(params.sweep);
    let segs = segment_count(sweep);

    let center = PointD::new(x, y);
    let start_rad = deg2rad(start_angle);
    let start = PointD::new(
        round_half_up(x + start_rad.cos() * radius),
        round_half_up(y + start_rad.sin() * y_radius),
    );

    if segs == 0 {
        return Tessellation {
            center,
            start,
            curves: Vec::new(),
        };
    }

    let theta = -deg2rad(sweep / segs as f64);
    let control_scale = 1.0 / (theta / 2.0).cos();
    let mut angle = start_rad;
    let mut curves = Vec::with_capacity(segs);
    for _ in 0..segs {
        angle += theta;
        let angle_mid = angle - theta / 2.0;
        let end = PointD::new(
            round_half_up(x + angle.cos() * radius),
            round_half_up(y + angle.sin() * y_radius),
        );
        let control = PointD::new(
            round_half_up(x + angle_mid.cos() * radius * control_scale),
            round_half_up(y + angle_mid.sin() * y_radius * control_scale),
        );
        curves.push((control, end));
    }

    Tessellation {
        center,
        start,
        curves,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        assert_eq!(segment_count(45.0), 1);
        assert_eq!(segment_count(46.0), 2);
        assert_eq!(segment_count(90.0), 2);
        assert_eq!(segment_count(-90.0), 2);
        assert_eq!(segment_count(360.0), 8);
        assert_eq!(segment_count(720.0), 8);
        assert_eq!(segment_count(0.0), 0);
        assert_eq!(segment_count(f64::NAN), 0);
    }

    #[test]
    fn test_quarter_wedge_has_two_pieces() {
        let t = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 90.0, 100.0));
        assert_eq!(t.segment_count(), 2);
    }

    #[test]
    fn test_eighth_wedge_has_one_piece() {
        let t = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 45.0, 100.0));
        assert_eq!(t.segment_count(), 1);
    }

    #[test]
    fn test_start_point_on_arc() {
        let t = tessellate_wedge(&WedgeParams::new(50.0, 50.0, 90.0, 45.0, 20.0));
        assert_eq!(t.start, PointD::new(50.0, 70.0));
        assert_eq!(t.center, PointD::new(50.0, 50.0));
    }

    #[test]
    fn test_positive_sweep_turns_toward_negative_angles() {
        // theta is negated: a positive sweep from 0 degrees ends at -90.
        let t = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 90.0, 100.0));
        let (_, end) = t.curves[1];
        assert_eq!(end, PointD::new(0.0, -100.0));
        let (_, mid) = t.curves[0];
        assert_eq!(mid, PointD::new(71.0, -71.0));
    }

    #[test]
    fn test_control_point_uses_secant_scaling() {
        let t = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 90.0, 100.0));
        let (control, _) = t.curves[0];
        // Bisector of 0..-45 is -22.5 degrees at radius 100 / cos(22.5).
        let r = 100.0 / deg2rad(22.5).cos();
        assert_eq!(control.x, round_half_up(deg2rad(-22.5).cos() * r));
        assert_eq!(control.y, round_half_up(deg2rad(-22.5).sin() * r));
    }

    #[test]
    fn test_elliptical_radius() {
        let t = tessellate_wedge(
            &WedgeParams::new(0.0, 0.0, 0.0, -90.0, 40.0).with_y_radius(10.0),
        );
        let (_, end) = t.curves[1];
        assert_eq!(end, PointD::new(0.0, 10.0));
    }

    #[test]
    fn test_full_circle_closes_on_start() {
        let t = tessellate_wedge(&WedgeParams::new(10.0, 10.0, 20.0, 360.0, 25.0));
        assert_eq!(t.segment_count(), 8);
        let (_, last) = *t.curves.last().unwrap();
        assert_eq!(last, t.start);
    }

    #[test]
    fn test_oversized_sweep_is_clamped() {
        let a = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 1000.0, 10.0));
        let b = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 360.0, 10.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_negative_sweep_turns_positive() {
        let a = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 30.0, -400.0, 10.0));
        let b = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 30.0, 360.0, 10.0));
        assert_eq!(a, b);
        assert_eq!(segment_count(-400.0), 8);
        // In range, the sign survives.
        let ccw = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 30.0, -360.0, 10.0));
        assert_ne!(ccw, b);
    }

    #[test]
    fn test_zero_sweep_is_empty() {
        let t = tessellate_wedge(&WedgeParams::new(0.0, 0.0, 0.0, 0.0, 10.0));
        assert!(t.is_empty());
        assert!(t.to_segments().is_empty());
    }

    #[test]
    fn test_to_segments_layout() {
        let t = tessellate_wedge(&WedgeParams::new(5.5, 5.5, 0.0, 90.0, 10.0));
        let segs = t.to_segments();
        let kinds: Vec<_> = segs.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Move,
                SegmentKind::Line,
                SegmentKind::QuadCurve,
                SegmentKind::Line
            ]
        );
        assert_eq!(segs[0].coords, vec![5.5, 5.5]);
        assert_eq!(segs[2].command_count(), 2);
        assert_eq!(segs[3].coords, vec![5.5, 5.5]);
    }

    #[test]
    fn test_extent_is_full_ellipse() {
        let p = WedgeParams::new(100.0, 50.0, 0.0, 10.0, 30.0).with_y_radius(20.0);
        assert_eq!(p.extent(), Bounds::new(70.0, 30.0, 130.0, 70.0));
    }
}
