//! Path builder: turns a stream of draw calls into a compact path
//! anchored to its own bounding box.
//!
//! Stored coordinates are rounded to whole units (cubic end points
//! excepted), while the bounding box is fed the exact inputs, so bounds
//! stay conservative with respect to the true geometry. [`PathBuilder::end`]
//! re-expresses every stored point relative to the box's top-left corner
//! and reports that corner separately as the translation needed to put the
//! path back where it was drawn.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arc::{tessellate_wedge, WedgeParams};
use crate::basics::{round_half_up, PathSink, PointD};
use crate::bounding_rect::{Bounds, BoundsTracker};
use crate::path_storage::{PathStorage, Segment, SegmentKind};
use crate::rounded_rect::{RectOutline, RoundedRect};

/// One finalized run of same-kind commands, in box-relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCommand {
    pub kind: SegmentKind,
    pub coords: Vec<f64>,
}

/// The renderer-facing form of a finished path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDescription {
    pub commands: Vec<PathCommand>,
    /// Top-left corner of the path's bounding box; translate by this to
    /// render at the original absolute position.
    pub offset: PointD,
    pub closed: bool,
}

impl PathDescription {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn fmt_num(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    // Print -0 as 0.
    let v = if v == 0.0 { 0.0 } else { v };
    write!(f, "{v}")
}

/// SVG path data. Move, line and quadratic runs separate values with
/// `", "`; cubic runs with a single space.
impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            let sep = match cmd.kind {
                SegmentKind::CubicCurve => " ",
                _ => ", ",
            };
            write!(f, " {}", cmd.kind.letter())?;
            for (i, v) in cmd.coords.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                fmt_num(f, *v)?;
            }
        }
        if self.closed && !self.commands.is_empty() {
            f.write_str("z")?;
        }
        Ok(())
    }
}

/// Accumulates draw calls into run-length encoded segments and tracks
/// their bounding box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathBuilder {
    storage: PathStorage,
    tracker: BoundsTracker,
}

impl PathBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            storage: PathStorage::new(),
            tracker: BoundsTracker::new(),
        }
    }

    // ---------------------------------------------------------------
    // Path construction
    // ---------------------------------------------------------------

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.storage
            .push(SegmentKind::Move, &[round_half_up(x), round_half_up(y)]);
        self.tracker.track_point(x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.storage
            .push(SegmentKind::Line, &[round_half_up(x), round_half_up(y)]);
        self.tracker.track_point(x, y);
    }

    /// Draw a polyline through `points`, all in one line run.
    pub fn line_to_points(&mut self, points: &[(f64, f64)]) {
        for &(x, y) in points {
            self.line_to(x, y);
        }
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.storage.push(
            SegmentKind::QuadCurve,
            &[
                round_half_up(cpx),
                round_half_up(cpy),
                round_half_up(x),
                round_half_up(y),
            ],
        );
        self.tracker.track_point(cpx, cpy);
        self.tracker.track_point(x, y);
    }

    /// Cubic Bezier. Control points are rounded; the end point is stored
    /// as given.
    #[allow(clippy::too_many_arguments)]
    pub fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.storage.push(
            SegmentKind::CubicCurve,
            &[
                round_half_up(cp1x),
                round_half_up(cp1y),
                round_half_up(cp2x),
                round_half_up(cp2y),
                x,
                y,
            ],
        );
        self.tracker.track_point(cp1x, cp1y);
        self.tracker.track_point(cp2x, cp2y);
        self.tracker.track_point(x, y);
    }

    pub fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        RectOutline::new(x, y, w, h).emit(self);
    }

    pub fn draw_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, ew: f64, eh: f64) {
        RoundedRect::new(x, y, w, h, ew, eh).emit(self);
    }

    /// Replace the whole path with a tessellated wedge.
    ///
    /// The bounding box grows by the full ellipse extent. A zero sweep
    /// leaves the path empty and the box untouched. Returns the number of
    /// quadratic pieces emitted.
    pub fn draw_wedge(&mut self, params: WedgeParams) -> usize {
        let tessellation = tessellate_wedge(&params);
        if tessellation.is_empty() {
            log::debug!(
                "degenerate wedge sweep {} at ({}, {}), path cleared",
                params.sweep,
                params.x,
                params.y
            );
            self.storage.clear();
            return 0;
        }
        self.storage.replace(tessellation.to_segments());
        let extent = params.extent();
        self.tracker.track_point(extent.left, extent.top);
        self.tracker.track_point(extent.right, extent.bottom);
        tessellation.segment_count()
    }

    /// Remove every segment and empty the bounding box.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.tracker.reset();
    }

    // ---------------------------------------------------------------
    // Finalization
    // ---------------------------------------------------------------

    /// Produce the box-relative path description.
    ///
    /// Does not change the builder, so repeated calls without drawing in
    /// between return identical descriptions.
    pub fn end(&self, closed: bool) -> PathDescription {
        let left = self.tracker.left();
        let top = self.tracker.top();
        let commands = self
            .storage
            .segments()
            .iter()
            .map(|seg| PathCommand {
                kind: seg.kind,
                coords: seg
                    .coords
                    .iter()
                    .enumerate()
                    .map(|(i, v)| if i % 2 == 0 { v - left } else { v - top })
                    .collect(),
            })
            .collect();
        PathDescription {
            commands,
            offset: PointD::new(left, top),
            closed,
        }
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn segments(&self) -> &[Segment] {
        self.storage.segments()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn tracker(&self) -> &BoundsTracker {
        &self.tracker
    }

    /// Tracked bounding box, `None` before anything was drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        self.tracker.bounds()
    }

    pub fn width(&self) -> f64 {
        self.tracker.width()
    }

    pub fn height(&self) -> f64 {
        self.tracker.height()
    }
}

impl PathSink for PathBuilder {
    fn move_to(&mut self, x: f64, y: f64) {
        PathBuilder::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        PathBuilder::line_to(self, x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        PathBuilder::quadratic_curve_to(self, cpx, cpy, x, y);
    }

    fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        PathBuilder::curve_to(self, cp1x, cp1y, cp2x, cp2y, x, y);
    }
}

// ============================================================================
// Tests
// ============================================================================
