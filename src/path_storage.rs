//! Path storage: run-length encoded drawing commands.
//!
//! Consecutive commands of the same kind share one [`Segment`]; a change
//! of kind opens a new one. Insertion order is render order.

use serde::{Deserialize, Serialize};

/// Kind of drawing command held by a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Move,
    Line,
    QuadCurve,
    CubicCurve,
}

impl SegmentKind {
    /// The SVG path letter for this kind.
    pub fn letter(self) -> char {
        match self {
            SegmentKind::Move => 'M',
            SegmentKind::Line => 'L',
            SegmentKind::QuadCurve => 'Q',
            SegmentKind::CubicCurve => 'C',
        }
    }

    /// Number of coordinate values one command of this kind carries.
    pub fn arity(self) -> usize {
        match self {
            SegmentKind::Move | SegmentKind::Line => 2,
            SegmentKind::QuadCurve => 4,
            SegmentKind::CubicCurve => 6,
        }
    }
}

/// A run of same-kind commands with their flattened coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub coords: Vec<f64>,
}

impl Segment {
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            coords: Vec::new(),
        }
    }

    pub fn with_coords(kind: SegmentKind, coords: Vec<f64>) -> Self {
        Self { kind, coords }
    }

    /// Number of whole commands in the run.
    pub fn command_count(&self) -> usize {
        self.coords.len() / self.kind.arity()
    }

    /// Iterate the coordinates as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.coords.chunks_exact(2).map(|p| (p[0], p[1]))
    }
}

/// Ordered segment list plus the kind of the run currently open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStorage {
    segments: Vec<Segment>,
    current: Option<SegmentKind>,
}

impl PathStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            current: None,
        }
    }

    /// Append one command's coordinates.
    ///
    /// Joins the open run when `kind` matches it, otherwise starts a new
    /// segment.
    pub fn push(&mut self, kind: SegmentKind, coords: &[f64]) {
        if self.current == Some(kind) {
            if let Some(last) = self.segments.last_mut() {
                last.coords.extend_from_slice(coords);
                return;
            }
        }
        self.segments
            .push(Segment::with_coords(kind, coords.to_vec()));
        self.current = Some(kind);
    }

    /// Replace all content with `segments`; the last one becomes the open run.
    pub fn replace(&mut self, segments: Vec<Segment>) {
        self.current = segments.last().map(|s| s.kind);
        self.segments = segments;
    }

    /// Remove every segment and close the open run.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.current = None;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn current_kind(&self) -> Option<SegmentKind> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
