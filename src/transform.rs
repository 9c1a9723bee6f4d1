//! Shape transform state.
//!
//! A shape keeps at most one pending operation per kind; issuing the same
//! kind again replaces its arguments. Resolution lays the pending
//! operations out in the fixed order translate, rotate, skewX, skewY,
//! scale, matrix, recomputing the rotation pivot from the shape's current
//! frame every time.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basics::PointD;
use crate::trans_affine::TransAffine;

// ============================================================================
// TransformKind / TransformOp
// ============================================================================

/// Operation kinds, declared in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Translate,
    Rotate,
    SkewX,
    SkewY,
    Scale,
    Matrix,
}

impl TransformKind {
    /// SVG transform function name.
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Translate => "translate",
            TransformKind::Rotate => "rotate",
            TransformKind::SkewX => "skewX",
            TransformKind::SkewY => "skewY",
            TransformKind::Scale => "scale",
            TransformKind::Matrix => "matrix",
        }
    }
}

/// One resolved transform operation. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Translate { x: f64, y: f64 },
    /// Rotation about `(cx, cy)`.
    Rotate { angle: f64, cx: f64, cy: f64 },
    SkewX(f64),
    SkewY(f64),
    Scale { x: f64, y: f64 },
    /// SVG `matrix(a, b, c, d, e, f)`.
    Matrix([f64; 6]),
}

impl TransformOp {
    pub fn kind(&self) -> TransformKind {
        match self {
            TransformOp::Translate { .. } => TransformKind::Translate,
            TransformOp::Rotate { .. } => TransformKind::Rotate,
            TransformOp::SkewX(_) => TransformKind::SkewX,
            TransformOp::SkewY(_) => TransformKind::SkewY,
            TransformOp::Scale { .. } => TransformKind::Scale,
            TransformOp::Matrix(_) => TransformKind::Matrix,
        }
    }

    pub fn to_affine(&self) -> TransAffine {
        match *self {
            TransformOp::Translate { x, y } => TransAffine::new_translation(x, y),
            TransformOp::Rotate { angle, cx, cy } => TransAffine::new_rotation_about(angle, cx, cy),
            TransformOp::SkewX(a) => TransAffine::new_skew_x_deg(a),
            TransformOp::SkewY(a) => TransAffine::new_skew_y_deg(a),
            TransformOp::Scale { x, y } => TransAffine::new_scaling(x, y),
            TransformOp::Matrix([a, b, c, d, e, f]) => TransAffine::new_custom(a, b, c, d, e, f),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match *self {
            TransformOp::Translate { x, y } | TransformOp::Scale { x, y } => {
                write!(f, "{name}({x},{y})")
            }
            TransformOp::Rotate { angle, cx, cy } => write!(f, "{name}({angle},{cx},{cy})"),
            TransformOp::SkewX(a) | TransformOp::SkewY(a) => write!(f, "{name}({a})"),
            TransformOp::Matrix([a, b, c, d, e, g]) => {
                write!(f, "{name}({a},{b},{c},{d},{e},{g})")
            }
        }
    }
}

/// Fold an operation list into one matrix with SVG semantics: the last
/// operation is applied to points first.
pub fn compose(ops: &[TransformOp]) -> TransAffine {
    let mut mtx = TransAffine::new();
    for op in ops.iter().rev() {
        mtx.multiply(&op.to_affine());
    }
    mtx
}

/// The SVG `transform` attribute text for `ops`, space separated.
pub fn to_svg_transform(ops: &[TransformOp]) -> String {
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TransformState
// ============================================================================

/// Translation, rotation and pending operations of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    translate_x: f64,
    translate_y: f64,
    rotation: f64,
    origin: (f64, f64),
    pending: BTreeMap<TransformKind, TransformOp>,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotation: 0.0,
            origin: (0.5, 0.5),
            pending: BTreeMap::new(),
        }
    }

    fn set(&mut self, op: TransformOp) {
        self.pending.insert(op.kind(), op);
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.translate_x = x;
        self.translate_y = y;
        self.set(TransformOp::Translate { x, y });
    }

    pub fn set_translate_x(&mut self, x: f64) {
        self.translate(x, self.translate_y);
    }

    pub fn set_translate_y(&mut self, y: f64) {
        self.translate(self.translate_x, y);
    }

    /// Rotate by `angle` degrees about the transform origin. The pivot is
    /// filled in on resolution.
    pub fn rotate(&mut self, angle: f64) {
        self.rotation = angle;
        self.set(TransformOp::Rotate {
            angle,
            cx: 0.0,
            cy: 0.0,
        });
    }

    pub fn skew_x(&mut self, angle: f64) {
        self.set(TransformOp::SkewX(angle));
    }

    pub fn skew_y(&mut self, angle: f64) {
        self.set(TransformOp::SkewY(angle));
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.set(TransformOp::Scale { x, y });
    }

    pub fn matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.set(TransformOp::Matrix([a, b, c, d, e, f]));
    }

    /// Rotation origin as fractions of the shape's width and height.
    pub fn set_transform_origin(&mut self, ox: f64, oy: f64) {
        self.origin = (ox, oy);
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    pub fn translate_y(&self) -> f64 {
        self.translate_y
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn transform_origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn pending(&self, kind: TransformKind) -> Option<&TransformOp> {
        self.pending.get(&kind)
    }

    /// Resolve the pending operations against the shape frame
    /// `(x, y, width, height)`.
    ///
    /// With `anchor` set (path shapes), a translate to `anchor + (tx, ty)`
    /// is always emitted; otherwise translate appears only once requested.
    pub fn resolve(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        anchor: Option<PointD>,
    ) -> Vec<TransformOp> {
        let mut ops = Vec::with_capacity(self.pending.len() + 1);
        if let Some(a) = anchor {
            ops.push(TransformOp::Translate {
                x: a.x + self.translate_x,
                y: a.y + self.translate_y,
            });
        }
        for op in self.pending.values() {
            match *op {
                TransformOp::Translate { .. } if anchor.is_some() => {}
                TransformOp::Rotate { angle, .. } => ops.push(TransformOp::Rotate {
                    angle,
                    cx: x + width * self.origin.0,
                    cy: y + height * self.origin.1,
                }),
                other => ops.push(other),
            }
        }
        ops
    }
}

// ============================================================================
// Tests
// ============================================================================
