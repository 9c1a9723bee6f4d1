//! Shapes: geometry, paint and transform state of one scene element.
//!
//! The set of kinds is closed (rect, ellipse, circle, path) and dispatched
//! through [`Geometry`]. Primitive shapes account for rotation in their
//! bounds with a coarse analytic formula; path shapes take their bounds
//! straight from the builder's tracker and ignore rotation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basics::{deg2rad, to_fixed8, PointD};
use crate::bounding_rect::Bounds;
use crate::error::{Result, SceneError};
use crate::paint::{Fill, ResolvedFill, ResolvedStroke, Stroke};
use crate::path_builder::{PathBuilder, PathDescription};
use crate::trans_affine::TransAffine;
use crate::transform::{compose, to_svg_transform, TransformOp, TransformState};

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque, collision-free shape identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ShapeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh shape ids, injected into the scene.
pub trait IdGenerator {
    fn next_id(&mut self) -> ShapeId;
}

/// `prefix_0`, `prefix_1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ShapeId {
        let id = ShapeId(format!("{}_{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Circle,
    Path,
}

/// Kind-specific geometry. Extents are in shape space; the position lives
/// on [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect { width: f64, height: f64 },
    Ellipse { width: f64, height: f64 },
    Circle { radius: f64 },
    Path(PathBuilder),
}

impl Geometry {
    /// Zero-sized geometry (or an empty path) of `kind`.
    pub fn empty(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rect => Geometry::Rect {
                width: 0.0,
                height: 0.0,
            },
            ShapeKind::Ellipse => Geometry::Ellipse {
                width: 0.0,
                height: 0.0,
            },
            ShapeKind::Circle => Geometry::Circle { radius: 0.0 },
            ShapeKind::Path => Geometry::Path(PathBuilder::new()),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Rect { .. } => ShapeKind::Rect,
            Geometry::Ellipse { .. } => ShapeKind::Ellipse,
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Path(_) => ShapeKind::Path,
        }
    }
}

/// Whether a shape receives pointer events, in SVG `pointer-events` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerEvents {
    #[default]
    VisiblePainted,
    Visible,
    Painted,
    Fill,
    Stroke,
    All,
    None,
}

// ============================================================================
// Render description
// ============================================================================

/// Geometry as an adapter draws it, in scene coordinates (paths are
/// box-relative and rely on their translate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Path(PathDescription),
}

/// Everything an adapter needs to put one shape on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDescription {
    pub id: ShapeId,
    pub primitive: Primitive,
    pub fill: ResolvedFill,
    pub stroke: Option<ResolvedStroke>,
    pub transform: Vec<TransformOp>,
    pub visible: bool,
    pub pointer_events: PointerEvents,
}

impl RenderDescription {
    /// The transform list folded into one matrix.
    pub fn transform_matrix(&self) -> TransAffine {
        compose(&self.transform)
    }

    /// The transform list as SVG `transform` attribute text.
    pub fn svg_transform(&self) -> String {
        to_svg_transform(&self.transform)
    }
}

// ============================================================================
// Shape
// ============================================================================

/// One scene element.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    x: f64,
    y: f64,
    geometry: Geometry,
    fill: Fill,
    stroke: Option<Stroke>,
    transform: TransformState,
    visible: bool,
    pointer_events: PointerEvents,
    finished: Option<PathDescription>,
}

impl Shape {
    pub fn new(id: ShapeId, geometry: Geometry) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            geometry,
            fill: Fill::default(),
            stroke: Some(Stroke::default()),
            transform: TransformState::new(),
            visible: true,
            pointer_events: PointerEvents::default(),
            finished: None,
        }
    }

    pub fn rect(id: impl Into<ShapeId>, width: f64, height: f64) -> Self {
        Self::new(id.into(), Geometry::Rect { width, height })
    }

    pub fn ellipse(id: impl Into<ShapeId>, width: f64, height: f64) -> Self {
        Self::new(id.into(), Geometry::Ellipse { width, height })
    }

    pub fn circle(id: impl Into<ShapeId>, radius: f64) -> Self {
        Self::new(id.into(), Geometry::Circle { radius })
    }

    pub fn path(id: impl Into<ShapeId>) -> Self {
        Self::new(id.into(), Geometry::Path(PathBuilder::new()))
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.set_position(x, y);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Option<Stroke>) -> Self {
        self.stroke = stroke;
        self
    }

    // ---------------------------------------------------------------
    // Identity and geometry
    // ---------------------------------------------------------------

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn width(&self) -> f64 {
        match &self.geometry {
            Geometry::Rect { width, .. } | Geometry::Ellipse { width, .. } => *width,
            Geometry::Circle { radius } => radius * 2.0,
            Geometry::Path(p) => p.width(),
        }
    }

    pub fn height(&self) -> f64 {
        match &self.geometry {
            Geometry::Rect { height, .. } | Geometry::Ellipse { height, .. } => *height,
            Geometry::Circle { radius } => radius * 2.0,
            Geometry::Path(p) => p.height(),
        }
    }

    /// Circles take half of `width` as their radius. Paths size
    /// themselves from their content and ignore this.
    pub fn set_width(&mut self, w: f64) {
        match &mut self.geometry {
            Geometry::Rect { width, .. } | Geometry::Ellipse { width, .. } => *width = w,
            Geometry::Circle { radius } => *radius = w / 2.0,
            Geometry::Path(_) => {}
        }
    }

    /// See [`set_width`](Self::set_width).
    pub fn set_height(&mut self, h: f64) {
        match &mut self.geometry {
            Geometry::Rect { height, .. } | Geometry::Ellipse { height, .. } => *height = h,
            Geometry::Circle { radius } => *radius = h / 2.0,
            Geometry::Path(_) => {}
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self.geometry {
            Geometry::Circle { radius } => Some(radius),
            _ => None,
        }
    }

    /// Has no effect unless the shape is a circle.
    pub fn set_radius(&mut self, r: f64) {
        if let Geometry::Circle { radius } = &mut self.geometry {
            *radius = r;
        }
    }

    /// Horizontal radius of an ellipse: half its width.
    pub fn x_radius(&self) -> Option<f64> {
        match self.geometry {
            Geometry::Ellipse { width, .. } => Some(width / 2.0),
            _ => None,
        }
    }

    /// Vertical radius of an ellipse: half its height.
    pub fn y_radius(&self) -> Option<f64> {
        match self.geometry {
            Geometry::Ellipse { height, .. } => Some(height / 2.0),
            _ => None,
        }
    }

    pub fn set_x_radius(&mut self, r: f64) {
        if let Geometry::Ellipse { width, .. } = &mut self.geometry {
            *width = r * 2.0;
        }
    }

    pub fn set_y_radius(&mut self, r: f64) {
        if let Geometry::Ellipse { height, .. } = &mut self.geometry {
            *height = r * 2.0;
        }
    }

    // ---------------------------------------------------------------
    // Paint and flags
    // ---------------------------------------------------------------

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    pub fn set_stroke(&mut self, stroke: Option<Stroke>) {
        self.stroke = stroke;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn pointer_events(&self) -> PointerEvents {
        self.pointer_events
    }

    pub fn set_pointer_events(&mut self, pe: PointerEvents) {
        self.pointer_events = pe;
    }

    // ---------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------

    pub fn transform_state(&self) -> &TransformState {
        &self.transform
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.transform.translate(x, y);
    }

    pub fn set_translate_x(&mut self, x: f64) {
        self.transform.set_translate_x(x);
    }

    pub fn set_translate_y(&mut self, y: f64) {
        self.transform.set_translate_y(y);
    }

    /// Rotate by `angle` degrees about the transform origin.
    pub fn rotate(&mut self, angle: f64) {
        self.transform.rotate(angle);
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation()
    }

    pub fn skew_x(&mut self, angle: f64) {
        self.transform.skew_x(angle);
    }

    pub fn skew_y(&mut self, angle: f64) {
        self.transform.skew_y(angle);
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.transform.scale(x, y);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform.matrix(a, b, c, d, e, f);
    }

    pub fn set_transform_origin(&mut self, ox: f64, oy: f64) {
        self.transform.set_transform_origin(ox, oy);
    }

    /// Pending operations resolved against the current frame.
    pub fn resolved_transform(&self) -> Vec<TransformOp> {
        let anchor = match &self.geometry {
            Geometry::Path(p) => Some(match &self.finished {
                Some(d) => d.offset,
                None => PointD::new(p.tracker().left(), p.tracker().top()),
            }),
            _ => None,
        };
        self.transform
            .resolve(self.x, self.y, self.width(), self.height(), anchor)
    }

    // ---------------------------------------------------------------
    // Paths
    // ---------------------------------------------------------------

    pub fn path_builder(&self) -> Result<&PathBuilder> {
        match &self.geometry {
            Geometry::Path(p) => Ok(p),
            _ => Err(SceneError::NoPath(self.id.clone())),
        }
    }

    /// Builder for issuing draw calls. Call [`end`](Self::end) to publish
    /// the result.
    pub fn path_builder_mut(&mut self) -> Result<&mut PathBuilder> {
        match &mut self.geometry {
            Geometry::Path(p) => Ok(p),
            _ => Err(SceneError::NoPath(self.id.clone())),
        }
    }

    /// Finalise the path. It is closed when the fill paints anything.
    pub fn end(&mut self) -> Result<&PathDescription> {
        let closed = self.fill.is_painted();
        let description = self.path_builder()?.end(closed);
        Ok(&*self.finished.insert(description))
    }

    /// Empty the path and drop the finalised description.
    pub fn clear(&mut self) -> Result<()> {
        self.path_builder_mut()?.clear();
        self.finished = None;
        Ok(())
    }

    /// The last finalised path, if any.
    pub fn finished_path(&self) -> Option<&PathDescription> {
        self.finished.as_ref()
    }

    // ---------------------------------------------------------------
    // Bounds and drawing
    // ---------------------------------------------------------------

    /// Axis-aligned bounds in scene coordinates, widened by the stroke
    /// weight and shifted by the translation.
    pub fn bounds(&self) -> Bounds {
        let wt = self.stroke.as_ref().map_or(0.0, Stroke::bounds_weight);
        let tx = self.transform.translate_x();
        let ty = self.transform.translate_y();
        match &self.geometry {
            Geometry::Path(p) => {
                let t = p.tracker();
                Bounds::new(
                    t.left() - wt + tx,
                    t.top() - wt + ty,
                    t.right() + wt + tx,
                    t.bottom() + wt + ty,
                )
            }
            _ => {
                let (x, y, w, h) = self.rotated_frame();
                Bounds::new(x - wt + tx, y - wt + ty, x + w + wt + tx, y + h + wt + ty)
            }
        }
    }

    /// Bounds that count toward the scene viewport; `None` for a path
    /// with nothing drawn yet.
    pub fn tracked_bounds(&self) -> Option<Bounds> {
        match &self.geometry {
            Geometry::Path(p) if p.tracker().is_empty() => None,
            _ => Some(self.bounds()),
        }
    }

    /// `(x, y, w, h)` of the primitive after rotation.
    ///
    /// The rotated height reuses the already rotated width, and both sine
    /// and cosine are taken of the absolute angle truncated to eight
    /// decimals.
    fn rotated_frame(&self) -> (f64, f64, f64, f64) {
        let (x, y) = (self.x, self.y);
        let (w, h) = (self.width(), self.height());
        let rotation = self.transform.rotation();
        if rotation == 0.0 {
            return (x, y, w, h);
        }
        let rad = deg2rad(rotation.abs());
        let sin = to_fixed8(rad.sin());
        let cos = to_fixed8(rad.cos());
        let (tox, toy) = self.transform.transform_origin();
        let rw = cos * h + sin * w;
        let rh = cos * h + sin * rw;
        let rx = (x + w * tox) - sin * (h * (1.0 - toy)) - cos * (w * tox);
        let ry = (y + h * toy) - sin * (w * tox) - cos * h * toy;
        (rx, ry, rw, rh)
    }

    fn primitive(&self) -> Primitive {
        let (x, y) = (self.x, self.y);
        match &self.geometry {
            Geometry::Rect { width, height } => Primitive::Rect {
                x,
                y,
                width: *width,
                height: *height,
            },
            Geometry::Ellipse { width, height } => Primitive::Ellipse {
                cx: x + width / 2.0,
                cy: y + height / 2.0,
                rx: width / 2.0,
                ry: height / 2.0,
            },
            Geometry::Circle { radius } => Primitive::Circle {
                cx: x + radius,
                cy: y + radius,
                r: *radius,
            },
            Geometry::Path(_) => Primitive::Path(self.finished.clone().unwrap_or_default()),
        }
    }

    /// Describe the shape for a rendering adapter.
    pub fn draw(&self) -> RenderDescription {
        RenderDescription {
            id: self.id.clone(),
            primitive: self.primitive(),
            fill: self.fill.resolve(self.width(), self.height()),
            stroke: self.stroke.as_ref().and_then(Stroke::resolve),
            transform: self.resolved_transform(),
            visible: self.visible,
            pointer_events: self.pointer_events,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
