//! Scene: shape ownership, the redraw queue and viewport fitting.
//!
//! Every change to a shape goes through the scene, which queues the shape
//! and, unless automatic refitting is off or a batch is running, refits
//! the viewport on the spot. A refit visits the queued shapes only, so
//! the viewport grows but never shrinks, unless resize-down is on, in
//! which case every shape is visited and the viewport is rebuilt from
//! scratch.

use std::collections::{BTreeSet, HashMap};

use crate::basics::PointD;
use crate::bounding_rect::{Bounds, BoundsTracker};
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::path_builder::{PathBuilder, PathDescription};
use crate::shape::{Geometry, IdGenerator, RenderDescription, SequentialIds, Shape, ShapeId, ShapeKind};
use crate::trans_viewport::Viewport;

// ============================================================================
// External services
// ============================================================================

/// The rendering surface a scene drives.
pub trait RenderSurface {
    /// Resize and reposition to `viewport`, and show exactly that area.
    fn apply_viewport(&mut self, viewport: &Viewport);

    fn set_visible(&mut self, _visible: bool) {}
}

/// Surface that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn apply_viewport(&mut self, _viewport: &Viewport) {}
}

/// Page position of the element hosting the scene.
pub trait HostGeometry {
    fn origin(&self) -> PointD;
}

impl HostGeometry for PointD {
    fn origin(&self) -> PointD {
        *self
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Owner of a set of shapes and of the viewport that contains them.
pub struct Scene<S: RenderSurface = NullSurface> {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    redraw_queue: BTreeSet<ShapeId>,
    viewport: BoundsTracker,
    seed: Option<Bounds>,
    auto_draw: bool,
    resize_down: bool,
    in_batch: bool,
    visible: bool,
    refits: usize,
    ids: Box<dyn IdGenerator>,
    surface: S,
}

impl Scene<NullSurface> {
    /// Scene with default settings and no surface.
    pub fn new() -> Self {
        Self::with_surface(NullSurface, &SceneConfig::default())
    }
}

impl Default for Scene<NullSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> Scene<S> {
    pub fn with_surface(surface: S, config: &SceneConfig) -> Self {
        let seed = config
            .initial_extent()
            .map(|(w, h)| Bounds::new(0.0, 0.0, w, h));
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            redraw_queue: BTreeSet::new(),
            viewport: seed.map_or_else(BoundsTracker::new, BoundsTracker::from_bounds),
            seed,
            auto_draw: config.auto_draw,
            resize_down: config.resize_down,
            in_batch: false,
            visible: true,
            refits: 0,
            ids: Box::new(SequentialIds::new(config.id_prefix.clone())),
            surface,
        }
    }

    /// Replace the id source used by [`create_shape`](Self::create_shape).
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // ---------------------------------------------------------------
    // Shape collection
    // ---------------------------------------------------------------

    /// Create a shape of `kind` with a fresh id, let `configure` set it
    /// up, and add it.
    pub fn create_shape<F>(&mut self, kind: ShapeKind, configure: F) -> ShapeId
    where
        F: FnOnce(&mut Shape),
    {
        let mut shape = Shape::new(self.ids.next_id(), Geometry::empty(kind));
        configure(&mut shape);
        self.add_shape(shape)
    }

    /// Take ownership of `shape`. A shape with the same id is replaced.
    ///
    /// Paths are queued only once they have been finalised.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id().clone();
        let queue = shape.kind() != ShapeKind::Path || shape.finished_path().is_some();
        if self.shapes.insert(id.clone(), shape).is_none() {
            self.order.push(id.clone());
        }
        if queue {
            self.enqueue(id.clone());
        }
        if self.auto_draw {
            self.update_coord_space();
        }
        id
    }

    /// Drop a shape. With resize-down on, the viewport is refit so it
    /// can shrink.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<Shape> {
        let shape = self
            .shapes
            .remove(id)
            .ok_or_else(|| SceneError::UnknownShape(id.clone()))?;
        self.order.retain(|o| o != id);
        self.redraw_queue.remove(id);
        log::trace!("removed {}", id);
        if self.resize_down && self.auto_draw {
            self.update_coord_space();
        }
        Ok(shape)
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.redraw_queue.clear();
        if self.resize_down && self.auto_draw {
            self.update_coord_space();
        }
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Direct access. Changes made here are not refit until the shape is
    /// passed to [`add_to_redraw_queue`](Self::add_to_redraw_queue); prefer
    /// [`update`](Self::update).
    pub fn shape_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// Shapes in insertion order, which is render order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Apply `f` to a shape and commit: queue it, refit unless batching,
    /// and return its new bounds.
    ///
    /// A path that was already finalised is finalised again, so draw calls
    /// or fill changes made in `f` reach its render description.
    pub fn update<F>(&mut self, id: &ShapeId, f: F) -> Result<Bounds>
    where
        F: FnOnce(&mut Shape),
    {
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownShape(id.clone()))?;
        f(shape);
        if shape.finished_path().is_some() {
            shape.end()?;
        }
        let bounds = shape.bounds();
        self.commit(id.clone());
        Ok(bounds)
    }

    /// Issue draw calls against a path shape, finalise it and commit.
    pub fn draw_path<F>(&mut self, id: &ShapeId, f: F) -> Result<PathDescription>
    where
        F: FnOnce(&mut PathBuilder),
    {
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownShape(id.clone()))?;
        f(shape.path_builder_mut()?);
        self.end_path(id)
    }

    /// Finalise a path shape and commit it.
    pub fn end_path(&mut self, id: &ShapeId) -> Result<PathDescription> {
        let shape = self
            .shapes
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownShape(id.clone()))?;
        let description = shape.end()?.clone();
        self.commit(id.clone());
        Ok(description)
    }

    /// Mark a shape for bounds re-evaluation, refitting unless batching.
    pub fn add_to_redraw_queue(&mut self, id: &ShapeId) -> Result<()> {
        if !self.shapes.contains_key(id) {
            return Err(SceneError::UnknownShape(id.clone()));
        }
        self.commit(id.clone());
        Ok(())
    }

    fn enqueue(&mut self, id: ShapeId) {
        log::trace!("queued {}", id);
        self.redraw_queue.insert(id);
    }

    fn commit(&mut self, id: ShapeId) {
        self.enqueue(id);
        if self.auto_draw {
            self.update_coord_space();
        }
    }

    // ---------------------------------------------------------------
    // Fitting
    // ---------------------------------------------------------------

    /// Fold shape bounds into the viewport and push it to the surface.
    ///
    /// Visits the redraw queue, or every shape when resize-down is on
    /// (starting over from the configured extent). Paths with nothing
    /// drawn are skipped. Empties the queue.
    pub fn update_coord_space(&mut self) -> Viewport {
        if self.resize_down {
            self.viewport = self
                .seed
                .map_or_else(BoundsTracker::new, BoundsTracker::from_bounds);
            for id in &self.order {
                if let Some(b) = self.shapes.get(id).and_then(Shape::tracked_bounds) {
                    self.viewport.track_bounds(&b);
                }
            }
        } else {
            for id in &self.redraw_queue {
                if let Some(b) = self.shapes.get(id).and_then(Shape::tracked_bounds) {
                    self.viewport.track_bounds(&b);
                }
            }
        }
        let visited = if self.resize_down {
            self.order.len()
        } else {
            self.redraw_queue.len()
        };
        self.redraw_queue.clear();
        self.refits += 1;

        let viewport = self.viewport();
        log::debug!(
            "refit #{} over {} shapes: viewBox {}",
            self.refits,
            visited,
            viewport
        );
        self.surface.apply_viewport(&viewport);
        viewport
    }

    /// Run `f` with automatic refitting suspended, then refit once.
    ///
    /// Calling `batch` from inside `f` is rejected with
    /// [`SceneError::NestedBatch`] without running the inner closure.
    pub fn batch<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> R,
    {
        if self.in_batch {
            log::warn!("nested batch rejected");
            return Err(SceneError::NestedBatch);
        }
        let auto_draw = self.auto_draw;
        self.auto_draw = false;
        self.in_batch = true;
        log::trace!("batch start");

        let result = f(self);

        self.in_batch = false;
        self.auto_draw = auto_draw;
        log::trace!("batch end, {} queued", self.redraw_queue.len());
        self.update_coord_space();
        Ok(result)
    }

    pub fn is_batching(&self) -> bool {
        self.in_batch
    }

    /// Current viewport; all zero before anything was fitted.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_bounds(self.viewport.bounds())
    }

    /// Number of refits performed so far.
    pub fn refit_count(&self) -> usize {
        self.refits
    }

    pub fn pending_redraws(&self) -> usize {
        self.redraw_queue.len()
    }

    pub fn auto_draw(&self) -> bool {
        self.auto_draw
    }

    pub fn set_auto_draw(&mut self, auto_draw: bool) {
        self.auto_draw = auto_draw;
    }

    pub fn resize_down(&self) -> bool {
        self.resize_down
    }

    pub fn set_resize_down(&mut self, resize_down: bool) {
        self.resize_down = resize_down;
    }

    // ---------------------------------------------------------------
    // Presentation
    // ---------------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the whole scene. Shape flags are left alone.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.surface.set_visible(visible);
    }

    /// Render descriptions of every shape in render order.
    pub fn render(&self) -> Vec<RenderDescription> {
        self.shapes()
            .map(|shape| {
                let mut d = shape.draw();
                d.visible = d.visible && self.visible;
                d
            })
            .collect()
    }

    /// Page position of a shape: host origin plus the shape's `(x, y)`.
    pub fn page_xy(&self, id: &ShapeId, host: &impl HostGeometry) -> Result<PointD> {
        let shape = self
            .shapes
            .get(id)
            .ok_or_else(|| SceneError::UnknownShape(id.clone()))?;
        let origin = host.origin();
        Ok(PointD::new(origin.x + shape.x(), origin.y + shape.y()))
    }

    /// Move a shape so it sits at page position `xy`.
    pub fn set_page_xy(
        &mut self,
        id: &ShapeId,
        host: &impl HostGeometry,
        xy: PointD,
    ) -> Result<Bounds> {
        let origin = host.origin();
        self.update(id, |shape| {
            shape.set_position(xy.x - origin.x, xy.y - origin.y)
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Fill;
    use crate::shape::Primitive;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Default)]
    struct Recording {
        viewports: Vec<Viewport>,
        visible: Option<bool>,
    }

    impl RenderSurface for Recording {
        fn apply_viewport(&mut self, viewport: &Viewport) {
            self.viewports.push(*viewport);
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = Some(visible);
        }
    }

    fn bare_rect(id: &str, x: f64, y: f64, w: f64, h: f64) -> Shape {
        Shape::rect(id, w, h).with_position(x, y).with_stroke(None)
    }

    #[test]
    fn test_new_scene_has_empty_viewport() {
        let scene = Scene::new();
        assert_eq!(scene.viewport(), Viewport::default());
        assert_eq!(scene.refit_count(), 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_add_shape_refits_and_drives_surface() {
        init_logging();
        let mut scene = Scene::with_surface(Recording::default(), &SceneConfig::default());
        scene.add_shape(bare_rect("a", 10.0, 20.0, 30.0, 40.0));
        assert_eq!(scene.viewport(), Viewport::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(scene.surface().viewports.len(), 1);
        assert_eq!(scene.surface().viewports[0].view_box(), "10 20 30 40");
    }

    #[test]
    fn test_viewport_only_grows_by_default() {
        let mut scene = Scene::new();
        let id = scene.add_shape(bare_rect("a", 0.0, 0.0, 100.0, 100.0));
        let b = scene.update(&id, |s| s.set_width(10.0)).unwrap();
        assert_eq!(b, Bounds::new(0.0, 0.0, 10.0, 100.0));
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_resize_down_shrinks() {
        let config = SceneConfig {
            resize_down: true,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_surface(NullSurface, &config);
        let id = scene.add_shape(bare_rect("a", 0.0, 0.0, 100.0, 100.0));
        scene.add_shape(bare_rect("b", 0.0, 0.0, 10.0, 10.0));
        scene.update(&id, |s| s.set_width(5.0)).unwrap();
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 10.0, 100.0));
        scene.remove_shape(&id).unwrap();
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_seeded_viewport() {
        let config = SceneConfig {
            width: 200.0,
            height: 100.0,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_surface(NullSurface, &config);
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 200.0, 100.0));
        scene.add_shape(bare_rect("a", 300.0, 0.0, 10.0, 10.0));
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 310.0, 100.0));
    }

    #[test]
    fn test_batch_refits_once() {
        let mut scene = Scene::new();
        scene
            .batch(|s| {
                for i in 0..5 {
                    s.add_shape(bare_rect(&format!("r{i}"), i as f64 * 10.0, 0.0, 10.0, 10.0));
                }
                assert_eq!(s.refit_count(), 0);
                assert_eq!(s.pending_redraws(), 5);
            })
            .unwrap();
        assert_eq!(scene.refit_count(), 1);
        assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 50.0, 10.0));
        assert!(scene.auto_draw());
        assert!(!scene.is_batching());
    }

    #[test]
    fn test_nested_batch_rejected() {
        init_logging();
        let mut scene = Scene::new();
        let mut inner_ran = false;
        let outer = scene
            .batch(|s| s.batch(|_| inner_ran = true))
            .unwrap();
        assert_eq!(outer, Err(SceneError::NestedBatch));
        assert!(!inner_ran);
        assert_eq!(scene.refit_count(), 1);
    }

    #[test]
    fn test_batch_keeps_manual_mode() {
        let config = SceneConfig {
            auto_draw: false,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_surface(NullSurface, &config);
        scene.batch(|_| ()).unwrap();
        assert!(!scene.auto_draw());
        scene.add_shape(bare_rect("a", 0.0, 0.0, 1.0, 1.0));
        assert_eq!(scene.refit_count(), 1);
        assert_eq!(scene.pending_redraws(), 1);
    }

    #[test]
    fn test_unknown_shape() {
        let mut scene = Scene::new();
        let ghost = ShapeId::from("ghost");
        assert_eq!(
            scene.update(&ghost, |_| ()).unwrap_err(),
            SceneError::UnknownShape(ghost.clone())
        );
        assert!(scene.remove_shape(&ghost).is_err());
        assert!(scene.add_to_redraw_queue(&ghost).is_err());
    }

    #[test]
    fn test_path_queued_on_end() {
        let mut scene = Scene::new();
        let id = scene.create_shape(ShapeKind::Path, |s| s.set_stroke(None));
        assert_eq!(scene.viewport(), Viewport::default());
        let d = scene
            .draw_path(&id, |p| p.draw_rect(5.0, 5.0, 20.0, 10.0))
            .unwrap();
        assert!(!d.closed);
        assert_eq!(scene.viewport(), Viewport::new(5.0, 5.0, 20.0, 10.0));
    }

    #[test]
    fn test_undrawn_path_ignored_by_resize_down() {
        let config = SceneConfig {
            resize_down: true,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_surface(NullSurface, &config);
        let drawn = scene.create_shape(ShapeKind::Path, |s| s.set_stroke(None));
        scene
            .draw_path(&drawn, |p| p.draw_rect(100.0, 100.0, 10.0, 10.0))
            .unwrap();
        scene.create_shape(ShapeKind::Path, |_| ());
        assert_eq!(scene.viewport(), Viewport::new(100.0, 100.0, 10.0, 10.0));
    }

    #[test]
    fn test_update_before_drawing_leaves_viewport_empty() {
        let mut scene = Scene::new();
        let id = scene.create_shape(ShapeKind::Path, |s| s.set_stroke(None));
        scene
            .update(&id, |s| s.set_fill(Fill::solid("#f00")))
            .unwrap();
        assert_eq!(scene.viewport(), Viewport::default());
        scene
            .draw_path(&id, |p| p.draw_rect(100.0, 100.0, 10.0, 10.0))
            .unwrap();
        assert_eq!(scene.viewport(), Viewport::new(100.0, 100.0, 10.0, 10.0));
    }

    #[test]
    fn test_update_refreshes_finished_path() {
        let mut scene = Scene::new();
        let id = scene.create_shape(ShapeKind::Path, |s| s.set_stroke(None));
        scene
            .draw_path(&id, |p| p.draw_rect(10.0, 10.0, 20.0, 20.0))
            .unwrap();
        scene
            .update(&id, |s| {
                if let Ok(p) = s.path_builder_mut() {
                    p.line_to(0.0, 0.0);
                }
                s.set_fill(Fill::solid("#0f0"));
            })
            .unwrap();
        let shape = scene.shape(&id).unwrap();
        let finished = shape.finished_path().unwrap();
        assert_eq!(finished.offset, PointD::new(0.0, 0.0));
        assert!(finished.closed);
        assert_eq!(
            scene.render()[0].primitive,
            Primitive::Path(shape.path_builder().unwrap().end(true))
        );
    }

    #[test]
    fn test_draw_path_on_primitive() {
        let mut scene = Scene::new();
        let id = scene.create_shape(ShapeKind::Circle, |s| s.set_radius(3.0));
        assert_eq!(
            scene.draw_path(&id, |p| p.line_to(1.0, 1.0)).unwrap_err(),
            SceneError::NoPath(id.clone())
        );
    }

    #[test]
    fn test_create_shape_ids_and_order() {
        let mut scene = Scene::new();
        let a = scene.create_shape(ShapeKind::Rect, |_| ());
        let b = scene.create_shape(ShapeKind::Ellipse, |s| s.set_fill(Fill::solid("#abc")));
        assert_eq!(a.as_str(), "shape_0");
        assert_eq!(b.as_str(), "shape_1");
        let order: Vec<_> = scene.shapes().map(|s| s.id().clone()).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_page_xy() {
        let mut scene = Scene::new();
        let id = scene.add_shape(bare_rect("a", 10.0, 20.0, 5.0, 5.0));
        let host = PointD::new(100.0, 200.0);
        assert_eq!(scene.page_xy(&id, &host).unwrap(), PointD::new(110.0, 220.0));
        scene
            .set_page_xy(&id, &host, PointD::new(150.0, 250.0))
            .unwrap();
        assert_eq!(scene.shape(&id).unwrap().x(), 50.0);
        assert_eq!(scene.shape(&id).unwrap().y(), 50.0);
    }

    #[test]
    fn test_visibility() {
        let mut scene = Scene::with_surface(Recording::default(), &SceneConfig::default());
        scene.add_shape(bare_rect("a", 0.0, 0.0, 1.0, 1.0));
        scene.set_visible(false);
        assert_eq!(scene.surface().visible, Some(false));
        assert!(!scene.render()[0].visible);
        assert!(scene.shape(&ShapeId::from("a")).unwrap().visible());
    }
}
