//! End-to-end checks of the path engine and scene fitting.

use vector_scene::arc::WedgeParams;
use vector_scene::bounding_rect::Bounds;
use vector_scene::config::SceneConfig;
use vector_scene::paint::{Fill, GradientStop, LinearGradient, Stroke};
use vector_scene::path_builder::PathBuilder;
use vector_scene::path_storage::SegmentKind;
use vector_scene::scene::{RenderSurface, Scene};
use vector_scene::shape::{Shape, ShapeKind};
use vector_scene::trans_viewport::Viewport;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 400.0 - 200.0
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % n as u64) as usize
    }
}

#[derive(Default)]
struct CountingSurface {
    applied: Vec<Viewport>,
}

impl RenderSurface for CountingSurface {
    fn apply_viewport(&mut self, viewport: &Viewport) {
        self.applied.push(*viewport);
    }
}

fn bare(shape: Shape) -> Shape {
    shape.with_stroke(None)
}

// ============================================================================
// Path engine
// ============================================================================

#[test]
fn bounds_cover_every_point_including_controls() {
    init_logging();
    for seed in 1..20u64 {
        let mut rng = Lcg(seed);
        let mut path = PathBuilder::new();
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for _ in 0..30 {
            let pts: Vec<f64> = (0..6).map(|_| rng.next_f64()).collect();
            match rng.next_index(4) {
                0 => {
                    path.move_to(pts[0], pts[1]);
                    xs.push(pts[0]);
                    ys.push(pts[1]);
                }
                1 => {
                    path.line_to(pts[0], pts[1]);
                    xs.push(pts[0]);
                    ys.push(pts[1]);
                }
                2 => {
                    path.quadratic_curve_to(pts[0], pts[1], pts[2], pts[3]);
                    xs.extend([pts[0], pts[2]]);
                    ys.extend([pts[1], pts[3]]);
                }
                _ => {
                    path.curve_to(pts[0], pts[1], pts[2], pts[3], pts[4], pts[5]);
                    xs.extend([pts[0], pts[2], pts[4]]);
                    ys.extend([pts[1], pts[3], pts[5]]);
                }
            }
        }
        let fold = |v: &[f64], f: fn(f64, f64) -> f64, init: f64| v.iter().copied().fold(init, f);
        let expected = Bounds::new(
            fold(&xs, f64::min, f64::INFINITY),
            fold(&ys, f64::min, f64::INFINITY),
            fold(&xs, f64::max, f64::NEG_INFINITY),
            fold(&ys, f64::max, f64::NEG_INFINITY),
        );
        assert_eq!(path.bounds(), Some(expected), "seed {seed}");
    }
}

#[test]
fn draw_rect_bounds_are_exact() {
    for (x, y, w, h) in [
        (0.0, 0.0, 0.0, 0.0),
        (10.5, -3.25, 7.0, 12.75),
        (-100.0, -50.0, 300.0, 1.0),
    ] {
        let mut shape = bare(Shape::path("p"));
        shape.path_builder_mut().unwrap().draw_rect(x, y, w, h);
        assert_eq!(shape.bounds(), Bounds::new(x, y, x + w, y + h));
    }
}

#[test]
fn full_wedge_bounds_are_the_circle() {
    for (x, y, r) in [(0.0, 0.0, 10.0), (120.5, 40.0, 33.0), (-5.0, 7.0, 1.0)] {
        let mut path = PathBuilder::new();
        path.draw_wedge(WedgeParams::new(x, y, 0.0, 360.0, r).with_y_radius(r));
        assert_eq!(path.bounds(), Some(Bounds::new(x - r, y - r, x + r, y + r)));
    }
}

#[test]
fn wedge_segment_counts() {
    let quads = |sweep: f64| {
        let mut path = PathBuilder::new();
        path.draw_wedge(WedgeParams::new(0.0, 0.0, 0.0, sweep, 50.0));
        path.segments()
            .iter()
            .filter(|s| s.kind == SegmentKind::QuadCurve)
            .map(|s| s.command_count())
            .sum::<usize>()
    };
    assert_eq!(quads(90.0), 2);
    assert_eq!(quads(45.0), 1);
    assert_eq!(quads(-135.0), 3);
    assert_eq!(quads(0.0), 0);
}

#[test]
fn end_twice_is_identical() {
    let mut path = PathBuilder::new();
    path.move_to(3.3, 4.4);
    path.quadratic_curve_to(10.0, 20.0, 30.0, 5.0);
    path.curve_to(40.0, 1.0, 50.0, 9.0, 60.5, 2.25);
    path.draw_round_rect(0.0, 0.0, 20.0, 20.0, 4.0, 4.0);
    let first = path.end(true);
    let second = path.end(true);
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn clear_resets_path_and_bounds() {
    let mut shape = bare(Shape::path("p"));
    {
        let path = shape.path_builder_mut().unwrap();
        path.draw_rect(5.0, 5.0, 10.0, 10.0);
        path.draw_wedge(WedgeParams::new(0.0, 0.0, 30.0, 200.0, 40.0));
    }
    shape.clear().unwrap();
    let path = shape.path_builder().unwrap();
    assert!(path.segments().is_empty());
    assert!(path.bounds().is_none());
    assert_eq!(path.width(), 0.0);
    assert_eq!(path.height(), 0.0);
    assert_eq!(shape.bounds(), Bounds::default());
}

#[test]
fn zero_rotation_keeps_bounds() {
    for kind in [ShapeKind::Rect, ShapeKind::Ellipse, ShapeKind::Circle] {
        let mut scene = Scene::new();
        let id = scene.create_shape(kind, |s| {
            s.set_position(12.0, 34.0);
            s.set_width(56.0);
            s.set_height(20.0);
        });
        let before = scene.shape(&id).unwrap().bounds();
        let after = scene.update(&id, |s| s.rotate(0.0)).unwrap();
        assert_eq!(before, after);
    }
}

// ============================================================================
// Scene
// ============================================================================

fn add_grid<S: RenderSurface>(scene: &mut Scene<S>) {
    for i in 0..8 {
        let x = (i % 4) as f64 * 25.0 - 10.0;
        let y = (i / 4) as f64 * 40.0 + 5.0;
        let shape = Shape::rect(format!("cell{i}").as_str(), 20.0, 30.0)
            .with_position(x, y)
            .with_stroke(Some(Stroke::new("#333", 2.0)));
        scene.add_shape(shape);
    }
}

#[test]
fn batch_matches_unbatched_with_one_refit() {
    init_logging();
    let mut plain = Scene::with_surface(CountingSurface::default(), &SceneConfig::default());
    add_grid(&mut plain);

    let mut batched = Scene::with_surface(CountingSurface::default(), &SceneConfig::default());
    batched.batch(|s| add_grid(s)).unwrap();

    assert_eq!(plain.viewport(), batched.viewport());
    assert_eq!(plain.refit_count(), 8);
    assert_eq!(batched.refit_count(), 1);
    assert_eq!(batched.surface().applied.len(), 1);
    assert_eq!(plain.surface().applied.last(), batched.surface().applied.last());
}

#[test]
fn viewport_view_box_covers_all_shapes() {
    let mut scene = Scene::new();
    add_grid(&mut scene);
    // Columns span -10..85, rows 5..75, widened by the stroke.
    assert_eq!(scene.viewport(), Viewport::new(-12.0, 3.0, 99.0, 74.0));
    assert_eq!(scene.viewport().view_box(), "-12 3 99 74");
}

#[test]
fn resize_down_recomputes_after_removal() {
    let config = SceneConfig {
        resize_down: true,
        ..SceneConfig::default()
    };
    let mut scene = Scene::with_surface(CountingSurface::default(), &config);
    let big = scene.add_shape(bare(Shape::rect("big", 500.0, 500.0)));
    scene.add_shape(bare(Shape::circle("dot", 5.0).with_position(10.0, 10.0)));
    assert_eq!(scene.viewport(), Viewport::new(0.0, 0.0, 500.0, 500.0));
    scene.remove_shape(&big).unwrap();
    assert_eq!(scene.viewport(), Viewport::new(10.0, 10.0, 10.0, 10.0));
}

#[test]
fn render_descriptions_serialize() {
    let mut scene = Scene::new();
    let id = scene.create_shape(ShapeKind::Path, |s| {
        s.set_fill(Fill::Linear(LinearGradient {
            stops: vec![GradientStop::new("#000"), GradientStop::new("#fff")],
            rotation: 45.0,
        }));
    });
    scene
        .draw_path(&id, |p| {
            p.draw_wedge(WedgeParams::new(100.0, 100.0, 0.0, 90.0, 50.0));
        })
        .unwrap();
    let rendered = scene.render();
    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json[0]["primitive"]["type"], "path");
    assert_eq!(json[0]["primitive"]["closed"], true);
    assert_eq!(json[0]["fill"]["type"], "linear");
    assert_eq!(json[0]["transform"][0]["Translate"]["x"], 50.0);
}
