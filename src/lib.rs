//! # vector-scene
//!
//! Retained-mode 2D vector scene. Callers issue drawing commands against
//! shapes; the crate accumulates them into compact, bounding-box-anchored
//! paths, tracks bounds per shape and per scene, and keeps a viewport
//! fitted around everything it owns.
//!
//! Output is renderer agnostic: a thin adapter maps the
//! [`RenderDescription`](shape::RenderDescription) of each shape and the
//! scene [`Viewport`](trans_viewport::Viewport) onto SVG, canvas or a
//! raster target.
//!
//! ## Architecture
//!
//! Data flows one way:
//!
//! 1. **Draw calls**: move, line, quadratic, cubic, rect, rounded rect, wedge
//! 2. **Path builder**: run-length encoded segments plus a running bounding box
//! 3. **Shape**: geometry, paint, transform, rotated bounds
//! 4. **Scene**: redraw queue, viewport fitting, batched updates
//!
//! ```
//! use vector_scene::scene::Scene;
//! use vector_scene::shape::ShapeKind;
//!
//! let mut scene = Scene::new();
//! let id = scene.create_shape(ShapeKind::Path, |s| s.set_stroke(None));
//! scene
//!     .draw_path(&id, |p| p.draw_rect(10.0, 10.0, 80.0, 40.0))
//!     .unwrap();
//! assert_eq!(scene.viewport().view_box(), "10 10 80 40");
//! ```

// Foundation
pub mod basics;
pub mod bounding_rect;
pub mod error;
pub mod config;

// Path geometry
pub mod arc;
pub mod path_builder;
pub mod path_storage;
pub mod rounded_rect;

// Transforms
pub mod trans_affine;
pub mod trans_viewport;
pub mod transform;

// Shapes and scene
pub mod paint;
pub mod scene;
pub mod shape;
