//! Painter's Algorithm for convex polyhedra.
//!
//! Pipeline (one direction only):
//! `provider` (scene snapshot) → `depth` (per-face key) → `order` (global
//! back-to-front sort) → `render` (incremental reveal) → `render::surface`.
//!
//! There is no z-buffer and no face splitting: faces are painted farthest
//! first along one coordinate axis, so cyclic or interpenetrating overlaps
//! come out wrong. That limitation is part of the algorithm being shown.

pub mod depth;
pub mod geom3;
pub mod order;
pub mod provider;
pub mod render;
pub mod shapes;
pub mod viewer;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector3 as Vec3;

/// Common exports for callers.
pub mod prelude {
    pub use crate::depth::{centroid, depth_key};
    pub use crate::geom3::{Axis, Body, Bounds3, Face, GeometryError, Polyhedron, Scene};
    pub use crate::order::{collect_faces, sort_faces, DepthKeyedFace, FaceRef};
    pub use crate::provider::{demo_scene, parse_shape_count, GeometryProvider, ProviderError};
    pub use crate::render::surface::{RecordingSurface, Surface, SurfaceEvent};
    pub use crate::render::svg::{Projection, SvgSurface};
    pub use crate::render::{
        commands, DrawCommand, FaceStyle, FnPacer, NoPause, Pacer, RenderCfg, RenderStats,
        Renderer, Rgb, SleepPacer,
    };
    pub use crate::shapes::rand::{ReplayToken, SampleCfg, ShapeSampler};
    pub use crate::shapes::{ShapeError, ShapeKind, ShapeSpec};
    pub use crate::viewer::{TriggerOutcome, Viewer};
    pub use nalgebra::Vector3 as Vec3;
}
