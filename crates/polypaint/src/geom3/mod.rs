//! 3D polyhedra as vertex lists plus index faces.
//!
//! Purpose
//! - Hold the geometry the painter consumes: a `Polyhedron` (ordered vertex list),
//!   `Face`s indexing into it, and `Body` pairing the two.
//! - `Scene` is a plain value snapshot; providers rebuild it wholesale instead of
//!   mutating it, so a render never observes a half-updated scene.
//!
//! Assumptions and conventions
//! - Faces are planar, convex, and consistently wound by construction. Only index
//!   validity and the minimum face size are checked (`Body::new`).
//! - The depth axis is a plain coordinate axis (`Axis`, default `Y`).
//!
//! Code cross-refs: `crate::depth`, `crate::order`, `crate::shapes`

mod types;

pub use types::{Axis, Body, Bounds3, Face, GeometryError, Polyhedron, Scene};
