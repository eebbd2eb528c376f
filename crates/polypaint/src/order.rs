//! Global back-to-front face ordering.
//!
//! Purpose
//! - Flatten every face of every body into one list keyed by depth, then sort it
//!   once so faces of different bodies interleave freely.
//!
//! Conventions
//! - Descending key = farthest first. Painting in this order lets nearer faces
//!   overwrite farther ones.
//! - The sort is stable: equal keys keep enumeration order (bodies in scene
//!   order, faces in body order). Keys are compared with `partial_cmp`, so
//!   `-0.0` and `0.0` tie.
//! - Keys are recomputed on every call; nothing is cached between renders.

use nalgebra::Vector3;
use std::cmp::Ordering;

use crate::depth::depth_key;
use crate::geom3::{Axis, Scene};

/// Position of a face inside its scene: `(body index, face index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceRef {
    pub body: usize,
    pub face: usize,
}

/// One face ready for painting: its key and resolved polygon.
///
/// Lives for a single render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthKeyedFace {
    pub key: f64,
    pub polygon: Vec<Vector3<f64>>,
    pub source: FaceRef,
}

/// All faces with keys, in enumeration order (unsorted).
pub fn collect_faces(scene: &Scene, axis: Axis) -> Vec<DepthKeyedFace> {
    let mut out = Vec::with_capacity(scene.face_count());
    for (bi, body) in scene.bodies().iter().enumerate() {
        let poly = body.polyhedron();
        for (fi, face) in body.faces().iter().enumerate() {
            out.push(DepthKeyedFace {
                key: depth_key(poly, face, axis),
                polygon: poly.resolve(face),
                source: FaceRef { body: bi, face: fi },
            });
        }
    }
    out
}

/// Stable in-place sort by descending key.
pub fn sort_descending(faces: &mut [DepthKeyedFace]) {
    faces.sort_by(|a, b| b.key.partial_cmp(&a.key).unwrap_or(Ordering::Equal));
}

/// Collect and sort: the painting order for `scene`.
pub fn sort_faces(scene: &Scene, axis: Axis) -> Vec<DepthKeyedFace> {
    let mut faces = collect_faces(scene, axis);
    sort_descending(&mut faces);
    tracing::debug!(faces = faces.len(), axis = ?axis, "sorted faces");
    faces
}

#[cfg(test)]
mod tests;
