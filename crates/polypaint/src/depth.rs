//! Per-face depth keys.
//!
//! The key is the face centroid's coordinate along the depth axis. No area
//! weighting and no normalization: a plain vertex mean. This is a proxy for
//! view distance that is only exact when bodies do not overlap on the other
//! two axes; cyclic and interpenetrating overlaps are not resolved.

use nalgebra::Vector3;

use crate::geom3::{Axis, Face, Polyhedron};

/// Component-wise mean of the face's resolved vertices.
///
/// Duplicate indices are counted as often as they appear.
pub fn centroid(poly: &Polyhedron, face: &Face) -> Vector3<f64> {
    let verts = poly.vertices();
    let sum = face
        .indices()
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, &i| acc + verts[i]);
    sum / face.len().max(1) as f64
}

/// Depth key of `face` along `axis`.
#[inline]
pub fn depth_key(poly: &Polyhedron, face: &Face, axis: Axis) -> f64 {
    axis.component(&centroid(poly, face))
}
