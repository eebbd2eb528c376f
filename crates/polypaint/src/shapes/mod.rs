//! Primitive shape catalog (cube, tetrahedron, octahedron, cuboid).
//!
//! Purpose
//! - Turn a small tagged description (`ShapeSpec`) into a validated `Body`.
//! - Every template lives in `[-1, 1]^3`, is scaled component-wise by the half
//!   extents, then moved to the center. Faces are wound counter-clockwise when
//!   seen from outside (outward normals).
//!
//! Adding a shape means adding a `ShapeKind` variant and its template; the
//! painter never sees the kind.
//!
//! Code cross-refs: `rand::ShapeSampler` (random specs), `crate::provider`

pub mod rand;

use nalgebra::Vector3;
use std::fmt;

use crate::geom3::{Body, Face, Polyhedron};

/// Error type for catalog and sampler parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    InvalidParams { reason: String },
}

impl ShapeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid shape params: {reason}"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Tetrahedron,
    Octahedron,
    Cuboid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Cube,
        ShapeKind::Tetrahedron,
        ShapeKind::Octahedron,
        ShapeKind::Cuboid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Cuboid => "cuboid",
        }
    }

    fn template(self) -> (&'static [[f64; 3]], &'static [&'static [usize]]) {
        match self {
            ShapeKind::Cube | ShapeKind::Cuboid => (&BOX_VERTS[..], &BOX_FACES[..]),
            ShapeKind::Tetrahedron => (&TETRA_VERTS[..], &TETRA_FACES[..]),
            ShapeKind::Octahedron => (&OCTA_VERTS[..], &OCTA_FACES[..]),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Vertex order matches the classic demo cube: bottom ring (y = -1), then top ring.
const BOX_VERTS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];
const BOX_FACES: [&[usize]; 6] = [
    &[0, 1, 2, 3],
    &[4, 7, 6, 5],
    &[0, 4, 5, 1],
    &[3, 2, 6, 7],
    &[0, 3, 7, 4],
    &[1, 5, 6, 2],
];

const TETRA_VERTS: [[f64; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];
const TETRA_FACES: [&[usize]; 4] = [&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]];

const OCTA_VERTS: [[f64; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_FACES: [&[usize]; 8] = [
    &[0, 2, 4],
    &[1, 4, 2],
    &[0, 4, 3],
    &[0, 5, 2],
    &[1, 3, 4],
    &[1, 2, 5],
    &[0, 3, 5],
    &[1, 5, 3],
];

/// A shape instance: kind, center, and half extent per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub center: Vector3<f64>,
    pub half_extents: Vector3<f64>,
}

impl ShapeSpec {
    /// Axis-aligned cube with edge length `size`.
    pub fn cube(center: Vector3<f64>, size: f64) -> Self {
        Self {
            kind: ShapeKind::Cube,
            center,
            half_extents: Vector3::repeat(size * 0.5),
        }
    }

    /// Axis-aligned box with edge lengths `size`.
    pub fn cuboid(center: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self {
            kind: ShapeKind::Cuboid,
            center,
            half_extents: size * 0.5,
        }
    }

    /// Box spanning `[min, max]`.
    pub fn cuboid_between(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self::cuboid((min + max) * 0.5, max - min)
    }

    /// Regular tetrahedron inscribed in the cube of half size `radius`.
    pub fn tetrahedron(center: Vector3<f64>, radius: f64) -> Self {
        Self {
            kind: ShapeKind::Tetrahedron,
            center,
            half_extents: Vector3::repeat(radius),
        }
    }

    /// Regular octahedron with vertex distance `radius`.
    pub fn octahedron(center: Vector3<f64>, radius: f64) -> Self {
        Self {
            kind: ShapeKind::Octahedron,
            center,
            half_extents: Vector3::repeat(radius),
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        if !self.center.iter().all(|c| c.is_finite()) {
            return Err(ShapeError::invalid("center must be finite"));
        }
        if !self.half_extents.iter().all(|h| h.is_finite() && *h > 0.0) {
            return Err(ShapeError::invalid(
                "half extents must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Instantiate the template as a `Body`.
    pub fn build(&self) -> Result<Body, ShapeError> {
        self.validate()?;
        let (verts, faces) = self.kind.template();
        let vertices = verts
            .iter()
            .map(|v| Vector3::from(*v).component_mul(&self.half_extents) + self.center)
            .collect();
        let faces = faces.iter().map(|f| Face::new(f.to_vec())).collect();
        // Templates are static and index-checked by the tests below.
        Body::new(Polyhedron::new(vertices), faces)
            .map_err(|e| ShapeError::invalid(format!("{} template: {e}", self.kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::centroid;
    use nalgebra::vector;

    fn mean(points: &[Vector3<f64>]) -> Vector3<f64> {
        points.iter().sum::<Vector3<f64>>() / points.len() as f64
    }

    #[test]
    fn templates_build_with_expected_counts() {
        let c = vector![0.5, -1.0, 2.0];
        let counts: Vec<(usize, usize)> = ShapeKind::ALL
            .iter()
            .map(|&kind| {
                let spec = ShapeSpec {
                    kind,
                    center: c,
                    half_extents: Vector3::repeat(0.5),
                };
                let b = spec.build().unwrap();
                (b.polyhedron().len(), b.faces().len())
            })
            .collect();
        assert_eq!(counts, vec![(8, 6), (4, 4), (6, 8), (8, 6)]);
    }

    #[test]
    fn faces_are_wound_outward() {
        for kind in ShapeKind::ALL {
            let spec = ShapeSpec {
                kind,
                center: vector![1.0, 2.0, -3.0],
                half_extents: vector![0.5, 1.0, 1.5],
            };
            let body = spec.build().unwrap();
            let poly = body.polyhedron();
            let body_center = mean(poly.vertices());
            for face in body.faces() {
                let p = poly.resolve(face);
                let n = (p[1] - p[0]).cross(&(p[2] - p[1]));
                let out = centroid(poly, face) - body_center;
                assert!(n.dot(&out) > 0.0, "{kind} face {:?} winds inward", face);
            }
        }
    }

    #[test]
    fn cube_spans_its_edge_length() {
        let body = ShapeSpec::cube(vector![0.0, -2.5, 0.0], 1.0).build().unwrap();
        let ys: Vec<f64> = body.polyhedron().vertices().iter().map(|v| v.y).collect();
        let lo = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((lo + 3.0).abs() < 1e-12);
        assert!((hi + 2.0).abs() < 1e-12);
    }

    #[test]
    fn cuboid_between_matches_corners() {
        let spec = ShapeSpec::cuboid_between(vector![0.0, -3.0, 0.0], vector![1.0, -2.0, 1.0]);
        let body = spec.build().unwrap();
        assert_eq!(body.polyhedron().vertices()[0], vector![0.0, -3.0, 0.0]);
        assert_eq!(body.polyhedron().vertices()[6], vector![1.0, -2.0, 1.0]);
    }

    #[test]
    fn rejects_bad_extents() {
        let spec = ShapeSpec::cube(Vector3::zeros(), 0.0);
        assert!(matches!(
            spec.build(),
            Err(ShapeError::InvalidParams { .. })
        ));
        let spec = ShapeSpec::octahedron(vector![f64::NAN, 0.0, 0.0], 1.0);
        assert!(spec.build().is_err());
    }
}
