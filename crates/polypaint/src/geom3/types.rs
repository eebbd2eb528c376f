//! Core 3D types: vertex lists, index faces, bodies, and scene snapshots.

use nalgebra::Vector3;
use std::fmt;

/// Coordinate axis used as the viewing/depth direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Component index into a `Vector3`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn component(self, p: &Vector3<f64>) -> f64 {
        p[self.index()]
    }
}

/// Errors raised while assembling bodies from raw vertex/face data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    FaceTooSmall { face: usize, len: usize },
    IndexOutOfRange { face: usize, index: usize, vertices: usize },
    NonFiniteVertex { vertex: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceTooSmall { face, len } => {
                write!(f, "face {face} has {len} indices, need at least 3")
            }
            Self::IndexOutOfRange {
                face,
                index,
                vertices,
            } => write!(
                f,
                "face {face} references vertex {index} but the polyhedron has {vertices}"
            ),
            Self::NonFiniteVertex { vertex } => {
                write!(f, "vertex {vertex} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Ordered vertex list; a vertex's position in the list is its identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Vector3<f64>>,
}

impl Polyhedron {
    #[inline]
    pub fn new(vertices: Vec<Vector3<f64>>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Resolve face indices to positions (face order preserved).
    ///
    /// Indices must be in range; `Body::new` guarantees this for bodies.
    pub fn resolve(&self, face: &Face) -> Vec<Vector3<f64>> {
        face.indices().iter().map(|&i| self.vertices[i]).collect()
    }
}

/// Ordered vertex indices into the owning polyhedron.
///
/// Planarity and convexity are assumed, never checked. Duplicate indices are allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face(Vec<usize>);

impl Face {
    #[inline]
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for Face {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// A polyhedron paired with its face list.
///
/// Invariants:
/// - every face has at least 3 indices;
/// - every index is `< polyhedron.len()`;
/// - every vertex coordinate is finite, so depth keys always compare.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    polyhedron: Polyhedron,
    faces: Vec<Face>,
}

impl Body {
    pub fn new(polyhedron: Polyhedron, faces: Vec<Face>) -> Result<Self, GeometryError> {
        let non_finite = polyhedron
            .vertices()
            .iter()
            .position(|v| !v.iter().all(|c| c.is_finite()));
        if let Some(vertex) = non_finite {
            return Err(GeometryError::NonFiniteVertex { vertex });
        }
        let n = polyhedron.len();
        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeometryError::FaceTooSmall {
                    face: fi,
                    len: face.len(),
                });
            }
            if let Some(&bad) = face.indices().iter().find(|&&i| i >= n) {
                return Err(GeometryError::IndexOutOfRange {
                    face: fi,
                    index: bad,
                    vertices: n,
                });
            }
        }
        Ok(Self { polyhedron, faces })
    }

    /// Convenience constructor from raw arrays.
    pub fn from_raw(vertices: &[[f64; 3]], faces: &[&[usize]]) -> Result<Self, GeometryError> {
        let poly = Polyhedron::new(vertices.iter().map(|v| Vector3::from(*v)).collect());
        let faces = faces.iter().map(|f| Face::new(f.to_vec())).collect();
        Self::new(poly, faces)
    }

    #[inline]
    pub fn polyhedron(&self) -> &Polyhedron {
        &self.polyhedron
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Shift every vertex by `t`.
    ///
    /// `t` must be finite for the result to keep the finite-vertex invariant.
    pub fn translated(&self, t: Vector3<f64>) -> Self {
        let verts = self.polyhedron.vertices.iter().map(|v| v + t).collect();
        Self {
            polyhedron: Polyhedron::new(verts),
            faces: self.faces.clone(),
        }
    }
}

/// Immutable snapshot of every body drawn in one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    bodies: Vec<Body>,
}

impl Scene {
    #[inline]
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Total face count across all bodies.
    pub fn face_count(&self) -> usize {
        self.bodies.iter().map(|b| b.faces.len()).sum()
    }
}

impl FromIterator<Body> for Scene {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Axis-aligned box `[min, max]` per axis; used for viewport limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3 {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Bounds3 {
    /// `[-half, half]` on all three axes.
    #[inline]
    pub fn symmetric(half: f64) -> Self {
        let h = half.abs();
        Self {
            min: Vector3::repeat(-h),
            max: Vector3::repeat(h),
        }
    }

    /// Smallest box containing all points, `None` for an empty input.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vector3<f64>>,
    {
        let mut it = points.into_iter();
        let first = *it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Some(Self { min, max })
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Vector3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(b.x, b.y, b.z),
            Vector3::new(a.x, b.y, b.z),
        ]
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::symmetric(3.0)
    }
}
