//! Geometry provider: owns the current scene and regenerates it on request.
//!
//! The provider is the only mutable holder of geometry. Renders take a
//! `Scene` snapshot (a value) up front, so regenerating never affects a render
//! that already started. Invalid shape counts are rejected here: the error is
//! logged and returned, and the scene is left exactly as it was.

use std::fmt;
use std::num::NonZeroUsize;

use nalgebra::Vector3;

use crate::geom3::Scene;
use crate::shapes::rand::{SampleCfg, ShapeSampler};
use crate::shapes::{ShapeError, ShapeSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    InvalidCount { input: String },
    Shape(ShapeError),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCount { input } => {
                write!(f, "shape count must be a positive integer, got {input:?}")
            }
            Self::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::InvalidCount { .. } => None,
        }
    }
}

impl From<ShapeError> for ProviderError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

/// Parse a user-entered shape count. Surrounding whitespace is ignored.
///
/// Non-integers, zero, and negative values are rejected.
pub fn parse_shape_count(input: &str) -> Result<NonZeroUsize, ProviderError> {
    input
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ProviderError::InvalidCount {
            input: input.to_string(),
        })
}

/// The two-cube demo: a 2×2×2 cube at the origin and a unit cube spanning
/// `[0,1] × [-3,-2] × [0,1]`.
pub fn demo_scene() -> Scene {
    let specs = [
        ShapeSpec::cube(Vector3::zeros(), 2.0),
        ShapeSpec::cuboid_between(Vector3::new(0.0, -3.0, 0.0), Vector3::new(1.0, -2.0, 1.0)),
    ];
    specs.iter().filter_map(|s| s.build().ok()).collect()
}

/// Mutable owner of the scene being visualized.
#[derive(Clone, Debug)]
pub struct GeometryProvider {
    scene: Scene,
    sampler: ShapeSampler,
}

impl GeometryProvider {
    pub fn new(scene: Scene, cfg: SampleCfg, seed: u64) -> Result<Self, ProviderError> {
        Ok(Self {
            scene,
            sampler: ShapeSampler::new(cfg, seed)?,
        })
    }

    /// Demo scene with the default sampler.
    pub fn with_seed(seed: u64) -> Result<Self, ProviderError> {
        Self::new(demo_scene(), SampleCfg::default(), seed)
    }

    /// Immutable copy of the current scene.
    pub fn snapshot(&self) -> Scene {
        self.scene.clone()
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the scene wholesale.
    pub fn replace(&mut self, scene: Scene) {
        self.scene = scene;
    }

    /// Replace every body with `count` freshly sampled shapes.
    ///
    /// The scene is only swapped once all bodies are built.
    pub fn regenerate(&mut self, count: NonZeroUsize) -> Result<&Scene, ProviderError> {
        let bodies = self.sampler.sample_bodies(count.get())?;
        self.scene = Scene::new(bodies);
        tracing::debug!(
            count = count.get(),
            faces = self.scene.face_count(),
            "regenerated scene"
        );
        Ok(&self.scene)
    }

    /// Parse `input` and regenerate; on error warn and keep the current scene.
    pub fn regenerate_from_input(&mut self, input: &str) -> Result<&Scene, ProviderError> {
        match parse_shape_count(input) {
            Ok(count) => self.regenerate(count),
            Err(err) => {
                tracing::warn!(input, %err, "ignoring shape count; keeping current scene");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_positive_integers() {
        assert_eq!(parse_shape_count("3").unwrap().get(), 3);
        assert_eq!(parse_shape_count("  12\n").unwrap().get(), 12);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["-5", "abc", "0", "", "2.5", "1e3"] {
            assert!(
                matches!(parse_shape_count(bad), Err(ProviderError::InvalidCount { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn demo_scene_has_two_cubes() {
        let s = demo_scene();
        assert_eq!(s.bodies().len(), 2);
        assert_eq!(s.face_count(), 12);
    }

    #[test]
    fn invalid_input_keeps_scene() {
        let mut p = GeometryProvider::with_seed(5).unwrap();
        let before = p.snapshot();
        for bad in ["-5", "abc"] {
            assert!(p.regenerate_from_input(bad).is_err());
            assert_eq!(p.scene(), &before);
        }
    }

    #[test]
    fn regenerate_replaces_all_bodies() {
        let mut p = GeometryProvider::with_seed(5).unwrap();
        let scene = p.regenerate_from_input("4").unwrap();
        assert_eq!(scene.bodies().len(), 4);
        assert_ne!(p.snapshot(), demo_scene());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut p = GeometryProvider::with_seed(11).unwrap();
        let snap = p.snapshot();
        p.regenerate(NonZeroUsize::new(3).unwrap()).unwrap();
        assert_eq!(snap, demo_scene());
    }

    #[test]
    fn same_seed_same_scene() {
        let mut a = GeometryProvider::with_seed(77).unwrap();
        let mut b = GeometryProvider::with_seed(77).unwrap();
        let n = NonZeroUsize::new(6).unwrap();
        assert_eq!(a.regenerate(n).unwrap(), b.regenerate(n).unwrap());
    }
}
