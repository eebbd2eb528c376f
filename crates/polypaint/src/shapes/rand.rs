//! Random shape specs (uniform kind, center, and size) with replay tokens.
//!
//! Model
//! - Kind is uniform over `ShapeKind::ALL`.
//! - Center is uniform in `[-center_range, center_range]^3`.
//! - Size is uniform in `[size_min, size_max]`; cuboids draw one size per axis,
//!   every other kind draws a single uniform size.
//! - Determinism: each draw is addressed by `(seed, index)`, mixed into its own
//!   `StdRng`, so any draw can be replayed without re-running the stream.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ShapeError, ShapeKind, ShapeSpec};
use crate::geom3::Body;

/// Sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCfg {
    /// Half width of the cube centers are drawn from.
    pub center_range: f64,
    /// Smallest edge length (cubes/cuboids) or twice the radius (tetra/octa).
    pub size_min: f64,
    pub size_max: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            center_range: 2.0,
            size_min: 0.5,
            size_max: 1.5,
        }
    }
}

impl SampleCfg {
    pub fn validate(&self) -> Result<(), ShapeError> {
        if !(self.center_range.is_finite() && self.center_range >= 0.0) {
            return Err(ShapeError::invalid(
                "center_range must be finite and non-negative",
            ));
        }
        if !(self.size_min.is_finite() && self.size_max.is_finite()) {
            return Err(ShapeError::invalid("size bounds must be finite"));
        }
        if self.size_min <= 0.0 {
            return Err(ShapeError::invalid("size_min must be > 0"));
        }
        if self.size_min > self.size_max {
            return Err(ShapeError::invalid("size_min <= size_max required"));
        }
        Ok(())
    }
}

/// Address of a single draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one spec for `tok`.
pub fn draw_shape(cfg: &SampleCfg, tok: ReplayToken) -> ShapeSpec {
    let mut rng = tok.to_std_rng();
    let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
    let r = cfg.center_range;
    let center = if r > 0.0 {
        Vector3::from_fn(|_, _| rng.gen_range(-r..=r))
    } else {
        Vector3::zeros()
    };
    let mut size = || rng.gen_range(cfg.size_min..=cfg.size_max);
    match kind {
        ShapeKind::Cube => ShapeSpec::cube(center, size()),
        ShapeKind::Cuboid => ShapeSpec::cuboid(center, Vector3::new(size(), size(), size())),
        ShapeKind::Tetrahedron => ShapeSpec::tetrahedron(center, size() * 0.5),
        ShapeKind::Octahedron => ShapeSpec::octahedron(center, size() * 0.5),
    }
}

/// Stream of random shapes for one seed.
#[derive(Clone, Debug)]
pub struct ShapeSampler {
    cfg: SampleCfg,
    seed: u64,
    next_index: u64,
}

impl ShapeSampler {
    pub fn new(cfg: SampleCfg, seed: u64) -> Result<Self, ShapeError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            seed,
            next_index: 0,
        })
    }

    #[inline]
    pub fn cfg(&self) -> &SampleCfg {
        &self.cfg
    }

    /// Next spec plus the token that replays it.
    pub fn next_spec(&mut self) -> (ShapeSpec, ReplayToken) {
        let tok = ReplayToken {
            seed: self.seed,
            index: self.next_index,
        };
        self.next_index = self.next_index.wrapping_add(1);
        (draw_shape(&self.cfg, tok), tok)
    }

    /// Replay a previous draw.
    pub fn regenerate(&self, tok: ReplayToken) -> ShapeSpec {
        draw_shape(&self.cfg, tok)
    }

    /// Next `n` bodies.
    pub fn sample_bodies(&mut self, n: usize) -> Result<Vec<Body>, ShapeError> {
        (0..n).map(|_| self.next_spec().0.build()).collect()
    }
}
