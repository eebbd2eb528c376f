//! Incremental painter: reveals sorted faces one at a time.
//!
//! Purpose
//! - Turn the back-to-front face list into draw commands and apply them to a
//!   `Surface`: per face `Fill → Flush → Pause`, then fix the viewport bounds and
//!   flush once more.
//!
//! Why this design
//! - The core never sleeps on its own. Pauses go through a `Pacer`, so a host
//!   can block (`SleepPacer`), pump its event loop (`FnPacer`), or skip pacing
//!   (`NoPause`). Hosts that want full control can pull `commands` directly and
//!   emit one command per frame.
//! - A render runs to completion; there is no cancellation.
//!
//! Code cross-refs: `crate::order::sort_faces`, `surface::Surface`, `svg::SvgSurface`

pub mod surface;
pub mod svg;

use nalgebra::Vector3;
use std::fmt;
use std::time::Duration;

use crate::geom3::{Axis, Bounds3, Scene};
use crate::order::{sort_faces, DepthKeyedFace};
use surface::Surface;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GREY: Rgb = Rgb::new(0x80, 0x80, 0x80);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// `#rrggbb`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill/edge colors for a face. Opacity is in `[0, 1]`; the painter uses 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceStyle {
    pub fill: Rgb,
    pub edge: Rgb,
    pub opacity: f64,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            fill: Rgb::GREY,
            edge: Rgb::BLACK,
            opacity: 1.0,
        }
    }
}

/// Renderer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCfg {
    /// Pause after each revealed face.
    pub step_delay: Duration,
    /// Viewport limits applied after the last face.
    pub bounds: Bounds3,
    pub style: FaceStyle,
    pub axis: Axis,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(300),
            bounds: Bounds3::default(),
            style: FaceStyle::default(),
            axis: Axis::Y,
        }
    }
}

/// One step of a render, in the order it must be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        step: usize,
        polygon: Vec<Vector3<f64>>,
        style: FaceStyle,
    },
    Flush,
    Pause(Duration),
    SetBounds(Bounds3),
}

/// Command stream for painting `faces` in the given order.
pub fn commands(
    faces: Vec<DepthKeyedFace>,
    cfg: &RenderCfg,
) -> impl Iterator<Item = DrawCommand> {
    let RenderCfg {
        step_delay,
        bounds,
        style,
        ..
    } = *cfg;
    std::iter::once(DrawCommand::Clear)
        .chain(faces.into_iter().enumerate().flat_map(move |(step, f)| {
            [
                DrawCommand::Fill {
                    step,
                    polygon: f.polygon,
                    style,
                },
                DrawCommand::Flush,
                DrawCommand::Pause(step_delay),
            ]
        }))
        .chain([DrawCommand::SetBounds(bounds), DrawCommand::Flush])
}

/// Decides what "wait between steps" means for the host.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Ignores pauses (batch output, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration) {}
}

/// Hands each pause to a host callback.
pub struct FnPacer<F: FnMut(Duration)>(pub F);

impl<F: FnMut(Duration)> Pacer for FnPacer<F> {
    fn pause(&mut self, delay: Duration) {
        (self.0)(delay)
    }
}

/// Summary of a finished render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    pub flushes: usize,
    /// Sum of the requested pauses.
    pub paused: Duration,
}

/// Apply one command.
pub fn apply<S, P>(cmd: DrawCommand, surface: &mut S, pacer: &mut P, stats: &mut RenderStats)
where
    S: Surface + ?Sized,
    P: Pacer + ?Sized,
{
    match cmd {
        DrawCommand::Clear => surface.clear(),
        DrawCommand::Fill {
            step,
            polygon,
            style,
        } => {
            tracing::trace!(step, vertices = polygon.len(), "fill");
            surface.fill_polygon(&polygon, &style);
            stats.faces += 1;
        }
        DrawCommand::Flush => {
            surface.flush();
            stats.flushes += 1;
        }
        DrawCommand::Pause(d) => {
            pacer.pause(d);
            stats.paused += d;
        }
        DrawCommand::SetBounds(b) => surface.set_bounds(b),
    }
}

/// Painter's-algorithm renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    pub cfg: RenderCfg,
}

impl Renderer {
    pub fn new(cfg: RenderCfg) -> Self {
        Self { cfg }
    }

    /// Paint an already ordered face list.
    pub fn paint<S, P>(
        &self,
        faces: Vec<DepthKeyedFace>,
        surface: &mut S,
        pacer: &mut P,
    ) -> RenderStats
    where
        S: Surface + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut stats = RenderStats::default();
        for cmd in commands(faces, &self.cfg) {
            apply(cmd, surface, pacer, &mut stats);
        }
        stats
    }

    /// Sort `scene` back to front and paint it.
    pub fn render<S, P>(&self, scene: &Scene, surface: &mut S, pacer: &mut P) -> RenderStats
    where
        S: Surface + ?Sized,
        P: Pacer + ?Sized,
    {
        let faces = sort_faces(scene, self.cfg.axis);
        tracing::debug!(
            bodies = scene.bodies().len(),
            faces = faces.len(),
            delay_ms = self.cfg.step_delay.as_millis() as u64,
            "render start"
        );
        let stats = self.paint(faces, surface, pacer);
        tracing::debug!(faces = stats.faces, flushes = stats.flushes, "render done");
        stats
    }
}
