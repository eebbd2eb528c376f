//! Render trigger: optional regenerate, then paint the current scene.

use crate::geom3::Scene;
use crate::provider::{GeometryProvider, ProviderError};
use crate::render::surface::Surface;
use crate::render::{Pacer, RenderStats, Renderer};

/// What a trigger did.
#[derive(Debug)]
pub struct TriggerOutcome {
    pub stats: RenderStats,
    /// Set when the count input was rejected and the previous scene was drawn.
    pub rejected: Option<ProviderError>,
}

/// Owns the provider and the renderer; one `trigger` = one render pass.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub provider: GeometryProvider,
    pub renderer: Renderer,
}

impl Viewer {
    pub fn new(provider: GeometryProvider, renderer: Renderer) -> Self {
        Self { provider, renderer }
    }

    /// Handle a "render" request.
    ///
    /// A count, when given, regenerates the scene first. An invalid count is
    /// reported in the outcome and the previous scene is rendered instead. The
    /// scene is snapshotted once; the render then runs to completion.
    pub fn trigger<S, P>(
        &mut self,
        count_input: Option<&str>,
        surface: &mut S,
        pacer: &mut P,
    ) -> TriggerOutcome
    where
        S: Surface + ?Sized,
        P: Pacer + ?Sized,
    {
        let rejected = count_input.and_then(|input| {
            self.provider.regenerate_from_input(input).err()
        });
        let scene: Scene = self.provider.snapshot();
        let stats = self.renderer.render(&scene, surface, pacer);
        TriggerOutcome { stats, rejected }
    }
}
