//! Draw targets for the painter.

use nalgebra::Vector3;

use super::FaceStyle;
use crate::geom3::Bounds3;

/// Canvas that accumulates filled polygons.
///
/// Later polygons are drawn over earlier ones; that is the whole occlusion model.
pub trait Surface {
    /// Drop everything drawn so far.
    fn clear(&mut self);
    /// Add one opaque filled polygon on top of the current contents.
    fn fill_polygon(&mut self, polygon: &[Vector3<f64>], style: &FaceStyle);
    /// Make the current contents visible.
    fn flush(&mut self);
    /// Fix the viewport limits on all three axes.
    fn set_bounds(&mut self, bounds: Bounds3);
}

/// One call received by a `RecordingSurface`.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Clear,
    Fill {
        polygon: Vec<Vector3<f64>>,
        style: FaceStyle,
    },
    Flush,
    SetBounds(Bounds3),
}

/// Keeps every call in order; handy as a test oracle and for dumps.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygons currently on the canvas, bottom first.
    pub fn polygons(&self) -> Vec<&[Vector3<f64>]> {
        let start = self
            .events
            .iter()
            .rposition(|e| matches!(e, SurfaceEvent::Clear))
            .map_or(0, |i| i + 1);
        self.events[start..]
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Fill { polygon, .. } => Some(polygon.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Flush))
            .count()
    }

    /// Most recent bounds, if any were set.
    pub fn bounds(&self) -> Option<Bounds3> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::SetBounds(b) => Some(*b),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Clear);
    }
    fn fill_polygon(&mut self, polygon: &[Vector3<f64>], style: &FaceStyle) {
        self.events.push(SurfaceEvent::Fill {
            polygon: polygon.to_vec(),
            style: *style,
        });
    }
    fn flush(&mut self) {
        self.events.push(SurfaceEvent::Flush);
    }
    fn set_bounds(&mut self, bounds: Bounds3) {
        self.events.push(SurfaceEvent::SetBounds(bounds));
    }
}
