//! SVG surface: orthographic projection of the painted polygons.
//!
//! Polygons are written in paint order, so the SVG renderer's own "later
//! elements cover earlier ones" rule reproduces the painter's occlusion. The
//! view is a fixed orthographic camera given by elevation/azimuth (degrees),
//! defaulting to 30°/−60°.
//!
//! A frame sink, when attached, receives the full document at every flush so
//! each partial state is visible before the renderer pauses. Frames are
//! handed off immediately and never retained.

use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::io;

use super::surface::Surface;
use super::{FaceStyle, Rgb};
use crate::geom3::Bounds3;

/// Fixed orthographic view direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            elevation_deg: 30.0,
            azimuth_deg: -60.0,
        }
    }
}

impl Projection {
    /// Screen coordinates `(u, v)` with `v` pointing up.
    pub fn project(&self, p: &Vector3<f64>) -> Vector2<f64> {
        let (se, ce) = self.elevation_deg.to_radians().sin_cos();
        let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
        let u = -p.x * sa + p.y * ca;
        let v = -(p.x * ca + p.y * sa) * se + p.z * ce;
        Vector2::new(u, v)
    }
}

/// 2D rectangle in screen units.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Rect {
    min: Vector2<f64>,
    max: Vector2<f64>,
}

impl Rect {
    fn enclosing<I: IntoIterator<Item = Vector2<f64>>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
        Some(Self { min, max })
    }
}

/// Receives `(flush index, document)` at every flush.
pub type FrameSink = Box<dyn FnMut(usize, &str) -> io::Result<()>>;

/// Accumulating SVG canvas.
pub struct SvgSurface {
    pub projection: Projection,
    /// Output size in pixels (square).
    pub size_px: u32,
    pub background: Rgb,
    /// Draw the bounds box once bounds are fixed.
    pub show_bounds: bool,
    polygons: Vec<(Vec<Vector3<f64>>, FaceStyle)>,
    bounds: Option<Bounds3>,
    sink: Option<FrameSink>,
    sink_error: Option<io::Error>,
    flushes: usize,
}

impl fmt::Debug for SvgSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgSurface")
            .field("projection", &self.projection)
            .field("size_px", &self.size_px)
            .field("polygons", &self.polygons.len())
            .field("bounds", &self.bounds)
            .field("sink", &self.sink.is_some())
            .field("flushes", &self.flushes)
            .finish()
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            size_px: 600,
            background: Rgb::WHITE,
            show_bounds: true,
            polygons: Vec::new(),
            bounds: None,
            sink: None,
            sink_error: None,
            flushes: 0,
        }
    }
}

const MARGIN_PX: f64 = 20.0;

impl SvgSurface {
    pub fn new(projection: Projection, size_px: u32) -> Self {
        Self {
            projection,
            size_px,
            ..Self::default()
        }
    }

    /// Stream a full document to `sink` on every flush.
    ///
    /// The first sink error stops streaming; it is kept for `take_sink_error`.
    pub fn with_frame_sink<F>(mut self, sink: F) -> Self
    where
        F: FnMut(usize, &str) -> io::Result<()> + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    #[inline]
    pub fn is_streaming(&self) -> bool {
        self.sink.is_some()
    }

    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn take_sink_error(&mut self) -> Option<io::Error> {
        self.sink_error.take()
    }

    /// Screen rectangle shown: the fixed bounds if set, else the drawn geometry.
    fn viewport(&self) -> Rect {
        let proj = &self.projection;
        let fitted = match &self.bounds {
            Some(b) => Rect::enclosing(b.corners().iter().map(|c| proj.project(c))),
            None => Rect::enclosing(
                self.polygons
                    .iter()
                    .flat_map(|(poly, _)| poly.iter().map(|p| proj.project(p))),
            ),
        };
        fitted.unwrap_or(Rect {
            min: Vector2::new(-1.0, -1.0),
            max: Vector2::new(1.0, 1.0),
        })
    }

    /// Current contents as a standalone SVG document.
    pub fn document(&self) -> String {
        let size = f64::from(self.size_px);
        let view = self.viewport();
        let extent = view.max - view.min;
        let span = extent.x.max(extent.y).max(1e-9);
        let scale = (size - 2.0 * MARGIN_PX).max(1.0) / span;
        let offset = Vector2::new(
            MARGIN_PX + (span - extent.x) * 0.5 * scale,
            MARGIN_PX + (span - extent.y) * 0.5 * scale,
        );
        let to_px = |p: &Vector3<f64>| {
            let s = self.projection.project(p);
            Vector2::new(
                offset.x + (s.x - view.min.x) * scale,
                offset.y + (view.max.y - s.y) * scale,
            )
        };

        let mut out = String::with_capacity(256 + 128 * self.polygons.len());
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
            self.size_px
        ));
        out.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            self.background
        ));
        if let (true, Some(b)) = (self.show_bounds, &self.bounds) {
            out.push_str(&bounds_box(b, &to_px));
        }
        for (poly, style) in &self.polygons {
            let points: Vec<String> = poly
                .iter()
                .map(|p| {
                    let q = to_px(p);
                    format!("{:.2},{:.2}", q.x, q.y)
                })
                .collect();
            out.push_str(&format!(
                "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"1\" stroke-linejoin=\"round\"/>\n",
                points.join(" "),
                style.fill,
                style.opacity.clamp(0.0, 1.0),
                style.edge
            ));
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Wireframe of the bounds box plus X/Y/Z labels at the far ends of the three
/// edges leaving the min corner.
fn bounds_box<F: Fn(&Vector3<f64>) -> Vector2<f64>>(b: &Bounds3, to_px: &F) -> String {
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let corners = b.corners();
    let mut out = String::from("<g stroke=\"#c0c0c0\" stroke-width=\"0.5\" fill=\"none\">\n");
    for (i, j) in EDGES {
        let (p, q) = (to_px(&corners[i]), to_px(&corners[j]));
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
            p.x, p.y, q.x, q.y
        ));
    }
    out.push_str("</g>\n");
    for (label, corner) in [("X", 1), ("Y", 3), ("Z", 4)] {
        let p = to_px(&corners[corner]);
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" fill=\"#606060\">{label}</text>\n",
            p.x, p.y
        ));
    }
    out
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.polygons.clear();
        self.bounds = None;
    }
    fn fill_polygon(&mut self, polygon: &[Vector3<f64>], style: &FaceStyle) {
        self.polygons.push((polygon.to_vec(), *style));
    }
    fn flush(&mut self) {
        let index = self.flushes;
        self.flushes += 1;
        if self.sink.is_none() {
            return;
        }
        let doc = self.document();
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink(index, &doc) {
                tracing::warn!(index, error = %e, "frame sink failed; streaming stopped");
                self.sink = None;
                self.sink_error = Some(e);
            }
        }
    }
    fn set_bounds(&mut self, bounds: Bounds3) {
        self.bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn front_view_drops_depth() {
        // Looking along +y: azimuth -90, elevation 0 gives u = x, v = z.
        let proj = Projection {
            elevation_deg: 0.0,
            azimuth_deg: -90.0,
        };
        let a = proj.project(&vector![1.0, 5.0, 2.0]);
        let b = proj.project(&vector![1.0, -5.0, 2.0]);
        assert!((a - vector![1.0, 2.0]).norm() < 1e-12);
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn document_lists_polygons_in_paint_order() {
        let mut s = SvgSurface::default();
        let back = FaceStyle {
            fill: Rgb::new(1, 2, 3),
            ..FaceStyle::default()
        };
        let front = FaceStyle::default();
        let tri = [Vector3::zeros(), vector![1.0, 0.0, 0.0], vector![0.0, 0.0, 1.0]];
        s.fill_polygon(&tri, &back);
        s.fill_polygon(&tri, &front);
        let doc = s.document();
        let i_back = doc.find("#010203").unwrap();
        let i_front = doc.find("fill=\"#808080\"").unwrap();
        assert!(i_back < i_front);
        assert_eq!(doc.matches("<polygon").count(), 2);
        assert!(doc.contains("stroke=\"#000000\""));
    }

    fn collecting_sink() -> (Rc<RefCell<Vec<(usize, String)>>>, SvgSurface) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let s = SvgSurface::default().with_frame_sink(move |i, doc| {
            sink.borrow_mut().push((i, doc.to_owned()));
            Ok(())
        });
        (seen, s)
    }

    #[test]
    fn sink_sees_each_flush_as_it_happens() {
        let (seen, mut s) = collecting_sink();
        let tri = [Vector3::zeros(), vector![1.0, 0.0, 0.0], vector![0.0, 0.0, 1.0]];
        s.flush();
        assert_eq!(seen.borrow().len(), 1);
        s.fill_polygon(&tri, &FaceStyle::default());
        s.flush();
        assert_eq!(seen.borrow().len(), 2);
        s.set_bounds(Bounds3::default());
        s.flush();
        let frames = seen.borrow();
        let idx: Vec<usize> = frames.iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(frames[0].1.matches("<polygon").count(), 0);
        assert_eq!(frames[1].1.matches("<polygon").count(), 1);
        assert!(!frames[1].1.contains("<line"));
        assert!(frames[2].1.contains("<line"));
        assert_eq!(s.flush_count(), 3);
    }

    #[test]
    fn sink_backed_render_keeps_no_frames() {
        use crate::geom3::Scene;
        use crate::render::{NoPause, Renderer};
        use crate::shapes::rand::{SampleCfg, ShapeSampler};

        let streamed = Rc::new(RefCell::new((0usize, String::new())));
        let last = Rc::clone(&streamed);
        let mut s = SvgSurface::default().with_frame_sink(move |_, doc| {
            let mut last = last.borrow_mut();
            last.0 += 1;
            last.1 = doc.to_owned();
            Ok(())
        });
        let mut sampler = ShapeSampler::new(SampleCfg::default(), 3).unwrap();
        let scene: Scene = sampler.sample_bodies(20).unwrap().into_iter().collect();
        let stats = Renderer::default().render(&scene, &mut s, &mut NoPause);

        let (count, final_frame) = streamed.borrow().clone();
        assert_eq!(count, stats.faces + 1);
        assert_eq!(s.flush_count(), count);
        // The surface holds only the live canvas, which matches the last frame.
        assert_eq!(s.polygon_count(), stats.faces);
        assert_eq!(s.document(), final_frame);
    }

    #[test]
    fn sink_error_stops_streaming() {
        let calls = Rc::new(RefCell::new(0usize));
        let c = Rc::clone(&calls);
        let mut s = SvgSurface::default().with_frame_sink(move |_, _| {
            *c.borrow_mut() += 1;
            Err(io::Error::other("disk full"))
        });
        s.flush();
        s.flush();
        assert_eq!(*calls.borrow(), 1);
        assert!(!s.is_streaming());
        assert_eq!(s.flush_count(), 2);
        let err = s.take_sink_error().unwrap();
        assert_eq!(err.to_string(), "disk full");
        assert!(s.take_sink_error().is_none());
    }

    #[test]
    fn fixed_bounds_stabilize_the_viewport() {
        let mut s = SvgSurface::default();
        s.set_bounds(Bounds3::default());
        s.fill_polygon(
            &[Vector3::zeros(), vector![0.1, 0.0, 0.0], vector![0.0, 0.0, 0.1]],
            &FaceStyle::default(),
        );
        let small = s.document();
        s.fill_polygon(
            &[Vector3::zeros(), vector![2.0, 0.0, 0.0], vector![0.0, 0.0, 2.0]],
            &FaceStyle::default(),
        );
        let big = s.document();
        // First polygon keeps its pixel coordinates once bounds are fixed.
        let first = |d: &str| d.lines().find(|l| l.starts_with("<polygon")).map(str::to_owned);
        assert_eq!(first(&small), first(&big));
    }

    #[test]
    fn clear_resets_canvas() {
        let mut s = SvgSurface::default();
        s.fill_polygon(
            &[Vector3::zeros(), vector![1.0, 0.0, 0.0], vector![0.0, 0.0, 1.0]],
            &FaceStyle::default(),
        );
        s.set_bounds(Bounds3::default());
        s.clear();
        assert_eq!(s.polygon_count(), 0);
        assert!(!s.document().contains("<polygon"));
    }
}
