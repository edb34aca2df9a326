//! Curated surface for the rendering layer.
//!
//! The rendering/animation layer consumes the core through three questions
//! only: "give me a transformed copy", "give me a clipped representation", and
//! "draw yourself into this surface". This module re-exports exactly those.

pub use crate::draw::{merge_options, DrawOptions, Recorder, Surface};
pub use crate::geom::{lorentz_boosted, lorentz_transformed, Bounds, Lims, Shape, Transformable};

use crate::geom::{Event, HalfRibbon, Line, Ray, Ribbon};

/// Window-clipped polygon of a ribbon, ordered around its centroid.
///
/// Empty when the ribbon does not reach into the window.
pub fn clipped_ribbon(ribbon: &Ribbon, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
    ribbon.vertices(tlim, xlim)
}

/// Window-clipped polygon of a half ribbon. See [`clipped_ribbon`].
pub fn clipped_half_ribbon(
    ribbon: &HalfRibbon,
    tlim: (f64, f64),
    xlim: (f64, f64),
) -> Vec<Event> {
    ribbon.vertices(tlim, xlim)
}

/// Window-boundary crossings of a line, sorted by `(t, x)`.
pub fn clipped_line(line: &Line, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
    line.boundary_intersections(tlim, xlim)
}

/// Window-boundary crossings of a ray plus its anchor, sorted by `(t, x)`.
pub fn clipped_ray(ray: &Ray, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
    ray.boundary_intersections(tlim, xlim)
}
