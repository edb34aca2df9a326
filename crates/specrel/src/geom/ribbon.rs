//! Regions bounded by two parallel lines or two parallel rays.
//!
//! Purpose
//! - `Ribbon`: the strip between two parallel lines.
//! - `HalfRibbon`: the strip between two parallel rays, closed off by the
//!   segment joining their anchors.
//!
//! Why this design
//! - Clipping does not build a polygon from the boundaries. It collects
//!   candidate vertices (window crossings of every boundary plus the four
//!   window corners), keeps those inside both the window and the region, and
//!   orders them by angle about their centroid. The region is convex, so the
//!   angular order is the perimeter order.
//!
//! Assumptions
//! - Membership is decided on values rounded to the boundaries' precision.
//! - Coincident boundaries degenerate to drawing a single line or ray.

use std::cmp::Ordering;

use nalgebra::Vector2;
use serde_json::{json, Value};

use crate::config::DEFAULT_EDGECOLOR;
use crate::draw::{merge_options, DrawOptions, Surface};
use crate::error::{GeomError, Result};

use super::event::{round_to, Event};
use super::line::{same_slope, Line, Ray};
use super::transform::{Bounds, Lims, Transformable};

/// Strip between two parallel lines.
#[derive(Clone, Debug)]
pub struct Ribbon {
    lines: [Line; 2],
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
    edgecolor: String,
}

impl Ribbon {
    /// Fails with [`GeomError::NotParallel`] unless the slopes agree.
    pub fn new(first: Line, second: Line) -> Result<Self> {
        let precision = first.precision().min(second.precision());
        if !same_slope(first.slope(), second.slope(), precision) {
            return Err(GeomError::NotParallel);
        }
        Ok(Self::from_parallel(first, second))
    }

    /// Caller guarantees the lines are parallel.
    pub(crate) fn from_parallel(first: Line, second: Line) -> Self {
        Self {
            lines: [first, second],
            tag: None,
            draw_options: DrawOptions::new(),
            edgecolor: DEFAULT_EDGECOLOR.to_owned(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.draw_options = draw_options;
        self
    }

    /// Edge color used when the draw style names none; `"none"` disables edges.
    pub fn with_edgecolor(mut self, edgecolor: impl Into<String>) -> Self {
        self.edgecolor = edgecolor.into();
        self
    }

    #[inline]
    pub fn lines(&self) -> &[Line; 2] {
        &self.lines
    }

    pub fn edgecolor(&self) -> &str {
        &self.edgecolor
    }

    /// Inclusive membership test.
    pub fn point_inside(&self, point: &Event) -> bool {
        let [first, second] = &self.lines;
        let precision = first.precision().min(second.precision()).min(point.precision);
        between_boundaries(
            first.direction(),
            [first.anchor(), second.anchor()],
            point,
            precision,
        )
    }

    /// Clipped region within the window, in perimeter order; empty when the
    /// region misses the window.
    pub fn vertices(&self, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
        let crossings = self
            .lines
            .iter()
            .flat_map(|line| line.boundary_intersections(tlim, xlim));
        clip_region(crossings, tlim, xlim, |p| self.point_inside(p))
    }
}

impl Transformable for Ribbon {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        for line in &mut self.lines {
            line.lorentz_transform(velocity, origin);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let style = merge_options(&self.draw_options, style);
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let [first, second] = &self.lines;
        if first == second {
            let mut line = first.clone();
            line.tag = self.tag.clone();
            let (tlim, xlim) = bounds.as_lims();
            line.draw(surface, tlim, xlim, &style);
            return;
        }
        let vertices = self.vertices(bounds.tlim, bounds.xlim);
        draw_region(
            surface,
            &self.lines,
            &vertices,
            self.tag.as_deref(),
            bounds,
            style,
            &self.edgecolor,
        );
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        let [first, second] = &self.lines;
        Some(first.auto_draw_lims()?.union(&second.auto_draw_lims()?))
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Strip between two parallel, same-facing rays.
#[derive(Clone, Debug)]
pub struct HalfRibbon {
    rays: [Ray; 2],
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
    edgecolor: String,
}

impl HalfRibbon {
    /// Fails with [`GeomError::NotParallel`] on differing slopes and with
    /// [`GeomError::AntiParallel`] on opposite orientations.
    pub fn new(first: Ray, second: Ray) -> Result<Self> {
        let precision = first.precision().min(second.precision());
        if !same_slope(first.slope(), second.slope(), precision) {
            return Err(GeomError::NotParallel);
        }
        let (d0, d1) = (first.direction(), second.direction());
        if d0.t * d1.t < 0.0 || d0.x * d1.x < 0.0 {
            return Err(GeomError::AntiParallel);
        }
        Ok(Self {
            rays: [first, second],
            tag: None,
            draw_options: DrawOptions::new(),
            edgecolor: DEFAULT_EDGECOLOR.to_owned(),
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.draw_options = draw_options;
        self
    }

    pub fn with_edgecolor(mut self, edgecolor: impl Into<String>) -> Self {
        self.edgecolor = edgecolor.into();
        self
    }

    #[inline]
    pub fn rays(&self) -> &[Ray; 2] {
        &self.rays
    }

    pub fn edgecolor(&self) -> &str {
        &self.edgecolor
    }

    /// Line through both anchors; `None` when the anchors coincide.
    fn anchor_line(&self) -> Option<Line> {
        let [first, second] = &self.rays;
        Line::new(second.anchor() - first.anchor(), first.anchor()).ok()
    }

    /// Inclusive membership: on the rays' side of the anchor line and between
    /// the two rays.
    pub fn point_inside(&self, point: &Event) -> bool {
        let [first, second] = &self.rays;
        let precision = first.precision().min(second.precision()).min(point.precision);
        let separation = second.anchor().vector() - first.anchor().vector();
        // Normal to the anchor line that points away from the rays.
        let normal = Vector2::new(-separation[1], separation[0]);
        let normal = if normal.dot(&first.direction().vector()) <= 0.0 {
            normal
        } else {
            -normal
        };
        let displacement = first.anchor().vector() - point.vector();
        round_to(displacement.dot(&normal), precision) >= 0.0
            && between_boundaries(
                first.direction(),
                [first.anchor(), second.anchor()],
                point,
                precision,
            )
    }

    pub fn vertices(&self, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
        let mut crossings: Vec<Event> = self
            .rays
            .iter()
            .flat_map(|ray| ray.boundary_intersections(tlim, xlim))
            .collect();
        if let Some(line) = self.anchor_line() {
            crossings.extend(line.boundary_intersections(tlim, xlim));
        }
        clip_region(crossings, tlim, xlim, |p| self.point_inside(p))
    }
}

impl Transformable for HalfRibbon {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        for ray in &mut self.rays {
            ray.lorentz_transform(velocity, origin);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let style = merge_options(&self.draw_options, style);
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let [first, second] = &self.rays;
        if first == second {
            let mut ray = first.clone();
            ray.set_tag(self.tag.clone());
            let (tlim, xlim) = bounds.as_lims();
            ray.draw(surface, tlim, xlim, &style);
            return;
        }
        let vertices = self.vertices(bounds.tlim, bounds.xlim);
        draw_region(
            surface,
            &self.rays,
            &vertices,
            self.tag.as_deref(),
            bounds,
            style,
            &self.edgecolor,
        );
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        let [first, second] = &self.rays;
        Some(first.auto_draw_lims()?.union(&second.auto_draw_lims()?))
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Whether `point` lies between the two parallel lines through `anchors`
/// with common `direction`, boundaries included.
fn between_boundaries(direction: &Event, anchors: [&Event; 2], point: &Event, precision: u32) -> bool {
    // Constant along any line with this direction.
    let constant = |p: &Event| round_to(direction.x * p.t - direction.t * p.x, precision);
    let (a, b) = (constant(anchors[0]), constant(anchors[1]));
    let k = constant(point);
    k >= a.min(b) && k <= a.max(b)
}

/// Candidate vertices filtered by window and region membership, ordered by
/// angle about their centroid.
fn clip_region(
    crossings: impl IntoIterator<Item = Event>,
    tlim: (f64, f64),
    xlim: (f64, f64),
    inside: impl Fn(&Event) -> bool,
) -> Vec<Event> {
    let corners = [
        Event::new(tlim.0, xlim.0),
        Event::new(tlim.0, xlim.1),
        Event::new(tlim.1, xlim.0),
        Event::new(tlim.1, xlim.1),
    ];
    let mut candidates: Vec<Event> = Vec::new();
    for p in crossings.into_iter().chain(corners) {
        if !candidates.contains(&p) {
            candidates.push(p);
        }
    }
    candidates.retain(|p| p.in_bounds(tlim, xlim) && inside(p));
    if candidates.is_empty() {
        return candidates;
    }
    let n = candidates.len() as f64;
    let center = candidates
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.vector())
        / n;
    let angle = |p: &Event| (p.t - center[0]).atan2(p.x - center[1]);
    candidates.sort_by(|a, b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));
    candidates
}

/// Fill the clipped region, then stroke its boundaries unless edges are off.
///
/// `edgecolor` in the style wins over `default_edgecolor`; a `color` entry
/// wins over both for the edges. The fill's `facecolor` and `label` never
/// reach the edges, and edges share the fill's `zorder` (default 1).
fn draw_region<B: Transformable>(
    surface: &mut dyn Surface,
    boundaries: &[B; 2],
    vertices: &[Event],
    tag: Option<&str>,
    bounds: Bounds,
    mut style: DrawOptions,
    default_edgecolor: &str,
) {
    if vertices.is_empty() {
        tracing::debug!("region does not intersect the draw window");
        return;
    }
    let mut edgecolor = style
        .remove("edgecolor")
        .unwrap_or_else(|| Value::from(default_edgecolor));
    surface.draw_shaded_polygon(vertices, tag, &style);
    let edges_off = edgecolor
        .as_str()
        .is_some_and(|c| c.eq_ignore_ascii_case("none"));
    if !edges_off {
        style.remove("facecolor");
        style.remove("label");
        if let Some(color) = style.remove("color") {
            edgecolor = color;
        }
        let zorder = style.remove("zorder").unwrap_or_else(|| json!(1));
        style.insert("color".into(), edgecolor);
        style.insert("zorder".into(), zorder);
        let (tlim, xlim) = bounds.as_lims();
        for boundary in boundaries {
            boundary.draw(surface, tlim, xlim, &style);
        }
    }
    surface.set_view_limits(bounds.tlim, bounds.xlim);
}
