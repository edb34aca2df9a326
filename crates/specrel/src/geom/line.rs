//! Infinite lines and rays in the `(t, x)` plane.
//!
//! Purpose
//! - Parametric line `anchor + k * direction`; a ray restricts `k >= 0`.
//! - Pairwise intersection and clipping against an axis-aligned window.
//!
//! Why this design
//! - Intersection returns a tagged result instead of a point-or-self union
//!   so callers always match on the three cases explicitly.
//! - A ray owns a line and reuses its intersection, then rejects points that
//!   fall behind the anchor.
//!
//! Assumptions
//! - A direction rounding to `(0, 0)` is rejected at construction.
//! - Parallel and coincident are decided on rounded quantities.

use std::cmp::Ordering;
use std::fmt;

use crate::draw::{merge_options, DrawOptions, Surface};
use crate::error::{GeomError, Result};

use super::event::{round_to, Event, DEFAULT_PRECISION};
use super::transform::{Bounds, Lims, Transformable, ORIGIN};

/// Outcome of intersecting with a line.
#[derive(Clone, Debug)]
pub enum Intersection<L> {
    /// Parallel and distinct.
    Disjoint,
    /// A single crossing event.
    Point(Event),
    /// Same locus; carries a copy of the receiver.
    Coincident(L),
}

impl<L> Intersection<L> {
    /// The crossing event, if there is exactly one.
    pub fn point(self) -> Option<Event> {
        match self {
            Intersection::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_coincident(&self) -> bool {
        matches!(self, Intersection::Coincident(_))
    }

    pub fn is_disjoint(&self) -> bool {
        matches!(self, Intersection::Disjoint)
    }
}

/// Line `anchor + k * direction` for all real `k`.
#[derive(Clone, Debug)]
pub struct Line {
    direction: Event,
    anchor: Event,
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
}

impl Line {
    pub fn new(direction: impl Into<Event>, anchor: impl Into<Event>) -> Result<Self> {
        Self::with_precision(direction, anchor, DEFAULT_PRECISION)
    }

    /// Both endpoints take `precision`; their other metadata is kept.
    pub fn with_precision(
        direction: impl Into<Event>,
        anchor: impl Into<Event>,
        precision: u32,
    ) -> Result<Self> {
        let direction: Event = direction.into();
        let anchor: Event = anchor.into();
        let direction = direction.with_precision(precision);
        let anchor = anchor.with_precision(precision);
        if direction == (0.0, 0.0) {
            return Err(GeomError::ZeroDirection);
        }
        Ok(Self::unchecked(direction, anchor))
    }

    /// Caller guarantees a non-zero direction.
    pub(crate) fn unchecked(direction: Event, anchor: Event) -> Self {
        Self {
            direction,
            anchor,
            tag: None,
            draw_options: DrawOptions::new(),
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

    #[inline]
    pub fn direction(&self) -> &Event {
        &self.direction
    }

    #[inline]
    pub fn anchor(&self) -> &Event {
        &self.anchor
    }

    /// Smaller of the direction and anchor precisions.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.direction.precision.min(self.anchor.precision)
    }

    /// `dt/dx`, or `None` for a line of constant position.
    pub fn slope(&self) -> Option<f64> {
        if self.direction.x == 0.0 {
            None
        } else {
            Some(self.direction.t / self.direction.x)
        }
    }

    /// Intersect with `other`; a crossing carries the smaller precision.
    pub fn intersect(&self, other: &Line) -> Intersection<Line> {
        let precision = self.precision().min(other.precision());
        let (sd, sa) = (&self.direction, &self.anchor);
        let (od, oa) = (&other.direction, &other.anchor);
        let num = oa.x * od.t - oa.t * od.x + od.x * sa.t - od.t * sa.x;
        let den = sd.x * od.t - sd.t * od.x;
        if round_to(den, precision) == 0.0 {
            return if round_to(num, precision) == 0.0 {
                Intersection::Coincident(self.clone())
            } else {
                Intersection::Disjoint
            };
        }
        let k = num / den;
        let crossing = Event::new(sa.t + k * sd.t, sa.x + k * sd.x).with_precision(precision);
        Intersection::Point(crossing)
    }

    /// Distinct crossings with the four window boundaries, sorted by `(t, x)`.
    /// Boundaries parallel to the line contribute nothing.
    pub fn boundary_intersections(&self, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
        window_crossings(tlim, xlim, |edge| self.intersect(edge).point())
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.intersect(other).is_coincident()
    }
}

fn parametric_str(line: &Line) -> String {
    let p = line.precision();
    format!(
        "[t, x] = [{}, {}] + k*[{}, {}]",
        round_to(line.anchor.t, p),
        round_to(line.anchor.x, p),
        round_to(line.direction.t, p),
        round_to(line.direction.x, p)
    )
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line( {} )", parametric_str(self))
    }
}

impl Transformable for Line {
    /// The anchor moves about `origin`; the direction is a displacement and
    /// transforms about the coordinate origin.
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        self.direction.lorentz_transform(velocity, ORIGIN);
        self.anchor.lorentz_transform(velocity, origin);
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let style = merge_options(&self.draw_options, style);
        let crossings = self.boundary_intersections(bounds.tlim, bounds.xlim);
        draw_clipped(crossings, self.tag.as_deref(), surface, bounds, &style);
    }

    /// Box spanned by `anchor - direction` and `anchor + direction`.
    fn auto_draw_lims(&self) -> Option<Bounds> {
        let forward = &self.anchor + &self.direction;
        let backward = &self.anchor - &self.direction;
        Some(Bounds::spanning(&backward, &forward))
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Half-line `anchor + k * direction` for `k >= 0`.
#[derive(Clone, Debug)]
pub struct Ray {
    pub(crate) line: Line,
}

impl Ray {
    pub fn new(direction: impl Into<Event>, anchor: impl Into<Event>) -> Result<Self> {
        Self::with_precision(direction, anchor, DEFAULT_PRECISION)
    }

    pub fn with_precision(
        direction: impl Into<Event>,
        anchor: impl Into<Event>,
        precision: u32,
    ) -> Result<Self> {
        Line::with_precision(direction, anchor, precision).map(Ray::from)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.line.tag = Some(tag.into());
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.line.draw_options = draw_options;
        self
    }

    /// The full line through this ray.
    #[inline]
    pub fn as_line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn direction(&self) -> &Event {
        self.line.direction()
    }

    /// Start of the ray.
    #[inline]
    pub fn anchor(&self) -> &Event {
        self.line.anchor()
    }

    #[inline]
    pub fn precision(&self) -> u32 {
        self.line.precision()
    }

    pub fn slope(&self) -> Option<f64> {
        self.line.slope()
    }

    pub fn tag(&self) -> Option<&str> {
        self.line.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.line.tag = tag;
    }

    pub fn draw_options(&self) -> &DrawOptions {
        &self.line.draw_options
    }

    /// `(point - anchor) · direction`; negative behind the anchor.
    pub fn point_dotprod(&self, point: &Event) -> f64 {
        (point.vector() - self.anchor().vector()).dot(&self.direction().vector())
    }

    /// Intersect as a line, then drop crossings behind the anchor.
    pub fn intersect(&self, other: &Line) -> Intersection<Ray> {
        match self.line.intersect(other) {
            Intersection::Disjoint => Intersection::Disjoint,
            Intersection::Coincident(_) => Intersection::Coincident(self.clone()),
            Intersection::Point(p) => {
                if round_to(self.point_dotprod(&p), p.precision) < 0.0 {
                    Intersection::Disjoint
                } else {
                    Intersection::Point(p)
                }
            }
        }
    }

    /// Window crossings of the ray, plus the anchor, sorted by `(t, x)`.
    /// The anchor is included whether or not it lies inside the window.
    pub fn boundary_intersections(&self, tlim: (f64, f64), xlim: (f64, f64)) -> Vec<Event> {
        let mut points = window_crossings(tlim, xlim, |edge| self.intersect(edge).point());
        let anchor = self.anchor();
        if !points.contains(anchor) {
            points.push(Event::new(anchor.t, anchor.x).with_precision(anchor.precision));
            sort_by_time_then_space(&mut points);
        }
        points
    }
}

impl From<Line> for Ray {
    fn from(line: Line) -> Self {
        Ray { line }
    }
}

impl PartialEq for Ray {
    /// Same anchor, same slope, and directions pointing the same way.
    fn eq(&self, other: &Self) -> bool {
        let precision = self.precision().min(other.precision());
        let (d0, d1) = (self.direction(), other.direction());
        self.anchor() == other.anchor()
            && same_slope(self.slope(), other.slope(), precision)
            && d0.t * d1.t >= 0.0
            && d0.x * d1.x >= 0.0
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ray( {} where k >= 0 )", parametric_str(&self.line))
    }
}

impl Transformable for Ray {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        self.line.lorentz_transform(velocity, origin);
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let style = merge_options(&self.line.draw_options, style);
        let crossings = self.boundary_intersections(bounds.tlim, bounds.xlim);
        draw_clipped(crossings, self.tag(), surface, bounds, &style);
    }

    /// Box spanned by `anchor` and `anchor + direction`.
    fn auto_draw_lims(&self) -> Option<Bounds> {
        let forward = self.anchor() + self.direction();
        Some(Bounds::spanning(self.anchor(), &forward))
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

/// Line of constant time `t`.
pub fn fixedtime(t: f64) -> Line {
    Line::unchecked(Event::new(0.0, 1.0), Event::new(t, 0.0))
}

/// Line of constant position `x`.
pub fn fixedspace(x: f64) -> Line {
    Line::unchecked(Event::new(1.0, 0.0), Event::new(0.0, x))
}

/// Slopes agree after rounding; two undefined slopes also agree.
pub(crate) fn same_slope(a: Option<f64>, b: Option<f64>, precision: u32) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => round_to(a, precision) == round_to(b, precision),
        _ => false,
    }
}

pub(crate) fn sort_by_time_then_space(points: &mut [Event]) {
    points.sort_by(|a, b| {
        a.t.partial_cmp(&b.t)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });
}

/// Distinct crossings with the lines `t = tmin`, `t = tmax`, `x = xmin` and
/// `x = xmax`, in that probe order, then sorted.
fn window_crossings(
    tlim: (f64, f64),
    xlim: (f64, f64),
    mut crossing: impl FnMut(&Line) -> Option<Event>,
) -> Vec<Event> {
    let edges = [
        fixedtime(tlim.0),
        fixedtime(tlim.1),
        fixedspace(xlim.0),
        fixedspace(xlim.1),
    ];
    let mut points: Vec<Event> = Vec::with_capacity(edges.len());
    for edge in &edges {
        if let Some(p) = crossing(edge) {
            if !points.contains(&p) {
                points.push(p);
            }
        }
    }
    sort_by_time_then_space(&mut points);
    points
}

/// Draw the in-window part of a clipped line given its boundary crossings.
fn draw_clipped(
    crossings: Vec<Event>,
    tag: Option<&str>,
    surface: &mut dyn Surface,
    bounds: Bounds,
    style: &DrawOptions,
) {
    let mut points: Vec<Event> = crossings
        .into_iter()
        .filter(|p| p.in_bounds(bounds.tlim, bounds.xlim))
        .collect();
    if points.len() > 2 {
        // Usually a corner clip that rounding failed to merge.
        tracing::warn!(
            count = points.len(),
            "clipped line has more than two window crossings; keeping the extremes"
        );
        points.drain(1..points.len() - 1);
    }
    match points.as_slice() {
        [start, end] => surface.draw_line_segment(start, end, tag, style),
        [single] => {
            let mut point = single.clone();
            point.tag = tag.map(str::to_owned);
            let (tlim, xlim) = bounds.as_lims();
            point.draw(surface, tlim, xlim, style);
        }
        _ => {}
    }
    surface.set_view_limits(bounds.tlim, bounds.xlim);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(Line::new((0.0, 0.0), (1.0, 1.0)).unwrap_err(), GeomError::ZeroDirection);
        assert!(Ray::new((0.0, 1e-9), (1.0, 1.0)).is_err());
        assert!(Line::with_precision((0.0, 1e-9), (1.0, 1.0), 10).is_ok());
    }

    #[test]
    fn extra_crossings_collapse_to_extremes() {
        let crossings = vec![
            Event::new(0.0, 0.0),
            Event::new(0.5, 0.5),
            Event::new(1.0, 1.0),
            Event::new(2.0, 2.0),
        ];
        let mut rec = crate::draw::Recorder::new();
        let bounds = Bounds::new((0.0, 1.0), (0.0, 1.0));
        draw_clipped(crossings, Some("diag"), &mut rec, bounds, &DrawOptions::new());
        assert_eq!(rec.segments.len(), 1);
        assert_eq!(rec.segments[0].start, (0.0, 0.0));
        assert_eq!(rec.segments[0].end, (1.0, 1.0));
        assert_eq!(rec.segments[0].tag.as_deref(), Some("diag"));
        assert!(rec.points.is_empty());
        assert_eq!(rec.tlim, Some((0.0, 1.0)));
    }

    #[test]
    fn slope_of_constant_position_is_undefined() {
        assert_eq!(Line::new((1.0, 0.0), (0.0, 0.0)).unwrap().slope(), None);
        assert_eq!(Line::new((2.0, 1.0), (0.0, 0.0)).unwrap().slope(), Some(2.0));
    }

    #[test]
    fn line_intersections() {
        let line = Line::new((1.0, 1.0), (0.0, 0.0)).unwrap();
        let crossing = line
            .intersect(&Line::new((1.0, -1.0), (0.0, 2.0)).unwrap())
            .point()
            .unwrap();
        assert_eq!(crossing, (1.0, 1.0));
        assert!(line.intersect(&Line::new((2.0, 2.0), (0.0, 1.0)).unwrap()).is_disjoint());
        assert!(line.intersect(&Line::new((-3.0, -3.0), (4.0, 4.0)).unwrap()).is_coincident());
        assert_eq!(line, Line::new((-3.0, -3.0), (4.0, 4.0)).unwrap());
    }

    #[test]
    fn crossing_takes_smaller_precision() {
        let a = Line::with_precision((1.0, 1.0), (0.0, 0.0), 3).unwrap();
        let b = Line::new((1.0, -1.0), (0.0, 2.0)).unwrap();
        assert_eq!(a.intersect(&b).point().unwrap().precision, 3);
    }

    #[test]
    fn ray_rejects_crossings_behind_anchor() {
        let ray = Ray::new((1.0, 1.0), (0.0, 0.0)).unwrap();
        assert!(ray.intersect(&fixedtime(-1.0)).is_disjoint());
        assert_eq!(ray.intersect(&fixedtime(2.0)).point().unwrap(), (2.0, 2.0));
        assert_eq!(ray.intersect(&fixedtime(0.0)).point().unwrap(), (0.0, 0.0));
        assert!(ray.intersect(ray.as_line()).is_coincident());
    }

    #[test]
    fn ray_equality_needs_matching_orientation() {
        let ray = Ray::new((1.0, 1.0), (0.0, 0.0)).unwrap();
        assert_eq!(ray, Ray::new((2.0, 2.0), (0.0, 0.0)).unwrap());
        assert_ne!(ray, Ray::new((-1.0, -1.0), (0.0, 0.0)).unwrap());
        assert_ne!(ray, Ray::new((1.0, 1.0), (1.0, 1.0)).unwrap());
    }

    #[test]
    fn display_formats() {
        let line = Line::new((2.0, 3.0), (1.0, 1.0)).unwrap();
        assert_eq!(line.to_string(), "Line( [t, x] = [1, 1] + k*[2, 3] )");
        let ray = Ray::new((2.0, 3.0), (1.0, 1.0)).unwrap();
        assert_eq!(ray.to_string(), "Ray( [t, x] = [1, 1] + k*[2, 3] where k >= 0 )");
    }
}
