//! Spacetime events `(t, x)` with precision-bounded equality.
//!
//! Invariants
//! - Equality and window tests round both operands to a number of decimal
//!   places before comparing. Two events compare at the smaller of their two
//!   precisions; a window test uses the event's own precision.
//! - Arithmetic results carry default metadata (precision 7, no tag, no
//!   options), like fresh values.

use std::fmt;
use std::ops::{Add, Index, Neg, Sub};

use nalgebra::{Complex, Vector2};

use crate::draw::{merge_options, DrawOptions, Surface};
use crate::error::{GeomError, Result};

use super::transform::{Bounds, Lims, Transformable};

/// Decimal places used for comparisons unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 7;

/// Largest precision whose scale factor `10^p` is a finite `f64`.
pub const MAX_PRECISION: u32 = 308;

// 2^52: from here on every f64 is already a whole number.
const WHOLE_FROM: f64 = 4_503_599_627_370_496.0;

/// Round `value` to `precision` decimal places.
///
/// Precisions above [`MAX_PRECISION`] act as `MAX_PRECISION`. When the scaled
/// value has no fractional digits left, `value` is returned unchanged.
#[inline]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * scale;
    if !(scaled.abs() < WHOLE_FROM) {
        return value;
    }
    scaled.round() / scale
}

/// Point in 1+1-D spacetime.
#[derive(Clone, Debug)]
pub struct Event {
    /// Time.
    pub t: f64,
    /// Position.
    pub x: f64,
    /// Decimal places for comparisons.
    pub precision: u32,
    /// Display label, independent of any legend entry.
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
}

impl Event {
    #[inline]
    pub fn new(t: f64, x: f64) -> Self {
        Self {
            t,
            x,
            precision: DEFAULT_PRECISION,
            tag: None,
            draw_options: DrawOptions::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Decimal places for comparisons; anything past the resolution of `f64`
    /// compares the raw values.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.draw_options = draw_options;
        self
    }

    #[inline]
    pub fn coords(&self) -> (f64, f64) {
        (self.t, self.x)
    }

    /// Components as a column vector `[t, x]`.
    #[inline]
    pub fn vector(&self) -> Vector2<f64> {
        Vector2::new(self.t, self.x)
    }

    /// Euclidean dot product of the components.
    #[inline]
    pub fn dot(&self, other: &Event) -> f64 {
        self.vector().dot(&other.vector())
    }

    pub fn iter(&self) -> std::array::IntoIter<f64, 2> {
        [self.t, self.x].into_iter()
    }

    /// Spacetime interval `-t² + x²`.
    #[inline]
    pub fn interval(&self) -> f64 {
        -self.t * self.t + self.x * self.x
    }

    /// Relativistic gamma `1/√(1-v²)`.
    ///
    /// `+inf` at `|v| = 1` and NaN beyond; see [`Event::gamma_factor_complex`]
    /// for the analytic continuation.
    #[inline]
    pub fn gamma_factor(velocity: f64) -> f64 {
        1.0 / (1.0 - velocity * velocity).sqrt()
    }

    /// Gamma as a complex number, purely imaginary for `|v| > 1`.
    pub fn gamma_factor_complex(velocity: f64) -> Complex<f64> {
        Complex::new(1.0 - velocity * velocity, 0.0).sqrt().inv()
    }

    /// Inclusive window test at this event's precision.
    pub fn in_bounds(&self, tlim: (f64, f64), xlim: (f64, f64)) -> bool {
        let p = self.precision;
        let (t, x) = (round_to(self.t, p), round_to(self.x, p));
        t >= round_to(tlim.0, p)
            && t <= round_to(tlim.1, p)
            && x >= round_to(xlim.0, p)
            && x <= round_to(xlim.1, p)
    }

    /// `(t, x)` rounded at this event's precision.
    pub(crate) fn coords_str(&self) -> String {
        format!(
            "({}, {})",
            round_to(self.t, self.precision),
            round_to(self.x, self.precision)
        )
    }

    /// Equality at an explicit precision.
    #[inline]
    pub fn eq_at(&self, other: &Event, precision: u32) -> bool {
        round_to(self.t, precision) == round_to(other.t, precision)
            && round_to(self.x, precision) == round_to(other.x, precision)
    }
}

impl Transformable for Event {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        let gamma = Self::gamma_factor(velocity);
        let (t0, x0) = origin;
        let (dt, dx) = (self.t - t0, self.x - x0);
        self.t = gamma * (dt - velocity * dx) + t0;
        self.x = gamma * (dx - velocity * dt) + x0;
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        if self.in_bounds(bounds.tlim, bounds.xlim) {
            let style = merge_options(&self.draw_options, style);
            surface.draw_point(self, self.tag.as_deref(), &style);
            surface.set_view_limits(bounds.tlim, bounds.xlim);
        }
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        Some(Bounds::new((self.t, self.t), (self.x, self.x)))
    }

    fn deep_copy(&self) -> Self {
        self.clone()
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.eq_at(other, self.precision.min(other.precision))
    }
}

impl PartialEq<(f64, f64)> for Event {
    fn eq(&self, other: &(f64, f64)) -> bool {
        self.eq_at(&Event::new(other.0, other.1), self.precision)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event{}", self.coords_str())
    }
}

impl Index<usize> for Event {
    type Output = f64;

    /// `0` is time and `1` is position.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.t,
            1 => &self.x,
            _ => panic!("event index out of range: {index}"),
        }
    }
}

impl<'a> IntoIterator for &'a Event {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<(f64, f64)> for Event {
    fn from((t, x): (f64, f64)) -> Self {
        Event::new(t, x)
    }
}

impl From<[f64; 2]> for Event {
    fn from([t, x]: [f64; 2]) -> Self {
        Event::new(t, x)
    }
}

impl From<Vector2<f64>> for Event {
    fn from(v: Vector2<f64>) -> Self {
        Event::new(v[0], v[1])
    }
}

impl From<&Event> for Event {
    fn from(e: &Event) -> Self {
        e.clone()
    }
}

impl TryFrom<&[f64]> for Event {
    type Error = GeomError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [t, x] => Ok(Event::new(*t, *x)),
            _ => Err(GeomError::Arity { got: values.len() }),
        }
    }
}

impl Neg for &Event {
    type Output = Event;

    fn neg(self) -> Event {
        Event::new(-self.t, -self.x)
    }
}

impl Neg for Event {
    type Output = Event;

    fn neg(self) -> Event {
        -&self
    }
}

impl Add for &Event {
    type Output = Event;

    fn add(self, rhs: &Event) -> Event {
        Event::new(self.t + rhs.t, self.x + rhs.x)
    }
}

impl Add for Event {
    type Output = Event;

    fn add(self, rhs: Event) -> Event {
        &self + &rhs
    }
}

impl Sub for &Event {
    type Output = Event;

    fn sub(self, rhs: &Event) -> Event {
        Event::new(self.t - rhs.t, self.x - rhs.x)
    }
}

impl Sub for Event {
    type Output = Event;

    fn sub(self, rhs: Event) -> Event {
        &self - &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Recorder;
    use crate::geom::{lorentz_transformed, AUTO, ORIGIN};
    use serde_json::json;

    #[test]
    fn huge_precision_still_compares_equal() {
        let origin = Event::new(0.0, 0.0).with_precision(400);
        assert_eq!(origin, Event::new(0.0, 0.0).with_precision(400));
        assert_eq!(round_to(1.25, 1000), 1.25);
        assert_eq!(round_to(1e300, 20), 1e300);
        assert_ne!(
            Event::new(1.0, 0.0).with_precision(u32::MAX),
            Event::new(1.0 + 1e-12, 0.0).with_precision(u32::MAX)
        );
        assert_eq!(round_to(2.00004, 4), 2.0);
    }

    #[test]
    fn components_by_index_and_iter() {
        let e = Event::new(2.0, 3.0);
        assert_eq!(e[0], 2.0);
        assert_eq!(e[1], 3.0);
        assert_eq!(e.iter().collect::<Vec<_>>(), vec![2.0, 3.0]);
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(Event::try_from(&[2.0, 3.0][..]).unwrap(), (2.0, 3.0));
        assert_eq!(
            Event::try_from(&[2.0, 3.0, 4.0][..]).unwrap_err(),
            GeomError::Arity { got: 3 }
        );
        assert!(Event::try_from(&[1.0][..]).is_err());
    }

    #[test]
    fn equality_rounds_to_shared_precision() {
        let e = Event::new(2.0, 3.0).with_precision(3);
        assert_eq!(e, Event::new(2.0001, 3.0));
        assert_ne!(e, Event::new(2.001, 3.0));
        assert_eq!(Event::new(2.0, 3.0), (2.0, 3.0));
    }

    #[test]
    fn display_rounds() {
        assert_eq!(Event::new(2.0, 3.0).to_string(), "Event(2, 3)");
        let e = Event::new(2.0001, 2.9999).with_precision(3);
        assert_eq!(e.to_string(), "Event(2, 3)");
    }

    #[test]
    fn arithmetic_and_interval() {
        assert_eq!(-Event::new(2.0, 3.0), (-2.0, -3.0));
        assert_eq!(Event::new(2.0, 3.0) + Event::new(3.0, 3.0), (5.0, 6.0));
        assert_eq!(Event::new(2.0, 3.0) - Event::new(3.0, 3.0), (-1.0, 0.0));
        assert_eq!(Event::new(2.0, 3.0).interval(), 5.0);
    }

    #[test]
    fn gamma_values() {
        assert_eq!(Event::gamma_factor(0.0), 1.0);
        assert!((Event::gamma_factor(0.6) - 1.25).abs() < 1e-12);
        assert!(Event::gamma_factor(1.0).is_infinite());
        assert!(Event::gamma_factor(2.0).is_nan());
        let ftl = Event::gamma_factor_complex(2.0);
        assert!(ftl.re.abs() < 1e-12);
        assert!((ftl.im.abs() - 1.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn lorentz_transform_about_origins() {
        let mut e = Event::new(2.0, 3.0);
        e.lorentz_transform(0.6, ORIGIN);
        assert!((e.t - 0.25).abs() < 1e-12);
        assert!((e.x - 2.25).abs() < 1e-12);

        let mut shifted = Event::new(3.0, 4.0);
        shifted.lorentz_transform(0.6, (1.0, 1.0));
        assert!((shifted.t - 1.25).abs() < 1e-12);
        assert!((shifted.x - 3.25).abs() < 1e-12);
    }

    #[test]
    fn transformed_copy_is_independent() {
        let original = Event::new(2.0, 3.0);
        let moved = lorentz_transformed(&original, 0.6, ORIGIN);
        assert_eq!(original, (2.0, 3.0));
        assert_eq!(moved, (0.25, 2.25));
    }

    #[test]
    fn window_test_is_inclusive_and_rounded() {
        let e = Event::new(2.0, 3.0);
        assert!(e.in_bounds((0.0, 3.0), (2.0, 4.0)));
        assert!(!e.in_bounds((3.0, 4.0), (1.0, 2.0)));
        assert!(e.in_bounds((2.0, 2.0), (3.0, 3.0)));
        let near = Event::new(2.0001, 3.0001).with_precision(3);
        assert!(near.in_bounds((0.0, 2.0), (2.0, 3.0)));
        let far = Event::new(2.001, 3.001).with_precision(3);
        assert!(!far.in_bounds((0.0, 2.0), (2.0, 3.0)));
    }

    #[test]
    fn draw_in_and_out_of_bounds() {
        let mut opts = DrawOptions::new();
        opts.insert("color".into(), json!("red"));
        let e = Event::new(3.0, 4.0).with_tag("test").with_draw_options(opts.clone());
        let mut rec = Recorder::new();
        e.draw(&mut rec, AUTO, AUTO, &DrawOptions::new());
        assert_eq!(rec.points.len(), 1);
        assert_eq!(rec.points[0].at, (3.0, 4.0));
        assert_eq!(rec.points[0].tag.as_deref(), Some("test"));
        assert_eq!(rec.points[0].style, opts);
        assert_eq!(rec.tlim, Some((3.0, 3.0)));
        assert_eq!(rec.xlim, Some((4.0, 4.0)));

        let mut rec = Recorder::new();
        Event::new(3.0, 4.0).draw(&mut rec, (Some(4.0), Some(5.0)), AUTO, &DrawOptions::new());
        assert!(rec.is_empty());
    }
}
