//! The capability shared by every geometric type.
//!
//! - `Transformable`: in-place Lorentz transform, drawing through a `Surface`,
//!   and a natural bounding box used to fill unspecified draw limits.
//! - `lorentz_transformed` / `lorentz_boosted`: copy-then-transform helpers.

use serde::{Deserialize, Serialize};

use crate::draw::{DrawOptions, Surface};

use super::event::Event;

/// Draw limits along one axis; `None` entries are filled from the object's
/// natural bounding box.
pub type Lims = (Option<f64>, Option<f64>);

/// Fully automatic limits.
pub const AUTO: Lims = (None, None);

/// Default Lorentz transformation origin, `(t, x)`.
pub const ORIGIN: (f64, f64) = (0.0, 0.0);

/// Closed, axis-aligned window `[tmin, tmax] × [xmin, xmax]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub tlim: (f64, f64),
    pub xlim: (f64, f64),
}

impl Bounds {
    #[inline]
    pub fn new(tlim: (f64, f64), xlim: (f64, f64)) -> Self {
        Self { tlim, xlim }
    }

    /// Smallest window containing both events.
    pub fn spanning(a: &Event, b: &Event) -> Self {
        Self {
            tlim: (a.t.min(b.t), a.t.max(b.t)),
            xlim: (a.x.min(b.x), a.x.max(b.x)),
        }
    }

    /// Smallest window containing both windows.
    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            tlim: (self.tlim.0.min(other.tlim.0), self.tlim.1.max(other.tlim.1)),
            xlim: (self.xlim.0.min(other.xlim.0), self.xlim.1.max(other.xlim.1)),
        }
    }

    /// The window as fully specified draw limits.
    #[inline]
    pub fn as_lims(&self) -> (Lims, Lims) {
        (
            (Some(self.tlim.0), Some(self.tlim.1)),
            (Some(self.xlim.0), Some(self.xlim.1)),
        )
    }
}

/// Something that obeys Lorentz transformations and can draw itself.
pub trait Transformable {
    /// Transform in place with `velocity` about `origin = (t0, x0)`.
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64));

    /// Boost in place; a transform with `-velocity`.
    fn lorentz_boost(&mut self, velocity: f64, origin: (f64, f64)) {
        self.lorentz_transform(-velocity, origin);
    }

    /// Render through `surface` within the window; `None` limits are filled
    /// from [`Transformable::auto_draw_lims`]. `style` overrides the object's
    /// own draw options.
    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions);

    /// Natural bounding box; `None` for shapes with nothing in them.
    fn auto_draw_lims(&self) -> Option<Bounds>;

    /// Fill the unspecified entries of `tlim`/`xlim`, each independently.
    fn fill_auto_lims(&self, tlim: Lims, xlim: Lims) -> Option<Bounds> {
        if let ((Some(t0), Some(t1)), (Some(x0), Some(x1))) = (tlim, xlim) {
            return Some(Bounds::new((t0, t1), (x0, x1)));
        }
        let Some(auto) = self.auto_draw_lims() else {
            tracing::debug!("no draw limits available; nothing to draw");
            return None;
        };
        Some(Bounds::new(
            (tlim.0.unwrap_or(auto.tlim.0), tlim.1.unwrap_or(auto.tlim.1)),
            (xlim.0.unwrap_or(auto.xlim.0), xlim.1.unwrap_or(auto.xlim.1)),
        ))
    }

    /// Independent copy; shared members of collections are duplicated too.
    fn deep_copy(&self) -> Self
    where
        Self: Sized;
}

/// Transformed deep copy of `obj`; `obj` is left untouched.
pub fn lorentz_transformed<T: Transformable>(obj: &T, velocity: f64, origin: (f64, f64)) -> T {
    let mut out = obj.deep_copy();
    out.lorentz_transform(velocity, origin);
    out
}

/// Boosted deep copy of `obj`; a transform with `-velocity`.
pub fn lorentz_boosted<T: Transformable>(obj: &T, velocity: f64, origin: (f64, f64)) -> T {
    let mut out = obj.deep_copy();
    out.lorentz_boost(velocity, origin);
    out
}
