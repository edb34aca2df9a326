//! Flat (1+1)-dimensional Minkowski spacetime geometry.
//!
//! Layout
//! - `geom`: events, lines, rays, collections, point groups and ribbons, all
//!   Lorentz-transformable and clippable against an axis-aligned window.
//! - `draw`: the drawing-surface boundary every primitive renders through, plus
//!   an in-memory `Recorder` surface.
//! - `config`: explicit default parameters consumed by constructors.
//! - `spacetime`: grid helper and physical objects built on the core.
//!
//! Conventions
//! - Coordinates are always ordered `(t, x)`, matching the physics 4-vector order.
//! - Every geometric predicate is decided on values rounded to a number of
//!   decimal places (`precision`, default 7). See `geom::event::round_to`.
//! - `lorentz_transform` mutates in place; `lorentz_transformed` and
//!   `lorentz_boosted` return transformed deep copies.

pub mod api;
pub mod config;
pub mod draw;
pub mod error;
pub mod geom;
pub mod spacetime;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{GeomCfg, GridCfg};
pub use error::{GeomError, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::config::{GeomCfg, GridCfg};
    pub use crate::draw::{DrawOptions, Recorder, Surface};
    pub use crate::error::{GeomError, Result};
    pub use crate::geom::{
        fixedspace, fixedtime, line_segment, lorentz_boosted, lorentz_transformed, polygon,
        shared, Bounds, Collection, DrawMode, Event, HalfRibbon, Intersection, Lims, Line,
        PointGroup, Ray, Ribbon, Shape, Shared, Transformable, AUTO, ORIGIN,
    };
    pub use crate::spacetime::{stgrid, MovingObject, TimeInterval};
}
