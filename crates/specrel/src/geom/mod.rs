//! Minkowski (1+1)-D geometry core.
//!
//! Purpose
//! - Events, lines, rays, collections, point groups and ribbons that share one
//!   capability (`Transformable`): in-place Lorentz transforms, drawing through
//!   a `Surface`, and a natural bounding box.
//! - Clipping against an axis-aligned window, used by every draw.
//!
//! Why this design
//! - The variant set is closed, so collections hold a `Shape` enum instead of
//!   trait objects. Aliasing is explicit through `Shared` handles.
//! - Every predicate rounds to a decimal precision before comparing; clipping
//!   is robust at corners without an epsilon threaded through every call.
//!
//! Code cross-refs: `Event`, `Line`, `Ray`, `Collection`, `Ribbon`, `GeomCfg`

mod collection;
pub mod event;
mod line;
mod point_group;
mod ribbon;
mod transform;

pub use collection::{shared, Collection, Shape, Shared};
pub use event::{round_to, Event, DEFAULT_PRECISION, MAX_PRECISION};
pub use line::{fixedspace, fixedtime, Intersection, Line, Ray};
pub use point_group::{line_segment, polygon, DrawMode, PointGroup};
pub use ribbon::{HalfRibbon, Ribbon};
pub use transform::{
    lorentz_boosted, lorentz_transformed, Bounds, Lims, Transformable, AUTO, ORIGIN,
};
