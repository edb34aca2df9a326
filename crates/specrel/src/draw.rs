//! Drawing-surface boundary.
//!
//! Purpose
//! - The only contract between the geometry and whatever renders it (static
//!   image, animation frame, test double). Geometry calls these four methods
//!   synchronously and never inspects the surface.
//! - `DrawOptions` is an opaque, flat presentation map. Precedence when
//!   drawing: per-call style > object `draw_options` > configured defaults.
//!
//! `Recorder` is the in-memory surface used by tests and the CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geom::Event;

/// Presentation options; keys and values are opaque to the geometry.
pub type DrawOptions = BTreeMap<String, Value>;

/// `base` overridden by `overrides`.
pub fn merge_options(base: &DrawOptions, overrides: &DrawOptions) -> DrawOptions {
    let mut out = base.clone();
    out.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    out
}

/// Primitive sink for geometric objects.
pub trait Surface {
    fn draw_point(&mut self, point: &Event, tag: Option<&str>, style: &DrawOptions);

    fn draw_line_segment(
        &mut self,
        start: &Event,
        end: &Event,
        tag: Option<&str>,
        style: &DrawOptions,
    );

    /// `vertices` are already ordered along the polygon perimeter.
    fn draw_shaded_polygon(&mut self, vertices: &[Event], tag: Option<&str>, style: &DrawOptions);

    fn set_view_limits(&mut self, tlim: (f64, f64), xlim: (f64, f64));
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCmd {
    pub at: (f64, f64),
    pub tag: Option<String>,
    pub style: DrawOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentCmd {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub tag: Option<String>,
    pub style: DrawOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonCmd {
    pub vertices: Vec<(f64, f64)>,
    pub tag: Option<String>,
    pub style: DrawOptions,
}

/// Surface that records every primitive it is asked to draw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recorder {
    pub points: Vec<PointCmd>,
    pub segments: Vec<SegmentCmd>,
    pub polygons: Vec<PolygonCmd>,
    /// Last limits passed to `set_view_limits`.
    pub tlim: Option<(f64, f64)>,
    pub xlim: Option<(f64, f64)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded primitives.
    pub fn len(&self) -> usize {
        self.points.len() + self.segments.len() + self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Surface for Recorder {
    fn draw_point(&mut self, point: &Event, tag: Option<&str>, style: &DrawOptions) {
        self.points.push(PointCmd {
            at: point.coords(),
            tag: tag.map(str::to_owned),
            style: style.clone(),
        });
    }

    fn draw_line_segment(
        &mut self,
        start: &Event,
        end: &Event,
        tag: Option<&str>,
        style: &DrawOptions,
    ) {
        self.segments.push(SegmentCmd {
            start: start.coords(),
            end: end.coords(),
            tag: tag.map(str::to_owned),
            style: style.clone(),
        });
    }

    fn draw_shaded_polygon(&mut self, vertices: &[Event], tag: Option<&str>, style: &DrawOptions) {
        self.polygons.push(PolygonCmd {
            vertices: vertices.iter().map(Event::coords).collect(),
            tag: tag.map(str::to_owned),
            style: style.clone(),
        });
    }

    fn set_view_limits(&mut self, tlim: (f64, f64), xlim: (f64, f64)) {
        self.tlim = Some(tlim);
        self.xlim = Some(xlim);
    }
}
