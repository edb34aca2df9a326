//! Default parameters consumed by constructors.
//!
//! Purpose
//! - Replace a process-wide mutable defaults table with plain values that are
//!   built once (usually `GeomCfg::default()`) and passed by reference.
//! - Deserializable so front ends can load them from JSON; missing fields fall
//!   back to the defaults below.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::draw::DrawOptions;
use crate::error::Result;
use crate::geom::{Event, HalfRibbon, Lims, Line, Ray, Ribbon, DEFAULT_PRECISION, ORIGIN};

/// Ribbon edge color when neither the configuration nor the style names one.
pub const DEFAULT_EDGECOLOR: &str = "black";

/// Shared geometry defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Origin of Lorentz transformations, `(t, x)`.
    pub origin: (f64, f64),
    /// Default time drawing limits; `None` entries are filled per object.
    pub tlim: Lims,
    /// Default position drawing limits; `None` entries are filled per object.
    pub xlim: Lims,
    pub tag: Option<String>,
    /// Decimal places used by every comparison.
    pub precision: u32,
    pub draw_options: DrawOptions,
    /// Edge color of ribbons when the caller does not pick one.
    pub ribbon_edgecolor: String,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            origin: ORIGIN,
            tlim: (None, None),
            xlim: (None, None),
            tag: None,
            precision: DEFAULT_PRECISION,
            draw_options: DrawOptions::new(),
            ribbon_edgecolor: DEFAULT_EDGECOLOR.to_string(),
        }
    }
}

impl GeomCfg {
    pub fn event(&self, t: f64, x: f64) -> Event {
        let mut event = Event::new(t, x).with_precision(self.precision);
        event.tag = self.tag.clone();
        event.draw_options = self.draw_options.clone();
        event
    }

    pub fn line(&self, direction: impl Into<Event>, anchor: impl Into<Event>) -> Result<Line> {
        let mut line = Line::with_precision(direction, anchor, self.precision)?;
        line.tag = self.tag.clone();
        line.draw_options = self.draw_options.clone();
        Ok(line)
    }

    pub fn ray(&self, direction: impl Into<Event>, anchor: impl Into<Event>) -> Result<Ray> {
        let mut ray = Ray::with_precision(direction, anchor, self.precision)?;
        ray.line.tag = self.tag.clone();
        ray.line.draw_options = self.draw_options.clone();
        Ok(ray)
    }

    pub fn ribbon(&self, line1: Line, line2: Line) -> Result<Ribbon> {
        let mut ribbon = Ribbon::new(line1, line2)?.with_edgecolor(self.ribbon_edgecolor.clone());
        ribbon.tag = self.tag.clone();
        ribbon.draw_options = self.draw_options.clone();
        Ok(ribbon)
    }

    pub fn half_ribbon(&self, ray1: Ray, ray2: Ray) -> Result<HalfRibbon> {
        let mut ribbon =
            HalfRibbon::new(ray1, ray2)?.with_edgecolor(self.ribbon_edgecolor.clone());
        ribbon.tag = self.tag.clone();
        ribbon.draw_options = self.draw_options.clone();
        Ok(ribbon)
    }
}

/// Parameters of [`crate::spacetime::stgrid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridCfg {
    /// Grid center `(t, x)`; the two axis lines pass through it.
    pub origin: (f64, f64),
    /// Spacing between lines of constant time.
    pub t_spacing: f64,
    /// Spacing between lines of constant position.
    pub x_spacing: f64,
    /// Overrides on top of the axis style `{color: black, linewidth: 2}`.
    pub axis_draw_options: DrawOptions,
    /// Overrides on top of the grid style `{color: darkgray, linewidth: 1}`.
    pub grid_draw_options: DrawOptions,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            origin: ORIGIN,
            t_spacing: 1.0,
            x_spacing: 1.0,
            axis_draw_options: DrawOptions::new(),
            grid_draw_options: DrawOptions::new(),
        }
    }
}

impl GridCfg {
    pub(crate) fn axis_style(&self) -> DrawOptions {
        let mut style = DrawOptions::new();
        style.insert("color".into(), json!("black"));
        style.insert("linewidth".into(), json!(2));
        style.extend(self.axis_draw_options.clone());
        style
    }

    pub(crate) fn grid_style(&self) -> DrawOptions {
        let mut style = DrawOptions::new();
        style.insert("color".into(), json!("darkgray"));
        style.insert("linewidth".into(), json!(1));
        style.extend(self.grid_draw_options.clone());
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = GeomCfg::default();
        assert_eq!(cfg.origin, (0.0, 0.0));
        assert_eq!(cfg.precision, 7);
        assert_eq!(cfg.tlim, (None, None));
        assert!(cfg.draw_options.is_empty());
        assert_eq!(cfg.ribbon_edgecolor, "black");
    }

    #[test]
    fn factories_carry_precision_and_tag() {
        let cfg = GeomCfg {
            precision: 3,
            tag: Some("frame".into()),
            ..GeomCfg::default()
        };
        let e = cfg.event(2.0, 3.0);
        assert_eq!(e.precision, 3);
        assert_eq!(e.tag.as_deref(), Some("frame"));
        let line = cfg.line((1.0, 1.0), (0.0, 0.0)).unwrap();
        assert_eq!(line.precision(), 3);
        assert_eq!(line.tag.as_deref(), Some("frame"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: GeomCfg = serde_json::from_str(r#"{"precision": 4, "tlim": [-1.0, null]}"#).unwrap();
        assert_eq!(cfg.precision, 4);
        assert_eq!(cfg.tlim, (Some(-1.0), None));
        assert_eq!(cfg.ribbon_edgecolor, "black");
    }

    #[test]
    fn grid_overrides_win() {
        let mut grid = GridCfg::default();
        grid.axis_draw_options.insert("color".into(), json!("red"));
        let style = grid.axis_style();
        assert_eq!(style["color"], json!("red"));
        assert_eq!(style["linewidth"], json!(2));
    }
}
