//! Physical helpers built on the geometry core.
//!
//! - `stgrid`: axis and grid lines covering a window.
//! - `MovingObject`: a rigid object's two worldlines, as a ribbon.
//! - `TimeInterval`: the start and end of an interval at each position, as a
//!   ribbon.
//!
//! Both physical types are thin views over a `Ribbon`; transforming them
//! transforms the ribbon and every query follows.

use crate::config::GridCfg;
use crate::draw::{DrawOptions, Surface};
use crate::error::{GeomError, Result};
use crate::geom::{
    fixedspace, fixedtime, round_to, Bounds, Collection, Event, Lims, Line, Ribbon, Shape,
    Transformable,
};

fn grid_line(direction: (f64, f64), anchor: (f64, f64), style: &DrawOptions) -> Line {
    Line::unchecked(Event::from(direction), Event::from(anchor)).with_draw_options(style.clone())
}

/// Integer steps `k` with `origin + k * spacing` inside `lim`, origin excluded.
fn steps(lim: (f64, f64), origin: f64, spacing: f64) -> impl Iterator<Item = i64> {
    let (lo, hi) = if spacing > 0.0 && spacing.is_finite() {
        (
            ((lim.0 - origin) / spacing).ceil() as i64,
            ((lim.1 - origin) / spacing).floor() as i64,
        )
    } else {
        tracing::warn!(spacing, "grid spacing must be positive and finite; skipping minor lines");
        (1, 0)
    };
    (lo..=hi).filter(|&k| k != 0)
}

/// Spacetime grid over `tlim` × `xlim`.
///
/// Order: constant-time lines by ascending time, constant-position lines by
/// ascending position, then the time axis and the position axis through
/// `cfg.origin` when it lies within the limits.
pub fn stgrid(tlim: (f64, f64), xlim: (f64, f64), cfg: &GridCfg) -> Collection {
    let (t0, x0) = cfg.origin;
    let grid_style = cfg.grid_style();
    let axis_style = cfg.axis_style();
    let mut grid = Collection::new();
    for k in steps(tlim, t0, cfg.t_spacing) {
        grid.add(grid_line((0.0, 1.0), (t0 + k as f64 * cfg.t_spacing, x0), &grid_style));
    }
    for k in steps(xlim, x0, cfg.x_spacing) {
        grid.add(grid_line((1.0, 0.0), (t0, x0 + k as f64 * cfg.x_spacing), &grid_style));
    }
    if t0 >= tlim.0 && t0 <= tlim.1 {
        grid.add(grid_line((0.0, 1.0), cfg.origin, &axis_style));
    }
    if x0 >= xlim.0 && x0 <= xlim.1 {
        grid.add(grid_line((1.0, 0.0), cfg.origin, &axis_style));
    }
    tracing::debug!(lines = grid.len(), "built spacetime grid");
    grid
}

/// Rigid object moving at constant velocity.
#[derive(Clone, Debug)]
pub struct MovingObject {
    ribbon: Ribbon,
}

impl MovingObject {
    /// `left_start_pos` is the left end's position at `start_time`.
    pub fn new(left_start_pos: f64, length: f64, velocity: f64, start_time: f64) -> Self {
        let direction = Event::new(1.0, velocity);
        let left = Line::unchecked(direction.clone(), Event::new(start_time, left_start_pos));
        let right = Line::unchecked(direction, Event::new(start_time, left_start_pos + length));
        Self {
            ribbon: Ribbon::from_parallel(left, right),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.ribbon.tag = Some(tag.into());
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.ribbon.draw_options = draw_options;
        self
    }

    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }

    /// Worldline of the left end.
    pub fn left(&self) -> &Line {
        &self.ribbon.lines()[0]
    }

    /// Worldline of the right end.
    pub fn right(&self) -> &Line {
        &self.ribbon.lines()[1]
    }

    pub fn left_pos(&self, time: f64) -> Result<f64> {
        pos_at_time(self.left(), time)
    }

    pub fn right_pos(&self, time: f64) -> Result<f64> {
        pos_at_time(self.right(), time)
    }

    pub fn center_pos(&self, time: f64) -> Result<f64> {
        Ok((self.left_pos(time)? + self.right_pos(time)?) / 2.0)
    }

    pub fn time_for_left_pos(&self, pos: f64) -> Result<f64> {
        time_for_pos(self.left(), pos)
    }

    pub fn time_for_right_pos(&self, pos: f64) -> Result<f64> {
        time_for_pos(self.right(), pos)
    }

    pub fn time_for_center_pos(&self, pos: f64) -> Result<f64> {
        Ok((self.time_for_left_pos(pos)? + self.time_for_right_pos(pos)?) / 2.0)
    }

    /// Length measured at `t = 0` in the current frame.
    pub fn length(&self) -> Result<f64> {
        Ok(self.right_pos(0.0)? - self.left_pos(0.0)?)
    }

    pub fn has_extent(&self) -> Result<bool> {
        Ok(round_to(self.length()?, self.left().precision()) != 0.0)
    }

    pub fn velocity(&self) -> f64 {
        let d = self.left().direction();
        d.x / d.t
    }
}

fn pos_at_time(line: &Line, time: f64) -> Result<f64> {
    line.intersect(&fixedtime(time))
        .point()
        .map(|p| p.x)
        .ok_or(GeomError::NoCrossing)
}

fn time_for_pos(line: &Line, pos: f64) -> Result<f64> {
    if line.slope().is_none() {
        return Err(GeomError::Stationary);
    }
    line.intersect(&fixedspace(pos))
        .point()
        .map(|p| p.t)
        .ok_or(GeomError::NoCrossing)
}

/// Interval whose start time depends linearly on position.
#[derive(Clone, Debug)]
pub struct TimeInterval {
    ribbon: Ribbon,
}

impl TimeInterval {
    /// Starts at `start_time` at `start_pos`; the start at `x + 1` is
    /// `unit_delay` later than at `x`.
    pub fn new(start_time: f64, duration: f64, unit_delay: f64, start_pos: f64) -> Self {
        let direction = Event::new(unit_delay, 1.0);
        let start = Line::unchecked(direction.clone(), Event::new(start_time, start_pos));
        let end = Line::unchecked(direction, Event::new(start_time + duration, start_pos));
        Self {
            ribbon: Ribbon::from_parallel(start, end),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.ribbon.tag = Some(tag.into());
        self
    }

    pub fn with_draw_options(mut self, draw_options: DrawOptions) -> Self {
        self.ribbon.draw_options = draw_options;
        self
    }

    pub fn ribbon(&self) -> &Ribbon {
        &self.ribbon
    }

    pub fn start(&self) -> &Line {
        &self.ribbon.lines()[0]
    }

    pub fn end(&self) -> &Line {
        &self.ribbon.lines()[1]
    }

    pub fn start_time(&self, pos: f64) -> Result<f64> {
        time_at_pos(self.start(), pos)
    }

    pub fn end_time(&self, pos: f64) -> Result<f64> {
        time_at_pos(self.end(), pos)
    }

    /// Duration measured at `x = 0` in the current frame.
    pub fn duration(&self) -> Result<f64> {
        Ok(self.end_time(0.0)? - self.start_time(0.0)?)
    }

    pub fn has_extent(&self) -> Result<bool> {
        Ok(round_to(self.duration()?, self.start().precision()) != 0.0)
    }

    pub fn unit_delay(&self) -> f64 {
        let d = self.start().direction();
        d.t / d.x
    }
}

fn time_at_pos(line: &Line, pos: f64) -> Result<f64> {
    line.intersect(&fixedspace(pos))
        .point()
        .map(|p| p.t)
        .ok_or(GeomError::NoCrossing)
}

macro_rules! ribbon_view {
    ($ty:ident) => {
        impl Transformable for $ty {
            fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
                self.ribbon.lorentz_transform(velocity, origin);
            }

            fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
                self.ribbon.draw(surface, tlim, xlim, style);
            }

            fn auto_draw_lims(&self) -> Option<Bounds> {
                self.ribbon.auto_draw_lims()
            }

            fn deep_copy(&self) -> Self {
                self.clone()
            }
        }

        impl From<$ty> for Shape {
            fn from(view: $ty) -> Self {
                Shape::Ribbon(view.ribbon)
            }
        }
    };
}

ribbon_view!(MovingObject);
ribbon_view!(TimeInterval);
