//! Ordered events drawn as points, a polyline, or a filled polygon.
//!
//! Members are shared handles, like a `Collection`'s, so an event appended
//! by a caller keeps following the caller's transforms and vice versa.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::draw::{merge_options, DrawOptions, Surface};
use crate::error::{GeomError, Result};

use super::collection::{copy_member, shared, CopyMemo, Shape, Shared};
use super::event::Event;
use super::transform::{Bounds, Lims, Transformable};

/// How a point group renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Each event on its own, under its own tag.
    #[default]
    Point,
    /// Consecutive events joined by segments under the group tag.
    Connect,
    /// One shaded polygon under the group tag.
    Polygon,
}

/// Collection restricted to events.
///
/// `Clone` is shallow: the clone shares its events with the source.
#[derive(Clone, Debug, Default)]
pub struct PointGroup {
    members: Vec<Shared>,
    pub mode: DrawMode,
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
}

impl PointGroup {
    /// Group of fresh handles, one per point.
    pub fn new<P: Into<Event>>(points: impl IntoIterator<Item = P>, mode: DrawMode) -> Self {
        Self {
            members: points.into_iter().map(|p| shared(Into::<Event>::into(p))).collect(),
            mode,
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

    /// Current values of the member events, in order.
    ///
    /// A handle that a caller has since rebound to a non-event is skipped.
    pub fn points(&self) -> Vec<Event> {
        self.members
            .iter()
            .filter_map(|m| m.borrow().as_event().cloned())
            .collect()
    }

    /// Wrap `point` in a new handle, append it and return the handle.
    pub fn push(&mut self, point: impl Into<Event>) -> Shared {
        let member = shared(Into::<Event>::into(point));
        self.members.push(Rc::clone(&member));
        member
    }

    /// Append an existing handle, which must hold an event.
    ///
    /// A handle that cannot be borrowed is the group itself (or encloses it)
    /// and is refused.
    pub fn push_shared(&mut self, member: Shared) -> Result<()> {
        match member.try_borrow() {
            Ok(shape) => match &*shape {
                Shape::Event(_) => {}
                other => return Err(GeomError::NotAnEvent { kind: other.kind() }),
            },
            Err(_) => return Err(GeomError::NotAnEvent { kind: "PointGroup" }),
        }
        self.members.push(member);
        Ok(())
    }

    /// Remove and return the last handle.
    pub fn pop(&mut self) -> Option<Shared> {
        self.members.pop()
    }

    pub fn get(&self, index: usize) -> Option<&Shared> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shared> {
        self.members.iter()
    }

    pub(crate) fn deep_copy_with(&self, memo: &mut CopyMemo) -> PointGroup {
        PointGroup {
            members: self.members.iter().map(|m| copy_member(m, memo)).collect(),
            mode: self.mode,
            tag: self.tag.clone(),
            draw_options: self.draw_options.clone(),
        }
    }
}

/// Two events joined by one segment.
pub fn line_segment(start: impl Into<Event>, end: impl Into<Event>) -> PointGroup {
    let points: [Event; 2] = [start.into(), end.into()];
    PointGroup::new(points, DrawMode::Connect)
}

/// Vertices of a filled polygon, in perimeter order.
pub fn polygon<P: Into<Event>>(points: impl IntoIterator<Item = P>) -> PointGroup {
    PointGroup::new(points, DrawMode::Polygon)
}

impl Transformable for PointGroup {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        for member in &self.members {
            member.borrow_mut().lorentz_transform(velocity, origin);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        let style = merge_options(&self.draw_options, style);
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let tag = self.tag.as_deref();
        let points = self.points();
        match self.mode {
            DrawMode::Point => {
                let (tlim, xlim) = bounds.as_lims();
                for point in &points {
                    point.draw(surface, tlim, xlim, &style);
                }
            }
            DrawMode::Connect => {
                for pair in points.windows(2) {
                    surface.draw_line_segment(&pair[0], &pair[1], tag, &style);
                }
            }
            DrawMode::Polygon => surface.draw_shaded_polygon(&points, tag, &style),
        }
        surface.set_view_limits(bounds.tlim, bounds.xlim);
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        self.points()
            .iter()
            .filter_map(|p| p.auto_draw_lims())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Fresh handles; an event listed twice is copied once.
    fn deep_copy(&self) -> Self {
        self.deep_copy_with(&mut CopyMemo::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Recorder;
    use crate::geom::{AUTO, ORIGIN};
    use serde_json::json;

    fn styled() -> DrawOptions {
        let mut opts = DrawOptions::new();
        opts.insert("color".into(), json!("red"));
        opts
    }

    fn group(mode: DrawMode) -> PointGroup {
        PointGroup::new(
            [Event::new(0.0, 1.0).with_tag("p0"), Event::new(2.0, 3.0)],
            mode,
        )
        .with_tag("group")
        .with_draw_options(styled())
    }

    #[test]
    fn point_mode_uses_event_tags() {
        let mut rec = Recorder::new();
        group(DrawMode::Point).draw(&mut rec, AUTO, AUTO, &DrawOptions::new());
        assert_eq!(rec.points.len(), 2);
        assert_eq!(rec.points[0].tag.as_deref(), Some("p0"));
        assert_eq!(rec.points[1].tag, None);
        assert_eq!(rec.points[1].style, styled());
        assert_eq!(rec.tlim, Some((0.0, 2.0)));
        assert_eq!(rec.xlim, Some((1.0, 3.0)));
    }

    #[test]
    fn connect_mode_uses_group_tag() {
        let mut rec = Recorder::new();
        let mut g = group(DrawMode::Connect);
        g.push((4.0, 4.0));
        g.draw(&mut rec, AUTO, AUTO, &DrawOptions::new());
        assert_eq!(rec.segments.len(), 2);
        assert_eq!(rec.segments[0].start, (0.0, 1.0));
        assert_eq!(rec.segments[0].end, (2.0, 3.0));
        assert_eq!(rec.segments[1].end, (4.0, 4.0));
        assert!(rec.segments.iter().all(|s| s.tag.as_deref() == Some("group")));
    }

    #[test]
    fn polygon_mode_draws_once() {
        let mut rec = Recorder::new();
        let mut over = DrawOptions::new();
        over.insert("color".into(), json!("blue"));
        group(DrawMode::Polygon).draw(&mut rec, AUTO, AUTO, &over);
        assert_eq!(rec.polygons.len(), 1);
        assert_eq!(rec.polygons[0].vertices, vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(rec.polygons[0].tag.as_deref(), Some("group"));
        assert_eq!(rec.polygons[0].style["color"], json!("blue"));
    }

    #[test]
    fn helpers_pick_modes() {
        assert_eq!(line_segment((0.0, 0.0), (1.0, 1.0)).mode, DrawMode::Connect);
        assert_eq!(polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).len(), 3);
    }

    #[test]
    fn appended_event_is_shared_with_caller() {
        let event = shared(Event::new(2.0, 3.0));
        let mut group = Shape::from(PointGroup::new(Vec::<Event>::new(), DrawMode::Connect));
        group.append(Rc::clone(&event)).unwrap();

        event.borrow_mut().lorentz_transform(0.6, ORIGIN);
        let Shape::PointGroup(g) = &group else {
            panic!("expected a point group");
        };
        assert_eq!(g.points(), vec![Event::new(0.25, 2.25)]);

        group.lorentz_transform(-0.6, ORIGIN);
        assert_eq!(event.borrow().as_event().unwrap(), &Event::new(2.0, 3.0));
    }

    #[test]
    fn deep_copy_detaches_from_caller() {
        let event = shared(Event::new(2.0, 3.0));
        let mut g = PointGroup::new(Vec::<Event>::new(), DrawMode::Point);
        g.push_shared(Rc::clone(&event)).unwrap();
        g.push_shared(Rc::clone(&event)).unwrap();

        let copy = g.deep_copy();
        event.borrow_mut().lorentz_transform(0.6, ORIGIN);
        assert_eq!(copy.points(), vec![Event::new(2.0, 3.0), Event::new(2.0, 3.0)]);
        assert!(Rc::ptr_eq(copy.get(0).unwrap(), copy.get(1).unwrap()));
        assert!(!Rc::ptr_eq(copy.get(0).unwrap(), &event));
    }

    #[test]
    fn push_shared_refuses_non_events() {
        let mut g = PointGroup::default();
        let line = shared(crate::geom::fixedtime(1.0));
        assert_eq!(g.push_shared(line), Err(GeomError::NotAnEvent { kind: "Line" }));
        assert!(g.is_empty());
    }
}
