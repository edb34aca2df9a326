//! Heterogeneous, aliasable groups of shapes.
//!
//! Purpose
//! - `Shape` is the closed set of geometric variants; `Collection` holds
//!   shared handles to shapes and forwards transforms and draws to them.
//!
//! Why this design
//! - Members are `Rc<RefCell<Shape>>` so one object may sit in several
//!   collections and a transform through any of them is visible through all.
//! - `Clone` on a collection is shallow (handles are shared); `deep_copy`
//!   duplicates every reachable member and preserves aliasing inside the copy.
//!
//! Assumptions
//! - Single-threaded; a collection must not contain itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::draw::{merge_options, DrawOptions, Surface};
use crate::error::{GeomError, Result};

use super::event::Event;
use super::line::{Line, Ray};
use super::point_group::PointGroup;
use super::ribbon::{HalfRibbon, Ribbon};
use super::transform::{Bounds, Lims, Transformable};

/// Shared, mutable handle to a shape.
pub type Shared = Rc<RefCell<Shape>>;

/// Wrap a shape in a fresh shared handle.
pub fn shared(shape: impl Into<Shape>) -> Shared {
    Rc::new(RefCell::new(shape.into()))
}

/// Any geometric object.
#[derive(Clone, Debug)]
pub enum Shape {
    Event(Event),
    Line(Line),
    Ray(Ray),
    Collection(Collection),
    PointGroup(PointGroup),
    Ribbon(Ribbon),
    HalfRibbon(HalfRibbon),
}

macro_rules! dispatch {
    ($shape:expr, $inner:ident => $body:expr) => {
        match $shape {
            Shape::Event($inner) => $body,
            Shape::Line($inner) => $body,
            Shape::Ray($inner) => $body,
            Shape::Collection($inner) => $body,
            Shape::PointGroup($inner) => $body,
            Shape::Ribbon($inner) => $body,
            Shape::HalfRibbon($inner) => $body,
        }
    };
}

impl Shape {
    /// Variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Event(_) => "Event",
            Shape::Line(_) => "Line",
            Shape::Ray(_) => "Ray",
            Shape::Collection(_) => "Collection",
            Shape::PointGroup(_) => "PointGroup",
            Shape::Ribbon(_) => "Ribbon",
            Shape::HalfRibbon(_) => "HalfRibbon",
        }
    }

    /// Append `member`. Collections take anything that does not lead back
    /// to themselves, point groups take events, and fixed-arity shapes refuse.
    pub fn append(&mut self, member: Shared) -> Result<()> {
        let this: *const Shape = self;
        match self {
            Shape::Collection(c) => {
                if reaches(&member, this) {
                    return Err(GeomError::Cycle);
                }
                c.push(member);
                Ok(())
            }
            Shape::PointGroup(g) => g.push_shared(member),
            other => Err(GeomError::FixedArity { kind: other.kind() }),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Shape::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Shape::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Shape::Event(e) => e.tag.as_deref(),
            Shape::Line(l) => l.tag.as_deref(),
            Shape::Ray(r) => r.tag(),
            Shape::Collection(c) => c.tag.as_deref(),
            Shape::PointGroup(g) => g.tag.as_deref(),
            Shape::Ribbon(r) => r.tag.as_deref(),
            Shape::HalfRibbon(r) => r.tag.as_deref(),
        }
    }
}

impl Transformable for Shape {
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        dispatch!(self, s => s.lorentz_transform(velocity, origin))
    }

    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        dispatch!(self, s => s.draw(surface, tlim, xlim, style))
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        dispatch!(self, s => s.auto_draw_lims())
    }

    fn deep_copy(&self) -> Self {
        dispatch!(self, s => Shape::from(s.deep_copy()))
    }
}

macro_rules! into_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(inner: $variant) -> Self {
                    Shape::$variant(inner)
                }
            }
        )*
    };
}

into_shape!(Event, Line, Ray, Collection, PointGroup, Ribbon, HalfRibbon);

/// Whether `target` is `member` or one of its nested collection members.
///
/// A handle that is already mutably borrowed counts as a hit: it encloses the
/// shape being mutated.
fn reaches(member: &Shared, target: *const Shape) -> bool {
    if std::ptr::eq(member.as_ptr(), target) {
        return true;
    }
    match member.try_borrow() {
        Ok(shape) => match &*shape {
            Shape::Collection(c) => c.iter().any(|m| reaches(m, target)),
            _ => false,
        },
        Err(_) => true,
    }
}

pub(crate) type CopyMemo = HashMap<*const RefCell<Shape>, Shared>;

/// Ordered group of shared shapes with its own tag and draw options.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    members: Vec<Shared>,
    pub tag: Option<String>,
    pub draw_options: DrawOptions,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members(members: impl IntoIterator<Item = Shared>) -> Self {
        Self {
            members: members.into_iter().collect(),
            ..Self::default()
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

    /// Append an existing handle; the member stays shared with its other owners.
    pub fn push(&mut self, member: Shared) {
        self.members.push(member);
    }

    /// Wrap `shape` in a new handle, append it and return the handle.
    pub fn add(&mut self, shape: impl Into<Shape>) -> Shared {
        let member = shared(shape);
        self.members.push(Rc::clone(&member));
        member
    }

    /// Remove and return the last member.
    pub fn pop(&mut self) -> Option<Shared> {
        self.members.pop()
    }

    /// Remove and return the member at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Shared> {
        (index < self.members.len()).then(|| self.members.remove(index))
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

    fn deep_copy_with(&self, memo: &mut CopyMemo) -> Collection {
        Collection {
            members: self.members.iter().map(|m| copy_member(m, memo)).collect(),
            tag: self.tag.clone(),
            draw_options: self.draw_options.clone(),
        }
    }
}

/// Copy one handle, reusing the copy if the same handle was seen before.
pub(crate) fn copy_member(member: &Shared, memo: &mut CopyMemo) -> Shared {
    let key = Rc::as_ptr(member);
    if let Some(done) = memo.get(&key) {
        return Rc::clone(done);
    }
    let copy = match &*member.borrow() {
        Shape::Collection(c) => Shape::Collection(c.deep_copy_with(memo)),
        Shape::PointGroup(g) => Shape::PointGroup(g.deep_copy_with(memo)),
        other => other.deep_copy(),
    };
    let copy = Rc::new(RefCell::new(copy));
    memo.insert(key, Rc::clone(&copy));
    copy
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Shared;
    type IntoIter = std::slice::Iter<'a, Shared>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Transformable for Collection {
    /// Transforms every member in place, shared ones included.
    fn lorentz_transform(&mut self, velocity: f64, origin: (f64, f64)) {
        for member in &self.members {
            member.borrow_mut().lorentz_transform(velocity, origin);
        }
    }

    /// Every member draws with the same filled limits and merged style.
    fn draw(&self, surface: &mut dyn Surface, tlim: Lims, xlim: Lims, style: &DrawOptions) {
        if self.members.is_empty() {
            tracing::warn!("collection is empty; nothing to draw");
            return;
        }
        let style = merge_options(&self.draw_options, style);
        let Some(bounds) = self.fill_auto_lims(tlim, xlim) else {
            return;
        };
        let (tlim, xlim) = bounds.as_lims();
        for member in &self.members {
            member.borrow().draw(surface, tlim, xlim, &style);
        }
        surface.set_view_limits(bounds.tlim, bounds.xlim);
    }

    fn auto_draw_lims(&self) -> Option<Bounds> {
        self.members
            .iter()
            .filter_map(|m| m.borrow().auto_draw_lims())
            .reduce(|acc, b| acc.union(&b))
    }

    fn deep_copy(&self) -> Self {
        self.deep_copy_with(&mut CopyMemo::new())
    }
}
