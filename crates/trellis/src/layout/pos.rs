use std::{
    fmt,
    ops::{Add, Sub},
    rc::Rc,
};

use super::dim::LayoutContext;
use crate::id::ViewId;

/// Arithmetic operator joining two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Left plus right.
    Add,
    /// Left minus right.
    Subtract,
}

impl Op {
    /// Apply the operator.
    pub fn apply(&self, l: i32, r: i32) -> i32 {
        match self {
            Self::Add => l.saturating_add(r),
            Self::Subtract => l.saturating_sub(r),
        }
    }
}

/// An edge of another view's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Frame x.
    Left,
    /// Frame y.
    Top,
    /// Frame x + width.
    Right,
    /// Frame y + height.
    Bottom,
}

/// A position expression, evaluated against the superview's content size
/// along one axis.
#[derive(Clone)]
pub enum Pos {
    /// A fixed offset.
    Absolute(i32),
    /// A percentage of the superview dimension.
    Percent(i32),
    /// Centered: `(super - size) / 2`.
    Center,
    /// An offset back from the far edge: `super - n`.
    AnchorEnd(i32),
    /// Flush with the far edge: `super - size`.
    AnchorEndAuto,
    /// The value returned by a closure, called on every evaluation.
    Func(Rc<dyn Fn() -> i32>),
    /// Two expressions joined by an operator.
    Combine(Box<Self>, Box<Self>, Op),
    /// An edge of another view's frame.
    View {
        /// Referenced view.
        target: ViewId,
        /// Edge to read.
        side: Side,
    },
}

impl Pos {
    /// Position of another view's left edge.
    pub fn left(target: ViewId) -> Self {
        Self::View {
            target,
            side: Side::Left,
        }
    }

    /// Position of another view's top edge.
    pub fn top(target: ViewId) -> Self {
        Self::View {
            target,
            side: Side::Top,
        }
    }

    /// Position just past another view's right edge.
    pub fn right(target: ViewId) -> Self {
        Self::View {
            target,
            side: Side::Right,
        }
    }

    /// Position just past another view's bottom edge.
    pub fn bottom(target: ViewId) -> Self {
        Self::View {
            target,
            side: Side::Bottom,
        }
    }

    /// A closure-backed position.
    pub fn func(f: impl Fn() -> i32 + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Evaluate against a superview dimension, given this view's own size
    /// along the same axis.
    pub fn calculate(&self, super_size: i32, own_size: i32, ctx: &dyn LayoutContext) -> i32 {
        match self {
            Self::Absolute(n) => *n,
            Self::Percent(p) => super_size.saturating_mul(*p) / 100,
            Self::Center => (super_size - own_size) / 2,
            Self::AnchorEnd(n) => super_size.saturating_sub(*n),
            Self::AnchorEndAuto => super_size.saturating_sub(own_size),
            Self::Func(f) => f(),
            Self::Combine(l, r, op) => op.apply(
                l.calculate(super_size, own_size, ctx),
                r.calculate(super_size, own_size, ctx),
            ),
            Self::View { target, side } => {
                let f = ctx.frame_of(*target).unwrap_or_default();
                match side {
                    Side::Left => f.tl.x,
                    Side::Top => f.tl.y,
                    Side::Right => f.right(),
                    Side::Bottom => f.bottom(),
                }
            }
        }
    }

    /// Does the value depend on this view's own size? Such positions need the
    /// final size before they can be placed.
    pub fn is_aligned(&self) -> bool {
        match self {
            Self::Center | Self::AnchorEnd(_) | Self::AnchorEndAuto => true,
            Self::Combine(l, r, _) => l.is_aligned() || r.is_aligned(),
            _ => false,
        }
    }

    /// Append every view referenced by this expression.
    pub fn references(&self, out: &mut Vec<ViewId>) {
        match self {
            Self::View { target, .. } => out.push(*target),
            Self::Combine(l, r, _) => {
                l.references(out);
                r.references(out);
            }
            _ => {}
        }
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(n) => write!(f, "Absolute({n})"),
            Self::Percent(p) => write!(f, "Percent({p})"),
            Self::Center => write!(f, "Center"),
            Self::AnchorEnd(n) => write!(f, "AnchorEnd({n})"),
            Self::AnchorEndAuto => write!(f, "AnchorEndAuto"),
            Self::Func(_) => write!(f, "Func(..)"),
            Self::Combine(l, r, Op::Add) => write!(f, "({l:?} + {r:?})"),
            Self::Combine(l, r, Op::Subtract) => write!(f, "({l:?} - {r:?})"),
            Self::View { target, side } => write!(f, "View({target:?}, {side:?})"),
        }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::Absolute(0)
    }
}

impl From<i32> for Pos {
    fn from(n: i32) -> Self {
        Self::Absolute(n)
    }
}

impl Add for Pos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Absolute(a), Self::Absolute(b)) => Self::Absolute(a.saturating_add(b)),
            (a, b) => Self::Combine(Box::new(a), Box::new(b), Op::Add),
        }
    }
}

impl Sub for Pos {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        match (self, other) {
            (Self::Absolute(a), Self::Absolute(b)) => Self::Absolute(a.saturating_sub(b)),
            (a, b) => Self::Combine(Box::new(a), Box::new(b), Op::Subtract),
        }
    }
}

impl Add<i32> for Pos {
    type Output = Self;

    fn add(self, n: i32) -> Self {
        self + Self::Absolute(n)
    }
}

impl Sub<i32> for Pos {
    type Output = Self;

    fn sub(self, n: i32) -> Self {
        self - Self::Absolute(n)
    }
}
