use std::{
    fmt,
    ops::{Add, Sub},
    rc::Rc,
};

use super::pos::Op;
use crate::{geom::Rect, id::ViewId};

/// Axis a dimension is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

/// What an automatic dimension is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoStyle {
    /// The explicit content size if one is set, otherwise the subviews.
    Content,
    /// The measured size of the view's text.
    Text,
    /// The bounding box of the visible subviews.
    Subviews,
    /// The larger of `Content` and `Text`.
    Auto,
}

/// Geometry lookups needed while evaluating expressions.
pub trait LayoutContext {
    /// The current frame of a view, if it exists.
    fn frame_of(&self, id: ViewId) -> Option<Rect>;

    /// The natural extent of `view` along `dimension`, including adornment
    /// thickness, for an automatic dimension. `limit` is the most space the
    /// superview offers.
    fn auto_extent(&self, view: ViewId, dimension: Dimension, style: AutoStyle, limit: i32)
    -> i32;
}

/// A size expression, evaluated against the superview's content size and this
/// view's resolved position along one axis.
#[derive(Clone)]
pub enum Dim {
    /// A fixed size.
    Absolute(i32),
    /// A percentage of the superview dimension. With `use_position`, the
    /// percentage is of the space remaining after the view's position.
    Percent {
        /// Percentage, 0-100.
        percent: i32,
        /// Measure from the view's position rather than from zero.
        use_position: bool,
    },
    /// Everything from the position to the far edge, less a margin.
    Fill(i32),
    /// The value returned by a closure, called on every evaluation.
    Func(Rc<dyn Fn() -> i32>),
    /// Two expressions joined by an operator.
    Combine(Box<Self>, Box<Self>, Op),
    /// The width or height of another view's frame.
    View {
        /// Referenced view.
        target: ViewId,
        /// Dimension to read.
        dimension: Dimension,
    },
    /// Derived from the view itself, clamped to `[min, max]`. An unset max is
    /// the space remaining in the superview.
    Auto {
        /// Derivation source.
        style: AutoStyle,
        /// Lower bound.
        min: Option<i32>,
        /// Upper bound.
        max: Option<i32>,
    },
}

impl Dim {
    /// Fill the remaining space.
    pub fn fill() -> Self {
        Self::Fill(0)
    }

    /// A percentage of the superview dimension.
    pub fn percent(percent: i32) -> Self {
        Self::Percent {
            percent,
            use_position: false,
        }
    }

    /// Another view's width.
    pub fn width(target: ViewId) -> Self {
        Self::View {
            target,
            dimension: Dimension::Width,
        }
    }

    /// Another view's height.
    pub fn height(target: ViewId) -> Self {
        Self::View {
            target,
            dimension: Dimension::Height,
        }
    }

    /// An unbounded automatic dimension.
    pub fn auto(style: AutoStyle) -> Self {
        Self::Auto {
            style,
            min: None,
            max: None,
        }
    }

    /// A closure-backed dimension.
    pub fn func(f: impl Fn() -> i32 + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Evaluate for `view` along `dimension`. The result may be negative;
    /// callers clamp before assigning a frame.
    pub fn calculate(
        &self,
        location: i32,
        super_size: i32,
        view: ViewId,
        dimension: Dimension,
        ctx: &dyn LayoutContext,
    ) -> i32 {
        match self {
            Self::Absolute(n) => *n,
            Self::Percent {
                percent,
                use_position,
            } => {
                let base = if *use_position {
                    super_size.saturating_sub(location)
                } else {
                    super_size
                };
                base.saturating_mul(*percent) / 100
            }
            Self::Fill(margin) => super_size
                .saturating_sub(location)
                .saturating_sub(*margin)
                .max(0),
            Self::Func(f) => f(),
            Self::Combine(l, r, op) => op.apply(
                l.calculate(location, super_size, view, dimension, ctx),
                r.calculate(location, super_size, view, dimension, ctx),
            ),
            Self::View {
                target,
                dimension: d,
            } => {
                let f = ctx.frame_of(*target).unwrap_or_default();
                match d {
                    Dimension::Width => f.w as i32,
                    Dimension::Height => f.h as i32,
                }
            }
            Self::Auto { style, min, max } => {
                let max = max.unwrap_or(super_size.saturating_sub(location).max(0));
                let natural = ctx.auto_extent(view, dimension, *style, max);
                natural.min(max).max(min.unwrap_or(0))
            }
        }
    }

    /// Is any part of this expression automatic?
    pub fn contains_auto(&self) -> bool {
        match self {
            Self::Auto { .. } => true,
            Self::Combine(l, r, _) => l.contains_auto() || r.contains_auto(),
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

impl fmt::Debug for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(n) => write!(f, "Absolute({n})"),
            Self::Percent {
                percent,
                use_position: false,
            } => write!(f, "Percent({percent})"),
            Self::Percent {
                percent,
                use_position: true,
            } => write!(f, "Percent({percent}, position)"),
            Self::Fill(m) => write!(f, "Fill({m})"),
            Self::Func(_) => write!(f, "Func(..)"),
            Self::Combine(l, r, Op::Add) => write!(f, "({l:?} + {r:?})"),
            Self::Combine(l, r, Op::Subtract) => write!(f, "({l:?} - {r:?})"),
            Self::View { target, dimension } => write!(f, "View({target:?}, {dimension:?})"),
            Self::Auto { style, min, max } => write!(f, "Auto({style:?}, {min:?}, {max:?})"),
        }
    }
}

impl Default for Dim {
    fn default() -> Self {
        Self::Absolute(0)
    }
}

impl From<i32> for Dim {
    fn from(n: i32) -> Self {
        Self::Absolute(n)
    }
}

impl Add for Dim {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Absolute(a), Self::Absolute(b)) => Self::Absolute(a.saturating_add(b)),
            (a, b) => Self::Combine(Box::new(a), Box::new(b), Op::Add),
        }
    }
}

impl Sub for Dim {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        match (self, other) {
            (Self::Absolute(a), Self::Absolute(b)) => Self::Absolute(a.saturating_sub(b)),
            (a, b) => Self::Combine(Box::new(a), Box::new(b), Op::Subtract),
        }
    }
}

impl Add<i32> for Dim {
    type Output = Self;

    fn add(self, n: i32) -> Self {
        self + Self::Absolute(n)
    }
}

impl Sub<i32> for Dim {
    type Output = Self;

    fn sub(self, n: i32) -> Self {
        self - Self::Absolute(n)
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    /// Reports a fixed natural extent for every automatic dimension.
    struct Natural(i32, Option<(ViewId, Rect)>);

    impl LayoutContext for Natural {
        fn frame_of(&self, id: ViewId) -> Option<Rect> {
            self.1.filter(|(k, _)| *k == id).map(|(_, r)| r)
        }

        fn auto_extent(&self, _: ViewId, _: Dimension, _: AutoStyle, _: i32) -> i32 {
            self.0
        }
    }

    fn ids() -> (ViewId, ViewId) {
        let mut m: SlotMap<ViewId, ()> = SlotMap::with_key();
        (m.insert(()), m.insert(()))
    }

    #[test]
    fn basic_variants() {
        let (v, _) = ids();
        let ctx = Natural(0, None);
        let w = Dimension::Width;
        assert_eq!(Dim::Absolute(-4).calculate(0, 10, v, w, &ctx), -4);
        assert_eq!(Dim::percent(50).calculate(4, 10, v, w, &ctx), 5);
        let p = Dim::Percent {
            percent: 50,
            use_position: true,
        };
        assert_eq!(p.calculate(4, 10, v, w, &ctx), 3);
        assert_eq!(Dim::fill().calculate(3, 10, v, w, &ctx), 7);
        assert_eq!(Dim::Fill(2).calculate(3, 10, v, w, &ctx), 5);
        assert_eq!(Dim::Fill(2).calculate(12, 10, v, w, &ctx), 0);
        assert_eq!((Dim::fill() - 1).calculate(0, 10, v, w, &ctx), 9);
    }

    #[test]
    fn extreme_positions_saturate() {
        let (v, _) = ids();
        let ctx = Natural(i32::MAX, None);
        let w = Dimension::Width;
        assert_eq!(Dim::fill().calculate(i32::MIN, 10, v, w, &ctx), i32::MAX);
        assert_eq!(Dim::Fill(i32::MIN).calculate(0, 10, v, w, &ctx), i32::MAX);
        assert_eq!(Dim::fill().calculate(i32::MAX, 10, v, w, &ctx), 0);
        let p = Dim::Percent {
            percent: 200,
            use_position: true,
        };
        assert_eq!(p.calculate(i32::MIN, 10, v, w, &ctx), i32::MAX / 100);
        let auto = Dim::auto(AutoStyle::Content);
        assert_eq!(auto.calculate(i32::MIN, 10, v, w, &ctx), i32::MAX);
        assert_eq!(auto.calculate(i32::MAX, 10, v, w, &ctx), 0);
    }

    #[test]
    fn view_reference() {
        let (v, a) = ids();
        let ctx = Natural(0, Some((a, Rect::new(1, 1, 6, 2))));
        assert_eq!(
            Dim::width(a).calculate(0, 0, v, Dimension::Width, &ctx),
            6
        );
        assert_eq!(
            (Dim::height(a) + 1).calculate(0, 0, v, Dimension::Height, &ctx),
            3
        );
        let mut refs = vec![];
        (Dim::width(a) - Dim::height(v)).references(&mut refs);
        assert_eq!(refs, vec![a, v]);
    }

    #[test]
    fn auto_clamps() {
        let (v, _) = ids();
        let h = Dimension::Height;
        let ctx = Natural(12, None);
        // Unbounded max falls back to the remaining space.
        assert_eq!(Dim::auto(AutoStyle::Text).calculate(0, 8, v, h, &ctx), 8);
        assert_eq!(Dim::auto(AutoStyle::Text).calculate(5, 8, v, h, &ctx), 3);
        let bounded = Dim::Auto {
            style: AutoStyle::Text,
            min: Some(2),
            max: Some(10),
        };
        assert_eq!(bounded.calculate(0, 100, v, h, &ctx), 10);
        let small = Natural(1, None);
        assert_eq!(bounded.calculate(0, 100, v, h, &small), 2);
        assert!(bounded.contains_auto());
        assert!((Dim::Absolute(1) + bounded).contains_auto());
        assert!(!Dim::fill().contains_auto());
    }
}
