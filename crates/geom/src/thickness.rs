use std::ops::Add;

use super::{Point, Rect};

/// Inset amounts on the four sides of a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Thickness {
    /// Left inset.
    pub left: u32,
    /// Top inset.
    pub top: u32,
    /// Right inset.
    pub right: u32,
    /// Bottom inset.
    pub bottom: u32,
}

impl Thickness {
    /// Construct a thickness from its four sides.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on all sides.
    pub fn all(n: u32) -> Self {
        Self::new(n, n, n, n)
    }

    /// No inset.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True if all sides are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Sum of left and right.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// The offset from a rectangle's origin to its inside origin.
    pub fn origin(&self) -> Point {
        Point::new(self.left as i32, self.top as i32)
    }

    /// The rectangle left after insetting `rect` by this thickness. Sizes are
    /// floored at zero; the origin always moves by (left, top).
    pub fn inside(&self, rect: Rect) -> Rect {
        Rect {
            tl: rect.tl + self.origin(),
            w: rect.w.saturating_sub(self.horizontal()),
            h: rect.h.saturating_sub(self.vertical()),
        }
    }

    /// True if `p` lies in `rect` but not in the inside rectangle.
    pub fn contains(&self, rect: Rect, p: Point) -> bool {
        rect.contains_point(p) && !self.inside(rect).contains_point(p)
    }
}

impl Add for Thickness {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            left: self.left.saturating_add(other.left),
            top: self.top.saturating_add(other.top),
            right: self.right.saturating_add(other.right),
            bottom: self.bottom.saturating_add(other.bottom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside() {
        let t = Thickness::all(1);
        assert_eq!(t.inside(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
        assert_eq!(
            Thickness::new(2, 0, 0, 1).inside(Rect::new(-1, 3, 4, 4)),
            Rect::new(1, 3, 2, 3)
        );
        assert_eq!(Thickness::all(3).inside(Rect::new(0, 0, 4, 4)).w, 0);
    }

    #[test]
    fn add() {
        assert_eq!(
            Thickness::all(1) + Thickness::new(1, 2, 3, 4),
            Thickness::new(2, 3, 4, 5)
        );
        assert_eq!(Thickness::new(1, 2, 3, 4).horizontal(), 4);
        assert_eq!(Thickness::new(1, 2, 3, 4).vertical(), 6);
    }

    #[test]
    fn contains() {
        let r = Rect::new(0, 0, 4, 4);
        let t = Thickness::all(1);
        assert!(t.contains(r, Point::new(0, 0)));
        assert!(!t.contains(r, Point::new(1, 1)));
        assert!(!t.contains(r, Point::new(4, 0)));
    }
}
