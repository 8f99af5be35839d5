use super::{Point, Rect, Thickness};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// This is useful when we want to deal with `Rect`s abstractly, or when we want
/// to mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Construct an expanse from signed values, clamping negatives to zero.
    pub fn clamped(w: i32, h: i32) -> Self {
        Self {
            w: w.max(0) as u32,
            h: h.max(0) as u32,
        }
    }

    /// The area of this expanse.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::default(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this Size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Shrink by a thickness, flooring each dimension at zero.
    pub fn shrink(&self, t: Thickness) -> Self {
        Self {
            w: self.w.saturating_sub(t.horizontal()),
            h: self.h.saturating_sub(t.vertical()),
        }
    }

    /// Grow by a thickness.
    pub fn grow(&self, t: Thickness) -> Self {
        Self {
            w: self.w.saturating_add(t.horizontal()),
            h: self.h.saturating_add(t.vertical()),
        }
    }

    /// Component-wise maximum.
    pub fn max(&self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_floors_at_zero() {
        let e = Expanse::new(10, 5);
        assert_eq!(e.shrink(Thickness::all(1)), Expanse::new(8, 3));
        assert_eq!(e.shrink(Thickness::all(4)), Expanse::new(2, 0));
        assert_eq!(e.shrink(Thickness::all(9)), Expanse::new(0, 0));
        assert_eq!(Expanse::new(8, 3).grow(Thickness::all(1)), e);
    }

    #[test]
    fn clamped() {
        assert_eq!(Expanse::clamped(-3, 4), Expanse::new(0, 4));
    }
}
