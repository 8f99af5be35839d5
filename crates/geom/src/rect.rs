use super::{Error, Expanse, LineSegment, Point, Result};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Construct a rectangle from a location and a size.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Construct the rectangle spanning `tl` to the exclusive corner `br`.
    pub fn from_corners(tl: Point, br: Point) -> Result<Self> {
        if br.x < tl.x || br.y < tl.y {
            return Err(Error::Geometry(format!(
                "corner ({}, {}) lies above or left of ({}, {})",
                br.x, br.y, tl.x, tl.y
            )));
        }
        Ok(Self::new(
            tl.x,
            tl.y,
            (br.x - tl.x) as u32,
            (br.y - tl.y) as u32,
        ))
    }

    /// The size of this rectangle.
    pub fn size(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.hextent().far()
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.vextent().far()
    }

    /// The horizontal extent of this rectangle.
    pub fn hextent(&self) -> LineSegment {
        LineSegment::new(self.tl.x, self.w)
    }

    /// The vertical extent of this rectangle.
    pub fn vextent(&self) -> LineSegment {
        LineSegment::new(self.tl.y, self.h)
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        self.hextent().contains_point(p.x) && self.vextent().contains_point(p.y)
    }

    /// Does this rectangle completely enclose the other? A zero-sized rect is
    /// contained if its origin lies within the closed bounds of this one.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.hextent().contains(&other.hextent()) && self.vextent().contains(&other.vextent())
    }

    /// The overlap of two rectangles, if it is non-empty.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let h = self.hextent().intersection(&other.hextent())?;
        let v = self.vextent().intersection(&other.vextent())?;
        Some(Self::new(h.off, v.off, h.len, v.len))
    }

    /// Like `intersect`, but returns a zero rect at this rect's origin when
    /// there is no overlap.
    pub fn clip(&self, other: &Self) -> Self {
        self.intersect(other).unwrap_or(Self::at(self.tl, Expanse::default()))
    }

    /// Do the rectangles overlap?
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersect(other).is_some()
    }

    /// The bounding box of both rectangles. Empty rectangles do not contribute.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_zero() {
            return *self;
        }
        if self.is_zero() {
            return *other;
        }
        let h = self.hextent().enclose(&other.hextent());
        let v = self.vextent().enclose(&other.vextent());
        Self::new(h.off, v.off, h.len, v.len)
    }

    /// Shift the rectangle by an offset.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            tl: self.tl.offset(dx, dy),
            w: self.w,
            h: self.h,
        }
    }

    /// The same size, at a new location.
    pub fn with_tl(&self, tl: Point) -> Self {
        Self {
            tl,
            w: self.w,
            h: self.h,
        }
    }

    /// The same location, with a new size.
    pub fn with_size(&self, size: Expanse) -> Self {
        Self::at(self.tl, size)
    }

    /// Iterate over every cell in the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (x0, y0) = (self.tl.x, self.tl.y);
        let (x1, y1) = (self.right(), self.bottom());
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| Point::new(x, y)))
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_point() {
        let r = Rect::new(-2, 3, 4, 2);
        assert!(r.contains_point(Point::new(-2, 3)));
        assert!(r.contains_point(Point::new(1, 4)));
        assert!(!r.contains_point(Point::new(2, 4)));
        assert!(!r.contains_point(Point::new(0, 5)));
        assert!(!Rect::new(0, 0, 0, 3).contains_point(Point::zero()));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(
            a.intersect(&Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(a.intersect(&Rect::new(10, 0, 2, 2)), None);
        assert_eq!(
            a.intersect(&Rect::new(-3, -3, 4, 4)),
            Some(Rect::new(0, 0, 1, 1))
        );
        assert_eq!(a.clip(&Rect::new(20, 20, 1, 1)), Rect::new(0, 0, 0, 0));
    }

    #[test]
    fn union() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 1, 1, 4);
        assert_eq!(a.union(&b), Rect::new(0, 0, 6, 5));
        assert_eq!(a.union(&Rect::zero()), a);
        assert_eq!(Rect::new(9, 9, 0, 0).union(&b), b);
    }

    #[test]
    fn from_corners() -> Result<()> {
        assert_eq!(
            Rect::from_corners(Point::new(-1, 2), Point::new(3, 3))?,
            Rect::new(-1, 2, 4, 1)
        );
        assert!(Rect::from_corners(Point::new(2, 2), Point::new(1, 5)).is_err());
        Ok(())
    }

    #[test]
    fn cells() {
        let cells: Vec<Point> = Rect::new(1, 1, 2, 2).cells().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-50i32..50, -50i32..50, 0u32..40, 0u32..40).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersection_is_commutative_and_contained(a in rect_strategy(), b in rect_strategy()) {
            let ab = a.intersect(&b);
            prop_assert_eq!(ab, b.intersect(&a));
            if let Some(i) = ab {
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
            }
        }

        #[test]
        fn union_encloses_both(a in rect_strategy(), b in rect_strategy()) {
            let u = a.union(&b);
            if !a.is_zero() {
                prop_assert!(u.contains_rect(&a));
            }
            if !b.is_zero() {
                prop_assert!(u.contains_rect(&b));
            }
        }
    }
}
