/// A directionless one-dimensional extent along an axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct LineSegment {
    /// The offset of this extent.
    pub off: i32,
    /// The length of this extent.
    pub len: u32,
}

impl LineSegment {
    /// Construct a segment.
    pub fn new(off: i32, len: u32) -> Self {
        Self { off, len }
    }

    /// The far limit of the extent (exclusive).
    pub fn far(&self) -> i32 {
        (self.off as i64 + self.len as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Does this extent cover the coordinate `v`?
    pub fn contains_point(&self, v: i32) -> bool {
        v >= self.off && v < self.far()
    }

    /// Return a line segment that encloses this line segment and another. If
    /// the lines overlap or abut, this is equivalent to joining the segments.
    pub fn enclose(&self, other: &Self) -> Self {
        let off = self.off.min(other.off);
        let far = self.far().max(other.far());
        Self {
            off,
            len: (far as i64 - off as i64) as u32,
        }
    }

    /// Are these two line segments adjacent but non-overlapping?
    pub fn abuts(&self, other: &Self) -> bool {
        self.far() == other.off || other.far() == self.off
    }

    /// Does other lie completely within this extent.
    pub fn contains(&self, other: &Self) -> bool {
        self.off <= other.off && self.far() >= other.far()
    }

    /// Do the two extents share at least one coordinate?
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Return the intersection between this line segment and other. The line
    /// segment returned will always have a non-zero length.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if self.len == 0 || other.len == 0 {
            return None;
        }
        let off = self.off.max(other.off);
        let far = self.far().min(other.far());
        if far <= off {
            None
        } else {
            Some(Self {
                off,
                len: (far as i64 - off as i64) as u32,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far() {
        assert_eq!(LineSegment::new(5, 5).far(), 10);
        assert_eq!(LineSegment::new(-5, 3).far(), -2);
    }

    #[test]
    fn intersect() {
        let l = LineSegment::new(5, 5);
        assert_eq!(
            l.intersection(&LineSegment::new(6, 2)),
            Some(LineSegment::new(6, 2))
        );
        assert_eq!(l.intersection(&LineSegment::new(1, 10)), Some(l));
        assert_eq!(
            l.intersection(&LineSegment::new(6, 8)),
            Some(LineSegment::new(6, 4))
        );
        assert_eq!(
            l.intersection(&LineSegment::new(0, 8)),
            Some(LineSegment::new(5, 3))
        );
        assert_eq!(l.intersection(&l), Some(l));
        assert_eq!(l.intersection(&LineSegment::new(0, 2)), None);
        assert_eq!(l.intersection(&LineSegment::new(10, 2)), None);
        assert_eq!(l.intersection(&LineSegment::new(5, 0)), None);
        assert_eq!(l.intersection(&LineSegment::new(0, 5)), None);
        assert_eq!(
            LineSegment::new(-3, 4).intersection(&LineSegment::new(0, 4)),
            Some(LineSegment::new(0, 1))
        );
    }

    #[test]
    fn contains() {
        let v = LineSegment::new(1, 3);
        assert!(v.contains(&LineSegment::new(1, 3)));
        assert!(!v.contains(&LineSegment::new(1, 4)));
        assert!(!v.contains(&LineSegment::new(2, 3)));
        assert!(!v.contains(&LineSegment::new(0, 2)));
        assert!(v.contains_point(3));
        assert!(!v.contains_point(4));
    }

    #[test]
    fn abuts() {
        let v = LineSegment::new(1, 3);
        assert!(!v.abuts(&LineSegment::new(1, 3)));
        assert!(v.abuts(&LineSegment::new(0, 1)));
        assert!(v.abuts(&LineSegment::new(4, 4)));
        assert!(!v.abuts(&LineSegment::new(3, 4)));
    }

    fn check_enclosure(a: LineSegment, b: LineSegment, enclosure: LineSegment) {
        assert_eq!(a.enclose(&b), enclosure);
        assert_eq!(b.enclose(&a), enclosure);
    }

    #[test]
    fn enclose() {
        check_enclosure(
            LineSegment::new(1, 3),
            LineSegment::new(1, 3),
            LineSegment::new(1, 3),
        );
        check_enclosure(
            LineSegment::new(1, 3),
            LineSegment::new(0, 3),
            LineSegment::new(0, 4),
        );
        check_enclosure(
            LineSegment::new(1, 3),
            LineSegment::new(5, 3),
            LineSegment::new(1, 7),
        );
        check_enclosure(
            LineSegment::new(-4, 2),
            LineSegment::new(1, 1),
            LineSegment::new(-4, 6),
        );
    }
}
