use unicode_width::UnicodeWidthChar;

use crate::{
    backend::RenderBackend,
    draw::Driver,
    error::Result,
    geom::{Expanse, Point, Rect},
    style::Attribute,
};

/// NULL character constant, marking cells nothing has written.
pub const NULL: char = '\0';

/// One terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Glyph.
    pub ch: char,
    /// Attribute.
    pub attr: Attribute,
}

/// An in-memory grid of cells. It is the headless draw target and the back
/// buffer of the terminal driver.
#[derive(Clone, Debug)]
pub struct TermBuf {
    /// Buffer size.
    size: Expanse,
    /// Cells, row-major.
    cells: Vec<Cell>,
    /// Write position for `Driver::add_glyph`.
    cursor: Point,
    /// Attribute for `Driver::add_glyph`.
    attr: Attribute,
}

impl TermBuf {
    /// A buffer filled with `ch`.
    pub fn new(size: impl Into<Expanse>, ch: char, attr: Attribute) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell { ch, attr }; size.area() as usize],
            cursor: Point::zero(),
            attr,
        }
    }

    /// A buffer filled with NULL cells.
    pub fn empty(size: impl Into<Expanse>) -> Self {
        Self::new(size, NULL, Attribute::default())
    }

    /// Buffer size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// The buffer as a rectangle at the origin.
    pub fn rect(&self) -> Rect {
        self.size.rect()
    }

    /// Cell index for a point.
    fn idx(&self, p: Point) -> Option<usize> {
        if self.rect().contains_point(p) {
            Some(p.y as usize * self.size.w as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Write one cell. Points outside the buffer are ignored.
    pub fn put(&mut self, p: Point, ch: char, attr: Attribute) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = Cell { ch, attr };
        }
    }

    /// The cell at a point.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Fill a rectangle.
    pub fn fill(&mut self, attr: Attribute, r: Rect, ch: char) {
        if let Some(isec) = self.rect().intersect(&r) {
            for p in isec.cells() {
                self.put(p, ch, attr);
            }
        }
    }

    /// Row `y` as a string, with NULL cells shown as `null`.
    pub fn line(&self, y: u32, null: char) -> Option<String> {
        if y >= self.size.h {
            return None;
        }
        Some(
            (0..self.size.w as i32)
                .filter_map(|x| self.get(Point::new(x, y as i32)))
                .map(|c| if c.ch == NULL { null } else { c.ch })
                .collect(),
        )
    }

    /// All rows, NULL cells shown as spaces.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h).filter_map(|y| self.line(y, ' ')).collect()
    }

    /// Emit the cells that differ from `prev` to a backend, batching runs
    /// that share an attribute. A size change repaints everything.
    pub fn diff<R: RenderBackend + ?Sized>(&self, prev: &Self, backend: &mut R) -> Result<()> {
        let full = self.size != prev.size;
        let mut wrote = false;
        for y in 0..self.size.h as i32 {
            let mut x = 0;
            while x < self.size.w as i32 {
                let changed = |x: i32| {
                    let p = Point::new(x, y);
                    full || self.get(p) != prev.get(p)
                };
                if !changed(x) {
                    x += 1;
                    continue;
                }
                let start = x;
                let Some(first) = self.get(Point::new(x, y)).copied() else {
                    break;
                };
                let mut text = String::new();
                while x < self.size.w as i32 {
                    match self.get(Point::new(x, y)) {
                        Some(c) if changed(x) && c.attr == first.attr => {
                            text.push(if c.ch == NULL { ' ' } else { c.ch });
                            x += 1;
                        }
                        _ => break,
                    }
                }
                backend.style(&first.attr)?;
                backend.text(Point::new(start, y), &text)?;
                wrote = true;
            }
        }
        if wrote {
            backend.flush()?;
        }
        Ok(())
    }
}

impl Driver for TermBuf {
    fn size(&self) -> Expanse {
        self.size
    }

    fn move_to(&mut self, p: Point) {
        self.cursor = p;
    }

    fn set_attribute(&mut self, attr: Attribute) {
        self.attr = attr;
    }

    fn add_glyph(&mut self, ch: char) {
        self.put(self.cursor, ch, self.attr);
        let w = ch.width().unwrap_or(0).max(1);
        self.cursor = self.cursor.offset(w as i32, 0);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buf, style::Color, testing::buf::BufTest};

    #[test]
    fn basic_fill() {
        let mut tb = TermBuf::new((4, 2), ' ', Attribute::default());
        tb.fill(Attribute::default(), Rect::new(1, 0, 2, 2), 'x');
        tb.fill(Attribute::default(), Rect::new(-3, -3, 4, 4), 'o');
        BufTest::new(&tb).assert_matches(buf![
            "oxx "
            " xx "
        ]);
    }

    #[test]
    fn driver_writes_advance_cursor() {
        let mut tb = TermBuf::empty((5, 1));
        tb.move_to(Point::new(1, 0));
        tb.add_glyph('a');
        tb.add_glyph('b');
        tb.move_to(Point::new(9, 9));
        tb.add_glyph('z');
        BufTest::new(&tb).assert_matches(buf!["XabXX"]);
        assert_eq!(tb.line(0, '.'), Some(".ab..".to_string()));
        assert_eq!(tb.line(3, '.'), None);
    }

    #[derive(Default)]
    struct Rec {
        ops: Vec<String>,
    }

    impl RenderBackend for Rec {
        fn style(&mut self, a: &Attribute) -> Result<()> {
            self.ops.push(format!("style {:?}", a.fg));
            Ok(())
        }

        fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
            self.ops.push(format!("text {} {} {}", loc.x, loc.y, txt));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.ops.push("flush".into());
            Ok(())
        }
    }

    #[test]
    fn diff_runs() -> Result<()> {
        let plain = Attribute::default();
        let red = Attribute::new(Color::Red, Color::Black);
        let prev = TermBuf::new((4, 1), ' ', plain);
        let mut cur = prev.clone();

        let mut be = Rec::default();
        cur.diff(&prev, &mut be)?;
        assert!(be.ops.is_empty());

        cur.put(Point::new(0, 0), 'a', plain);
        cur.put(Point::new(1, 0), 'b', plain);
        cur.put(Point::new(2, 0), 'c', red);
        cur.diff(&prev, &mut be)?;
        assert_eq!(
            be.ops,
            vec![
                "style White",
                "text 0 0 ab",
                "style Red",
                "text 2 0 c",
                "flush"
            ]
        );
        Ok(())
    }
}
