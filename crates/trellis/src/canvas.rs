//! The line canvas collects straight line segments from any number of views
//! and resolves them into box-drawing glyphs. Segments that touch or cross in a
//! cell join into a single corner, tee or cross glyph.
//!
//! Each cell records the strongest style present on each of its four arms
//! (left, right, up, down). The glyph is a pure function of that record, so the
//! order in which segments are added never changes the output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Direction, Orientation, Point, Rect};

/// Bit for an arm leaving the cell to the left.
const LEFT: usize = 1;
/// Bit for an arm leaving the cell to the right.
const RIGHT: usize = 2;
/// Bit for an arm leaving the cell upwards.
const UP: usize = 4;
/// Bit for an arm leaving the cell downwards.
const DOWN: usize = 8;

/// Line styles, ordered by dominance: where styles meet in a cell, the
/// greatest one picks the glyph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum LineStyle {
    /// No line. Segments with this style contribute nothing.
    #[default]
    None,
    /// Plain ASCII: `-`, `|` and `+`.
    Ascii,
    /// Dashed straight runs with single-line junctions.
    Dashed,
    /// Thin single lines.
    Single,
    /// Single lines with rounded corners.
    Rounded,
    /// Heavy single lines.
    Heavy,
    /// Double lines.
    Double,
}

// Tables are indexed by the arm mask. Masks with a single arm render as a full
// straight run, so a segment end never shows a half line.
/// Glyphs for `LineStyle::Ascii`.
const ASCII: [char; 16] = [
    ' ', '-', '-', '-', '|', '+', '+', '+', '|', '+', '+', '+', '|', '+', '+', '+',
];
/// Glyphs for `LineStyle::Dashed`.
const DASHED: [char; 16] = [
    ' ', '┄', '┄', '┄', '┆', '┘', '└', '┴', '┆', '┐', '┌', '┬', '┆', '┤', '├', '┼',
];
/// Glyphs for `LineStyle::Single`.
const SINGLE: [char; 16] = [
    ' ', '─', '─', '─', '│', '┘', '└', '┴', '│', '┐', '┌', '┬', '│', '┤', '├', '┼',
];
/// Glyphs for `LineStyle::Rounded`.
const ROUNDED: [char; 16] = [
    ' ', '─', '─', '─', '│', '╯', '╰', '┴', '│', '╮', '╭', '┬', '│', '┤', '├', '┼',
];
/// Glyphs for `LineStyle::Heavy`.
const HEAVY: [char; 16] = [
    ' ', '━', '━', '━', '┃', '┛', '┗', '┻', '┃', '┓', '┏', '┳', '┃', '┫', '┣', '╋',
];
/// Glyphs for `LineStyle::Double`.
const DOUBLE: [char; 16] = [
    ' ', '═', '═', '═', '║', '╝', '╚', '╩', '║', '╗', '╔', '╦', '║', '╣', '╠', '╬',
];

impl LineStyle {
    /// The glyph table for this style, or None for `LineStyle::None`.
    fn glyphs(&self) -> Option<&'static [char; 16]> {
        match self {
            Self::None => None,
            Self::Ascii => Some(&ASCII),
            Self::Dashed => Some(&DASHED),
            Self::Single => Some(&SINGLE),
            Self::Rounded => Some(&ROUNDED),
            Self::Heavy => Some(&HEAVY),
            Self::Double => Some(&DOUBLE),
        }
    }
}

/// A straight run of cells. The sign of `length` gives the direction: positive
/// runs right or down from `start`, negative runs left or up. A run of length 0
/// or ±1 covers just `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StraightLine {
    /// First cell, in screen coordinates.
    pub start: Point,
    /// Signed cell count.
    pub length: i32,
    /// Axis the line runs along.
    pub orientation: Orientation,
    /// Line style.
    pub style: LineStyle,
}

impl StraightLine {
    /// Construct a new line.
    pub fn new(start: Point, length: i32, orientation: Orientation, style: LineStyle) -> Self {
        Self {
            start,
            length,
            orientation,
            style,
        }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> u32 {
        self.length.unsigned_abs().max(1)
    }

    /// The direction the line runs in from `start`.
    fn forward(&self) -> Direction {
        match (self.orientation, self.length < 0) {
            (Orientation::Horizontal, false) => Direction::Right,
            (Orientation::Horizontal, true) => Direction::Left,
            (Orientation::Vertical, false) => Direction::Down,
            (Orientation::Vertical, true) => Direction::Up,
        }
    }

    /// The cells covered by this line, starting at `start`.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let d = self.forward().delta();
        (0..self.cell_count() as i32).map(move |i| self.start.offset(d.x * i, d.y * i))
    }

    /// The smallest rectangle containing every cell of the line.
    pub fn bounds(&self) -> Rect {
        let n = self.cell_count();
        let d = self.forward().delta();
        let end = self.start.offset(d.x * (n as i32 - 1), d.y * (n as i32 - 1));
        let tl = Point::new(self.start.x.min(end.x), self.start.y.min(end.y));
        match self.orientation {
            Orientation::Horizontal => Rect::new(tl.x, tl.y, n, 1),
            Orientation::Vertical => Rect::new(tl.x, tl.y, 1, n),
        }
    }
}

/// Arm bit for a direction.
fn arm_bit(d: Direction) -> usize {
    match d {
        Direction::Left => LEFT,
        Direction::Right => RIGHT,
        Direction::Up => UP,
        Direction::Down => DOWN,
    }
}

/// The strongest style present on each arm of one cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Arms([LineStyle; 4]);

impl Arms {
    /// Record a style on an arm.
    fn add(&mut self, d: Direction, style: LineStyle) {
        let slot = &mut self.0[arm_bit(d).trailing_zeros() as usize];
        *slot = (*slot).max(style);
    }

    /// The arm bitmask.
    fn mask(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != LineStyle::None)
            .fold(0, |m, (i, _)| m | (1 << i))
    }

    /// The glyph for this cell, if any arm is present.
    fn glyph(&self) -> Option<char> {
        let dominant = self.0.iter().copied().max().unwrap_or_default();
        let table = dominant.glyphs()?;
        Some(table[self.mask()])
    }
}

/// A mergeable collection of line segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineCanvas {
    /// Segments, in insertion order.
    lines: Vec<StraightLine>,
    /// Cells in these rectangles are never rendered.
    exclusions: Vec<Rect>,
}

impl LineCanvas {
    /// An empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line. Lines with `LineStyle::None` are ignored.
    pub fn add_line(&mut self, line: StraightLine) {
        if line.style != LineStyle::None {
            self.lines.push(line);
        }
    }

    /// The segments currently held.
    pub fn lines(&self) -> &[StraightLine] {
        &self.lines
    }

    /// Does the canvas hold no segments?
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stop rendering cells inside `r`. Used to keep border titles clear.
    pub fn exclude(&mut self, r: Rect) {
        if !r.is_zero() {
            self.exclusions.push(r);
        }
    }

    /// Move every segment and exclusion of `other` into this canvas, leaving
    /// `other` empty.
    pub fn merge(&mut self, other: &mut Self) {
        self.lines.append(&mut other.lines);
        self.exclusions.append(&mut other.exclusions);
    }

    /// Drop all segments and exclusions.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.exclusions.clear();
    }

    /// The bounding box of all segments, or None if the canvas is empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.lines
            .iter()
            .map(StraightLine::bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Resolve the canvas into a map from cell to glyph.
    pub fn cell_map(&self) -> BTreeMap<Point, char> {
        let mut arms: BTreeMap<Point, Arms> = BTreeMap::new();
        for l in &self.lines {
            let fwd = l.forward();
            let last = l.cell_count() as usize - 1;
            for (i, p) in l.cells().enumerate() {
                let a = arms.entry(p).or_default();
                if last == 0 {
                    a.add(fwd, l.style);
                    a.add(fwd.opposite(), l.style);
                    continue;
                }
                if i > 0 {
                    a.add(fwd.opposite(), l.style);
                }
                if i < last {
                    a.add(fwd, l.style);
                }
            }
        }
        arms.into_iter()
            .filter(|(p, _)| !self.exclusions.iter().any(|r| r.contains_point(*p)))
            .filter_map(|(p, a)| a.glyph().map(|g| (p, g)))
            .collect()
    }

    /// Render the canvas as rows of text covering its bounds, with spaces for
    /// empty cells. Intended for tests and debugging.
    pub fn to_lines(&self) -> Vec<String> {
        let Some(b) = self.bounds() else {
            return Vec::new();
        };
        let map = self.cell_map();
        (b.tl.y..b.bottom())
            .map(|y| {
                (b.tl.x..b.right())
                    .map(|x| map.get(&Point::new(x, y)).copied().unwrap_or(' '))
                    .collect()
            })
            .collect()
    }
}

/// Add the four edges of `r` to a canvas as a closed box.
pub fn add_box(canvas: &mut LineCanvas, r: Rect, style: LineStyle) {
    if r.is_zero() {
        return;
    }
    let (w, h) = (r.w as i32, r.h as i32);
    let tr = Point::new(r.right() - 1, r.tl.y);
    let bl = Point::new(r.tl.x, r.bottom() - 1);
    canvas.add_line(StraightLine::new(r.tl, w, Orientation::Horizontal, style));
    canvas.add_line(StraightLine::new(bl, w, Orientation::Horizontal, style));
    canvas.add_line(StraightLine::new(r.tl, h, Orientation::Vertical, style));
    canvas.add_line(StraightLine::new(tr, h, Orientation::Vertical, style));
}
