//! Margin, Border and Padding.
//!
//! Every view owns three adornments, nested outside-in. Each is a node in the
//! arena with a back-reference to its owner, but it is never one of the
//! owner's subviews. An adornment's frame is derived from the owner's frame
//! and the thicknesses outside it; it cannot be set directly.

use crate::{
    canvas::{LineCanvas, LineStyle, StraightLine},
    geom::{Expanse, Orientation, Point, Rect, Thickness},
    id::ViewId,
};

/// Which adornment a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdornmentKind {
    /// Outermost; usually transparent spacing.
    Margin,
    /// Carries the border lines and title.
    Border,
    /// Innermost; spacing between the border and the viewport.
    Padding,
}

impl AdornmentKind {
    /// All kinds, outside-in.
    pub const ALL: [Self; 3] = [Self::Margin, Self::Border, Self::Padding];
}

/// The three adornments of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adornments {
    /// Margin node.
    pub margin: ViewId,
    /// Border node.
    pub border: ViewId,
    /// Padding node.
    pub padding: ViewId,
}

impl Adornments {
    /// The node for one kind.
    pub fn get(&self, kind: AdornmentKind) -> ViewId {
        match kind {
            AdornmentKind::Margin => self.margin,
            AdornmentKind::Border => self.border,
            AdornmentKind::Padding => self.padding,
        }
    }

    /// All three nodes, outside-in.
    pub fn ids(&self) -> [ViewId; 3] {
        [self.margin, self.border, self.padding]
    }
}

/// A proposed border style change, passed to validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderStyleChange {
    /// The view whose border changes.
    pub view: ViewId,
    /// Current style.
    pub old: LineStyle,
    /// Proposed style.
    pub new: LineStyle,
}

/// A border style validator. Returning false vetoes the change.
pub type BorderValidator = Box<dyn FnMut(&BorderStyleChange) -> bool>;

/// Per-adornment state.
pub struct AdornmentState {
    /// The adorned view.
    pub(crate) owner: ViewId,
    /// Which adornment this is.
    pub(crate) kind: AdornmentKind,
    /// Depth of each side.
    pub(crate) thickness: Thickness,
    /// Border line style. Only meaningful for borders.
    pub(crate) line_style: LineStyle,
    /// Border title. Only meaningful for borders.
    pub(crate) title: Option<String>,
    /// Border style validators.
    pub(crate) validators: Vec<BorderValidator>,
}

impl AdornmentState {
    /// Fresh state with zero thickness.
    pub(crate) fn new(owner: ViewId, kind: AdornmentKind) -> Self {
        Self {
            owner,
            kind,
            thickness: Thickness::zero(),
            line_style: LineStyle::None,
            title: None,
            validators: Vec::new(),
        }
    }

    /// The adorned view.
    pub fn owner(&self) -> ViewId {
        self.owner
    }

    /// Which adornment this is.
    pub fn kind(&self) -> AdornmentKind {
        self.kind
    }

    /// Depth of each side.
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// Border line style.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Border title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Frames of margin, border and padding, relative to the owner's frame
/// origin. The margin fills the frame; each inner adornment is the one
/// outside it inset by that one's thickness.
pub fn nested_frames(owner: Expanse, margin: Thickness, border: Thickness) -> [Rect; 3] {
    let m = owner.rect();
    let b = margin.inside(m);
    let p = border.inside(b);
    [m, b, p]
}

/// Add border lines for a border occupying `r` (screen coordinates). Each side
/// with non-zero thickness gets a line along its outermost row or column.
pub fn add_border_lines(canvas: &mut LineCanvas, r: Rect, t: Thickness, style: LineStyle) {
    if r.is_zero() || style == LineStyle::None {
        return;
    }
    let (w, h) = (r.w as i32, r.h as i32);
    if t.top > 0 {
        canvas.add_line(StraightLine::new(r.tl, w, Orientation::Horizontal, style));
    }
    if t.bottom > 0 {
        let bl = Point::new(r.tl.x, r.bottom() - 1);
        canvas.add_line(StraightLine::new(bl, w, Orientation::Horizontal, style));
    }
    if t.left > 0 {
        canvas.add_line(StraightLine::new(r.tl, h, Orientation::Vertical, style));
    }
    if t.right > 0 {
        let tr = Point::new(r.right() - 1, r.tl.y);
        canvas.add_line(StraightLine::new(tr, h, Orientation::Vertical, style));
    }
}

/// The cells a title occupies on the top edge of a border at `r`, given the
/// title's display width. The title starts one cell in from the left edge and
/// is cut to leave the corners clear.
pub fn title_rect(r: Rect, t: Thickness, title_width: u32) -> Option<Rect> {
    if t.top == 0 || r.w < 3 || title_width == 0 {
        return None;
    }
    let w = title_width.min(r.w - 2);
    Some(Rect::new(r.tl.x.saturating_add(1), r.tl.y, w, 1))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nesting() {
        let [m, b, p] = nested_frames(
            Expanse::new(10, 6),
            Thickness::all(1),
            Thickness::new(2, 1, 0, 0),
        );
        assert_eq!(m, Rect::new(0, 0, 10, 6));
        assert_eq!(b, Rect::new(1, 1, 8, 4));
        assert_eq!(p, Rect::new(3, 2, 6, 3));

        // Thickness larger than the frame floors sizes at zero.
        let [_, b, p] = nested_frames(Expanse::new(1, 1), Thickness::all(2), Thickness::all(1));
        assert_eq!(b, Rect::new(2, 2, 0, 0));
        assert_eq!(p, Rect::new(3, 3, 0, 0));
    }

    #[test]
    fn border_lines() {
        let mut c = LineCanvas::new();
        add_border_lines(
            &mut c,
            Rect::new(0, 0, 5, 3),
            Thickness::all(1),
            LineStyle::Single,
        );
        assert_eq!(c.to_lines(), vec!["┌───┐", "│   │", "└───┘"]);

        let mut c = LineCanvas::new();
        add_border_lines(
            &mut c,
            Rect::new(0, 0, 4, 3),
            Thickness::new(0, 1, 0, 1),
            LineStyle::Single,
        );
        assert_eq!(c.to_lines(), vec!["────", "    ", "────"]);

        let mut c = LineCanvas::new();
        add_border_lines(&mut c, Rect::new(0, 0, 4, 3), Thickness::all(1), LineStyle::None);
        assert!(c.is_empty());
    }

    #[test]
    fn titles() {
        let r = Rect::new(2, 1, 8, 3);
        assert_eq!(
            title_rect(r, Thickness::all(1), 3),
            Some(Rect::new(3, 1, 3, 1))
        );
        assert_eq!(
            title_rect(r, Thickness::all(1), 20),
            Some(Rect::new(3, 1, 6, 1))
        );
        assert_eq!(title_rect(r, Thickness::new(1, 0, 1, 1), 3), None);
        assert_eq!(title_rect(Rect::new(0, 0, 2, 2), Thickness::all(1), 3), None);
    }
}
