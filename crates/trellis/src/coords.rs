//! Conversions between the four coordinate spaces.
//!
//! - **Frame**: a view's frame is positioned in its superview's content
//!   space. An adornment's frame is relative to its owner's frame origin.
//! - **Viewport**: origin at the top-left of the area inside all adornments.
//! - **Content**: viewport coordinates shifted by the scroll offset.
//! - **Screen**: absolute terminal cells.
//!
//! Every `*_to_screen` function has an exact inverse.

use crate::{
    error::Result,
    geom::{Point, Rect},
    id::ViewId,
    view::Tree,
};

/// A view's frame in screen coordinates.
pub fn frame_to_screen(tree: &Tree, id: ViewId) -> Result<Rect> {
    let node = tree.get(id)?;
    if let Some(s) = node.adornment() {
        let owner = frame_to_screen(tree, s.owner())?;
        return Ok(node.frame.offset(owner.tl.x, owner.tl.y));
    }
    match node.parent {
        None => Ok(node.frame),
        Some(p) => Ok(Rect::at(
            content_to_screen(tree, p, node.frame.tl)?,
            node.frame.size(),
        )),
    }
}

/// A point in `id`'s viewport to screen coordinates.
pub fn viewport_to_screen(tree: &Tree, id: ViewId, p: Point) -> Result<Point> {
    let frame = frame_to_screen(tree, id)?;
    Ok(frame.tl + tree.viewport_offset(id)? + p)
}

/// A point in `id`'s content to screen coordinates.
pub fn content_to_screen(tree: &Tree, id: ViewId, p: Point) -> Result<Point> {
    let vp = tree.viewport(id)?;
    viewport_to_screen(tree, id, p - vp.tl)
}

/// A rectangle in `id`'s content to screen coordinates.
pub fn content_rect_to_screen(tree: &Tree, id: ViewId, r: Rect) -> Result<Rect> {
    Ok(Rect::at(content_to_screen(tree, id, r.tl)?, r.size()))
}

/// The viewport of `id` in screen coordinates.
pub fn viewport_screen_rect(tree: &Tree, id: ViewId) -> Result<Rect> {
    let vp = tree.viewport(id)?;
    Ok(Rect::at(viewport_to_screen(tree, id, Point::zero())?, vp.size()))
}

/// A screen point to `id`'s viewport coordinates.
pub fn screen_to_viewport(tree: &Tree, id: ViewId, p: Point) -> Result<Point> {
    let frame = frame_to_screen(tree, id)?;
    Ok(p - frame.tl - tree.viewport_offset(id)?)
}

/// A screen point to `id`'s content coordinates.
pub fn screen_to_content(tree: &Tree, id: ViewId, p: Point) -> Result<Point> {
    let vp = tree.viewport(id)?;
    Ok(screen_to_viewport(tree, id, p)? + vp.tl)
}

/// A screen point to the space `id`'s frame is expressed in: the
/// superview's content, the owner's frame for adornments, or the screen for
/// a detached view.
pub fn screen_to_frame(tree: &Tree, id: ViewId, p: Point) -> Result<Point> {
    let node = tree.get(id)?;
    if let Some(s) = node.adornment() {
        let owner = frame_to_screen(tree, s.owner())?;
        return Ok(p - owner.tl);
    }
    match node.parent {
        None => Ok(p),
        Some(parent) => screen_to_content(tree, parent, p),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        adornment::AdornmentKind,
        geom::{Expanse, Thickness},
        testing::child_at,
    };

    /// A root at (2, 1) holding a bordered, scrolled child holding a
    /// grandchild.
    fn nested() -> Result<(Tree, ViewId, ViewId, ViewId)> {
        let mut t = Tree::new();
        let root = t.new_view();
        t.set_frame(root, Rect::new(2, 1, 30, 20))?;
        t.set_adornment_thickness(root, AdornmentKind::Margin, Thickness::all(1))?;
        let a = child_at(&mut t, root, Rect::new(3, 2, 12, 8))?;
        t.set_border(a, None)?;
        t.set_content_size(a, Some(Expanse::new(40, 40)))?;
        let b = child_at(&mut t, a, Rect::new(5, 5, 4, 4))?;
        t.layout(root, Expanse::new(80, 25))?;
        t.scroll_to(a, Point::new(4, 2))?;
        Ok((t, root, a, b))
    }

    #[test]
    fn screen_positions() -> Result<()> {
        let (t, root, a, b) = nested()?;
        assert_eq!(frame_to_screen(&t, root)?, Rect::new(2, 1, 30, 20));
        // Root viewport starts at (3, 2); a sits 3 across and 2 down.
        assert_eq!(frame_to_screen(&t, a)?, Rect::new(6, 4, 12, 8));
        assert_eq!(viewport_to_screen(&t, a, Point::zero())?, Point::new(7, 5));
        // b is at content (5, 5) of a, scrolled by (4, 2).
        assert_eq!(frame_to_screen(&t, b)?, Rect::new(8, 8, 4, 4));
        assert_eq!(viewport_screen_rect(&t, a)?, Rect::new(7, 5, 10, 6));

        let border = t.adornment(a, AdornmentKind::Border)?;
        assert_eq!(frame_to_screen(&t, border)?, Rect::new(6, 4, 12, 8));
        assert_eq!(screen_to_frame(&t, border, Point::new(6, 4))?, Point::zero());
        Ok(())
    }

    #[test]
    fn inverses() -> Result<()> {
        let (t, _, a, b) = nested()?;
        let p = Point::new(9, 9);
        assert_eq!(screen_to_content(&t, a, content_to_screen(&t, a, p)?)?, p);
        assert_eq!(screen_to_viewport(&t, a, viewport_to_screen(&t, a, p)?)?, p);
        let tl = frame_to_screen(&t, b)?.tl;
        assert_eq!(screen_to_frame(&t, b, tl)?, t.frame(b)?.tl);
        Ok(())
    }

    proptest! {
        #[test]
        fn content_round_trip(x in -100i32..100, y in -100i32..100) {
            let (t, root, a, b) = nested().map_err(|e| TestCaseError::fail(e.to_string()))?;
            for id in [root, a, b] {
                let p = Point::new(x, y);
                let s = content_to_screen(&t, id, p).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let back = screen_to_content(&t, id, s).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(back, p);
            }
        }
    }
}
