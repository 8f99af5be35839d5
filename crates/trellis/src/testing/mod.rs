//! Helpers for testing layouts and renders headlessly.

/// Buffer matchers.
pub mod buf;

use crate::{
    error::Result,
    geom::{Expanse, Rect},
    id::ViewId,
    termbuf::TermBuf,
    view::Tree,
};

/// Lay out `root` against a screen of `size` and draw it into a fresh
/// buffer of NULL cells.
pub fn render(tree: &mut Tree, root: ViewId, size: impl Into<Expanse>) -> Result<TermBuf> {
    let size = size.into();
    let mut tb = TermBuf::empty(size);
    tree.layout(root, size)?;
    tree.draw(root, Some(&mut tb))?;
    Ok(tb)
}

/// Draw `root` again into an existing buffer without a layout pass.
pub fn redraw(tree: &mut Tree, root: ViewId, tb: &mut TermBuf) -> Result<()> {
    tree.draw(root, Some(tb))
}

/// Create a view with an absolute frame and attach it under `parent`.
pub fn child_at(tree: &mut Tree, parent: ViewId, r: Rect) -> Result<ViewId> {
    let v = tree.new_view();
    tree.set_frame(v, r)?;
    tree.add(parent, v)?;
    Ok(v)
}
