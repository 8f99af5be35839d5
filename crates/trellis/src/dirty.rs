//! Dirty-region tracking.
//!
//! A view's `needs_display` holds the region of its content, in content
//! coordinates, that must be repainted. Marking a region also marks the
//! overlapping parts of subviews, translated into their content spaces, and
//! raises `subview_needs_display` on every ancestor so a draw pass can find
//! dirty views without visiting clean subtrees.

use crate::{
    adornment::AdornmentState,
    error::Result,
    geom::{Expanse, Rect},
    id::ViewId,
    view::Tree,
};

/// Mark `region` of `id`'s content as dirty. Marking an adornment marks its
/// owner's adornments for repaint without touching the owner's content.
pub fn mark(tree: &mut Tree, id: ViewId, region: Rect) -> Result<()> {
    if let Some(owner) = tree.get(id)?.adornment().map(AdornmentState::owner) {
        let loc = tree.get(owner)?.viewport_location;
        return mark(tree, owner, Rect::at(loc, Expanse::default()));
    }
    mark_down(tree, id, region)?;
    let mut cur = tree.get(id)?.parent;
    while let Some(p) = cur {
        let node = tree.get_mut(p)?;
        if node.subview_needs_display {
            break;
        }
        node.subview_needs_display = true;
        cur = node.parent;
    }
    Ok(())
}

/// Union `region` into `id` and recurse into the subviews it overlaps.
fn mark_down(tree: &mut Tree, id: ViewId, region: Rect) -> Result<()> {
    let node = tree.get_mut(id)?;
    node.needs_display = Some(match node.needs_display {
        Some(r) => r.union(&region),
        None => region,
    });
    let children = node.children.clone();

    let mut marked = false;
    for c in children {
        let frame = tree.frame(c)?;
        let Some(overlap) = region.intersect(&frame) else {
            continue;
        };
        let vp = tree.viewport(c)?;
        let off = tree.viewport_offset(c)?;
        let shift = vp.tl - frame.tl - off;
        let local = overlap.offset(shift.x, shift.y);
        // Overlap confined to the subview's adornments leaves an empty
        // content region.
        let sub = local
            .intersect(&vp)
            .unwrap_or_else(|| Rect::at(vp.tl, Expanse::default()));
        mark_down(tree, c, sub)?;
        marked = true;
    }
    if marked {
        tree.get_mut(id)?.subview_needs_display = true;
    }
    Ok(())
}

/// Clear dirty state for `id` and everything below it.
pub fn clear(tree: &mut Tree, id: ViewId) -> Result<()> {
    for v in tree.subtree(id) {
        let node = tree.get_mut(v)?;
        node.needs_display = None;
        node.subview_needs_display = false;
    }
    Ok(())
}
