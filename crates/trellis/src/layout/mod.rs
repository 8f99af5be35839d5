//! Constraint layout.
//!
//! Each view carries four expressions: `x` and `y` are [`Pos`] values, `width`
//! and `height` are [`Dim`] values. A pass resolves them top-down. For every
//! superview, its subviews are ordered so that a view is resolved after every
//! sibling its expressions reference, then each is resolved against the
//! superview's content size and laid out in turn.

mod dim;
mod graph;
mod pos;

pub use dim::{AutoStyle, Dim, Dimension, LayoutContext};
pub use graph::DependencyGraph;
pub use pos::{Op, Pos, Side};
use tracing::{debug_span, trace};

use crate::{
    adornment::nested_frames,
    dirty,
    error::{Error, Result},
    geom::{Expanse, Rect},
    id::ViewId,
    text::TextDirection,
    view::{LayoutEvent, Tree},
};

/// Resolve one axis: a position and a size along it. Automatic sizes, and
/// sizes that an aligned position depends on, are evaluated first at
/// position 0. The size is then evaluated again at the resolved position.
/// Negative sizes clamp to zero.
fn resolve_axis(
    pos: &Pos,
    dim: &Dim,
    super_size: i32,
    view: ViewId,
    dimension: Dimension,
    ctx: &dyn LayoutContext,
) -> (i32, u32) {
    let provisional = if dim.contains_auto() || pos.is_aligned() {
        dim.calculate(0, super_size, view, dimension, ctx).max(0)
    } else {
        0
    };
    let loc = pos.calculate(super_size, provisional, ctx);
    let size = dim.calculate(loc, super_size, view, dimension, ctx).max(0);
    (loc, size as u32)
}

/// State for one layout pass.
pub(crate) struct LayoutPass<'a> {
    /// The tree being laid out.
    tree: &'a mut Tree,
}

impl<'a> LayoutPass<'a> {
    /// Lay out `root`. A root without a superview is resolved against
    /// `screen` first.
    pub(crate) fn run(tree: &'a mut Tree, root: ViewId, screen: Expanse) -> Result<()> {
        let _span = debug_span!("layout", ?root, ?screen).entered();
        let node = tree.get(root)?;
        if node.is_adornment() {
            return Err(Error::IsAdornment(root));
        }
        let detached = node.parent.is_none();
        let mut pass = Self { tree };
        let mut moved = false;
        if detached {
            let old = pass.tree.frame(root)?;
            let new = pass.resolve(root, screen)?;
            if old != new {
                moved = true;
                pass.tree.set_needs_display(root)?;
            }
        }
        pass.layout_view(root, moved)
    }

    /// Compute and store the frame of `id` within a content area of
    /// `super_size`. The width axis goes first, so a height derived from
    /// wrapped text sees the final width.
    fn resolve(&mut self, id: ViewId, super_size: Expanse) -> Result<Rect> {
        let node = self.tree.get(id)?;
        let (x, w) = resolve_axis(
            &node.x,
            &node.width,
            super_size.w as i32,
            id,
            Dimension::Width,
            &*self.tree,
        );
        let node = self.tree.get_mut(id)?;
        node.frame = Rect::new(x, node.frame.tl.y, w, node.frame.h);

        let node = self.tree.get(id)?;
        let (y, h) = resolve_axis(
            &node.y,
            &node.height,
            super_size.h as i32,
            id,
            Dimension::Height,
            &*self.tree,
        );
        let frame = Rect::new(x, y, w, h);
        self.tree.get_mut(id)?.frame = frame;
        Ok(frame)
    }

    /// Lay out the adornments and subviews of `id`, whose own frame is
    /// already resolved. `moved` is set when the frame of `id` or of an
    /// enclosing view changed in this pass; descendants may reference any
    /// enclosing view, so every subview is then laid out again.
    fn layout_view(&mut self, id: ViewId, moved: bool) -> Result<()> {
        let frame = self.tree.frame(id)?;
        let ads = self.tree.adornments(id)?;
        let margin = self.tree.adornment_state(ads.margin)?.thickness();
        let border = self.tree.adornment_state(ads.border)?.thickness();
        for (aid, f) in ads
            .ids()
            .into_iter()
            .zip(nested_frames(frame.size(), margin, border))
        {
            let node = self.tree.get_mut(aid)?;
            node.frame = f;
            node.needs_layout = false;
            node.initialized = true;
        }

        let loc = self.tree.get(id)?.viewport_location;
        let clamped = self.tree.clamp_scroll(id, loc)?;
        if clamped != loc {
            self.tree.get_mut(id)?.viewport_location = clamped;
            self.tree.set_needs_display(id)?;
        }

        let content = self.tree.content_size(id)?;
        let children = self.tree.get(id)?.children.clone();
        let graph = {
            let tree = &*self.tree;
            DependencyGraph::build(
                &children,
                |c| {
                    let mut refs = Vec::new();
                    if let Some(n) = tree.node(c) {
                        n.x.references(&mut refs);
                        n.y.references(&mut refs);
                        n.width.references(&mut refs);
                        n.height.references(&mut refs);
                    }
                    refs
                },
                |target| target == id || tree.is_ancestor(target, id),
            )?
        };

        for child in graph.order() {
            let old = self.tree.frame(child)?;
            let new = self.resolve(child, content)?;
            let changed = old != new;
            if changed {
                trace!(?child, ?old, ?new, "frame changed");
                dirty::mark(self.tree, id, old.union(&new))?;
                self.tree.set_needs_display(child)?;
            }
            let node = self.tree.get(child)?;
            if moved || changed || node.needs_layout || !node.initialized {
                self.layout_view(child, moved || changed)?;
            }
        }

        let node = self.tree.get_mut(id)?;
        node.needs_layout = false;
        node.initialized = true;
        let frame = node.frame;
        trace!(?id, ?frame, "laid out");
        self.tree.layout_events.push(LayoutEvent { view: id, frame });
        Ok(())
    }
}

/// Natural text extent of `view` along `dimension`. Text flowing along the
/// dimension is measured against `inner`; text flowing across it is measured
/// against the view's current viewport extent on the other axis.
fn text_extent(tree: &Tree, view: ViewId, dimension: Dimension, inner: i32) -> i32 {
    let Some(node) = tree.node(view) else {
        return 0;
    };
    if node.text.is_empty() {
        return 0;
    }
    let across = tree.viewport(view).map(|r| r.size()).unwrap_or_default();
    let (limit, take_width) = match (node.text_direction, dimension) {
        (TextDirection::Horizontal, Dimension::Width) => (Some(inner as u32), true),
        (TextDirection::Horizontal, Dimension::Height) => (Some(across.w), false),
        (TextDirection::Vertical, Dimension::Height) => (Some(inner as u32), false),
        (TextDirection::Vertical, Dimension::Width) => (Some(across.h), true),
    };
    let size = tree
        .formatter
        .measure(&node.text, node.text_direction, limit.filter(|l| *l > 0));
    if take_width { size.w as i32 } else { size.h as i32 }
}

/// Far edge of the visible subviews of `view` along `dimension`, evaluated
/// against a content area of `inner`. Aligned subviews contribute only their
/// size; subviews that fill or take a percentage contribute only their
/// position; subviews at negative positions are ignored.
fn subviews_extent(tree: &Tree, view: ViewId, dimension: Dimension, inner: i32) -> i32 {
    let Some(node) = tree.node(view) else {
        return 0;
    };
    let mut extent = 0;
    for &c in &node.children {
        let Some(child) = tree.node(c) else {
            continue;
        };
        if !child.visible {
            continue;
        }
        let (pos, dim) = match dimension {
            Dimension::Width => (&child.x, &child.width),
            Dimension::Height => (&child.y, &child.height),
        };
        if matches!(dim, Dim::Fill(_) | Dim::Percent { .. }) {
            extent = extent.max(pos.calculate(inner, 0, tree));
            continue;
        }
        let (loc, size) = resolve_axis(pos, dim, inner, c, dimension, tree);
        let size = size as i32;
        if pos.is_aligned() {
            extent = extent.max(size);
        } else if loc >= 0 {
            extent = extent.max(loc.saturating_add(size));
        }
    }
    extent
}

impl LayoutContext for Tree {
    fn frame_of(&self, id: ViewId) -> Option<Rect> {
        self.node(id).map(|n| n.frame)
    }

    fn auto_extent(
        &self,
        view: ViewId,
        dimension: Dimension,
        style: AutoStyle,
        limit: i32,
    ) -> i32 {
        let Ok(t) = self.adornment_thickness(view) else {
            return 0;
        };
        let thick = match dimension {
            Dimension::Width => t.horizontal(),
            Dimension::Height => t.vertical(),
        } as i32;
        let inner = (limit - thick).max(0);
        let content = || match self.node(view).and_then(|n| n.content_size) {
            Some(s) => match dimension {
                Dimension::Width => s.w as i32,
                Dimension::Height => s.h as i32,
            },
            None => subviews_extent(self, view, dimension, inner),
        };
        let natural = match style {
            AutoStyle::Text => text_extent(self, view, dimension, inner),
            AutoStyle::Subviews => subviews_extent(self, view, dimension, inner),
            AutoStyle::Content => content(),
            AutoStyle::Auto => content().max(text_extent(self, view, dimension, inner)),
        };
        natural.saturating_add(thick)
    }
}
