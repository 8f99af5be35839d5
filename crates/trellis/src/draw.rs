//! The draw pass.
//!
//! Drawing walks the tree from a root, visiting only views that are dirty or
//! have dirty descendants. Each visited view paints its adornments, clears
//! its dirty region, draws its text and content, draws its subviews, and then
//! renders or hands up the line segments collected on its canvas. All output
//! goes through a [`Painter`], which clips to the region being repainted.

use std::mem;

use tracing::{debug_span, trace};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    adornment::{AdornmentKind, add_border_lines, title_rect},
    canvas::LineStyle,
    coords::{content_rect_to_screen, content_to_screen, frame_to_screen, viewport_screen_rect},
    dirty,
    error::{Error, Result},
    geom::{Expanse, Point, Rect, Thickness},
    id::ViewId,
    style::Attribute,
    view::Tree,
};

/// A cell-addressed output device.
pub trait Driver {
    /// Size of the output surface.
    fn size(&self) -> Expanse;
    /// Move the write cursor.
    fn move_to(&mut self, p: Point);
    /// Attribute for subsequent glyphs.
    fn set_attribute(&mut self, attr: Attribute);
    /// Write a glyph at the cursor and advance it by the glyph's width.
    fn add_glyph(&mut self, ch: char);
    /// Push pending output to the device.
    fn flush(&mut self) -> Result<()>;
}

/// Clipped drawing into a driver.
///
/// Coordinates passed to a painter are relative to its origin. Cells that
/// fall outside the clip rectangle, which is in screen coordinates, are
/// dropped. A painter without a driver accepts every call and draws nothing.
pub struct Painter<'a> {
    /// Output, if any.
    driver: Option<&'a mut dyn Driver>,
    /// Screen position of the painter's (0, 0).
    origin: Point,
    /// Screen cells that may be written.
    clip: Rect,
    /// Attribute for writes.
    attribute: Attribute,
}

impl<'a> Painter<'a> {
    /// A painter with origin `origin` and clip `clip`, both in screen
    /// coordinates.
    pub fn new(
        driver: Option<&'a mut dyn Driver>,
        origin: Point,
        clip: Rect,
        attribute: Attribute,
    ) -> Self {
        Self {
            driver,
            origin,
            clip,
            attribute,
        }
    }

    /// Is there no driver behind this painter?
    pub fn is_headless(&self) -> bool {
        self.driver.is_none()
    }

    /// Screen position of the painter's origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The clip rectangle, relative to the painter's origin.
    pub fn clip(&self) -> Rect {
        let back = -self.origin;
        self.clip.offset(back.x, back.y)
    }

    /// Current attribute.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Change the attribute for subsequent writes.
    pub fn set_attribute(&mut self, attr: Attribute) {
        self.attribute = attr;
    }

    /// Write one glyph. Returns false if it was clipped or there is no
    /// driver. Wide glyphs are written only if every cell they cover is
    /// inside the clip.
    pub fn put(&mut self, p: Point, ch: char) -> bool {
        let s = self.origin + p;
        let w = ch.width().unwrap_or(0).max(1) as i32;
        if !self.clip.contains_point(s) || !self.clip.contains_point(s.offset(w - 1, 0)) {
            return false;
        }
        let Some(d) = self.driver.as_deref_mut() else {
            return false;
        };
        d.move_to(s);
        d.set_attribute(self.attribute);
        d.add_glyph(ch);
        true
    }

    /// Write a run of text on one row, by grapheme, stopping before the
    /// display width would exceed `max`. Returns the width consumed.
    pub fn text_within(&mut self, p: Point, s: &str, max: u32) -> u32 {
        let mut x = 0u32;
        for g in s.graphemes(true) {
            let w = g.width() as u32;
            if w == 0 {
                continue;
            }
            if x + w > max {
                break;
            }
            if let Some(ch) = g.chars().next() {
                self.put(p.offset(x as i32, 0), ch);
            }
            x += w;
        }
        x
    }

    /// Write a run of text on one row.
    pub fn text(&mut self, p: Point, s: &str) -> u32 {
        self.text_within(p, s, u32::MAX)
    }

    /// Fill a rectangle with a character.
    pub fn fill(&mut self, r: Rect, ch: char) {
        let Some(r) = r.intersect(&self.clip()) else {
            return;
        };
        for p in r.cells() {
            self.put(p, ch);
        }
    }
}

/// What a view's content is told when asked to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawContext {
    /// The view being drawn.
    pub view: ViewId,
    /// The viewport, in content coordinates.
    pub viewport: Rect,
    /// Size of the content.
    pub content_size: Expanse,
    /// The region being repainted, in content coordinates.
    pub dirty: Rect,
}

/// Widget-specific drawing, attached to a view with
/// [`Tree::set_content`]. The painter's origin is the view's content origin
/// and it is clipped to the region being repainted.
pub trait Content {
    /// Paint the view's content.
    fn draw(&mut self, painter: &mut Painter<'_>, ctx: &DrawContext);
}

/// The four strips of `r` covered by a thickness.
fn thickness_strips(r: Rect, t: Thickness) -> [Rect; 4] {
    let inner = t.inside(r);
    let below = r.bottom().saturating_sub(inner.bottom()).max(0) as u32;
    let after = r.right().saturating_sub(inner.right()).max(0) as u32;
    [
        Rect::new(r.tl.x, r.tl.y, r.w, t.top.min(r.h)),
        Rect::new(r.tl.x, inner.bottom(), r.w, below),
        Rect::new(r.tl.x, inner.tl.y, t.left.min(r.w), inner.h),
        Rect::new(inner.right(), inner.tl.y, after, inner.h),
    ]
}

/// State for one draw pass.
pub(crate) struct DrawPass<'a> {
    /// The tree being drawn.
    tree: &'a mut Tree,
    /// Output, if any.
    driver: Option<&'a mut dyn Driver>,
}

impl<'a> DrawPass<'a> {
    /// Draw `root` and its dirty descendants, then flush the driver.
    pub(crate) fn run(
        tree: &'a mut Tree,
        root: ViewId,
        driver: Option<&'a mut dyn Driver>,
    ) -> Result<()> {
        let _span = debug_span!("draw", ?root).entered();
        if tree.get(root)?.is_adornment() {
            return Err(Error::IsAdornment(root));
        }
        let screen = driver
            .as_ref()
            .map_or(tree.config.fallback_screen, |d| d.size());
        let mut pass = Self { tree, driver };
        if !pass.tree.is_visible(root) {
            return Ok(());
        }

        let mut clip = screen.rect();
        let mut cur = pass.tree.get(root)?.parent;
        while let Some(p) = cur {
            clip = clip.clip(&viewport_screen_rect(pass.tree, p)?);
            cur = pass.tree.get(p)?.parent;
        }
        pass.draw_view(root, clip)?;
        let root_clip = clip.clip(&frame_to_screen(pass.tree, root)?);
        pass.render_handed_up_lines(root, root_clip)?;
        dirty::clear(pass.tree, root)?;
        if let Some(d) = pass.driver.as_deref_mut() {
            d.flush()?;
        }
        Ok(())
    }

    /// A painter over the pass's driver.
    fn painter(&mut self, origin: Point, clip: Rect, attr: Attribute) -> Painter<'_> {
        Painter::new(
            self.driver.as_deref_mut().map(|d| d as &mut dyn Driver),
            origin,
            clip,
            attr,
        )
    }

    /// Draw one view within `clip`, a screen rectangle.
    fn draw_view(&mut self, id: ViewId, clip: Rect) -> Result<()> {
        let frame = frame_to_screen(self.tree, id)?;
        let frame_clip = clip.clip(&frame);
        let node = self.tree.get(id)?;
        let dirty = node.needs_display;
        trace!(?id, ?frame, ?dirty, "draw view");

        let content_size = self.tree.content_size(id)?;
        let mut content_clip = frame_clip.clip(&viewport_screen_rect(self.tree, id)?);
        if self.tree.config.clip_content_only {
            let content = content_rect_to_screen(self.tree, id, content_size.rect())?;
            content_clip = content_clip.clip(&content);
        }

        if let Some(region) = dirty {
            self.draw_adornments(id, frame_clip)?;
            self.draw_content(id, region, content_clip)?;
        }

        let children = self.tree.get(id)?.children.clone();
        for c in children {
            let child = self.tree.get(c)?;
            if !child.visible {
                continue;
            }
            if child.needs_display.is_some() || child.subview_needs_display || child.needs_layout
            {
                self.draw_view(c, content_clip)?;
            } else if child.superview_renders_line_canvas {
                self.collect_border_lines(c)?;
                let mut lines = mem::take(&mut self.tree.get_mut(c)?.line_canvas);
                self.tree.get_mut(id)?.line_canvas.merge(&mut lines);
            }
        }

        self.render_line_canvas(id, frame_clip)
    }

    /// Clear the dirty region, then draw text and content.
    fn draw_content(&mut self, id: ViewId, region: Rect, content_clip: Rect) -> Result<()> {
        let vp = self.tree.viewport(id)?;
        let content_size = self.tree.content_size(id)?;
        let origin = content_to_screen(self.tree, id, Point::zero())?;
        let clip = content_clip.clip(&content_rect_to_screen(self.tree, id, region)?);
        if clip.is_zero() {
            return Ok(());
        }
        let node = self.tree.get(id)?;
        let attr = node.attribute;
        {
            let tree = &*self.tree;
            let node = tree.get(id)?;
            let mut painter = Painter::new(
                self.driver.as_deref_mut().map(|d| d as &mut dyn Driver),
                origin,
                clip,
                attr,
            );
            painter.fill(region, ' ');
            if !node.text.is_empty() {
                tree.formatter.draw(
                    &node.text,
                    node.text_direction,
                    content_size.rect(),
                    &mut painter,
                );
            }
        }

        if let Some(mut content) = self.tree.get_mut(id)?.content.take() {
            let ctx = DrawContext {
                view: id,
                viewport: vp,
                content_size,
                dirty: region,
            };
            content.draw(&mut self.painter(origin, clip, attr), &ctx);
            self.tree.get_mut(id)?.content = Some(content);
        }
        Ok(())
    }

    /// Paint adornment thickness, add border lines to the view's canvas and
    /// draw the border title.
    fn draw_adornments(&mut self, id: ViewId, frame_clip: Rect) -> Result<()> {
        let ads = self.tree.adornments(id)?;
        let attr = self.tree.get(id)?.attribute;
        let fill = self.tree.config.diagnostics.thickness_fill.unwrap_or(' ');
        for kind in AdornmentKind::ALL {
            let aid = ads.get(kind);
            let state = self.tree.adornment_state(aid)?;
            let t = state.thickness();
            if t.is_zero() {
                continue;
            }
            let (style, title) = (state.line_style(), state.title().map(str::to_string));
            let r = frame_to_screen(self.tree, aid)?;
            {
                let mut painter = self.painter(Point::zero(), frame_clip, attr);
                for strip in thickness_strips(r, t) {
                    painter.fill(strip, fill);
                }
            }
            if kind != AdornmentKind::Border || style == LineStyle::None {
                continue;
            }
            add_border_lines(&mut self.tree.get_mut(id)?.line_canvas, r, t, style);
            if let Some(title) = title
                && let Some(tr) = title_rect(r, t, title.width() as u32)
            {
                self.painter(Point::zero(), frame_clip, attr)
                    .text_within(tr.tl, &title, tr.w);
                self.tree.get_mut(id)?.line_canvas.exclude(tr);
            }
        }
        Ok(())
    }

    /// Add the border lines of a view that is not being redrawn to its canvas,
    /// so that its superview can join them with redrawn siblings.
    fn collect_border_lines(&mut self, id: ViewId) -> Result<()> {
        let border = self.tree.adornment(id, AdornmentKind::Border)?;
        let state = self.tree.adornment_state(border)?;
        let (t, style) = (state.thickness(), state.line_style());
        let title_width = state.title().map_or(0, |s| s.width() as u32);
        let r = frame_to_screen(self.tree, border)?;
        let canvas = &mut self.tree.get_mut(id)?.line_canvas;
        add_border_lines(canvas, r, t, style);
        if let Some(tr) = title_rect(r, t, title_width) {
            canvas.exclude(tr);
        }
        Ok(())
    }

    /// Pass the view's lines up, or render and drain them.
    fn render_line_canvas(&mut self, id: ViewId, frame_clip: Rect) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        if node.line_canvas.is_empty() {
            node.line_canvas.clear();
            return Ok(());
        }
        if node.superview_renders_line_canvas
            && let Some(parent) = node.parent
        {
            let mut lines = mem::take(&mut node.line_canvas);
            self.tree.get_mut(parent)?.line_canvas.merge(&mut lines);
            return Ok(());
        }
        self.paint_line_canvas(id, frame_clip)
    }

    /// When the pass root hands its lines up, they land in ancestors the pass
    /// never visits. Carry them to the first ancestor that renders its own
    /// canvas, together with the borders they join against, and paint the
    /// result within `clip`.
    fn render_handed_up_lines(&mut self, root: ViewId, clip: Rect) -> Result<()> {
        let mut child = root;
        while self.tree.get(child)?.superview_renders_line_canvas {
            let Some(p) = self.tree.get(child)?.parent else {
                break;
            };
            let siblings = self.tree.get(p)?.children.clone();
            for s in siblings {
                let n = self.tree.get(s)?;
                if s == child || !n.visible || !n.superview_renders_line_canvas {
                    continue;
                }
                self.collect_border_lines(s)?;
                let mut lines = mem::take(&mut self.tree.get_mut(s)?.line_canvas);
                self.tree.get_mut(p)?.line_canvas.merge(&mut lines);
            }
            self.collect_border_lines(p)?;

            let node = self.tree.get_mut(p)?;
            if node.superview_renders_line_canvas
                && let Some(up) = node.parent
            {
                let mut lines = mem::take(&mut node.line_canvas);
                self.tree.get_mut(up)?.line_canvas.merge(&mut lines);
                child = p;
                continue;
            }
            return self.paint_line_canvas(p, clip);
        }
        Ok(())
    }

    /// Paint a view's canvas within `clip` and drain it.
    fn paint_line_canvas(&mut self, id: ViewId, clip: Rect) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        let attr = node.attribute;
        let cells = node.line_canvas.cell_map();
        node.line_canvas.clear();
        let mut painter = self.painter(Point::zero(), clip, attr);
        for (p, ch) in cells {
            painter.put(p, ch);
        }
        Ok(())
    }
}
