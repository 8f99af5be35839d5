use std::mem;

use slotmap::SlotMap;
use tracing::debug;

use crate::{
    adornment::{
        AdornmentKind, AdornmentState, Adornments, BorderStyleChange, BorderValidator,
    },
    canvas::{LineCanvas, LineStyle},
    command::CommandSet,
    config::Config,
    dirty,
    draw::{Content, DrawPass, Driver},
    error::{Error, Result},
    geom::{Expanse, Point, Rect, Thickness},
    id::ViewId,
    key::Key,
    layout::{Dim, LayoutPass, Pos},
    style::Attribute,
    text::{PlainText, TextDirection, TextFormatter},
};

/// What a node is: an ordinary view with its three adornments, or one of
/// those adornments.
pub(crate) enum Role {
    /// A view in the hierarchy.
    View(Adornments),
    /// An adornment of another view.
    Adornment(AdornmentState),
}

/// Core node data stored in the arena.
pub struct Node {
    /// Superview. Always None for adornments.
    pub(crate) parent: Option<ViewId>,
    /// Subviews, in draw order.
    pub(crate) children: Vec<ViewId>,
    /// View or adornment.
    pub(crate) role: Role,

    /// Horizontal position constraint.
    pub(crate) x: Pos,
    /// Vertical position constraint.
    pub(crate) y: Pos,
    /// Width constraint.
    pub(crate) width: Dim,
    /// Height constraint.
    pub(crate) height: Dim,

    /// Outer rect relative to the superview's content origin. For adornments,
    /// relative to the owner's frame origin.
    pub(crate) frame: Rect,
    /// Scroll offset of the viewport into the content.
    pub(crate) viewport_location: Point,
    /// Permit scrolling to negative offsets.
    pub(crate) allow_negative_scroll: bool,
    /// Explicit content size. None tracks the viewport size.
    pub(crate) content_size: Option<Expanse>,

    /// Visibility flag of this node alone.
    pub(crate) visible: bool,
    /// Text drawn into the viewport.
    pub(crate) text: String,
    /// Text flow direction.
    pub(crate) text_direction: TextDirection,
    /// Cell attribute for background, text and lines.
    pub(crate) attribute: Attribute,
    /// Node name, for dumps and logs.
    pub(crate) name: String,

    /// Layout must run for this node.
    pub(crate) needs_layout: bool,
    /// Layout has run at least once.
    pub(crate) initialized: bool,
    /// Dirty region in content coordinates. None when clean; an empty rect
    /// means only the adornments need repainting.
    pub(crate) needs_display: Option<Rect>,
    /// Some descendant is dirty.
    pub(crate) subview_needs_display: bool,

    /// Line segments gathered during a draw pass.
    pub(crate) line_canvas: LineCanvas,
    /// Hand this view's lines to the superview instead of rendering them.
    pub(crate) superview_renders_line_canvas: bool,

    /// Widget-specific drawing.
    pub(crate) content: Option<Box<dyn Content>>,
    /// Commands and key bindings.
    pub(crate) commands: CommandSet,
}

impl Node {
    /// A node with default constraints and an empty frame.
    fn new(role: Role) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            role,
            x: Pos::default(),
            y: Pos::default(),
            width: Dim::default(),
            height: Dim::default(),
            frame: Rect::zero(),
            viewport_location: Point::zero(),
            allow_negative_scroll: false,
            content_size: None,
            visible: true,
            text: String::new(),
            text_direction: TextDirection::default(),
            attribute: Attribute::default(),
            name: String::new(),
            needs_layout: true,
            initialized: false,
            needs_display: None,
            subview_needs_display: false,
            line_canvas: LineCanvas::new(),
            superview_renders_line_canvas: false,
            content: None,
            commands: CommandSet::default(),
        }
    }

    /// Superview.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Subviews.
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// Is this node an adornment?
    pub fn is_adornment(&self) -> bool {
        matches!(self.role, Role::Adornment(_))
    }

    /// The node's adornments, if it is a view.
    pub fn adornments(&self) -> Option<Adornments> {
        match &self.role {
            Role::View(a) => Some(*a),
            Role::Adornment(_) => None,
        }
    }

    /// Adornment state, if this node is an adornment.
    pub fn adornment(&self) -> Option<&AdornmentState> {
        match &self.role {
            Role::Adornment(s) => Some(s),
            Role::View(_) => None,
        }
    }

    /// The owner for an adornment, the superview otherwise.
    pub fn up(&self) -> Option<ViewId> {
        match &self.role {
            Role::Adornment(s) => Some(s.owner),
            Role::View(_) => self.parent,
        }
    }

    /// Frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Horizontal position constraint.
    pub fn x(&self) -> &Pos {
        &self.x
    }

    /// Vertical position constraint.
    pub fn y(&self) -> &Pos {
        &self.y
    }

    /// Width constraint.
    pub fn width(&self) -> &Dim {
        &self.width
    }

    /// Height constraint.
    pub fn height(&self) -> &Dim {
        &self.height
    }

    /// Text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visibility of this node alone; ancestors may still hide it.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Does layout need to run?
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Has layout run at least once?
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Dirty region in content coordinates.
    pub fn needs_display(&self) -> Option<Rect> {
        self.needs_display
    }

    /// Is a descendant dirty?
    pub fn subview_needs_display(&self) -> bool {
        self.subview_needs_display
    }

    /// Explicit content size, if one was set.
    pub fn explicit_content_size(&self) -> Option<Expanse> {
        self.content_size
    }

    /// Pending line segments.
    pub fn line_canvas(&self) -> &LineCanvas {
        &self.line_canvas
    }

    /// Does this view hand its lines to its superview?
    pub fn superview_renders_line_canvas(&self) -> bool {
        self.superview_renders_line_canvas
    }

    /// Commands and bindings.
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }
}

/// Emitted when layout finishes for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEvent {
    /// The view laid out.
    pub view: ViewId,
    /// Its frame afterwards.
    pub frame: Rect,
}

/// The view arena. Views are created detached and then attached under a
/// superview; a tree may hold any number of detached roots.
///
/// Layout and draw passes take `&mut Tree` for their whole duration, so the
/// hierarchy cannot be mutated while a pass is running.
pub struct Tree {
    /// All views and adornments.
    pub(crate) nodes: SlotMap<ViewId, Node>,
    /// Settings.
    pub(crate) config: Config,
    /// Text service.
    pub(crate) formatter: Box<dyn TextFormatter>,
    /// Completed layouts not yet collected.
    pub(crate) layout_events: Vec<LayoutEvent>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// An empty tree with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// An empty tree with the given settings.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            config,
            formatter: Box::new(PlainText::default()),
            layout_events: Vec::new(),
        }
    }

    /// Settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the text service.
    pub fn set_text_formatter(&mut self, f: impl TextFormatter + 'static) {
        self.formatter = Box::new(f);
    }

    /// Look up a node.
    pub fn node(&self, id: ViewId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Does the id name a live node?
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, adornments included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node lookup as a `Result`.
    pub(crate) fn get(&self, id: ViewId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::ViewNotFound(id))
    }

    /// Mutable node lookup as a `Result`.
    pub(crate) fn get_mut(&mut self, id: ViewId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::ViewNotFound(id))
    }

    /// Mutable lookup that rejects adornments.
    fn view_mut(&mut self, id: ViewId) -> Result<&mut Node> {
        let node = self.get_mut(id)?;
        if node.is_adornment() {
            return Err(Error::IsAdornment(id));
        }
        Ok(node)
    }

    /// Mutable adornment state lookup.
    fn adornment_mut(&mut self, id: ViewId) -> Result<&mut AdornmentState> {
        match &mut self.get_mut(id)?.role {
            Role::Adornment(s) => Ok(s),
            Role::View(_) => Err(Error::NotAnAdornment(id)),
        }
    }

    /// Create a detached view together with its margin, border and padding.
    pub fn new_view(&mut self) -> ViewId {
        let placeholder = Adornments {
            margin: ViewId::default(),
            border: ViewId::default(),
            padding: ViewId::default(),
        };
        let id = self.nodes.insert(Node::new(Role::View(placeholder)));
        let [margin, border, padding] = AdornmentKind::ALL
            .map(|k| self.nodes.insert(Node::new(Role::Adornment(AdornmentState::new(id, k)))));
        if let Some(node) = self.nodes.get_mut(id) {
            node.role = Role::View(Adornments {
                margin,
                border,
                padding,
            });
        }
        id
    }

    /// Create a detached view with a name.
    pub fn new_named(&mut self, name: &str) -> ViewId {
        let id = self.new_view();
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = name.to_string();
        }
        id
    }

    /// Attach a detached view as the last subview of `parent`.
    pub fn add(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        if self.get(parent)?.is_adornment() {
            return Err(Error::IsAdornment(parent));
        }
        let c = self.get(child)?;
        if c.is_adornment() {
            return Err(Error::IsAdornment(child));
        }
        if c.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        debug!(?parent, ?child, "attach");
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        self.set_needs_layout(parent)?;
        self.set_needs_display(child)
    }

    /// Detach `child` from `parent`. The child stays in the arena and can be
    /// attached elsewhere.
    pub fn remove(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        if self.get(child)?.parent != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        debug!(?parent, ?child, "detach");
        let old = self.get(child)?.frame;
        self.get_mut(parent)?.children.retain(|c| *c != child);
        self.get_mut(child)?.parent = None;
        self.set_needs_layout(parent)?;
        dirty::mark(self, parent, old)
    }

    /// Detach a view and drop it, its subviews and all their adornments from
    /// the arena.
    pub fn dispose(&mut self, id: ViewId) -> Result<()> {
        let node = self.get(id)?;
        if node.is_adornment() {
            return Err(Error::IsAdornment(id));
        }
        if let Some(parent) = node.parent {
            self.remove(parent, id)?;
        }
        let doomed = self.subtree(id);
        debug!(?id, count = doomed.len(), "dispose");
        for v in doomed.iter().rev() {
            if let Some(node) = self.nodes.remove(*v)
                && let Some(a) = node.adornments()
            {
                for aid in a.ids() {
                    self.nodes.remove(aid);
                }
            }
        }
        Ok(())
    }

    /// Superview of a view.
    pub fn parent(&self, id: ViewId) -> Result<Option<ViewId>> {
        Ok(self.get(id)?.parent)
    }

    /// Subviews of a view.
    pub fn children(&self, id: ViewId) -> Result<&[ViewId]> {
        Ok(&self.get(id)?.children)
    }

    /// Is `ancestor` a strict ancestor of `id`? Adornments count their owner's
    /// ancestry.
    pub fn is_ancestor(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut cur = self.nodes.get(id).and_then(Node::up);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.nodes.get(c).and_then(Node::up);
        }
        false
    }

    /// A view and all its descendants, pre-order. Adornments are excluded.
    pub fn subtree(&self, root: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Set the horizontal position constraint.
    pub fn set_x(&mut self, id: ViewId, x: impl Into<Pos>) -> Result<()> {
        self.geometry_mut(id)?.x = x.into();
        self.set_needs_layout(id)
    }

    /// Set the vertical position constraint.
    pub fn set_y(&mut self, id: ViewId, y: impl Into<Pos>) -> Result<()> {
        self.geometry_mut(id)?.y = y.into();
        self.set_needs_layout(id)
    }

    /// Set the width constraint.
    pub fn set_width(&mut self, id: ViewId, w: impl Into<Dim>) -> Result<()> {
        self.geometry_mut(id)?.width = w.into();
        self.set_needs_layout(id)
    }

    /// Set the height constraint.
    pub fn set_height(&mut self, id: ViewId, h: impl Into<Dim>) -> Result<()> {
        self.geometry_mut(id)?.height = h.into();
        self.set_needs_layout(id)
    }

    /// Mutable lookup for geometry changes, which adornments refuse.
    fn geometry_mut(&mut self, id: ViewId) -> Result<&mut Node> {
        let node = self.get_mut(id)?;
        if node.is_adornment() {
            return Err(Error::AdornmentGeometry(id));
        }
        Ok(node)
    }

    /// Frame.
    pub fn frame(&self, id: ViewId) -> Result<Rect> {
        Ok(self.get(id)?.frame)
    }

    /// Place a view at a fixed rectangle. This replaces all four constraints
    /// with absolute values and applies the frame at once.
    pub fn set_frame(&mut self, id: ViewId, r: Rect) -> Result<()> {
        let node = self.geometry_mut(id)?;
        let old = node.frame;
        node.x = Pos::Absolute(r.tl.x);
        node.y = Pos::Absolute(r.tl.y);
        node.width = Dim::Absolute(r.w as i32);
        node.height = Dim::Absolute(r.h as i32);
        node.frame = r;
        let parent = node.parent;
        self.set_needs_layout(id)?;
        if let Some(p) = parent {
            dirty::mark(self, p, old.union(&r))?;
        }
        self.set_needs_display(id)
    }

    /// Combined thickness of a view's three adornments. Zero for adornments.
    pub fn adornment_thickness(&self, id: ViewId) -> Result<Thickness> {
        let Some(a) = self.get(id)?.adornments() else {
            return Ok(Thickness::zero());
        };
        Ok(a.ids()
            .iter()
            .filter_map(|aid| self.nodes.get(*aid))
            .filter_map(Node::adornment)
            .fold(Thickness::zero(), |t, s| t + s.thickness))
    }

    /// Offset from the frame origin to the viewport origin.
    pub fn viewport_offset(&self, id: ViewId) -> Result<Point> {
        Ok(self.adornment_thickness(id)?.origin())
    }

    /// The viewport: its location is the scroll offset into the content, its
    /// size the frame less all adornment thickness.
    pub fn viewport(&self, id: ViewId) -> Result<Rect> {
        let node = self.get(id)?;
        let size = node.frame.size().shrink(self.adornment_thickness(id)?);
        Ok(Rect::at(node.viewport_location, size))
    }

    /// Content size: the explicit size if set, otherwise the viewport size.
    pub fn content_size(&self, id: ViewId) -> Result<Expanse> {
        let node = self.get(id)?;
        match node.content_size {
            Some(s) => Ok(s),
            None => Ok(self.viewport(id)?.size()),
        }
    }

    /// Set or clear the explicit content size.
    pub fn set_content_size(&mut self, id: ViewId, size: Option<Expanse>) -> Result<()> {
        self.view_mut(id)?.content_size = size;
        self.set_needs_layout(id)?;
        self.set_needs_display(id)
    }

    /// Permit negative scroll offsets.
    pub fn set_allow_negative_scroll(&mut self, id: ViewId, allow: bool) -> Result<()> {
        self.view_mut(id)?.allow_negative_scroll = allow;
        self.scroll_to(id, self.get(id)?.viewport_location)
    }

    /// Clamp a scroll offset to what the content permits.
    pub(crate) fn clamp_scroll(&self, id: ViewId, p: Point) -> Result<Point> {
        let node = self.get(id)?;
        let vp = self.viewport(id)?.size();
        let content = self.content_size(id)?;
        let axis = |v: i32, view: u32, content: u32| {
            let hi = (content as i32 - view as i32).max(0);
            let lo = if node.allow_negative_scroll {
                (1 - view as i32).min(0)
            } else {
                0
            };
            v.clamp(lo, hi)
        };
        Ok(Point::new(axis(p.x, vp.w, content.w), axis(p.y, vp.h, content.h)))
    }

    /// Scroll the viewport to a content offset, clamped to the content.
    pub fn scroll_to(&mut self, id: ViewId, p: Point) -> Result<()> {
        let p = self.clamp_scroll(id, p)?;
        let node = self.view_mut(id)?;
        if node.viewport_location == p {
            return Ok(());
        }
        node.viewport_location = p;
        self.set_needs_display(id)
    }

    /// Scroll the viewport by a delta.
    pub fn scroll_by(&mut self, id: ViewId, dx: i32, dy: i32) -> Result<()> {
        let cur = self.get(id)?.viewport_location;
        self.scroll_to(id, cur.offset(dx, dy))
    }

    /// A view's adornments.
    pub fn adornments(&self, id: ViewId) -> Result<Adornments> {
        self.get(id)?.adornments().ok_or(Error::IsAdornment(id))
    }

    /// One of a view's adornments.
    pub fn adornment(&self, id: ViewId, kind: AdornmentKind) -> Result<ViewId> {
        Ok(self.adornments(id)?.get(kind))
    }

    /// Adornment state of an adornment node.
    pub fn adornment_state(&self, id: ViewId) -> Result<&AdornmentState> {
        self.get(id)?.adornment().ok_or(Error::NotAnAdornment(id))
    }

    /// Set the thickness of an adornment node.
    pub fn set_thickness(&mut self, adornment: ViewId, t: Thickness) -> Result<()> {
        let state = self.adornment_mut(adornment)?;
        if state.thickness == t {
            return Ok(());
        }
        state.thickness = t;
        let owner = state.owner;
        self.set_needs_layout(owner)?;
        self.set_needs_display(owner)
    }

    /// Set the thickness of one of a view's adornments.
    pub fn set_adornment_thickness(
        &mut self,
        id: ViewId,
        kind: AdornmentKind,
        t: Thickness,
    ) -> Result<()> {
        let a = self.adornment(id, kind)?;
        self.set_thickness(a, t)
    }

    /// Thickness of one of a view's adornments.
    pub fn thickness(&self, id: ViewId, kind: AdornmentKind) -> Result<Thickness> {
        Ok(self.adornment_state(self.adornment(id, kind)?)?.thickness)
    }

    /// Enable a one-cell border, in `style` or the configured default.
    pub fn set_border(&mut self, id: ViewId, style: Option<LineStyle>) -> Result<()> {
        let style = style.unwrap_or(self.config.default_border_style);
        self.set_border_style(id, style)
    }

    /// Change a view's border style. Validators registered with
    /// [`Tree::on_border_style_changing`] may veto the change. Setting
    /// `LineStyle::None` removes the border thickness; any other style gives a
    /// borderless view a one-cell border.
    pub fn set_border_style(&mut self, id: ViewId, style: LineStyle) -> Result<()> {
        let border = self.adornment(id, AdornmentKind::Border)?;
        let state = self.adornment_mut(border)?;
        let change = BorderStyleChange {
            view: id,
            old: state.line_style,
            new: style,
        };
        if change.old == change.new {
            return Ok(());
        }
        let mut validators = mem::take(&mut state.validators);
        let accepted = validators.iter_mut().all(|v| v(&change));
        let state = self.adornment_mut(border)?;
        // Validators registered during the callbacks land after the
        // existing ones.
        validators.append(&mut state.validators);
        state.validators = validators;
        if !accepted {
            return Err(Error::Vetoed(format!(
                "border style {:?} -> {:?}",
                change.old, change.new
            )));
        }
        state.line_style = style;
        let t = if style == LineStyle::None {
            Thickness::zero()
        } else if state.thickness.is_zero() {
            Thickness::all(1)
        } else {
            state.thickness
        };
        state.thickness = t;
        self.set_needs_layout(id)?;
        self.set_needs_display(id)
    }

    /// Border style of a view.
    pub fn border_style(&self, id: ViewId) -> Result<LineStyle> {
        let border = self.adornment(id, AdornmentKind::Border)?;
        Ok(self.adornment_state(border)?.line_style)
    }

    /// Register a validator consulted before the border style changes.
    pub fn on_border_style_changing(
        &mut self,
        id: ViewId,
        f: impl FnMut(&BorderStyleChange) -> bool + 'static,
    ) -> Result<()> {
        let border = self.adornment(id, AdornmentKind::Border)?;
        let v: BorderValidator = Box::new(f);
        self.adornment_mut(border)?.validators.push(v);
        Ok(())
    }

    /// Set or clear the border title.
    pub fn set_border_title(&mut self, id: ViewId, title: Option<&str>) -> Result<()> {
        let border = self.adornment(id, AdornmentKind::Border)?;
        self.adornment_mut(border)?.title = title.map(str::to_string);
        self.set_needs_display(id)
    }

    /// Show or hide a view.
    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> Result<()> {
        let node = self.view_mut(id)?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        let (parent, frame) = (node.parent, node.frame);
        if let Some(p) = parent {
            self.set_needs_layout(p)?;
            dirty::mark(self, p, frame)?;
        }
        if visible {
            self.set_needs_display(id)?;
        }
        Ok(())
    }

    /// Is the view and every ancestor visible?
    pub fn is_visible(&self, id: ViewId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.nodes.get(c) {
                Some(n) if n.visible => cur = n.up(),
                _ => return false,
            }
        }
        true
    }

    /// Set the text drawn in the viewport.
    pub fn set_text(&mut self, id: ViewId, text: &str) -> Result<()> {
        self.view_mut(id)?.text = text.to_string();
        self.set_needs_layout(id)?;
        self.set_needs_display(id)
    }

    /// Set the text flow direction.
    pub fn set_text_direction(&mut self, id: ViewId, d: TextDirection) -> Result<()> {
        self.view_mut(id)?.text_direction = d;
        self.set_needs_layout(id)?;
        self.set_needs_display(id)
    }

    /// Set the cell attribute.
    pub fn set_attribute(&mut self, id: ViewId, attr: Attribute) -> Result<()> {
        self.view_mut(id)?.attribute = attr;
        self.set_needs_display(id)
    }

    /// Set the name.
    pub fn set_name(&mut self, id: ViewId, name: &str) -> Result<()> {
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Install widget-specific drawing.
    pub fn set_content(&mut self, id: ViewId, content: impl Content + 'static) -> Result<()> {
        self.view_mut(id)?.content = Some(Box::new(content));
        self.set_needs_display(id)
    }

    /// Send this view's border lines to the superview's canvas, so they join
    /// with its siblings' lines.
    pub fn set_superview_renders_line_canvas(&mut self, id: ViewId, on: bool) -> Result<()> {
        self.view_mut(id)?.superview_renders_line_canvas = on;
        self.set_needs_display(id)
    }

    /// Mark a view, its descendants and its ancestors as needing layout. For
    /// an adornment, its owner is marked.
    pub fn set_needs_layout(&mut self, id: ViewId) -> Result<()> {
        let id = match &self.get(id)?.role {
            Role::Adornment(s) => s.owner,
            Role::View(_) => id,
        };
        for v in self.subtree(id) {
            if let Some(n) = self.nodes.get_mut(v) {
                n.needs_layout = true;
            }
        }
        let mut cur = self.get(id)?.parent;
        while let Some(p) = cur {
            let n = self.get_mut(p)?;
            n.needs_layout = true;
            cur = n.parent;
        }
        Ok(())
    }

    /// Resolve the geometry of `root` and every view under it that needs
    /// layout. A root without a superview is sized against `screen`.
    pub fn layout(&mut self, root: ViewId, screen: Expanse) -> Result<()> {
        LayoutPass::run(self, root, screen)
    }

    /// Collect the layout notifications queued since the last call.
    pub fn take_layout_events(&mut self) -> Vec<LayoutEvent> {
        mem::take(&mut self.layout_events)
    }

    /// Mark a view's whole viewport as needing redraw.
    pub fn set_needs_display(&mut self, id: ViewId) -> Result<()> {
        let vp = self.viewport(id)?;
        dirty::mark(self, id, vp)
    }

    /// Mark a region, in content coordinates, as needing redraw.
    pub fn set_needs_display_region(&mut self, id: ViewId, region: Rect) -> Result<()> {
        dirty::mark(self, id, region)
    }

    /// Draw `root` and every dirty view under it. With no driver, the pass
    /// still runs and clears dirty state, but nothing is painted.
    pub fn draw(&mut self, root: ViewId, driver: Option<&mut dyn Driver>) -> Result<()> {
        DrawPass::run(self, root, driver.map(|d| d as &mut dyn Driver))
    }

    /// Register a command on a view.
    pub fn add_command(
        &mut self,
        id: ViewId,
        name: &str,
        f: impl FnMut(ViewId) -> bool + 'static,
    ) -> Result<()> {
        self.get_mut(id)?.commands.add(name, Box::new(f));
        Ok(())
    }

    /// Run a command registered on a view.
    pub fn invoke_command(&mut self, id: ViewId, name: &str) -> Result<bool> {
        self.get_mut(id)?.commands.invoke(id, name)
    }

    /// Bind a key to a command on a view.
    pub fn bind_key(&mut self, id: ViewId, key: impl Into<Key>, name: &str) -> Result<()> {
        self.get_mut(id)?.commands.bind(key, name);
        Ok(())
    }

    /// Run the command bound to a key on a view. `Ok(None)` if unbound.
    pub fn invoke_key(&mut self, id: ViewId, key: impl Into<Key>) -> Result<Option<bool>> {
        self.get_mut(id)?.commands.invoke_key(id, key)
    }
}
