//! Integration tests for drawing, adornments and dirty tracking.

#[cfg(test)]
mod tests {
    use std::{cell::Cell, iter, rc::Rc};

    use pretty_assertions::assert_eq;
    use trellis::{
        AdornmentKind, Attribute, Color, Content, DrawContext, Error, Expanse, LineStyle, Painter,
        Point, Pos, Rect, Result, TermBuf, Thickness, Tree, ViewId, buf,
        coords::frame_to_screen,
        testing::{buf::BufTest, child_at, redraw, render},
    };

    fn screen(t: &mut Tree, w: u32, h: u32) -> Result<ViewId> {
        let r = t.new_named("screen");
        t.set_frame(r, Rect::new(0, 0, w, h))?;
        Ok(r)
    }

    #[test]
    fn nested_adornments_render() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 9, 6)?;
        let v = child_at(&mut t, r, Rect::new(0, 0, 9, 6))?;
        t.set_adornment_thickness(v, AdornmentKind::Margin, Thickness::new(1, 0, 0, 1))?;
        t.set_border_style(v, LineStyle::Double)?;
        t.set_adornment_thickness(v, AdornmentKind::Padding, Thickness::new(1, 0, 1, 0))?;
        t.set_text(v, "abcdefgh")?;

        let tb = render(&mut t, r, (9, 6))?;
        BufTest::new(&tb).assert_matches(buf!(
            " ╔══════╗"
            " ║ abcd ║"
            " ║ efgh ║"
            " ║      ║"
            " ╚══════╝"
            "         "
        ));

        let ads = t.adornments(v)?;
        assert_eq!(frame_to_screen(&t, ads.margin)?, Rect::new(0, 0, 9, 6));
        assert_eq!(frame_to_screen(&t, ads.border)?, Rect::new(1, 0, 8, 5));
        assert_eq!(frame_to_screen(&t, ads.padding)?, Rect::new(2, 1, 6, 3));
        assert_eq!(t.viewport(v)?, Rect::new(0, 0, 4, 3));
        Ok(())
    }

    #[test]
    fn adjacent_siblings_share_edges() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 11, 3)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 6, 3))?;
        let b = t.new_view();
        t.set_x(b, Pos::right(a) - 1)?;
        t.set_width(b, 6)?;
        t.set_height(b, 3)?;
        t.add(r, b)?;
        for v in [a, b] {
            t.set_border(v, None)?;
            t.set_superview_renders_line_canvas(v, true)?;
        }
        let tb = render(&mut t, r, (11, 3))?;
        BufTest::new(&tb).assert_matches(buf!(
            "┌────┬────┐"
            "│    │    │"
            "└────┴────┘"
        ));
        Ok(())
    }

    #[test]
    fn separate_canvases_do_not_join() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 11, 3)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 6, 3))?;
        let b = child_at(&mut t, r, Rect::new(5, 0, 6, 3))?;
        for v in [a, b] {
            t.set_border(v, None)?;
        }
        let tb = render(&mut t, r, (11, 3))?;
        BufTest::new(&tb).assert_matches(buf!(
            "┌────┌────┐"
            "│    │    │"
            "└────└────┘"
        ));
        Ok(())
    }

    #[test]
    fn heavy_lines_dominate_joins() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 11, 3)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 6, 3))?;
        let b = child_at(&mut t, r, Rect::new(5, 0, 6, 3))?;
        t.set_border_style(a, LineStyle::Heavy)?;
        t.set_border_style(b, LineStyle::Single)?;
        for v in [a, b] {
            t.set_superview_renders_line_canvas(v, true)?;
        }
        let tb = render(&mut t, r, (11, 3))?;
        BufTest::new(&tb).assert_matches(buf!(
            "┏━━━━┳────┐"
            "┃    ┃    │"
            "┗━━━━┻────┘"
        ));
        Ok(())
    }

    #[test]
    fn canvases_drain_after_draw() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 20, 10)?;
        t.set_border(r, None)?;
        let a = child_at(&mut t, r, Rect::new(1, 1, 6, 4))?;
        t.set_border(a, Some(LineStyle::Rounded))?;
        t.set_superview_renders_line_canvas(a, true)?;
        let b = child_at(&mut t, a, Rect::new(0, 0, 3, 2))?;
        t.set_border(b, None)?;
        render(&mut t, r, (20, 10))?;
        for v in [r, a, b] {
            let n = t.node(v);
            assert!(n.is_some_and(|n| n.line_canvas().is_empty()));
        }
        Ok(())
    }

    #[test]
    fn drawing_a_subtree_renders_lines_it_hands_up() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 8, 4)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 6, 3))?;
        t.set_border(a, None)?;
        t.set_superview_renders_line_canvas(a, true)?;
        let mut tb = render(&mut t, r, (8, 4))?;

        t.set_text(a, "x")?;
        redraw(&mut t, a, &mut tb)?;
        BufTest::new(&tb).assert_matches(buf!(
            "┌────┐  "
            "│x   │  "
            "└────┘  "
            "        "
        ));
        for v in [r, a] {
            assert!(t.node(v).is_some_and(|n| n.line_canvas().is_empty()));
        }
        Ok(())
    }

    #[test]
    fn drawing_a_subtree_keeps_joins_with_clean_siblings() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 13, 5)?;
        let mid = child_at(&mut t, r, Rect::new(1, 1, 11, 3))?;
        t.set_superview_renders_line_canvas(mid, true)?;
        let a = child_at(&mut t, mid, Rect::new(0, 0, 6, 3))?;
        let b = child_at(&mut t, mid, Rect::new(5, 0, 6, 3))?;
        for v in [a, b] {
            t.set_border(v, None)?;
            t.set_superview_renders_line_canvas(v, true)?;
        }
        let mut tb = render(&mut t, r, (13, 5))?;

        t.set_text(a, "x")?;
        redraw(&mut t, a, &mut tb)?;
        BufTest::new(&tb).assert_matches(buf!(
            "             "
            " ┌────┬────┐ "
            " │x   │    │ "
            " └────┴────┘ "
            "             "
        ));
        for v in [r, mid, a, b] {
            assert!(t.node(v).is_some_and(|n| n.line_canvas().is_empty()));
        }
        Ok(())
    }

    #[test]
    fn marking_a_leaf_flags_every_ancestor() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 20, 10)?;
        let mut parent = r;
        let mut chain = Vec::new();
        for _ in 0..4 {
            let c = child_at(&mut t, parent, Rect::new(1, 1, 10, 6))?;
            chain.push(c);
            parent = c;
        }
        let mut tb = render(&mut t, r, (20, 10))?;
        let leaf = parent;
        t.set_needs_display(leaf)?;
        for v in iter::once(r).chain(chain.iter().copied().take(3)) {
            assert!(t.node(v).is_some_and(|n| n.subview_needs_display()));
            assert!(t.node(v).is_some_and(|n| n.needs_display().is_none()));
        }
        redraw(&mut t, r, &mut tb)?;
        assert!(t.node(r).is_some_and(|n| !n.subview_needs_display()));
        Ok(())
    }

    #[test]
    fn redraw_repaints_only_changed_view() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 10, 2)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 5, 1))?;
        let b = child_at(&mut t, r, Rect::new(5, 0, 5, 1))?;
        t.set_text(a, "aaaaa")?;
        t.set_text(b, "bbbbb")?;
        let mut tb = render(&mut t, r, (10, 2))?;
        tb.put(Point::new(0, 1), 'Z', Attribute::default());
        tb.put(Point::new(0, 0), 'Z', Attribute::default());
        t.set_text(b, "ccc")?;
        redraw(&mut t, r, &mut tb)?;
        BufTest::new(&tb).assert_matches(buf!(
            "Zaaaaccc  "
            "Z         "
        ));
        Ok(())
    }

    #[test]
    fn border_style_changes_can_be_vetoed() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 4, 3)?;
        t.set_border(r, None)?;
        t.on_border_style_changing(r, |c| c.new != LineStyle::None)?;
        assert!(matches!(
            t.set_border_style(r, LineStyle::None),
            Err(Error::Vetoed(_))
        ));
        let tb = render(&mut t, r, (4, 3))?;
        BufTest::new(&tb).assert_matches(buf!(
            "┌──┐"
            "│  │"
            "└──┘"
        ));
        Ok(())
    }

    #[test]
    fn layout_events_fire_for_each_view() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 10, 10)?;
        let a = child_at(&mut t, r, Rect::new(0, 0, 2, 2))?;
        let b = child_at(&mut t, a, Rect::new(0, 0, 1, 1))?;
        t.layout(r, Expanse::new(10, 10))?;
        let events = t.take_layout_events();
        let views: Vec<ViewId> = events.iter().map(|e| e.view).collect();
        assert_eq!(views, vec![b, a, r]);
        assert_eq!(events[1].frame, Rect::new(0, 0, 2, 2));
        assert!(t.take_layout_events().is_empty());
        Ok(())
    }

    #[test]
    fn attributes_reach_the_buffer() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 6, 1)?;
        t.set_text(r, "warn")?;
        t.set_attribute(r, Attribute::new(Color::Red, Color::Black))?;
        let tb = render(&mut t, r, (6, 1))?;
        assert!(BufTest::new(&tb).contains_text_fg("warn", Color::Red));
        Ok(())
    }

    /// Content that counts draws and paints its dirty region with '#'.
    struct Counter {
        draws: Rc<Cell<usize>>,
    }

    impl Content for Counter {
        fn draw(&mut self, painter: &mut Painter<'_>, ctx: &DrawContext) {
            self.draws.set(self.draws.get() + 1);
            painter.fill(ctx.dirty, '#');
        }
    }

    #[test]
    fn content_draws_only_when_dirty() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 4, 2)?;
        let draws = Rc::new(Cell::new(0));
        t.set_content(
            r,
            Counter {
                draws: draws.clone(),
            },
        )?;
        let mut tb = render(&mut t, r, (4, 2))?;
        redraw(&mut t, r, &mut tb)?;
        assert_eq!(draws.get(), 1);

        tb = TermBuf::empty((4, 2));
        t.set_needs_display_region(r, Rect::new(1, 1, 2, 1))?;
        redraw(&mut t, r, &mut tb)?;
        assert_eq!(draws.get(), 2);
        BufTest::new(&tb).assert_matches(buf!(
            "XXXX"
            "X##X"
        ));
        Ok(())
    }

    #[test]
    fn hiding_a_view_repaints_what_was_under_it() -> Result<()> {
        let mut t = Tree::new();
        let r = screen(&mut t, 6, 1)?;
        let a = child_at(&mut t, r, Rect::new(1, 0, 3, 1))?;
        t.set_text(a, "abc")?;
        let mut tb = render(&mut t, r, (6, 1))?;
        assert!(BufTest::new(&tb).contains_text("abc"));
        t.set_visible(a, false)?;
        redraw(&mut t, r, &mut tb)?;
        assert!(!BufTest::new(&tb).contains_text("abc"));
        Ok(())
    }
}
