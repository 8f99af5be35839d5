//! Three joined panes in the terminal. Arrow keys scroll the right pane, `q`
//! quits. Set `TRELLIS_LOG=trellis=debug` and redirect stdout elsewhere to
//! watch the passes.

use std::{cell::Cell, env, rc::Rc};

use trellis::{
    AutoStyle, Dim, Expanse, LineStyle, Pos, Result, Tree, ViewId,
    backend::crossterm::{CrosstermDriver, TermEvent},
    draw::Driver,
    key::KeyCode,
    logging::init_logging,
};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim \
    veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
    commodo consequat.";

/// Build the view tree. Returns the root and the scrollable pane.
fn build(t: &mut Tree, scroll: &Rc<Cell<(i32, i32)>>) -> Result<(ViewId, ViewId)> {
    let root = t.new_named("root");
    t.set_width(root, Dim::fill())?;
    t.set_height(root, Dim::fill())?;

    let nav = t.new_named("nav");
    t.set_width(nav, Dim::percent(30))?;
    t.set_height(nav, Dim::fill())?;
    t.set_text(nav, "one\ntwo\nthree")?;
    t.set_border_title(nav, Some("nav"))?;
    t.add(root, nav)?;

    let main = t.new_named("main");
    t.set_x(main, Pos::right(nav) - 1)?;
    t.set_width(main, Dim::fill())?;
    t.set_height(main, Dim::percent(70))?;
    t.set_text(main, &LOREM.repeat(6))?;
    t.set_content_size(main, Some(Expanse::new(60, 40)))?;
    t.set_border_title(main, Some("main"))?;
    t.add(root, main)?;

    let status = t.new_named("status");
    t.set_x(status, Pos::left(main))?;
    t.set_y(status, Pos::bottom(main) - 1)?;
    t.set_width(status, Dim::width(main))?;
    t.set_height(status, Dim::fill())?;
    t.set_text(status, "arrows scroll, q quits")?;
    t.add(root, status)?;

    let badge = t.new_named("badge");
    t.set_x(badge, Pos::AnchorEndAuto)?;
    t.set_width(badge, Dim::auto(AutoStyle::Text))?;
    t.set_height(badge, 1)?;
    t.set_text(badge, "trellis")?;
    t.add(status, badge)?;

    for v in [nav, main, status] {
        t.set_border(v, Some(LineStyle::Rounded))?;
        t.set_superview_renders_line_canvas(v, true)?;
    }

    for (key, name, delta) in [
        (KeyCode::Up, "scroll-up", (0, -1)),
        (KeyCode::Down, "scroll-down", (0, 1)),
        (KeyCode::Left, "scroll-left", (-1, 0)),
        (KeyCode::Right, "scroll-right", (1, 0)),
    ] {
        let s = scroll.clone();
        t.add_command(main, name, move |_| {
            s.set(delta);
            true
        })?;
        t.bind_key(main, key, name)?;
    }
    t.add_command(root, "quit", |_| true)?;
    t.bind_key(root, 'q', "quit")?;
    Ok((root, main))
}

fn main() -> Result<()> {
    if let Ok(directives) = env::var("TRELLIS_LOG") {
        init_logging(&directives);
    }
    let mut t = Tree::new();
    let scroll = Rc::new(Cell::new((0, 0)));
    let (root, main) = build(&mut t, &scroll)?;

    let mut driver = CrosstermDriver::new()?;
    driver.start()?;
    loop {
        let size = driver.size();
        t.layout(root, size)?;
        t.draw(root, Some(&mut driver))?;

        match driver.read_event()? {
            TermEvent::Key(k) => {
                if t.invoke_key(root, k)? == Some(true) {
                    break;
                }
                if t.invoke_key(main, k)? == Some(true) {
                    let (dx, dy) = scroll.replace((0, 0));
                    t.scroll_by(main, dx, dy)?;
                }
            }
            TermEvent::Resize(size) => {
                driver.resize(size);
                t.set_needs_layout(root)?;
                t.set_needs_display(root)?;
            }
            TermEvent::Other => {}
        }
    }
    driver.stop()?;
    Ok(())
}
