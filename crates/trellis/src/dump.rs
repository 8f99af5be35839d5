use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{Result, ViewId, coords::frame_to_screen, view::Tree};

/// Traverses the tree under `root` and returns a string showing each view's
/// name, frame, viewport and pending state, with ANSI colors. This is a
/// debug function.
pub fn dump(tree: &Tree, root: ViewId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_view(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// As [`dump`], without colors.
pub fn dump_plain(tree: &Tree, root: ViewId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_view(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Write a yellow flag after the view name.
fn write_flag(buffer: &mut Buffer, flag: &str) -> Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(buffer, " ({flag})")?;
    buffer.reset()?;
    Ok(())
}

/// Write one view and recurse into its subviews.
fn dump_view(buffer: &mut Buffer, tree: &Tree, id: ViewId, level: usize) -> Result<()> {
    let indent = "    ".repeat(level);
    let node = tree.get(id)?;

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    if node.name.is_empty() {
        write!(buffer, "{id:?}")?;
    } else {
        write!(buffer, "{}", node.name)?;
    }
    buffer.reset()?;
    if !node.visible {
        write_flag(buffer, "hidden")?;
    }
    if node.needs_layout {
        write_flag(buffer, "needs layout")?;
    }
    if node.needs_display.is_some() {
        write_flag(buffer, "dirty")?;
    }
    writeln!(buffer)?;

    let f = node.frame;
    write_field(
        buffer,
        &indent,
        "frame:",
        &format!("x: {}, y: {}, w: {}, h: {}", f.tl.x, f.tl.y, f.w, f.h),
    )?;
    let s = frame_to_screen(tree, id)?;
    write_field(
        buffer,
        &indent,
        "screen:",
        &format!("x: {}, y: {}, w: {}, h: {}", s.tl.x, s.tl.y, s.w, s.h),
    )?;
    let vp = tree.viewport(id)?;
    write_field(
        buffer,
        &indent,
        "viewport:",
        &format!("x: {}, y: {}, w: {}, h: {}", vp.tl.x, vp.tl.y, vp.w, vp.h),
    )?;
    let content = tree.content_size(id)?;
    write_field(
        buffer,
        &indent,
        "content:",
        &format!("{} × {}", content.w, content.h),
    )?;
    let t = tree.adornment_thickness(id)?;
    if !t.is_zero() {
        write_field(
            buffer,
            &indent,
            "thickness:",
            &format!("l: {}, t: {}, r: {}, b: {}", t.left, t.top, t.right, t.bottom),
        )?;
    }

    for c in &node.children {
        dump_view(buffer, tree, *c, level + 1)?;
    }
    Ok(())
}
