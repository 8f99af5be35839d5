use std::io::{self, Stderr, Write};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use tracing::debug;

use super::RenderBackend;
use crate::{
    draw::Driver,
    error::Result,
    geom::{Expanse, Point},
    key,
    style::{Attribute, Color},
    termbuf::TermBuf,
};

/// Translate a trellis color into a crossterm color.
fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Black => style::Color::Black,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Yellow => style::Color::Yellow,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Magenta => style::Color::Magenta,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::Cyan,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
        Color::AnsiValue(a) => style::Color::AnsiValue(a),
    }
}

/// Crossterm writer behind the driver.
struct CrosstermRender {
    /// Output handle.
    fp: Stderr,
}

impl RenderBackend for CrosstermRender {
    fn style(&mut self, s: &Attribute) -> Result<()> {
        // Reset clears colors too, so colors are set after it.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.fp
            .queue(style::SetForegroundColor(translate_color(s.fg)))?;
        self.fp
            .queue(style::SetBackgroundColor(translate_color(s.bg)))?;
        if s.attrs.bold {
            self.fp.queue(style::SetAttribute(style::Attribute::Bold))?;
        }
        if s.attrs.dim {
            self.fp.queue(style::SetAttribute(style::Attribute::Dim))?;
        }
        if s.attrs.italic {
            self.fp
                .queue(style::SetAttribute(style::Attribute::Italic))?;
        }
        if s.attrs.underline {
            self.fp
                .queue(style::SetAttribute(style::Attribute::Underlined))?;
        }
        Ok(())
    }

    fn text(&mut self, loc: Point, txt: &str) -> Result<()> {
        self.fp
            .queue(ccursor::MoveTo(loc.x.max(0) as u16, loc.y.max(0) as u16))?;
        self.fp.queue(style::Print(txt))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.fp.flush()?;
        Ok(())
    }
}

/// Input events surfaced by the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    /// A keystroke.
    Key(key::Key),
    /// The terminal was resized.
    Resize(Expanse),
    /// Anything else (mouse, focus, paste).
    Other,
}

/// Translate crossterm key modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm key code. Codes with no counterpart yield None.
fn translate_key_code(code: cevent::KeyCode) -> Option<key::KeyCode> {
    Some(match code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        cevent::KeyCode::F(n) => key::KeyCode::F(n),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        _ => return None,
    })
}

/// Translate a crossterm event.
fn translate_event(e: cevent::Event) -> TermEvent {
    match e {
        cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
            match translate_key_code(k.code) {
                Some(code) => TermEvent::Key(translate_key_modifiers(k.modifiers) + code),
                None => TermEvent::Other,
            }
        }
        cevent::Event::Resize(w, h) => TermEvent::Resize(Expanse::new(w.into(), h.into())),
        _ => TermEvent::Other,
    }
}

/// A terminal driver: cells are written into a back buffer, and `flush` sends
/// only the cells that changed since the previous flush.
pub struct CrosstermDriver {
    /// Back buffer being drawn into.
    buf: TermBuf,
    /// What the terminal currently shows.
    prev: Option<TermBuf>,
    /// Writer.
    out: CrosstermRender,
    /// Whether raw mode and the alternate screen are active.
    active: bool,
}

impl CrosstermDriver {
    /// A driver sized to the current terminal.
    pub fn new() -> Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self {
            buf: TermBuf::new(Expanse::new(w.into(), h.into()), ' ', Attribute::default()),
            prev: None,
            out: CrosstermRender { fp: io::stderr() },
            active: false,
        })
    }

    /// Enter raw mode and the alternate screen.
    pub fn start(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.fp.execute(terminal::EnterAlternateScreen)?;
        self.out.fp.execute(ccursor::Hide)?;
        self.active = true;
        debug!("terminal started");
        Ok(())
    }

    /// Restore the terminal.
    pub fn stop(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.out.fp.execute(terminal::LeaveAlternateScreen)?;
        self.out.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        self.active = false;
        debug!("terminal stopped");
        Ok(())
    }

    /// Resize the back buffer. The next flush repaints everything.
    pub fn resize(&mut self, size: Expanse) {
        self.buf = TermBuf::new(size, ' ', Attribute::default());
        self.prev = None;
    }

    /// Block until the next input event.
    pub fn read_event(&mut self) -> Result<TermEvent> {
        Ok(translate_event(cevent::read()?))
    }
}

impl Driver for CrosstermDriver {
    fn size(&self) -> Expanse {
        self.buf.size()
    }

    fn move_to(&mut self, p: Point) {
        self.buf.move_to(p);
    }

    fn set_attribute(&mut self, attr: Attribute) {
        self.buf.set_attribute(attr);
    }

    fn add_glyph(&mut self, ch: char) {
        self.buf.add_glyph(ch);
    }

    fn flush(&mut self) -> Result<()> {
        let blank = TermBuf::empty((0, 0));
        self.buf
            .diff(self.prev.as_ref().unwrap_or(&blank), &mut self.out)?;
        self.prev = Some(self.buf.clone());
        Ok(())
    }
}

impl Drop for CrosstermDriver {
    fn drop(&mut self) {
        if self.active {
            drop(self.stop());
        }
    }
}
