use crate::{error::Result, geom::Point, style::Attribute};

/// Crossterm terminal driver.
pub mod crossterm;

/// Low-level output sink that a [`TermBuf`](crate::termbuf::TermBuf) diff is
/// written to.
pub trait RenderBackend {
    /// Apply an attribute to the following text output.
    fn style(&mut self, attr: &Attribute) -> Result<()>;
    /// Output text at a screen location.
    fn text(&mut self, loc: Point, txt: &str) -> Result<()>;
    /// Flush output to the terminal.
    fn flush(&mut self) -> Result<()>;
}
