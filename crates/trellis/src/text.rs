//! Text measurement and rendering.
//!
//! Layout only needs two things from text: how big it is under a constraint,
//! and a way to paint it. [`TextFormatter`] is that service; [`PlainText`] is
//! the stock implementation.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{
    draw::Painter,
    geom::{Expanse, Point, Rect},
};

/// Direction text flows in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left to right, lines top to bottom.
    #[default]
    Horizontal,
    /// Top to bottom, lines left to right.
    Vertical,
}

/// Measures and renders text.
pub trait TextFormatter {
    /// The size `text` occupies. `limit` bounds the extent along the flow
    /// direction; text longer than that wraps or is cut, at the formatter's
    /// discretion.
    fn measure(&self, text: &str, direction: TextDirection, limit: Option<u32>) -> Expanse;

    /// Render `text` into `bounds`, which is relative to the painter.
    fn draw(&self, text: &str, direction: TextDirection, bounds: Rect, painter: &mut Painter<'_>);
}

/// Plain text split on newlines, optionally word-wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainText {
    /// Wrap long lines at the limit instead of cutting them.
    pub wrap: bool,
}

impl Default for PlainText {
    fn default() -> Self {
        Self { wrap: true }
    }
}

impl PlainText {
    /// Break `text` into display lines.
    fn lines(&self, text: &str, limit: Option<u32>) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for line in text.split('\n') {
            match limit {
                Some(w) if self.wrap && w > 0 && line.width() > w as usize => {
                    out.extend(
                        textwrap::wrap(line, w as usize)
                            .into_iter()
                            .map(|l| l.into_owned()),
                    );
                }
                _ => out.push(line.to_string()),
            }
        }
        out
    }
}

/// Display width of the widest line, capped at `limit`.
fn widest(lines: &[String], limit: Option<u32>) -> u32 {
    let w = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u32;
    limit.map_or(w, |l| w.min(l))
}

impl TextFormatter for PlainText {
    fn measure(&self, text: &str, direction: TextDirection, limit: Option<u32>) -> Expanse {
        match direction {
            TextDirection::Horizontal => {
                let lines = self.lines(text, limit);
                Expanse::new(widest(&lines, limit), lines.len() as u32)
            }
            TextDirection::Vertical => {
                let lines = self.lines(text, None);
                let tallest = lines
                    .iter()
                    .map(|l| l.graphemes(true).count())
                    .max()
                    .unwrap_or(0) as u32;
                let h = limit.map_or(tallest, |l| tallest.min(l));
                Expanse::new(lines.len() as u32, h)
            }
        }
    }

    fn draw(&self, text: &str, direction: TextDirection, bounds: Rect, painter: &mut Painter<'_>) {
        match direction {
            TextDirection::Horizontal => {
                let lines = self.lines(text, Some(bounds.w));
                for (i, line) in lines.iter().take(bounds.h as usize).enumerate() {
                    let p = bounds.tl.offset(0, i as i32);
                    painter.text_within(p, line, bounds.w);
                }
            }
            TextDirection::Vertical => {
                let lines = self.lines(text, None);
                for (col, line) in lines.iter().take(bounds.w as usize).enumerate() {
                    for (row, g) in line.graphemes(true).take(bounds.h as usize).enumerate() {
                        if let Some(ch) = g.chars().next() {
                            painter.put(bounds.tl + Point::new(col as i32, row as i32), ch);
                        }
                    }
                }
            }
        }
    }
}
