//! Utilities for matching rendered buffers in tests.
use crate::{
    geom::Point,
    style::Color,
    termbuf::{NULL, TermBuf},
};

/// A helper macro to create buffers for the termbuf match assertions.
#[macro_export]
macro_rules! buf {
    ($($line:literal)*) => {
        &[$($line),*]
    };
}

/// Matches a buffer against expected rows. 'X' stands for NULL cells by
/// default, so partial renders can be asserted. Trailing whitespace is ignored
/// on both sides.
pub struct BufTest<'a> {
    /// Buffer under test.
    buf: &'a TermBuf,
    /// Character used to represent NULL cells.
    null_char: char,
    /// Optional wildcard character.
    any_char: Option<char>,
}

impl<'a> BufTest<'a> {
    /// Create a new BufTest with a reference to a TermBuf.
    pub fn new(buf: &'a TermBuf) -> Self {
        Self {
            buf,
            null_char: 'X',
            any_char: None,
        }
    }

    /// Set the character used to match NULL cells.
    pub fn with_null(mut self, null_char: char) -> Self {
        self.null_char = null_char;
        self
    }

    /// Set a character in the expected pattern that matches any cell.
    pub fn with_any(mut self, any_char: char) -> Self {
        self.any_char = Some(any_char);
        self
    }

    /// Rows of the buffer as this matcher sees them.
    pub fn lines(&self) -> Vec<String> {
        (0..self.buf.size().h)
            .filter_map(|y| self.buf.line(y, self.null_char))
            .collect()
    }

    /// Returns true if the buffer content matches the expected lines.
    pub fn matches(&self, expected: &[&str]) -> bool {
        let actual = self.lines();
        if expected.len() != actual.len() {
            return false;
        }
        expected.iter().zip(actual.iter()).all(|(e, a)| {
            let (e, a) = (e.trim_end(), a.trim_end());
            e.chars().count() == a.chars().count()
                && e
                    .chars()
                    .zip(a.chars())
                    .all(|(ec, ac)| Some(ec) == self.any_char || ec == ac)
        })
    }

    /// Assert that the buffer matches, printing both grids on failure.
    pub fn assert_matches(&self, expected: &[&str]) {
        if self.matches(expected) {
            return;
        }
        let width = expected
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(10)
            .max(self.buf.size().w as usize);
        println!("\nExpected:");
        println!("┌{}┐", "─".repeat(width));
        for line in expected {
            println!("│{line:width$}│");
        }
        println!("└{}┘", "─".repeat(width));
        println!("\nActual:");
        println!("┌{}┐", "─".repeat(width));
        for line in self.lines() {
            println!("│{line:width$}│");
        }
        println!("└{}┘", "─".repeat(width));
        panic!("Buffer contents did not match expected pattern");
    }

    /// Does any row contain the supplied substring?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }

    /// Does the substring appear with the given foreground color on every
    /// cell?
    pub fn contains_text_fg(&self, txt: &str, fg: Color) -> bool {
        let n = txt.chars().count() as i32;
        let size = self.buf.size();
        if n == 0 || n > size.w as i32 {
            return false;
        }
        (0..size.h as i32).any(|y| {
            (0..=size.w as i32 - n).any(|x| {
                txt.chars().enumerate().all(|(i, ch)| {
                    self.buf
                        .get(Point::new(x + i as i32, y))
                        .is_some_and(|c| c.ch == ch && c.ch != NULL && c.attr.fg == fg)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Attribute;

    #[test]
    fn matching() {
        let mut tb = TermBuf::empty((4, 2));
        tb.put(Point::new(0, 0), 'a', Attribute::default());
        tb.put(
            Point::new(1, 0),
            'b',
            Attribute::new(Color::Red, Color::Black),
        );
        let t = BufTest::new(&tb);
        assert!(t.matches(buf!["abXX" "XXXX"]));
        assert!(!t.matches(buf!["ab" "XXXX"]));
        assert!(t.with_any('?').matches(buf!["?bXX" "XX??"]));
        assert!(BufTest::new(&tb).with_null(' ').matches(buf!["ab" ""]));
        assert!(BufTest::new(&tb).contains_text_fg("b", Color::Red));
        assert!(!BufTest::new(&tb).contains_text_fg("ab", Color::Red));
        assert!(BufTest::new(&tb).contains_text("bX"));
    }
}
