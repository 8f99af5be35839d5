//! Geometry primitives used across trellis.
//!
//! All positions are signed cell coordinates: a view anchored off-screen has a
//! negative origin. Sizes are unsigned and can never go below zero.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// One-dimensional extents.
mod linesegment;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Four-sided insets.
mod thickness;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use linesegment::LineSegment;
pub use point::Point;
pub use rect::Rect;
pub use thickness::Thickness;

/// Cardinal directions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    /// Upward direction.
    Up,
    /// Downward direction.
    Down,
    /// Leftward direction.
    Left,
    /// Rightward direction.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The unit step taken when moving one cell in this direction.
    pub fn delta(&self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// The opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Line orientation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
    /// Runs along the x axis.
    Horizontal,
    /// Runs along the y axis.
    Vertical,
}
