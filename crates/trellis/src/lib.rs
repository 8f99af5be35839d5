//! Layout and drawing core for terminal user interfaces.
//!
//! Views live in a [`Tree`] arena and are addressed by [`ViewId`]. Each view
//! carries position and size expressions ([`Pos`], [`Dim`]), three nested
//! adornments (margin, border, padding), a scrollable viewport into its
//! content, and dirty state. [`Tree::layout`] resolves geometry;
//! [`Tree::draw`] repaints what changed through a [`Driver`].

/// Margin, border and padding.
pub mod adornment;
/// Output backends.
pub mod backend;
/// Line segments and junction rendering.
pub mod canvas;
/// Named commands and key bindings.
pub mod command;
/// Runtime settings.
pub mod config;
/// Coordinate space conversions.
pub mod coords;
/// Dirty-region tracking.
mod dirty;
/// The draw pass, painters and content.
pub mod draw;
/// Debug dumps of the view tree.
pub mod dump;
/// Error types.
pub mod error;
/// View identifiers.
mod id;
/// Keys and modifiers.
pub mod key;
/// Constraint layout.
pub mod layout;
/// Logging setup.
pub mod logging;
/// Colors and attributes.
pub mod style;
/// Off-screen cell buffer.
pub mod termbuf;
/// Text measurement and rendering.
pub mod text;
/// The view tree.
pub mod view;

/// Test helpers.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use geom;

pub use adornment::{AdornmentKind, Adornments, BorderStyleChange};
pub use canvas::{LineCanvas, LineStyle, StraightLine};
pub use config::Config;
pub use draw::{Content, DrawContext, Driver, Painter};
pub use error::{Error, Result};
pub use geom::{Direction, Expanse, Orientation, Point, Rect, Thickness};
pub use id::ViewId;
pub use layout::{AutoStyle, Dim, Dimension, Pos, Side};
pub use style::{Attribute, Color};
pub use termbuf::TermBuf;
pub use text::{PlainText, TextDirection, TextFormatter};
pub use view::{LayoutEvent, Tree};
