use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{geom, id::ViewId};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The id does not name a live view.
    #[error("view not found: {0:?}")]
    ViewNotFound(ViewId),

    /// The view already has a superview.
    #[error("view already attached: {0:?}")]
    AlreadyAttached(ViewId),

    /// Attaching would make a view its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Proposed superview.
        parent: ViewId,
        /// Proposed subview.
        child: ViewId,
    },

    /// The view is not a direct subview of the given parent.
    #[error("{child:?} is not a subview of {parent:?}")]
    NotAChild {
        /// Expected superview.
        parent: ViewId,
        /// Expected subview.
        child: ViewId,
    },

    /// A Pos/Dim references a view outside the hierarchy being laid out.
    #[error("{view:?} references {target:?}, which is not in the hierarchy being laid out")]
    UnresolvedReference {
        /// View holding the reference.
        view: ViewId,
        /// Referenced view.
        target: ViewId,
    },

    /// Adornment geometry is derived from thickness and cannot be set directly.
    #[error("adornment geometry is derived from its thickness: {0:?}")]
    AdornmentGeometry(ViewId),

    /// The operation needs an adornment.
    #[error("not an adornment: {0:?}")]
    NotAnAdornment(ViewId),

    /// The operation is not valid on an adornment.
    #[error("operation not valid on an adornment: {0:?}")]
    IsAdornment(ViewId),

    /// A command was invoked that the view never registered.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// An observer rejected a proposed change.
    #[error("change vetoed: {0}")]
    Vetoed(String),

    /// Configuration could not be parsed.
    #[error("config: {0}")]
    Config(String),

    /// Driver I/O failure.
    #[error("io: {0}")]
    Io(String),

    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
