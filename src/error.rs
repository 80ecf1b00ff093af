// src/error.rs
//! Error type shared by every fallible operation in the crate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;

/// Result alias used throughout the crate.
pub type FieldResult<T> = Result<T, FieldError>;

/// Axis of a `[nx, ny, nz, i]` element index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    Component,
}

impl Axis {
    /// Axes in the order they appear in an element index.
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::Component];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::Component => "component",
        };
        f.write_str(name)
    }
}

/// Every way an operation on a [`FlowField`](crate::FlowField) can fail.
///
/// A failed operation never leaves its target partially mutated.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Persisted data is missing, unreadable, or disagrees with its own metadata.
    #[error("failed to load field from {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Writing a field to storage failed.
    #[error("failed to write field to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The operation needs the field to be in the other domain state.
    #[error("trying to access {requested} data, but field is in {actual} state")]
    State {
        requested: FieldState,
        actual: FieldState,
    },

    /// Binary operation between fields held in different domain states.
    #[error("operands are in different states: {left} and {right}")]
    StateMismatch {
        left: FieldState,
        right: FieldState,
    },

    /// Binary operation between fields of differing extents or domain parameters.
    #[error("field geometries differ: [{left}] vs [{right}]")]
    ShapeMismatch {
        left: FieldGeometry,
        right: FieldGeometry,
    },

    /// Element index outside `[0, extent)` on one axis.
    #[error("index {index} out of range on {axis} axis (extent {extent})")]
    Index {
        axis: Axis,
        index: isize,
        extent: usize,
    },

    #[error("invalid field geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid perturbation parameters: {0}")]
    InvalidPerturbation(String),
}

impl FieldError {
    /// Either form of state error: a guarded access in the wrong state, or two
    /// operands in different states.
    pub fn is_state_error(&self) -> bool {
        matches!(self, FieldError::State { .. } | FieldError::StateMismatch { .. })
    }

    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        FieldError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
