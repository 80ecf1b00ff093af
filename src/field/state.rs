// src/field/state.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two mutually exclusive domains a field's buffer currently holds.
///
/// Freshly constructed fields start in [`FieldState::Physical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FieldState {
    /// Real-valued samples at physical grid points.
    #[default]
    Physical,
    /// Complex-valued coefficients indexed by wavenumber.
    Spectral,
}

impl FieldState {
    /// The state a transform moves this one to.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            FieldState::Physical => FieldState::Spectral,
            FieldState::Spectral => FieldState::Physical,
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldState::Physical => f.write_str("physical"),
            FieldState::Spectral => f.write_str("spectral"),
        }
    }
}
