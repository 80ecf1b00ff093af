// src/field/transform.rs
//! State transitions between physical and spectral representations.
//!
//! The transform algorithm itself lives outside this crate. A transform receives
//! the whole backing buffer (`geometry.storage_len()` reals) laid out as described
//! in [`crate::field::geometry`]:
//!
//! - `forward` reads physical samples from `buffer[..len]` and leaves `len`
//!   interleaved `(re, im)` coefficients in `buffer`.
//! - `inverse` reads the coefficients and leaves real samples in `buffer[..len]`.
//!   Whatever it leaves in the tail is cleared by the field afterwards.

use tracing::debug;

use crate::field::flowfield::FlowField;
use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;
use crate::math::scalar::Real;

/// Numerical transform between the two domain states.
pub trait SpectralTransform {
    /// Physical samples -> spectral coefficients, in place.
    fn forward(&self, geometry: &FieldGeometry, buffer: &mut [Real]);

    /// Spectral coefficients -> physical samples, in place.
    fn inverse(&self, geometry: &FieldGeometry, buffer: &mut [Real]);
}

impl FlowField {
    /// Move to spectral state. A spectral field is left untouched.
    pub fn make_spectral<T: SpectralTransform + ?Sized>(&mut self, transform: &T) {
        if self.state() == FieldState::Spectral {
            return;
        }
        let geometry = *self.geometry();
        transform.forward(&geometry, self.buffer_mut().raw_mut());
        self.set_state_tag(FieldState::Spectral);
        debug!(geometry = %geometry, "field transformed to spectral state");
    }

    /// Move to physical state. A physical field is left untouched.
    pub fn make_physical<T: SpectralTransform + ?Sized>(&mut self, transform: &T) {
        if self.state() == FieldState::Physical {
            return;
        }
        let geometry = *self.geometry();
        transform.inverse(&geometry, self.buffer_mut().raw_mut());
        self.buffer_mut().clear_padding();
        self.set_state_tag(FieldState::Physical);
        debug!(geometry = %geometry, "field transformed to physical state");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Embeds each sample as a purely real coefficient: exact and invertible,
    /// enough to drive the state machine in tests.
    pub(crate) struct EmbedTransform;

    impl SpectralTransform for EmbedTransform {
        fn forward(&self, geometry: &FieldGeometry, buffer: &mut [Real]) {
            for k in (0..geometry.len()).rev() {
                buffer[2 * k] = buffer[k];
                buffer[2 * k + 1] = 0.0;
            }
        }

        fn inverse(&self, geometry: &FieldGeometry, buffer: &mut [Real]) {
            for k in 0..geometry.len() {
                buffer[k] = buffer[2 * k];
            }
        }
    }
}
