// tests/common/mod.rs
#![allow(dead_code)]

use flowfield::{Complex, FieldGeometry, FieldState, FlowField, Real, SpectralTransform};

/// Embeds each sample as a purely real coefficient. Exact and invertible, which
/// is all these tests need from a transform.
pub struct EmbedTransform;

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

pub fn channel(nx: usize, ny: usize, nz: usize, nd: usize) -> FieldGeometry {
    FieldGeometry::new(nx, ny, nz, nd, 2.0 * std::f64::consts::PI, std::f64::consts::PI, -1.0, 1.0)
        .unwrap()
}

/// Deterministic, non-trivial field in `state`.
pub fn smooth_field(geometry: FieldGeometry, state: FieldState, phase: Real) -> FlowField {
    let mut u = FlowField::with_state(geometry, state);
    match state {
        FieldState::Physical => {
            for (k, x) in u.physical_mut().unwrap().as_mut_slice().iter_mut().enumerate() {
                *x = (0.37 * k as Real + phase).sin();
            }
        }
        FieldState::Spectral => {
            for (k, c) in u.spectral_mut().unwrap().as_mut_slice().iter_mut().enumerate() {
                let t = k as Real;
                *c = Complex::new((0.37 * t + phase).sin(), (0.21 * t - phase).cos());
            }
        }
    }
    u
}

/// Fill from a flat list of values, cycling if it is shorter than the field.
pub fn field_from_values(geometry: FieldGeometry, state: FieldState, values: &[Real]) -> FlowField {
    let mut u = FlowField::with_state(geometry, state);
    if values.is_empty() {
        return u;
    }
    match state {
        FieldState::Physical => {
            for (k, x) in u.physical_mut().unwrap().as_mut_slice().iter_mut().enumerate() {
                *x = values[k % values.len()];
            }
        }
        FieldState::Spectral => {
            for (k, c) in u.spectral_mut().unwrap().as_mut_slice().iter_mut().enumerate() {
                *c = Complex::new(values[k % values.len()], values[(k + 1) % values.len()]);
            }
        }
    }
    u
}

/// Active elements as reals (samples, or interleaved coefficient parts).
pub fn active_reals(u: &FlowField) -> Vec<Real> {
    match u.state() {
        FieldState::Physical => u.physical().unwrap().as_slice().to_vec(),
        FieldState::Spectral => u
            .spectral()
            .unwrap()
            .as_slice()
            .iter()
            .flat_map(|c| [c.re, c.im])
            .collect(),
    }
}
