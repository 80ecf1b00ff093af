// src/field/perturb.rs
/*
    Random spectral perturbations of a flow field (parallelized).

    Design goals
    ------------
    - **Thread-safe & parallel**: every coefficient is sampled independently in a
      `par_iter_mut()` loop. Unseeded runs create a local RNG per element via
      `rand::rng()`; seeded runs derive a `StdRng` from `(seed, flat index)`, so
      the result does not depend on how rayon splits the work.
    - **Smooth**: coefficient `(kx, ny, kz)` is damped by `decay^(|kx| + ny + |kz|)`,
      so energy concentrates in the low modes.
    - **Normalized**: the perturbation is rescaled to L2 norm `magnitude` before
      it is added.

    Only spectral fields can be perturbed; a physical field fails with
    `FieldError::State` and is left unchanged.
*/

use rand::rngs::StdRng;
use rand::{rng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::field::flowfield::FlowField;
use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;
use crate::math::scalar::{Complex, Real};
use crate::reduce::inner::l2_norm;

/// Parameters of [`FlowField::add_perturbations`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerturbationConfig {
    magnitude: Real,
    decay: Real,
    seed: Option<u64>,
}

impl PerturbationConfig {
    /// `magnitude >= 0` is the L2 norm of the added perturbation; `decay` in `[0, 1]`
    /// is the per-mode damping factor.
    pub fn new(magnitude: Real, decay: Real) -> FieldResult<Self> {
        if !(magnitude.is_finite() && magnitude >= 0.0) {
            return Err(FieldError::InvalidPerturbation(format!(
                "magnitude must be finite and >= 0; got {magnitude}"
            )));
        }
        if !(decay.is_finite() && (0.0..=1.0).contains(&decay)) {
            return Err(FieldError::InvalidPerturbation(format!(
                "decay must lie in [0, 1]; got {decay}"
            )));
        }
        Ok(Self { magnitude, decay, seed: None })
    }

    /// Make the perturbation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline] pub fn magnitude(&self) -> Real { self.magnitude }
    #[inline] pub fn decay(&self) -> Real { self.decay }
    #[inline] pub fn seed(&self) -> Option<u64> { self.seed }
}

#[inline]
fn sample_coefficient<R: Rng>(rng: &mut R, damping: Real) -> Complex {
    let re: Real = rng.sample(StandardNormal);
    let im: Real = rng.sample(StandardNormal);
    Complex::new(re, im) * damping
}

#[inline]
fn damping(geometry: &FieldGeometry, point: usize, decay: Real) -> Real {
    let (nx, ny, nz) = geometry.point_coords(point);
    let order = geometry.kx(nx).unsigned_abs() + ny + geometry.kz(nz).unsigned_abs();
    decay.powi(order.min(i32::MAX as usize) as i32)
}

impl FlowField {
    /// Add a random smooth perturbation of L2 norm `config.magnitude()`.
    pub fn add_perturbations(&mut self, config: &PerturbationConfig) -> FieldResult<()> {
        self.spectral()?;
        if config.magnitude == 0.0 {
            return Ok(());
        }

        let geometry = *self.geometry();
        let points = geometry.num_points();
        let decay = config.decay;
        let mut perturbation = FlowField::with_state(geometry, FieldState::Spectral);
        {
            let mut view = perturbation.spectral_mut()?;
            let coeffs = view.as_mut_slice().par_iter_mut().enumerate();
            match config.seed {
                Some(seed) => coeffs.for_each(|(k, c)| {
                    let stream = seed ^ (k as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                    let mut rng_local = StdRng::seed_from_u64(stream);
                    *c = sample_coefficient(&mut rng_local, damping(&geometry, k % points, decay));
                }),
                None => coeffs.for_each(|(k, c)| {
                    let mut rng_local = rng();
                    *c = sample_coefficient(&mut rng_local, damping(&geometry, k % points, decay));
                }),
            }
        }

        let norm = l2_norm(&perturbation);
        if !(norm.is_finite() && norm > 0.0) {
            return Err(FieldError::InvalidPerturbation(format!(
                "sampled perturbation has degenerate norm {norm}"
            )));
        }
        perturbation.scale(config.magnitude / norm);
        self.add_in_place(&perturbation)?;
        debug!(
            magnitude = config.magnitude,
            decay = config.decay,
            seeded = config.seed.is_some(),
            "added spectral perturbation"
        );
        Ok(())
    }
}
