// src/reduce/quadrature.rs
/*!
Weighted-integration collaborator for reductions.

A [`QuadratureWeights`] implementation turns a geometry and a state into one
non-negative weight per grid point (`num_points()` entries, point-major as in the
field layout). Reductions multiply every element's contribution by the weight of
its grid point; the same weight applies to every component. Non-negative weights
make `inner_product(f, f) >= 0`.

[`ChebyshevQuadrature`] is the default:

- **Physical**: uniform in the periodic directions and Clenshaw–Curtis in the
  wall-normal direction (the grid sits on Chebyshev extrema points), scaled so
  the weights sum to 1. The inner product is then a volume mean.
- **Spectral**: 1 for every periodic wavenumber pair, times 1 for Chebyshev
  mode 0 and 1/2 for higher modes (the Chebyshev-weighted norm of `T_n`
  relative to `T_0`).

The two states therefore measure different norms in y: physical state the plain
volume mean, spectral state the Chebyshev-weighted one. They agree on the mean
mode but not above it (`y` itself has physical mean square 1/3, while its single
coefficient `T_1` is weighted 1/2). Compare norms within one state only; a
caller needing state-independent norms supplies its own [`QuadratureWeights`].
*/

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;
use crate::math::scalar::Real;

/// Source of per-point reduction weights. Must be a pure function of its inputs.
pub trait QuadratureWeights: Send + Sync {
    fn weights(&self, geometry: &FieldGeometry, state: FieldState) -> Vec<Real>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChebyshevQuadrature;

impl QuadratureWeights for ChebyshevQuadrature {
    fn weights(&self, geometry: &FieldGeometry, state: FieldState) -> Vec<Real> {
        let wall_normal: Vec<Real> = match state {
            FieldState::Physical => {
                let periodic = (geometry.nx() * geometry.nz()) as Real;
                clenshaw_curtis(geometry.ny())
                    .into_iter()
                    .map(|w| 0.5 * w / periodic)
                    .collect()
            }
            FieldState::Spectral => (0..geometry.ny())
                .map(|ny| if ny == 0 { 1.0 } else { 0.5 })
                .collect(),
        };

        let (ny, nz) = (geometry.ny(), geometry.nz());
        (0..geometry.num_points())
            .into_par_iter()
            .map(|point| wall_normal[(point / nz) % ny])
            .collect()
    }
}

/// Clenshaw–Curtis weights on the `n` Chebyshev extrema points `cos(pi j / (n-1))`
/// of `[-1, 1]`. They are positive and sum to 2.
pub fn clenshaw_curtis(n: usize) -> Vec<Real> {
    match n {
        0 => return Vec::new(),
        1 => return vec![2.0],
        _ => {}
    }
    let order = n - 1;
    let nf = order as Real;
    let mut w = vec![0.0; n];

    let (end, half) = if order % 2 == 0 {
        (1.0 / (nf * nf - 1.0), order / 2 - 1)
    } else {
        (1.0 / (nf * nf), (order - 1) / 2)
    };
    w[0] = end;
    w[order] = end;

    for (j, wj) in w.iter_mut().enumerate().take(order).skip(1) {
        let theta = PI * j as Real / nf;
        let mut v = 1.0;
        for k in 1..=half {
            let kf = k as Real;
            v -= 2.0 * (2.0 * kf * theta).cos() / (4.0 * kf * kf - 1.0);
        }
        if order % 2 == 0 {
            v -= (nf * theta).cos() / (nf * nf - 1.0);
        }
        *wj = 2.0 * v / nf;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clenshaw_curtis_integrates_polynomials_exactly() {
        for n in 2..12 {
            let w = clenshaw_curtis(n);
            let nodes: Vec<Real> =
                (0..n).map(|j| (PI * j as Real / (n - 1) as Real).cos()).collect();
            assert!(w.iter().all(|&x| x > 0.0), "n={n}: {w:?}");
            assert_relative_eq!(w.iter().sum::<Real>(), 2.0, epsilon = 1e-13);
            if n >= 3 {
                let x2: Real = w.iter().zip(&nodes).map(|(wi, x)| wi * x * x).sum();
                assert_relative_eq!(x2, 2.0 / 3.0, epsilon = 1e-13);
            }
        }
    }

    #[test]
    fn single_point_gets_whole_interval() {
        assert_eq!(clenshaw_curtis(1), vec![2.0]);
        assert!(clenshaw_curtis(0).is_empty());
    }

    #[test]
    fn physical_weights_form_a_mean() {
        let g = FieldGeometry::new(4, 9, 6, 3, 1.0, 1.0, -1.0, 1.0).unwrap();
        let w = ChebyshevQuadrature.weights(&g, FieldState::Physical);
        assert_eq!(w.len(), g.num_points());
        assert_relative_eq!(w.iter().sum::<Real>(), 1.0, epsilon = 1e-13);
    }

    #[test]
    fn spectral_weights_halve_higher_chebyshev_modes() {
        let g = FieldGeometry::new(2, 3, 2, 1, 1.0, 1.0, -1.0, 1.0).unwrap();
        let w = ChebyshevQuadrature.weights(&g, FieldState::Spectral);
        let expected: Vec<Real> = (0..g.num_points())
            .map(|p| if (p / 2) % 3 == 0 { 1.0 } else { 0.5 })
            .collect();
        assert_eq!(w, expected);
    }

    #[test]
    fn states_agree_on_mean_mode_but_not_above() {
        let g = FieldGeometry::new(2, 9, 2, 1, 1.0, 1.0, -1.0, 1.0).unwrap();
        let physical = ChebyshevQuadrature.weights(&g, FieldState::Physical);
        let spectral = ChebyshevQuadrature.weights(&g, FieldState::Spectral);
        let point_y = |p: usize| g.y((p / g.nz()) % g.ny());

        // Constant 1 <-> coefficient 1 on T_0.
        assert_relative_eq!(physical.iter().sum::<Real>(), 1.0, epsilon = 1e-13);
        assert_eq!(spectral[0], 1.0);

        // y <-> coefficient 1 on T_1.
        let mean_sq: Real =
            physical.iter().enumerate().map(|(p, w)| w * point_y(p).powi(2)).sum();
        assert_relative_eq!(mean_sq, 1.0 / 3.0, epsilon = 1e-13);
        assert_eq!(spectral[g.nz()], 0.5);
    }
}
