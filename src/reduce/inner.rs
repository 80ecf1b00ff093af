// src/reduce/inner.rs
/*!
Scalar reductions over flow fields: inner products, norms, distances.

Every reduction takes shared references only and never mutates its arguments.
Both operands must have equal geometry ([`FieldError::ShapeMismatch`]) and equal
state ([`FieldError::StateMismatch`]).

Physical state:  `<f, g> = Σ_i Σ_p w_p f_i(p) g_i(p)`
Spectral state:  `<f, g> = Σ_i Σ_p w_p Re(conj(f_i(p)) g_i(p))`

with `w_p` from the [`QuadratureWeights`] collaborator.

Concurrency
-----------
The numeric body reads only the fields' raw storage and a weight vector, so it
needs no lock and can run detached from the caller's domain
([`Reducer::inner_product_detached`]). It is split into fixed-size chunks that
rayon sums in parallel; partial sums are combined in chunk order, so the result
is bit-identical from run to run and across concurrent callers.
*/

use rayon::prelude::*;
use tracing::debug;

use crate::error::FieldResult;
use crate::field::flowfield::FlowField;
use crate::field::state::FieldState;
use crate::math::scalar::{FieldScalar, Real};
use crate::reduce::domain::ExecutionDomain;
use crate::reduce::quadrature::{ChebyshevQuadrature, QuadratureWeights};

/// Elements per parallel partial sum. Fixed so summation order never changes.
const CHUNK: usize = 4096;

/// Reduction service, parameterized by its quadrature collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer<Q = ChebyshevQuadrature> {
    quadrature: Q,
}

impl<Q: QuadratureWeights> Reducer<Q> {
    pub fn new(quadrature: Q) -> Self {
        Self { quadrature }
    }

    pub fn quadrature(&self) -> &Q {
        &self.quadrature
    }

    /// L2 inner product. Symmetric and bilinear; `inner_product(f, f) >= 0`.
    pub fn inner_product(&self, f: &FlowField, g: &FlowField) -> FieldResult<Real> {
        f.check_compatible(g)?;
        Ok(self.inner_product_body(f, g))
    }

    /// [`Self::inner_product`] with its numeric body run through `domain.detach`.
    ///
    /// Argument checks happen before detaching and the result is returned after the
    /// domain is re-entered; only the lock-free summation runs detached.
    pub fn inner_product_detached<D: ExecutionDomain>(
        &self,
        domain: &mut D,
        f: &FlowField,
        g: &FlowField,
    ) -> FieldResult<Real> {
        f.check_compatible(g)?;
        Ok(domain.detach(|| self.inner_product_body(f, g)))
    }

    /// `<f, f>`.
    pub fn l2_norm2(&self, f: &FlowField) -> Real {
        self.inner_product_body(f, f)
    }

    /// `sqrt(<f, f>)`.
    pub fn l2_norm(&self, f: &FlowField) -> Real {
        self.l2_norm2(f).sqrt()
    }

    /// `<f - g, f - g>` without allocating the difference.
    pub fn l2_dist2(&self, f: &FlowField, g: &FlowField) -> FieldResult<Real> {
        f.check_compatible(g)?;
        let weights = self.quadrature.weights(f.geometry(), f.state());
        let dist2 = match f.state() {
            FieldState::Physical => weighted_sum(
                f.physical()?.as_slice(),
                g.physical()?.as_slice(),
                &weights,
                |x, y| (x - y).norm_sqr_real(),
            ),
            FieldState::Spectral => weighted_sum(
                f.spectral()?.as_slice(),
                g.spectral()?.as_slice(),
                &weights,
                |x, y| (x - y).norm_sqr_real(),
            ),
        };
        Ok(dist2)
    }

    pub fn l2_dist(&self, f: &FlowField, g: &FlowField) -> FieldResult<Real> {
        Ok(self.l2_dist2(f, g)?.sqrt())
    }

    /// Caller has checked compatibility, so both views exist.
    fn inner_product_body(&self, f: &FlowField, g: &FlowField) -> Real {
        let weights = self.quadrature.weights(f.geometry(), f.state());
        let buf_f = f.buffer();
        let buf_g = g.buffer();
        let ip = match f.state() {
            FieldState::Physical => {
                weighted_sum(buf_f.reals(), buf_g.reals(), &weights, |x, y| x.dot_re(y))
            }
            FieldState::Spectral => {
                weighted_sum(buf_f.complexes(), buf_g.complexes(), &weights, |x, y| x.dot_re(y))
            }
        };
        debug!(elements = f.geometry().len(), state = %f.state(), "inner product");
        ip
    }
}

/// `Σ_k weights[k % points] * term(a[k], b[k])`, chunked deterministically.
fn weighted_sum<T, F>(a: &[T], b: &[T], weights: &[Real], term: F) -> Real
where
    T: FieldScalar,
    F: Fn(T, T) -> Real + Sync + Send,
{
    debug_assert_eq!(a.len(), b.len());
    let points = weights.len();
    if points == 0 {
        return 0.0;
    }
    let partials: Vec<Real> = a
        .par_chunks(CHUNK)
        .zip(b.par_chunks(CHUNK))
        .enumerate()
        .map(|(c, (ca, cb))| {
            let base = c * CHUNK;
            ca.iter()
                .zip(cb)
                .enumerate()
                .map(|(j, (&x, &y))| weights[(base + j) % points] * term(x, y))
                .sum::<Real>()
        })
        .collect();
    partials.into_iter().sum()
}

// ===================================================================
// ----------------------- Default-quadrature API --------------------
// ===================================================================

/// [`Reducer::inner_product`] with [`ChebyshevQuadrature`].
pub fn inner_product(f: &FlowField, g: &FlowField) -> FieldResult<Real> {
    Reducer::<ChebyshevQuadrature>::default().inner_product(f, g)
}

/// [`Reducer::inner_product_detached`] with [`ChebyshevQuadrature`].
pub fn inner_product_detached<D: ExecutionDomain>(
    domain: &mut D,
    f: &FlowField,
    g: &FlowField,
) -> FieldResult<Real> {
    Reducer::<ChebyshevQuadrature>::default().inner_product_detached(domain, f, g)
}

pub fn l2_norm2(f: &FlowField) -> Real {
    Reducer::<ChebyshevQuadrature>::default().l2_norm2(f)
}

pub fn l2_norm(f: &FlowField) -> Real {
    Reducer::<ChebyshevQuadrature>::default().l2_norm(f)
}

pub fn l2_dist2(f: &FlowField, g: &FlowField) -> FieldResult<Real> {
    Reducer::<ChebyshevQuadrature>::default().l2_dist2(f, g)
}

pub fn l2_dist(f: &FlowField, g: &FlowField) -> FieldResult<Real> {
    Reducer::<ChebyshevQuadrature>::default().l2_dist(f, g)
}
