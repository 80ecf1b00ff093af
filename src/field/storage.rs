// src/field/storage.rs
/*!
The single owned buffer behind a flow field.

- Backed by a flat `Vec<Real>` of length `2 * len` (room for `len` complex numbers).
- **Physical view**: the first `len` reals are the samples; the tail is padding.
- **Spectral view**: the whole buffer reinterpreted as `len` complex coefficients
  (`bytemuck::cast_slice`, zero-copy, no separate allocation).
- Parallel in-place transforms (`par_fill`, `par_map_in_place`, `par_zip_with_inplace`)
  operate on an explicit active prefix so callers decide how much of the buffer
  is meaningful in the current state.

# Invariants
- `data.len()` is even and equals `FieldGeometry::storage_len()`.
- While a field is physical its padding is all zeros (maintained by `FlowField`).
*/

use rayon::prelude::*;

use crate::math::scalar::{Complex, Real};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldBuffer {
    data: Vec<Real>,
}

impl FieldBuffer {
    /// Zero-filled buffer with room for `len` complex coefficients.
    #[inline]
    pub(crate) fn zeros(len: usize) -> Self {
        Self { data: vec![0.0; 2 * len] }
    }

    /// Adopt raw storage. The caller checks the length against its geometry.
    #[inline]
    pub(crate) fn from_vec(data: Vec<Real>) -> Self {
        debug_assert!(data.len() % 2 == 0, "field storage must hold whole complex numbers");
        Self { data }
    }

    /// Complex capacity.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.data.len() / 2
    }

    /// Every real in the buffer, padding included.
    #[inline(always)]
    pub(crate) fn raw(&self) -> &[Real] {
        &self.data
    }

    #[inline(always)]
    pub(crate) fn raw_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Physical samples.
    #[inline(always)]
    pub(crate) fn reals(&self) -> &[Real] {
        &self.data[..self.len()]
    }

    #[inline(always)]
    pub(crate) fn reals_mut(&mut self) -> &mut [Real] {
        let n = self.len();
        &mut self.data[..n]
    }

    /// Physical padding (the half of the buffer only the spectral view uses).
    #[inline(always)]
    pub(crate) fn padding(&self) -> &[Real] {
        &self.data[self.len()..]
    }

    /// Spectral coefficients.
    #[inline(always)]
    pub(crate) fn complexes(&self) -> &[Complex] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline(always)]
    pub(crate) fn complexes_mut(&mut self) -> &mut [Complex] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    // ----------------------------- Parallel Ops -------------------------------

    /// Parallel fill of the first `active` reals.
    #[inline]
    pub(crate) fn par_fill(&mut self, active: usize, value: Real) {
        self.data[..active].par_iter_mut().for_each(|x| *x = value);
    }

    /// Zero the physical padding.
    #[inline]
    pub(crate) fn clear_padding(&mut self) {
        let n = self.len();
        self.data[n..].par_iter_mut().for_each(|x| *x = 0.0);
    }

    /// Parallel in-place map `x <- f(x)` over the first `active` reals.
    #[inline]
    pub(crate) fn par_map_in_place<F>(&mut self, active: usize, f: F)
    where
        F: Fn(Real) -> Real + Sync + Send,
    {
        self.data[..active].par_iter_mut().for_each(|x| *x = f(*x));
    }

    /// Parallel zip-with over the first `active` reals: `self[k] <- f(self[k], other[k])`.
    #[inline]
    pub(crate) fn par_zip_with_inplace<F>(&mut self, other: &FieldBuffer, active: usize, f: F)
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        debug_assert_eq!(self.data.len(), other.data.len(), "buffer length mismatch");
        self.data[..active]
            .par_iter_mut()
            .zip(other.data[..active].par_iter())
            .for_each(|(a, &b)| *a = f(*a, b));
    }
}
