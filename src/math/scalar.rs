// src/math/scalar.rs
//! The element types a flow field can be viewed as.
//!
//! A field stores a single buffer of [`Real`]s. In physical state each slot is a
//! real sample; in spectral state consecutive pairs are read as one [`Complex`]
//! coefficient. `FieldScalar` gives both element types one API so reductions and
//! the views can be written once.
//!
//! Conventions:
//! - For reals, `re(x) = x`, `im(x) = 0`, `conj(x) = x`.
//! - `dot_re(x, y)` is `Re(conj(x) * y)`: the per-element contribution to an
//!   L2 inner product. It is symmetric in its arguments bit-for-bit.

use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use bytemuck::Pod;
use num_traits::Zero;

/// Real scalar type of every field.
pub type Real = f64;

/// Complex scalar type of spectral coefficients.
pub type Complex = num_complex::Complex<Real>;

// ==============================================================================
// ------------------- Sealing: keep impl surface controlled --------------------
// ==============================================================================

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Real {}
    impl Sealed for super::Complex {}
}
use sealed::Sealed;

// ==============================================================================
// --------------------------------- Trait Def ----------------------------------
// ==============================================================================

/// A field element: [`Real`] in physical state, [`Complex`] in spectral state.
pub trait FieldScalar:
    Pod
    + Zero
    + Copy
    + PartialEq
    + Send
    + Sync
    + 'static
    + Debug
    + Display
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Real, Output = Self>
    + Sealed
{
    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Real;

    /// Imaginary part (0 for reals).
    fn im(self) -> Real;

    /// Squared magnitude.
    fn norm_sqr_real(self) -> Real;

    /// `Re(conj(self) * other)`.
    fn dot_re(self, other: Self) -> Real;

    /// Finite check (all parts finite).
    fn is_finite(self) -> bool;
}

// ==============================================================================
// -------------------------------- IMPL: Real ----------------------------------
// ==============================================================================

impl FieldScalar for Real {
    #[inline] fn conj(self) -> Self { self }
    #[inline] fn re(self) -> Real { self }
    #[inline] fn im(self) -> Real { 0.0 }
    #[inline] fn norm_sqr_real(self) -> Real { self * self }
    #[inline] fn dot_re(self, other: Self) -> Real { self * other }
    #[inline] fn is_finite(self) -> bool { Real::is_finite(self) }
}

// ==============================================================================
// ------------------------------- IMPL: Complex --------------------------------
// ==============================================================================

impl FieldScalar for Complex {
    #[inline] fn conj(self) -> Self { Complex::conj(&self) }
    #[inline] fn re(self) -> Real { self.re }
    #[inline] fn im(self) -> Real { self.im }
    #[inline] fn norm_sqr_real(self) -> Real { self.norm_sqr() }
    #[inline] fn dot_re(self, other: Self) -> Real { self.re * other.re + self.im * other.im }
    #[inline] fn is_finite(self) -> bool { self.re.is_finite() && self.im.is_finite() }
}
