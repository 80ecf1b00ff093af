// src/field/algebra.rs
/*!
In-place and out-of-place arithmetic on flow fields.

Every binary operation requires equal geometry ([`FieldError::ShapeMismatch`])
and equal state ([`FieldError::StateMismatch`]), checked before any element is touched.
Arithmetic runs over the active part of the buffer only: the samples in physical
state, every coefficient part in spectral state. This keeps the physical padding
at zero.

| form                         | result                                  |
|------------------------------|-----------------------------------------|
| `u.scale(k)`, `u *= k`       | in place                                |
| `k * &u`, `&u * k`, `k * u`  | new field, equal to `scale` on a copy   |
| `u.add(&v)`, `&u + &v`       | new field (`FieldResult`)               |
| `u.subtract(&v)`, `&u - &v`  | new field (`FieldResult`)               |
| `u.add_in_place(&v)`         | in place                                |
| `u.subtract_in_place(&v)`    | in place                                |
*/

use std::ops::{Add, Mul, MulAssign, Sub};

use crate::error::FieldResult;
use crate::field::flowfield::FlowField;
use crate::math::scalar::Real;

impl FlowField {
    /// Multiply every stored element by `factor`.
    pub fn scale(&mut self, factor: Real) {
        let active = self.active_len();
        self.buffer_mut().par_map_in_place(active, |x| factor * x);
    }

    /// `self <- self + other`.
    pub fn add_in_place(&mut self, other: &FlowField) -> FieldResult<()> {
        self.zip_in_place(other, |x, y| x + y)
    }

    /// `self <- self - other`.
    pub fn subtract_in_place(&mut self, other: &FlowField) -> FieldResult<()> {
        self.zip_in_place(other, |x, y| x - y)
    }

    /// `self + other` as a new field; both operands are left untouched.
    pub fn add(&self, other: &FlowField) -> FieldResult<FlowField> {
        self.check_compatible(other)?;
        let mut out = self.clone();
        out.add_in_place(other)?;
        Ok(out)
    }

    /// `self - other` as a new field.
    pub fn subtract(&self, other: &FlowField) -> FieldResult<FlowField> {
        self.check_compatible(other)?;
        let mut out = self.clone();
        out.subtract_in_place(other)?;
        Ok(out)
    }

    fn zip_in_place<F>(&mut self, other: &FlowField, f: F) -> FieldResult<()>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        self.check_compatible(other)?;
        let active = self.active_len();
        self.buffer_mut().par_zip_with_inplace(other.buffer(), active, f);
        Ok(())
    }
}

// ===================================================================
// ------------------------- Operator Sugar --------------------------
// ===================================================================

impl MulAssign<Real> for FlowField {
    #[inline]
    fn mul_assign(&mut self, factor: Real) {
        self.scale(factor);
    }
}

impl Mul<Real> for FlowField {
    type Output = FlowField;

    #[inline]
    fn mul(mut self, factor: Real) -> FlowField {
        self.scale(factor);
        self
    }
}

impl Mul<Real> for &FlowField {
    type Output = FlowField;

    #[inline]
    fn mul(self, factor: Real) -> FlowField {
        self.clone() * factor
    }
}

impl Mul<FlowField> for Real {
    type Output = FlowField;

    #[inline]
    fn mul(self, field: FlowField) -> FlowField {
        field * self
    }
}

impl Mul<&FlowField> for Real {
    type Output = FlowField;

    #[inline]
    fn mul(self, field: &FlowField) -> FlowField {
        field * self
    }
}

macro_rules! impl_field_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait for &FlowField {
            type Output = FieldResult<FlowField>;

            /// Checked elementwise op; fails instead of truncating or padding.
            #[inline]
            fn $method(self, rhs: &FlowField) -> Self::Output {
                FlowField::$inherent(self, rhs)
            }
        }
    };
}

impl_field_op!(Add, add, add);
impl_field_op!(Sub, sub, subtract);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::field::geometry::FieldGeometry;
    use crate::field::state::FieldState;
    use crate::math::scalar::Complex;

    fn geometry(nx: usize) -> FieldGeometry {
        FieldGeometry::new(nx, 5, 4, 2, 4.0, 2.0, -1.0, 1.0).unwrap()
    }

    fn ramp(nx: usize) -> FlowField {
        let mut u = FlowField::new(geometry(nx));
        for (k, x) in u.physical_mut().unwrap().as_mut_slice().iter_mut().enumerate() {
            *x = k as Real * 0.5 - 3.0;
        }
        u
    }

    #[test]
    fn scalar_multiplication_forms_agree() {
        let u = ramp(8);
        let mut scaled = u.clone();
        scaled.scale(-1.5);
        assert_eq!(-1.5 * &u, scaled);
        assert_eq!(&u * -1.5, scaled);
        assert_eq!(-1.5 * u.clone(), scaled);
        let mut v = u.clone();
        v *= -1.5;
        assert_eq!(v, scaled);
    }

    #[test]
    fn out_of_place_ops_leave_operands_untouched() {
        let u = ramp(8);
        let v = 2.0 * &u;
        let (u0, v0) = (u.clone(), v.clone());

        let sum = (&u + &v).unwrap();
        let diff = (&v - &u).unwrap();
        assert_eq!(u, u0);
        assert_eq!(v, v0);
        assert_eq!(sum, 3.0 * &u);
        assert_eq!(diff, u);
    }

    #[test]
    fn in_place_ops_mutate_receiver() {
        let mut u = ramp(8);
        let v = ramp(8);
        u.add_in_place(&v).unwrap();
        assert_eq!(u, 2.0 * &v);
        u.subtract_in_place(&v).unwrap();
        assert_eq!(u, v);
    }

    #[test]
    fn mismatched_extents_fail() {
        let u = ramp(8);
        let v = ramp(16);
        assert!(matches!(&u + &v, Err(FieldError::ShapeMismatch { .. })));
        assert!(matches!(u.subtract(&v), Err(FieldError::ShapeMismatch { .. })));
        let mut w = u.clone();
        assert!(w.add_in_place(&v).is_err());
        assert_eq!(w, u);
    }

    #[test]
    fn mismatched_states_fail() {
        let u = FlowField::new(geometry(8));
        let v = FlowField::with_state(geometry(8), FieldState::Spectral);
        assert!(matches!(
            &u + &v,
            Err(FieldError::StateMismatch {
                left: FieldState::Physical,
                right: FieldState::Spectral
            })
        ));
        assert!(matches!(
            v.subtract(&u),
            Err(FieldError::StateMismatch {
                left: FieldState::Spectral,
                right: FieldState::Physical
            })
        ));
    }

    #[test]
    fn spectral_arithmetic_covers_imaginary_parts() {
        let mut u = FlowField::with_state(geometry(8), FieldState::Spectral);
        u.set_complex([1, 2, 3, 1], Complex::new(1.0, -2.0)).unwrap();
        let w = (&u + &u).unwrap();
        assert_eq!(w.get_complex([1, 2, 3, 1]).unwrap(), Complex::new(2.0, -4.0));
        let h = 0.5 * &w;
        assert_eq!(h, u);
    }
}
