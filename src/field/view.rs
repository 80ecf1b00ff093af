// src/field/view.rs
/*!
Typed views over a field's buffer.

A view can only be obtained from a field in the matching state
(`FlowField::physical`, `FlowField::spectral`, and their `_mut` forms), so
holding a `PhysicalView` is proof the samples are real-valued and holding a
`SpectralView` is proof they are complex coefficients. Every element accessor on
`FlowField` goes through one of these.
*/

use crate::error::{FieldError, FieldResult};
use crate::field::geometry::FieldGeometry;
use crate::math::scalar::{Complex, FieldScalar, Real};

/// Read-only view of a field's elements as `T`.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a, T: FieldScalar> {
    geometry: &'a FieldGeometry,
    elems: &'a [T],
}

/// Mutable view of a field's elements as `T`.
#[derive(Debug)]
pub struct FieldViewMut<'a, T: FieldScalar> {
    geometry: &'a FieldGeometry,
    elems: &'a mut [T],
}

/// Real samples of a physical-state field.
pub type PhysicalView<'a> = FieldView<'a, Real>;
/// Complex coefficients of a spectral-state field.
pub type SpectralView<'a> = FieldView<'a, Complex>;
pub type PhysicalViewMut<'a> = FieldViewMut<'a, Real>;
pub type SpectralViewMut<'a> = FieldViewMut<'a, Complex>;

impl<'a, T: FieldScalar> FieldView<'a, T> {
    #[inline]
    pub(crate) fn new(geometry: &'a FieldGeometry, elems: &'a [T]) -> Self {
        debug_assert_eq!(elems.len(), geometry.len());
        Self { geometry, elems }
    }

    #[inline]
    pub fn geometry(&self) -> &'a FieldGeometry {
        self.geometry
    }

    /// Element at `[nx, ny, nz, i]`.
    #[inline]
    pub fn get(&self, idx: [isize; 4]) -> FieldResult<T> {
        let k = self.geometry.flat_index(idx)?;
        Ok(self.elems[k])
    }

    /// All elements in storage order.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.elems
    }

    /// The contiguous block of component `i`.
    pub fn component(&self, i: usize) -> FieldResult<&'a [T]> {
        let range = component_range(self.geometry, i)?;
        Ok(&self.elems[range])
    }
}

impl<'a, T: FieldScalar> FieldViewMut<'a, T> {
    #[inline]
    pub(crate) fn new(geometry: &'a FieldGeometry, elems: &'a mut [T]) -> Self {
        debug_assert_eq!(elems.len(), geometry.len());
        Self { geometry, elems }
    }

    #[inline]
    pub fn geometry(&self) -> &FieldGeometry {
        self.geometry
    }

    #[inline]
    pub fn get(&self, idx: [isize; 4]) -> FieldResult<T> {
        let k = self.geometry.flat_index(idx)?;
        Ok(self.elems[k])
    }

    /// Write `value` at `[nx, ny, nz, i]`. Bounds are checked before the write.
    #[inline]
    pub fn set(&mut self, idx: [isize; 4], value: T) -> FieldResult<()> {
        let k = self.geometry.flat_index(idx)?;
        self.elems[k] = value;
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.elems
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.elems
    }

    pub fn component_mut(&mut self, i: usize) -> FieldResult<&mut [T]> {
        let range = component_range(self.geometry, i)?;
        Ok(&mut self.elems[range])
    }
}

fn component_range(geometry: &FieldGeometry, i: usize) -> FieldResult<std::ops::Range<usize>> {
    if i >= geometry.nd() {
        return Err(FieldError::Index {
            axis: crate::error::Axis::Component,
            index: i as isize,
            extent: geometry.nd(),
        });
    }
    let n = geometry.num_points();
    Ok(i * n..(i + 1) * n)
}
