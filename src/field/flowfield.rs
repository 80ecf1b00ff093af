// src/field/flowfield.rs
/*!
`FlowField`: a four-dimensional field `u(x, y, z)_i` that holds either physical
samples or spectral coefficients in one owned buffer.

The domain state is a runtime tag, and it is checked on every element access:
a physical accessor on a spectral field (or the reverse) fails with
[`FieldError::State`] instead of reinterpreting the bytes. Element access is
only possible through the typed views in [`crate::field::view`], which are only
handed out in the matching state.

Construction
------------
- [`FlowField::new`]: zeroed, physical.
- [`FlowField::with_state`]: zeroed, in a chosen state.
- [`FlowField::from_extents`]: the eight-parameter form `(Nx, Ny, Nz, Nd, Lx, Ly, a, b)`.
- [`FlowField::load`]: from persisted storage (see `crate::io::store`).
- `Clone`: deep copy with independent storage.

Geometry is fixed for the lifetime of an instance; only whole-field replacement
(assigning a clone or a loaded field) changes it.
*/

use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::field::geometry::FieldGeometry;
use crate::field::state::FieldState;
use crate::field::storage::FieldBuffer;
use crate::field::view::{PhysicalView, PhysicalViewMut, SpectralView, SpectralViewMut};
use crate::math::scalar::{Complex, Real};

#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    geometry: FieldGeometry,
    state: FieldState,
    buffer: FieldBuffer,
}

// ===================================================================
// --------------------------- Construction --------------------------
// ===================================================================

impl FlowField {
    /// Zero-initialized physical field.
    #[inline]
    pub fn new(geometry: FieldGeometry) -> Self {
        Self::with_state(geometry, FieldState::Physical)
    }

    /// Zero-initialized field in `state`.
    #[inline]
    pub fn with_state(geometry: FieldGeometry, state: FieldState) -> Self {
        Self {
            geometry,
            state,
            buffer: FieldBuffer::zeros(geometry.len()),
        }
    }

    /// Zero-initialized physical field from explicit extents and domain parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn from_extents(
        nx: usize,
        ny: usize,
        nz: usize,
        nd: usize,
        lx: Real,
        ly: Real,
        a: Real,
        b: Real,
    ) -> FieldResult<Self> {
        Ok(Self::new(FieldGeometry::new(nx, ny, nz, nd, lx, ly, a, b)?))
    }

    /// Rebuild a field from its persisted parts, checking them against each other.
    pub(crate) fn from_parts(
        geometry: FieldGeometry,
        state: FieldState,
        data: Vec<Real>,
    ) -> Result<Self, String> {
        geometry.validate().map_err(|e| e.to_string())?;
        if data.len() != geometry.storage_len() {
            return Err(format!(
                "stored buffer holds {} reals but [{}] needs {}",
                data.len(),
                geometry,
                geometry.storage_len()
            ));
        }
        let buffer = FieldBuffer::from_vec(data);
        if state == FieldState::Physical && buffer.padding().iter().any(|&x| x != 0.0) {
            return Err("physical field carries non-zero spectral padding".to_string());
        }
        Ok(Self { geometry, state, buffer })
    }
}

// ===================================================================
// ------------------------------ Queries ----------------------------
// ===================================================================

impl FlowField {
    #[inline] pub fn geometry(&self) -> &FieldGeometry { &self.geometry }
    #[inline] pub fn state(&self) -> FieldState { self.state }

    #[inline] pub fn nx(&self) -> usize { self.geometry.nx() }
    #[inline] pub fn ny(&self) -> usize { self.geometry.ny() }
    #[inline] pub fn nz(&self) -> usize { self.geometry.nz() }
    #[inline] pub fn nd(&self) -> usize { self.geometry.nd() }
    #[inline] pub fn lx(&self) -> Real { self.geometry.lx() }
    #[inline] pub fn ly(&self) -> Real { self.geometry.ly() }
    #[inline] pub fn a(&self) -> Real { self.geometry.a() }
    #[inline] pub fn b(&self) -> Real { self.geometry.b() }

    /// Grid coordinates, see [`FieldGeometry::x`], [`FieldGeometry::y`], [`FieldGeometry::z`].
    #[inline] pub fn x(&self, nx: usize) -> Real { self.geometry.x(nx) }
    #[inline] pub fn y(&self, ny: usize) -> Real { self.geometry.y(ny) }
    #[inline] pub fn z(&self, nz: usize) -> Real { self.geometry.z(nz) }

    /// Same extents and domain parameters (state is not compared).
    #[inline]
    pub fn congruent(&self, other: &FlowField) -> bool {
        self.geometry == other.geometry
    }

    /// Geometry first, then state: the precondition of every binary operation.
    pub(crate) fn check_compatible(&self, other: &FlowField) -> FieldResult<()> {
        if !self.congruent(other) {
            return Err(FieldError::ShapeMismatch {
                left: self.geometry,
                right: other.geometry,
            });
        }
        if self.state != other.state {
            return Err(FieldError::StateMismatch {
                left: self.state,
                right: other.state,
            });
        }
        Ok(())
    }

    #[inline]
    fn require(&self, requested: FieldState) -> FieldResult<()> {
        if self.state != requested {
            return Err(FieldError::State {
                requested,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Reals that carry data in the current state (samples, or all coefficient parts).
    #[inline]
    pub(crate) fn active_len(&self) -> usize {
        match self.state {
            FieldState::Physical => self.geometry.len(),
            FieldState::Spectral => self.geometry.storage_len(),
        }
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &FieldBuffer {
        &self.buffer
    }

    #[inline]
    pub(crate) fn buffer_mut(&mut self) -> &mut FieldBuffer {
        &mut self.buffer
    }

    #[inline]
    pub(crate) fn set_state_tag(&mut self, state: FieldState) {
        self.state = state;
    }
}

// ===================================================================
// ------------------------------- Views -----------------------------
// ===================================================================

impl FlowField {
    /// Real samples. Fails with [`FieldError::State`] when spectral.
    pub fn physical(&self) -> FieldResult<PhysicalView<'_>> {
        self.require(FieldState::Physical)?;
        Ok(PhysicalView::new(&self.geometry, self.buffer.reals()))
    }

    pub fn physical_mut(&mut self) -> FieldResult<PhysicalViewMut<'_>> {
        self.require(FieldState::Physical)?;
        Ok(PhysicalViewMut::new(&self.geometry, self.buffer.reals_mut()))
    }

    /// Complex coefficients. Fails with [`FieldError::State`] when physical.
    pub fn spectral(&self) -> FieldResult<SpectralView<'_>> {
        self.require(FieldState::Spectral)?;
        Ok(SpectralView::new(&self.geometry, self.buffer.complexes()))
    }

    pub fn spectral_mut(&mut self) -> FieldResult<SpectralViewMut<'_>> {
        self.require(FieldState::Spectral)?;
        Ok(SpectralViewMut::new(&self.geometry, self.buffer.complexes_mut()))
    }
}

// ===================================================================
// -------------------------- Element Access -------------------------
// ===================================================================

impl FlowField {
    /// Spectral coefficient at `[nx, ny, nz, i]`.
    ///
    /// Errors: [`FieldError::State`] if the field is physical, [`FieldError::Index`]
    /// if any index is outside `[0, extent)`.
    #[inline]
    pub fn get_complex(&self, idx: [isize; 4]) -> FieldResult<Complex> {
        self.spectral()?.get(idx)
    }

    /// Write a spectral coefficient. State and bounds are checked before the write,
    /// so a failed call leaves the field unchanged.
    #[inline]
    pub fn set_complex(&mut self, idx: [isize; 4], value: Complex) -> FieldResult<()> {
        self.spectral_mut()?.set(idx, value)
    }

    /// Physical sample at `[nx, ny, nz, i]`.
    #[inline]
    pub fn get_real(&self, idx: [isize; 4]) -> FieldResult<Real> {
        self.physical()?.get(idx)
    }

    #[inline]
    pub fn set_real(&mut self, idx: [isize; 4], value: Real) -> FieldResult<()> {
        self.physical_mut()?.set(idx, value)
    }

    /// Zero every element; the state is kept.
    pub fn set_to_zero(&mut self) {
        let active = self.active_len();
        self.buffer.par_fill(active, 0.0);
        debug!(state = %self.state, geometry = %self.geometry, "field set to zero");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;
    use std::f64::consts::PI;

    fn geometry() -> FieldGeometry {
        FieldGeometry::new(4, 3, 2, 3, 2.0 * PI, PI, -1.0, 1.0).unwrap()
    }

    #[test]
    fn fresh_field_is_physical_and_zero() {
        let u = FlowField::new(geometry());
        assert_eq!(u.state(), FieldState::Physical);
        assert_eq!((u.nx(), u.ny(), u.nz(), u.nd()), (4, 3, 2, 3));
        assert_eq!((u.lx(), u.ly(), u.a(), u.b()), (2.0 * PI, PI, -1.0, 1.0));
        assert!(u.physical().unwrap().as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn from_extents_validates() {
        assert!(FlowField::from_extents(8, 9, 8, 3, 1.0, 1.0, -1.0, 1.0).is_ok());
        assert!(matches!(
            FlowField::from_extents(8, 9, 8, 0, 1.0, 1.0, -1.0, 1.0),
            Err(FieldError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn accessor_guard_follows_state() {
        let mut u = FlowField::new(geometry());
        assert!(u.get_real([0, 0, 0, 0]).is_ok());
        assert!(matches!(
            u.get_complex([0, 0, 0, 0]),
            Err(FieldError::State { requested: FieldState::Spectral, actual: FieldState::Physical })
        ));
        assert!(u.set_complex([0, 0, 0, 0], Complex::new(1.0, 0.0)).is_err());

        let mut v = FlowField::with_state(geometry(), FieldState::Spectral);
        assert!(v.get_complex([3, 2, 1, 2]).is_ok());
        assert!(matches!(
            v.get_real([0, 0, 0, 0]),
            Err(FieldError::State { requested: FieldState::Physical, actual: FieldState::Spectral })
        ));
        assert!(v.set_real([0, 0, 0, 0], 1.0).is_err());
        u.set_real([1, 1, 1, 1], 2.5).unwrap();
        assert_eq!(u.get_real([1, 1, 1, 1]).unwrap(), 2.5);
    }

    #[test]
    fn failed_set_leaves_field_unchanged() {
        let mut u = FlowField::with_state(geometry(), FieldState::Spectral);
        u.set_complex([1, 1, 1, 1], Complex::new(1.0, 2.0)).unwrap();
        let before = u.clone();

        let err = u.set_complex([4, 0, 0, 0], Complex::new(9.0, 9.0)).unwrap_err();
        assert!(matches!(err, FieldError::Index { axis: Axis::X, index: 4, extent: 4 }));
        assert_eq!(u, before);
    }

    #[test]
    fn component_views_are_contiguous() {
        let mut u = FlowField::new(geometry());
        u.set_real([0, 0, 0, 1], 7.0).unwrap();
        let view = u.physical().unwrap();
        let c1 = view.component(1).unwrap();
        assert_eq!(c1.len(), 24);
        assert_eq!(c1[0], 7.0);
        assert!(view.component(3).is_err());
    }

    #[test]
    fn physical_writes_never_touch_padding() {
        let mut u = FlowField::new(geometry());
        u.physical_mut().unwrap().as_mut_slice().iter_mut().for_each(|x| *x = 1.0);
        assert!(u.buffer().padding().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn set_to_zero_keeps_state() {
        let mut v = FlowField::with_state(geometry(), FieldState::Spectral);
        v.set_complex([0, 1, 0, 2], Complex::new(-1.0, 4.0)).unwrap();
        v.set_to_zero();
        assert_eq!(v.state(), FieldState::Spectral);
        assert_eq!(v, FlowField::with_state(geometry(), FieldState::Spectral));
    }

    #[test]
    fn from_parts_rejects_inconsistent_metadata() {
        let g = geometry();
        let short = vec![0.0; g.storage_len() - 2];
        assert!(FlowField::from_parts(g, FieldState::Physical, short).is_err());
        let mut data = vec![0.0; g.storage_len()];
        *data.last_mut().unwrap() = 1.0;
        assert!(FlowField::from_parts(g, FieldState::Physical, data.clone()).is_err());
        assert!(FlowField::from_parts(g, FieldState::Spectral, data).is_ok());
    }
}
