// src/field/geometry.rs
/*!
Extents and domain parameters of a flow field.

- `nx, ny, nz`: grid samples along x (periodic), y (wall-normal), z (periodic).
- `nd`: scalar components stored per grid point (3 for a velocity field).
- `lx, ly`: physical extents of the two periodic directions (x and z).
- `a, b`: wall-normal bounds, `a < b`.

Storage layout
--------------
Elements are stored component-major, then row-major over the grid:

`flat([nx, ny, nz, i]) = ((i * Nx + nx) * Ny + ny) * Nz + nz`

so `flat % num_points()` is the grid point and `flat / num_points()` the component.
The same formula indexes real samples (physical) and complex coefficients (spectral).
*/

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, FieldError, FieldResult};
use crate::math::scalar::Real;

/// Immutable shape of a flow field. Two fields are combinable iff their geometries are equal.
///
/// Deserialization runs the same validation as [`FieldGeometry::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct FieldGeometry {
    nx: usize,
    ny: usize,
    nz: usize,
    nd: usize,
    lx: Real,
    ly: Real,
    a: Real,
    b: Real,
}

/// Unchecked wire form of [`FieldGeometry`].
#[derive(Deserialize)]
struct RawGeometry {
    nx: usize,
    ny: usize,
    nz: usize,
    nd: usize,
    lx: Real,
    ly: Real,
    a: Real,
    b: Real,
}

impl TryFrom<RawGeometry> for FieldGeometry {
    type Error = FieldError;

    fn try_from(raw: RawGeometry) -> FieldResult<Self> {
        let RawGeometry { nx, ny, nz, nd, lx, ly, a, b } = raw;
        FieldGeometry::new(nx, ny, nz, nd, lx, ly, a, b)
    }
}

impl FieldGeometry {
    /// Validated constructor.
    ///
    /// Fails with [`FieldError::InvalidGeometry`] when an extent is zero, the element
    /// count overflows, a length is not positive and finite, or `a >= b`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nx: usize,
        ny: usize,
        nz: usize,
        nd: usize,
        lx: Real,
        ly: Real,
        a: Real,
        b: Real,
    ) -> FieldResult<Self> {
        let geometry = Self { nx, ny, nz, nd, lx, ly, a, b };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Re-check the invariants (used on geometries that come back from storage).
    pub fn validate(&self) -> FieldResult<()> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 || self.nd == 0 {
            return Err(FieldError::InvalidGeometry(format!(
                "all extents must be > 0; got Nx={}, Ny={}, Nz={}, Nd={}",
                self.nx, self.ny, self.nz, self.nd
            )));
        }
        let storage = [self.nx, self.ny, self.nz, self.nd, 2]
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if storage.is_none() {
            return Err(FieldError::InvalidGeometry(format!(
                "element count overflows for [{self}]"
            )));
        }
        if !(self.lx.is_finite() && self.lx > 0.0 && self.ly.is_finite() && self.ly > 0.0) {
            return Err(FieldError::InvalidGeometry(format!(
                "periodic lengths must be positive and finite; got Lx={}, Ly={}",
                self.lx, self.ly
            )));
        }
        if !(self.a.is_finite() && self.b.is_finite() && self.a < self.b) {
            return Err(FieldError::InvalidGeometry(format!(
                "wall-normal bounds must be finite with a < b; got a={}, b={}",
                self.a, self.b
            )));
        }
        Ok(())
    }

    #[inline] pub fn nx(&self) -> usize { self.nx }
    #[inline] pub fn ny(&self) -> usize { self.ny }
    #[inline] pub fn nz(&self) -> usize { self.nz }
    #[inline] pub fn nd(&self) -> usize { self.nd }
    #[inline] pub fn lx(&self) -> Real { self.lx }
    #[inline] pub fn ly(&self) -> Real { self.ly }
    #[inline] pub fn a(&self) -> Real { self.a }
    #[inline] pub fn b(&self) -> Real { self.b }

    /// `[Nx, Ny, Nz, Nd]`, in element-index order.
    #[inline]
    pub fn extents(&self) -> [usize; 4] {
        [self.nx, self.ny, self.nz, self.nd]
    }

    /// Grid points per component: `Nx * Ny * Nz`.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Elements per state view: `Nx * Ny * Nz * Nd`.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_points() * self.nd
    }

    /// Never true for a validated geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reals in the backing buffer: room for `len()` complex coefficients.
    #[inline]
    pub fn storage_len(&self) -> usize {
        2 * self.len()
    }

    // ------------------------------------------------------------------------
    // Indexing
    // ------------------------------------------------------------------------

    /// Flat element index of `[nx, ny, nz, i]`.
    ///
    /// Unlike the periodic lattices this index never wraps: every axis is checked
    /// against `[0, extent)` and the first violation is reported.
    pub fn flat_index(&self, idx: [isize; 4]) -> FieldResult<usize> {
        let extents = self.extents();
        for ((&raw, &extent), axis) in idx.iter().zip(extents.iter()).zip(Axis::ALL) {
            if raw < 0 || raw as usize >= extent {
                return Err(FieldError::Index { axis, index: raw, extent });
            }
        }
        let [nx, ny, nz, i] = idx.map(|v| v as usize);
        Ok(((i * self.nx + nx) * self.ny + ny) * self.nz + nz)
    }

    /// Grid point `(nx, ny, nz)` of a flat point index (`flat % num_points()`).
    #[inline]
    pub(crate) fn point_coords(&self, point: usize) -> (usize, usize, usize) {
        let nz = point % self.nz;
        let rest = point / self.nz;
        (rest / self.ny, rest % self.ny, nz)
    }

    // ------------------------------------------------------------------------
    // Grid coordinates & wavenumbers
    // ------------------------------------------------------------------------

    /// Streamwise coordinate `nx * Lx / Nx`.
    #[inline]
    pub fn x(&self, nx: usize) -> Real {
        nx as Real * self.lx / self.nx as Real
    }

    /// Wall-normal Chebyshev extrema point on `[a, b]`; `y(0) = b`, `y(Ny-1) = a`.
    #[inline]
    pub fn y(&self, ny: usize) -> Real {
        let mid = 0.5 * (self.b + self.a);
        if self.ny == 1 {
            return mid;
        }
        let half = 0.5 * (self.b - self.a);
        mid + half * (PI * ny as Real / (self.ny - 1) as Real).cos()
    }

    /// Spanwise coordinate `nz * Ly / Nz`.
    #[inline]
    pub fn z(&self, nz: usize) -> Real {
        nz as Real * self.ly / self.nz as Real
    }

    /// Signed x wavenumber of spectral index `nx` (upper half maps to negatives).
    #[inline]
    pub fn kx(&self, nx: usize) -> isize {
        signed_wavenumber(nx, self.nx)
    }

    /// Signed z wavenumber of spectral index `nz`.
    #[inline]
    pub fn kz(&self, nz: usize) -> isize {
        signed_wavenumber(nz, self.nz)
    }
}

#[inline]
fn signed_wavenumber(n: usize, extent: usize) -> isize {
    if n <= extent / 2 {
        n as isize
    } else {
        n as isize - extent as isize
    }
}

impl fmt::Display for FieldGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nx={} Ny={} Nz={} Nd={} Lx={} Ly={} a={} b={}",
            self.nx, self.ny, self.nz, self.nd, self.lx, self.ly, self.a, self.b
        )
    }
}
