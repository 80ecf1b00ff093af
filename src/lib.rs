// src/lib.rs
/*!
Dual-state flow fields.

A [`FlowField`] stores a three-dimensional, `Nd`-component field in one buffer that
holds either real samples on the physical grid or complex spectral coefficients.
Which one is a runtime [`FieldState`], and every element accessor checks it:
reading coefficients from a physical field (or samples from a spectral one) is a
[`FieldError::State`], never a silent reinterpretation.

- [`field`]: the field type, typed views, arithmetic, transforms, perturbations.
- [`reduce`]: inner products, norms and distances, plus the execution-domain
  contract that lets a long reduction run without holding a host-wide lock.
- [`io`]: save / load.
- [`telemetry`]: optional `tracing` subscriber setup.

```
use flowfield::{inner_product, Complex, FieldGeometry, FieldState, FlowField};

let geometry = FieldGeometry::new(8, 9, 8, 3, 6.28, 3.14, -1.0, 1.0)?;
let mut u = FlowField::with_state(geometry, FieldState::Spectral);
u.set_complex([1, 0, 2, 0], Complex::new(0.5, -0.5))?;

assert!(u.get_real([0, 0, 0, 0]).is_err());
let v = 2.0 * &u;
assert!(inner_product(&u, &v)? > 0.0);
# Ok::<(), flowfield::FieldError>(())
```
*/

pub mod error;
pub mod field;
pub mod io;
pub mod math;
pub mod reduce;
pub mod telemetry;

pub use error::{Axis, FieldError, FieldResult};
pub use field::{
    FieldGeometry, FieldState, FlowField, PerturbationConfig, PhysicalView, SpectralTransform,
    SpectralView,
};
pub use math::scalar::{Complex, FieldScalar, Real};
pub use reduce::{
    inner_product, inner_product_detached, l2_dist, l2_dist2, l2_norm, l2_norm2, Attached,
    ChebyshevQuadrature, ExecutionDomain, HostLock, QuadratureWeights, Reducer,
};
