// src/reduce/mod.rs
//! Reductions over flow fields and the execution contract they run under.

pub mod domain;
pub mod inner;
pub mod quadrature;

pub use domain::{Attached, ExecutionDomain, HostGuard, HostLock};
pub use inner::{
    inner_product, inner_product_detached, l2_dist, l2_dist2, l2_norm, l2_norm2, Reducer,
};
pub use quadrature::{clenshaw_curtis, ChebyshevQuadrature, QuadratureWeights};
