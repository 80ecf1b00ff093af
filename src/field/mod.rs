// src/field/mod.rs
//! The dual-state flow field, its views, algebra and state transitions.

pub mod algebra;
pub mod flowfield;
pub mod geometry;
pub mod perturb;
pub mod state;
pub(crate) mod storage;
pub mod transform;
pub mod view;

pub use flowfield::FlowField;
pub use geometry::FieldGeometry;
pub use perturb::PerturbationConfig;
pub use state::FieldState;
pub use transform::SpectralTransform;
pub use view::{
    FieldView, FieldViewMut, PhysicalView, PhysicalViewMut, SpectralView, SpectralViewMut,
};
