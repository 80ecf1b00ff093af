// src/math/mod.rs
pub mod scalar;
