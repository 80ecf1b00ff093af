// src/io/mod.rs
pub mod store;

pub use store::{resolve_path, FieldFormat, DEFAULT_EXTENSION, STORE_VERSION};
