//! # Formats
//!
//! Serialized catalog formats. Pure transformations only; file I/O lives
//! in the app layer.

pub mod json;

pub use json::{catalog_from_json, catalog_to_json};
