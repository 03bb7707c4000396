//! Python extension module for the six-box ocean overturning model.
//!
//! The model itself lives in [`rbamocs_core`]; this crate only assembles the `rbamocs._lib`
//! extension module.

pub mod python;

pub use rbamocs_core::*;
