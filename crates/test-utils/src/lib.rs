//! Shared test utilities for the forecast-frames workspace.
//!
//! Provides synthetic grid generators and dataset fixtures so tests across
//! crates build scenarios the same way.

pub mod fixtures;
pub mod generators;

pub use fixtures::{collection_of, scalar_dataset, vector_dataset};
pub use generators::{constant_grid, gradient_grid, pressure_grid, temperature_grid};
