//! Grid source abstraction for decoded forecast files.
//!
//! Decoding of raw grid binary formats is an external concern; this crate
//! defines the seam (`GridSource`), an in-memory implementation, and a JSON
//! interchange loader for the dumps an external decoder produces.

pub mod collection;
pub mod json;
pub mod memory;
pub mod source;
pub mod steps;

pub use collection::DatasetCollection;
pub use json::load_collection;
pub use memory::MemoryDataset;
pub use source::GridSource;
pub use steps::enumerate_steps;
