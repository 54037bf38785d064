//! Single-threaded assembly phase of the frame pipeline.
//!
//! For each file: enumerate steps, resolve every canonical variable against
//! the file's dataset collection, convert cumulative totals to per-interval
//! rates, normalize units, and package the surviving fields into ordered
//! `FrameTask`s. Everything here runs sequentially before any parallel
//! rendering begins, so accumulation state needs no locking.

pub mod accumulation;
pub mod assembler;
pub mod resolver;
pub mod units;

pub use accumulation::AccumulationTracker;
pub use assembler::FrameAssembler;
pub use resolver::VariableResolver;
pub use units::normalize;
