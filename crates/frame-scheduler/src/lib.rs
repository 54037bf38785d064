//! Task scheduling with bounded-lifetime render workers.
//!
//! Rendering libraries can leak or fragment memory over long batches, so
//! production rendering runs one OS process per frame: the scheduler
//! serializes each `FrameTask`, spawns a fresh worker, and collects the
//! sidecar metadata the worker leaves behind. A failed frame costs only
//! that frame.
//!
//! The [`TaskExecutor`] seam keeps the dispatch and ordering logic
//! testable without spawning processes.

pub mod executor;
pub mod pool;
pub mod process;

pub use executor::TaskExecutor;
pub use pool::{CancelToken, SchedulerPool};
pub use process::ProcessExecutor;
