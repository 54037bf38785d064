//! Execution seam between the scheduler and the render worker.

use frames_common::{FrameMetadata, FrameTask};

/// Executes one frame task and reports its metadata record.
///
/// Returning `None` marks the frame as failed; the scheduler logs and
/// drops it without affecting the rest of the batch.
pub trait TaskExecutor: Send + Sync + 'static {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata>;
}
