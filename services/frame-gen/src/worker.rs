//! Render worker mode.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use frame_scheduler::TaskExecutor;
use frames_common::{FrameMetadata, FrameTask};

/// Render the task serialized at `path` and exit.
///
/// Runs in a fresh process per frame; a non-zero exit marks the frame as
/// failed without touching the rest of the batch.
pub fn run_render_task(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("cannot read task file {}", path.display()))?;
    let task: FrameTask = serde_json::from_slice(&bytes)
        .with_context(|| format!("invalid task file {}", path.display()))?;

    let metadata = frame_renderer::render_frame(&task)?;
    info!(
        frame_index = metadata.frame_index,
        image = %metadata.image_path,
        "Worker rendered frame"
    );
    Ok(())
}

/// Renders in the calling process instead of spawning one.
///
/// Used by tests and for single-process debugging; production dispatch
/// goes through `ProcessExecutor`.
pub struct InProcessExecutor;

impl TaskExecutor for InProcessExecutor {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata> {
        match frame_renderer::render_frame(task) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(frame_index = task.frame_index, error = %e, "in-process render failed");
                None
            }
        }
    }
}
