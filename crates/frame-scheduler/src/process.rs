//! Process-per-task executor.
//!
//! Each frame renders in a freshly spawned worker process that exits when
//! the frame is done, so decoder or renderer state never accumulates
//! across frames. The task payload travels through a temporary JSON file
//! and the result comes back through the frame's sidecar metadata file.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use frames_common::{FrameMetadata, FrameTask};

use crate::executor::TaskExecutor;

/// Spawns one worker process per frame task.
pub struct ProcessExecutor {
    worker_exe: PathBuf,
    worker_args: Vec<String>,
}

impl ProcessExecutor {
    /// `worker_exe` is invoked as
    /// `worker_exe <worker_args..> --render-task <task.json>` once per
    /// frame.
    pub fn new(worker_exe: PathBuf, worker_args: Vec<String>) -> Self {
        Self {
            worker_exe,
            worker_args,
        }
    }

    fn run_worker(&self, task: &FrameTask) -> Option<FrameMetadata> {
        let mut task_file = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => {
                warn!(frame_index = task.frame_index, error = %e, "failed to create task file");
                return None;
            }
        };

        let payload = match serde_json::to_vec(task) {
            Ok(p) => p,
            Err(e) => {
                warn!(frame_index = task.frame_index, error = %e, "failed to serialize task");
                return None;
            }
        };
        if let Err(e) = task_file.write_all(&payload) {
            warn!(frame_index = task.frame_index, error = %e, "failed to write task file");
            return None;
        }

        debug!(
            frame_index = task.frame_index,
            worker = %self.worker_exe.display(),
            "spawning render worker"
        );

        let status = Command::new(&self.worker_exe)
            .args(&self.worker_args)
            .arg("--render-task")
            .arg(task_file.path())
            .status();

        match status {
            Ok(s) if s.success() => self.read_sidecar(task),
            Ok(s) => {
                warn!(
                    frame_index = task.frame_index,
                    exit = %s,
                    "render worker failed"
                );
                None
            }
            Err(e) => {
                warn!(frame_index = task.frame_index, error = %e, "failed to spawn render worker");
                None
            }
        }
    }

    /// The worker writes the sidecar before exiting zero; read it back as
    /// the result record.
    fn read_sidecar(&self, task: &FrameTask) -> Option<FrameMetadata> {
        let sidecar = FrameTask::metadata_path(&task.image_path);
        let bytes = match std::fs::read(&sidecar) {
            Ok(b) => b,
            Err(e) => {
                warn!(
                    frame_index = task.frame_index,
                    sidecar = %sidecar.display(),
                    error = %e,
                    "worker exited zero but left no sidecar"
                );
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!(
                    frame_index = task.frame_index,
                    sidecar = %sidecar.display(),
                    error = %e,
                    "unreadable sidecar metadata"
                );
                None
            }
        }
    }
}

impl TaskExecutor for ProcessExecutor {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata> {
        self.run_worker(task)
    }
}
