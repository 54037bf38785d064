//! Bounded worker pool with strict output ordering.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use frames_common::{FrameMetadata, FrameTask};

use crate::executor::TaskExecutor;

/// Cooperative cancellation flag shared between the pool and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Dispatches frame tasks to at most `workers` concurrent executors.
pub struct SchedulerPool {
    workers: usize,
}

impl SchedulerPool {
    /// `workers = None` uses all cores minus one, never fewer than one.
    pub fn new(workers: Option<usize>) -> Self {
        let workers = workers.unwrap_or_else(default_workers).max(1);
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Execute a batch and return the successful metadata records sorted
    /// by frame index.
    ///
    /// Tasks may finish in any order; the result order never depends on
    /// completion order. Failed tasks are logged and dropped. A cancelled
    /// batch stops dispatching new tasks but in-flight tasks run to
    /// completion.
    pub fn run(
        &self,
        tasks: Vec<FrameTask>,
        executor: Arc<dyn TaskExecutor>,
        cancel: &CancelToken,
    ) -> Vec<FrameMetadata> {
        let total = tasks.len();
        if total == 0 {
            return Vec::new();
        }

        info!(tasks = total, workers = self.workers, "dispatching frame batch");

        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<FrameMetadata>();

        thread::scope(|scope| {
            for _ in 0..self.workers.min(total) {
                let tx = tx.clone();
                let tasks = &tasks;
                let next = &next;
                let executor = Arc::clone(&executor);
                scope.spawn(move || loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let i = next.fetch_add(1, Ordering::SeqCst);
                    if i >= tasks.len() {
                        break;
                    }
                    let task = &tasks[i];
                    match executor.execute(task) {
                        Some(meta) => {
                            // The batch result channel outlives every worker.
                            let _ = tx.send(meta);
                        }
                        None => {
                            warn!(frame_index = task.frame_index, "frame dropped");
                        }
                    }
                });
            }
            drop(tx);
        });

        let mut results: Vec<FrameMetadata> = rx.into_iter().collect();
        results.sort_by_key(|m| m.frame_index);

        if results.len() < total {
            warn!(
                rendered = results.len(),
                failed = total - results.len(),
                "batch finished with failures"
            );
        } else {
            info!(rendered = results.len(), "batch finished");
        }
        results
    }
}

impl Default for SchedulerPool {
    fn default() -> Self {
        Self::new(None)
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workers_at_least_one() {
        assert!(SchedulerPool::new(None).workers() >= 1);
        assert_eq!(SchedulerPool::new(Some(3)).workers(), 3);
        assert_eq!(SchedulerPool::new(Some(0)).workers(), 1);
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
