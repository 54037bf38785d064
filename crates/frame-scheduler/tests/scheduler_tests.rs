//! Ordering, failure and cancellation behavior of the scheduler pool.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use frame_scheduler::{CancelToken, SchedulerPool, TaskExecutor};
use frames_common::{FieldBundle, FrameMetadata, FrameTask};

fn task(index: u32) -> FrameTask {
    FrameTask {
        frame_index: index,
        bundle: FieldBundle::default(),
        valid_time: format!("Step {}", index),
        image_path: PathBuf::from(format!("/tmp/frame_{:04}.png", index)),
    }
}

fn meta(task: &FrameTask) -> FrameMetadata {
    FrameMetadata {
        frame_index: task.frame_index,
        valid_time: task.valid_time.clone(),
        variables: vec![],
        image_path: format!("frame_{:04}.png", task.frame_index),
    }
}

/// Completes earlier frames slower, so completion order inverts
/// submission order.
struct InvertedDelayExecutor;

impl TaskExecutor for InvertedDelayExecutor {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata> {
        let delay = 30 * (3 - task.frame_index.min(3)) as u64;
        std::thread::sleep(Duration::from_millis(delay));
        Some(meta(task))
    }
}

struct FailingExecutor {
    fail_index: u32,
}

impl TaskExecutor for FailingExecutor {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata> {
        if task.frame_index == self.fail_index {
            None
        } else {
            Some(meta(task))
        }
    }
}

/// Cancels the batch from inside the first executed task.
struct CancellingExecutor {
    token: CancelToken,
}

impl TaskExecutor for CancellingExecutor {
    fn execute(&self, task: &FrameTask) -> Option<FrameMetadata> {
        self.token.cancel();
        Some(meta(task))
    }
}

#[test]
fn results_are_sorted_by_frame_index() {
    let pool = SchedulerPool::new(Some(3));
    let tasks = vec![task(0), task(1), task(2)];

    let results = pool.run(tasks, Arc::new(InvertedDelayExecutor), &CancelToken::new());

    let indices: Vec<u32> = results.iter().map(|m| m.frame_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn failed_frames_are_dropped_without_aborting_the_batch() {
    let pool = SchedulerPool::new(Some(2));
    let tasks = (0..5).map(task).collect();

    let results = pool.run(
        tasks,
        Arc::new(FailingExecutor { fail_index: 3 }),
        &CancelToken::new(),
    );

    let indices: Vec<u32> = results.iter().map(|m| m.frame_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 4]);
}

#[test]
fn cancellation_stops_dispatch_of_remaining_tasks() {
    let pool = SchedulerPool::new(Some(1));
    let token = CancelToken::new();
    let tasks = (0..10).map(task).collect();

    let results = pool.run(
        tasks,
        Arc::new(CancellingExecutor {
            token: token.clone(),
        }),
        &token,
    );

    // One worker: the first task runs and cancels, the rest never start.
    assert_eq!(results.len(), 1);
    assert!(token.is_cancelled());
}

#[test]
fn empty_batch_yields_empty_results() {
    let pool = SchedulerPool::new(Some(2));
    let results = pool.run(Vec::new(), Arc::new(InvertedDelayExecutor), &CancelToken::new());
    assert!(results.is_empty());
}
