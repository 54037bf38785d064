//! Batch pipeline: scan, assemble, schedule.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use dataset::load_collection;
use frame_assembly::FrameAssembler;
use frame_scheduler::{CancelToken, SchedulerPool, TaskExecutor};
use frames_common::builtin_variables;

/// Run the whole batch: scan input dumps, assemble frame tasks in input
/// order, render them through the executor.
pub fn run_with_executor(
    input: &Path,
    output: &Path,
    workers: Option<usize>,
    executor: Arc<dyn TaskExecutor>,
) -> Result<()> {
    let files = find_input_files(input);
    if files.is_empty() {
        bail!("no .json input files found under {}", input.display());
    }
    info!(files = files.len(), "Found input files");

    std::fs::create_dir_all(output)
        .with_context(|| format!("cannot create output directory {}", output.display()))?;

    // Assembly is single-threaded: frame indices must be globally unique
    // and increase in input order.
    let mut assembler = FrameAssembler::new(builtin_variables(), output.to_path_buf());
    let mut tasks = Vec::new();
    let mut skipped_files = 0usize;

    for file in &files {
        let collection = match load_collection(file) {
            Ok(c) => c,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping unreadable file");
                skipped_files += 1;
                continue;
            }
        };
        match assembler.assemble_file(&collection) {
            Ok(mut file_tasks) => {
                info!(
                    file = %file.display(),
                    frames = file_tasks.len(),
                    "Assembled file"
                );
                tasks.append(&mut file_tasks);
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping file");
                skipped_files += 1;
            }
        }
    }

    let total = tasks.len();
    info!(
        frames = total,
        skipped_files,
        "Assembly complete, starting render"
    );

    let pool = SchedulerPool::new(workers);
    let results = pool.run(tasks, executor, &CancelToken::new());

    info!(
        rendered = results.len(),
        failed = total - results.len(),
        output = %output.display(),
        "Frame generation finished"
    );
    Ok(())
}

/// Input dumps under `input`, recursively, in path order.
fn find_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}
