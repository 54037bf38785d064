//! Forecast frame generation service.
//!
//! Scans a directory of decoded forecast dumps, assembles per-step frame
//! tasks, and renders each one to a PNG plus metadata sidecar through
//! single-use worker processes.
//!
//! The same binary doubles as the render worker: the scheduler re-invokes
//! it with the hidden `--render-task` flag, one frame per process.

mod pipeline;
mod worker;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use frame_scheduler::{ProcessExecutor, TaskExecutor};

#[derive(Parser, Debug)]
#[command(name = "frame-gen")]
#[command(about = "Forecast frame generator")]
struct Args {
    /// Directory of decoded forecast dumps (*.json)
    #[arg(short, long, default_value = "data")]
    input: PathBuf,

    /// Output directory for frames and sidecars
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Concurrent render workers (default: cores minus one)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Render in this process instead of spawning workers (debugging)
    #[arg(long)]
    in_process: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Worker mode: render the task in this file and exit
    #[arg(long, hide = true)]
    render_task: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(task_path) = &args.render_task {
        return worker::run_render_task(task_path);
    }

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        in_process = args.in_process,
        "Starting frame generation"
    );

    let executor: Arc<dyn TaskExecutor> = if args.in_process {
        Arc::new(worker::InProcessExecutor)
    } else {
        let exe = std::env::current_exe()?;
        Arc::new(ProcessExecutor::new(
            exe,
            vec!["--log-level".to_string(), args.log_level.clone()],
        ))
    };
    pipeline::run_with_executor(&args.input, &args.output, args.workers, executor)
}
