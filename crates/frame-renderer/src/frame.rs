//! Top-level frame rendering entry point.

use std::fs;

use frames_common::{FrameError, FrameMetadata, FrameResult, FrameTask};
use tracing::{debug, info};

use crate::compose::compose_frame;
use crate::png::encode_canvas;

/// Render one frame task to its PNG artifact and sidecar metadata file.
///
/// Returns the metadata record that was written, so an in-process caller
/// does not need to read the sidecar back.
pub fn render_frame(task: &FrameTask) -> FrameResult<FrameMetadata> {
    if task.bundle.is_empty() {
        return Err(FrameError::InvalidTask(format!(
            "frame {} has no resolved fields",
            task.frame_index
        )));
    }
    for field in &task.bundle.fields {
        if field.grid.is_empty() {
            return Err(FrameError::render(format!(
                "frame {}: field {} has an empty grid",
                task.frame_index, field.name
            )));
        }
    }

    debug!(
        frame_index = task.frame_index,
        fields = task.bundle.len(),
        "rendering frame"
    );

    let canvas = compose_frame(&task.bundle, &task.valid_time);
    let png = encode_canvas(&canvas)?;

    if let Some(parent) = task.image_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&task.image_path, &png)?;

    let image_name = task
        .image_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            FrameError::InvalidTask(format!(
                "image path has no file name: {}",
                task.image_path.display()
            ))
        })?;

    let metadata = FrameMetadata {
        frame_index: task.frame_index,
        valid_time: task.valid_time.clone(),
        variables: task.bundle.variable_names(),
        image_path: image_name,
    };

    let sidecar = FrameTask::metadata_path(&task.image_path);
    fs::write(&sidecar, serde_json::to_vec_pretty(&metadata)?)?;

    info!(
        frame_index = task.frame_index,
        image = %task.image_path.display(),
        bytes = png.len(),
        "frame written"
    );
    Ok(metadata)
}
