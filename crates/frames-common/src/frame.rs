//! Frame task and metadata records.
//!
//! A `FrameTask` is the unit of work handed to a render worker; it must be
//! fully serializable because the production scheduler moves it across an
//! OS process boundary. A `FrameMetadata` is the small record that comes
//! back, and is also what the sidecar JSON file contains.

use crate::grid::Grid;
use crate::variable::DisplayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One resolved, converted field ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedField {
    /// Canonical variable name
    pub name: String,
    pub grid: Grid,
    pub display: DisplayConfig,
}

/// The set of resolved fields for one (file, step) pair.
///
/// Field order follows the canonical registry and fixes panel order. A
/// variable that failed to resolve is simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldBundle {
    pub fields: Vec<ResolvedField>,
}

impl FieldBundle {
    pub fn push(&mut self, field: ResolvedField) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of present variables, in panel order.
    pub fn variable_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// One render unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameTask {
    /// Strictly increasing, globally unique across the whole run; assigned
    /// in the single-threaded assembly phase and never recomputed
    pub frame_index: u32,
    pub bundle: FieldBundle,
    /// Valid-time label shown in the frame title
    pub valid_time: String,
    /// Output image path (unique per frame index)
    pub image_path: PathBuf,
}

impl FrameTask {
    /// Sidecar metadata path for an image artifact: same base name with a
    /// `_metadata.json` suffix.
    pub fn metadata_path(image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        image_path.with_file_name(format!("{}_metadata.json", stem))
    }
}

/// Per-frame metadata record, written as the sidecar JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMetadata {
    pub frame_index: u32,
    pub valid_time: String,
    /// Canonical names of variables present in the frame
    pub variables: Vec<String>,
    /// Image artifact basename (same directory as the sidecar)
    pub image_path: String,
}
