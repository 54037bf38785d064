//! JSON interchange format for decoded dataset collections.
//!
//! The external decoding collaborator dumps each source file as one JSON
//! document: an optional reference time plus an ordered list of datasets,
//! each mapping variable names to attributes and per-step fields. This
//! loader turns such a dump into a `DatasetCollection` of `MemoryDataset`s.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use frames_common::{FrameError, FrameResult};

use crate::collection::DatasetCollection;
use crate::memory::MemoryDataset;
use crate::source::GridSource;

/// Top-level interchange document.
#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionFile {
    /// Model run/reference time (RFC 3339), if the decoder found one
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    /// Datasets in source order; order is preserved into the collection
    pub datasets: Vec<MemoryDataset>,
}

/// Load one decoded file into a `DatasetCollection`.
///
/// A file that parses but contains zero datasets is an error: the caller
/// treats it as "abort processing of this file".
pub fn load_collection(path: &Path) -> FrameResult<DatasetCollection> {
    let content = std::fs::read_to_string(path)?;
    let file: CollectionFile = serde_json::from_str(&content)
        .map_err(|e| FrameError::decode(format!("{}: {}", path.display(), e)))?;

    if file.datasets.is_empty() {
        return Err(FrameError::decode(format!(
            "{}: no datasets found in file",
            path.display()
        )));
    }

    debug!(
        path = %path.display(),
        datasets = file.datasets.len(),
        "Loaded dataset collection"
    );

    let sources: Vec<Box<dyn GridSource>> = file
        .datasets
        .into_iter()
        .map(|ds| Box::new(ds) as Box<dyn GridSource>)
        .collect();

    Ok(DatasetCollection::new(sources, file.reference_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frames_common::{ForecastStep, Grid};

    #[test]
    fn test_round_trip() {
        let grid = Grid::new(2, 1, vec![280.0, 281.0], vec![35.0, 35.0], vec![139.0, 139.5])
            .unwrap();
        let ds = MemoryDataset::new()
            .with_field("t", ForecastStep(0), grid)
            .with_attribute("t", "step_type", "instant");
        let file = CollectionFile {
            reference_time: None,
            datasets: vec![ds],
        };

        let json = serde_json::to_string(&file).unwrap();
        let parsed: CollectionFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.datasets.len(), 1);
        let t = parsed.datasets[0].get("t", ForecastStep(0)).unwrap();
        assert_eq!(t.values, vec![280.0, 281.0]);
        assert_eq!(
            parsed.datasets[0].attribute("t", "step_type").as_deref(),
            Some("instant")
        );
    }

    #[test]
    fn test_zero_datasets_is_an_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("forecast_frames_empty_collection_test.json");
        std::fs::write(&path, r#"{"datasets": []}"#).unwrap();
        let result = load_collection(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
