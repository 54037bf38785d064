//! Forecast step enumeration.

use std::collections::BTreeSet;

use frames_common::ForecastStep;

use crate::collection::DatasetCollection;

/// Sorted union of step offsets declared across a file's datasets.
///
/// Datasets without a step dimension contribute nothing. If no dataset
/// declares steps at all, a single default step (offset zero) is returned
/// so the file still yields one frame per variable snapshot.
pub fn enumerate_steps(collection: &DatasetCollection) -> Vec<ForecastStep> {
    let mut union: BTreeSet<ForecastStep> = BTreeSet::new();
    for source in collection.iter() {
        if let Some(steps) = source.steps() {
            union.extend(steps);
        }
    }
    if union.is_empty() {
        vec![ForecastStep::ZERO]
    } else {
        union.into_iter().collect()
    }
}
