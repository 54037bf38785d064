//! Dataset fixtures built from the synthetic generators.

use chrono::{DateTime, Utc};

use dataset::{DatasetCollection, GridSource, MemoryDataset};
use frames_common::{ForecastStep, Grid};

/// A single-variable dataset providing `grid` at every given step, with an
/// optional `step_type` attribute.
pub fn scalar_dataset(
    var: &str,
    steps: &[i64],
    grid: &Grid,
    step_type: Option<&str>,
) -> MemoryDataset {
    let mut ds = MemoryDataset::new();
    for &h in steps {
        ds = ds.with_field(var, ForecastStep(h), grid.clone());
    }
    if let Some(st) = step_type {
        ds = ds.with_attribute(var, "step_type", st);
    }
    ds
}

/// A dataset providing a u/v component pair at every given step.
pub fn vector_dataset(
    u_name: &str,
    v_name: &str,
    steps: &[i64],
    u: &Grid,
    v: &Grid,
) -> MemoryDataset {
    let mut ds = MemoryDataset::new();
    for &h in steps {
        ds = ds
            .with_field(u_name, ForecastStep(h), u.clone())
            .with_field(v_name, ForecastStep(h), v.clone());
    }
    ds
}

/// Assemble a collection from concrete datasets, preserving order.
pub fn collection_of(
    datasets: Vec<MemoryDataset>,
    reference_time: Option<DateTime<Utc>>,
) -> DatasetCollection {
    let sources: Vec<Box<dyn GridSource>> = datasets
        .into_iter()
        .map(|ds| Box::new(ds) as Box<dyn GridSource>)
        .collect();
    DatasetCollection::new(sources, reference_time)
}
