//! In-memory grid source.
//!
//! The concrete `GridSource` the JSON interchange loader produces, and the
//! building block for synthetic datasets in tests.

use std::collections::{BTreeMap, HashMap};

use frames_common::{ForecastStep, Grid};
use serde::{Deserialize, Serialize};

use crate::source::GridSource;

/// One variable's fields and attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryVariable {
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Fields keyed by step hour offset
    #[serde(default)]
    pub fields: BTreeMap<i64, Grid>,
}

/// A grid source held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDataset {
    /// Whether this dataset declares a step dimension. Datasets without one
    /// are excluded from step enumeration.
    #[serde(default = "default_true")]
    pub has_step_dimension: bool,
    #[serde(default)]
    pub variables: HashMap<String, MemoryVariable>,
}

fn default_true() -> bool {
    true
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self {
            has_step_dimension: true,
            ..Default::default()
        }
    }

    /// A dataset with no step dimension (single implicit field per variable,
    /// stored at offset zero).
    pub fn without_steps() -> Self {
        Self {
            has_step_dimension: false,
            ..Default::default()
        }
    }

    /// Add a field for `(var, step)`, creating the variable if needed.
    pub fn with_field(mut self, var: &str, step: ForecastStep, grid: Grid) -> Self {
        self.variables
            .entry(var.to_string())
            .or_default()
            .fields
            .insert(step.hours(), grid);
        self
    }

    /// Set an attribute on an existing or new variable.
    pub fn with_attribute(mut self, var: &str, key: &str, value: &str) -> Self {
        self.variables
            .entry(var.to_string())
            .or_default()
            .attributes
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl GridSource for MemoryDataset {
    fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.keys().cloned().collect();
        names.sort();
        names
    }

    fn steps(&self) -> Option<Vec<ForecastStep>> {
        if !self.has_step_dimension {
            return None;
        }
        let mut steps: Vec<ForecastStep> = self
            .variables
            .values()
            .flat_map(|v| v.fields.keys().copied().map(ForecastStep))
            .collect();
        steps.sort();
        steps.dedup();
        Some(steps)
    }

    fn has_step(&self, var: &str, step: ForecastStep) -> bool {
        self.variables
            .get(var)
            .is_some_and(|v| v.fields.contains_key(&step.hours()))
    }

    fn get(&self, var: &str, step: ForecastStep) -> Option<Grid> {
        self.variables
            .get(var)
            .and_then(|v| v.fields.get(&step.hours()))
            .cloned()
    }

    fn attribute(&self, var: &str, key: &str) -> Option<String> {
        self.variables
            .get(var)
            .and_then(|v| v.attributes.get(key))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(value: f32) -> Grid {
        Grid::new(2, 1, vec![value; 2], vec![35.0; 2], vec![139.0; 2]).unwrap()
    }

    #[test]
    fn test_field_lookup() {
        let ds = MemoryDataset::new()
            .with_field("t", ForecastStep(0), grid(280.0))
            .with_field("t", ForecastStep(3), grid(281.0));

        assert!(ds.has_variable("t"));
        assert!(ds.has_step("t", ForecastStep(3)));
        assert!(!ds.has_step("t", ForecastStep(6)));
        assert_eq!(ds.get("t", ForecastStep(0)).unwrap().values[0], 280.0);
        assert!(ds.get("missing", ForecastStep(0)).is_none());
    }

    #[test]
    fn test_attributes() {
        let ds = MemoryDataset::new()
            .with_field("tp", ForecastStep(0), grid(0.0))
            .with_attribute("tp", "step_type", "accum");

        assert_eq!(ds.attribute("tp", "step_type").as_deref(), Some("accum"));
        assert!(ds.attribute("tp", "units").is_none());
    }

    #[test]
    fn test_steps_union_within_dataset() {
        let ds = MemoryDataset::new()
            .with_field("t", ForecastStep(3), grid(1.0))
            .with_field("r", ForecastStep(0), grid(2.0));

        assert_eq!(
            ds.steps().unwrap(),
            vec![ForecastStep(0), ForecastStep(3)]
        );
    }

    #[test]
    fn test_no_step_dimension() {
        let ds = MemoryDataset::without_steps().with_field("sp", ForecastStep(0), grid(101325.0));
        assert!(ds.steps().is_none());
    }
}
