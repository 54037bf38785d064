//! Canonical variable resolution across a dataset collection.

use tracing::warn;

use dataset::DatasetCollection;
use frames_common::{
    CanonicalVariable, ForecastStep, FrameError, FrameResult, Grid, VectorComposition,
    variable::CLOUD_LAYERS,
};

/// Resolves canonical variables against one file's dataset collection.
///
/// Resolution never fails for a missing variable; `resolve` returns `None`
/// and the variable is simply absent from that step's bundle. Construction
/// fails only for malformed input (an empty collection).
pub struct VariableResolver<'a> {
    collection: &'a DatasetCollection,
}

impl<'a> VariableResolver<'a> {
    pub fn new(collection: &'a DatasetCollection) -> FrameResult<Self> {
        if collection.is_empty() {
            return Err(FrameError::EmptyCollection);
        }
        Ok(Self { collection })
    }

    /// Resolve one canonical variable at one step.
    pub fn resolve(&self, var: &CanonicalVariable, step: ForecastStep) -> Option<Grid> {
        if let Some(vector) = &var.vector {
            return self.resolve_vector(vector, step);
        }

        if let Some(grid) = self.resolve_scalar(var, step) {
            return Some(grid);
        }

        if var.is_cloud {
            return self.resolve_cloud_layers(step);
        }

        None
    }

    /// Standard scalar policy: alias-outer / dataset-inner double loop.
    ///
    /// The first dataset that has the alias, has the step, and (when the
    /// variable declares a required flow-type) carries a matching
    /// `step_type` attribute wins. Alias priority beats dataset order.
    fn resolve_scalar(&self, var: &CanonicalVariable, step: ForecastStep) -> Option<Grid> {
        for alias in &var.aliases {
            for source in self.collection.iter() {
                if !source.has_variable(alias) || !source.has_step(alias, step) {
                    continue;
                }
                if let Some(required) = var.required_flow_type {
                    let step_type = source.attribute(alias, "step_type");
                    if step_type.as_deref() != Some(required.as_str()) {
                        continue;
                    }
                }
                if let Some(grid) = source.get(alias, step) {
                    return Some(grid);
                }
            }
        }
        None
    }

    /// Vector composition: first dataset (collection order) providing any
    /// complete pairing at the requested step, preferring earlier pairings
    /// within that dataset; elementwise magnitude with coordinates from
    /// the u component.
    fn resolve_vector(&self, vector: &VectorComposition, step: ForecastStep) -> Option<Grid> {
        for source in self.collection.iter() {
            for pair in &vector.pairs {
                if !source.has_variable(&pair.u) || !source.has_variable(&pair.v) {
                    continue;
                }
                if !source.has_step(&pair.u, step) || !source.has_step(&pair.v, step) {
                    continue;
                }
                let (Some(u), Some(v)) = (source.get(&pair.u, step), source.get(&pair.v, step))
                else {
                    continue;
                };
                match u.hypot(&v) {
                    Ok(speed) => return Some(speed),
                    Err(e) => {
                        warn!(u = %pair.u, v = %pair.v, error = %e, "Mismatched vector components, skipping pair");
                        continue;
                    }
                }
            }
        }
        None
    }

    /// Layer combination fallback: elementwise maximum over whichever cloud
    /// layers are found at the step. A partial subset is acceptable; zero
    /// layers means omission.
    fn resolve_cloud_layers(&self, step: ForecastStep) -> Option<Grid> {
        let mut combined: Option<Grid> = None;
        for source in self.collection.iter() {
            for layer in CLOUD_LAYERS {
                if !source.has_variable(layer) || !source.has_step(layer, step) {
                    continue;
                }
                let Some(grid) = source.get(layer, step) else {
                    continue;
                };
                combined = match combined.take() {
                    None => Some(grid),
                    Some(acc) => match acc.max(&grid) {
                        Ok(merged) => Some(merged),
                        Err(e) => {
                            warn!(layer, error = %e, "Mismatched cloud layer shape, skipping layer");
                            Some(acc)
                        }
                    },
                };
            }
        }
        combined
    }
}
