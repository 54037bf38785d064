//! The grid source interface.

use frames_common::{ForecastStep, Grid};

/// One decoded grid collection inside a source file.
///
/// A source owns zero or more variables, each available over a subset of
/// forecast steps and each carrying string attributes (notably `step_type`,
/// which distinguishes instantaneous values from running cumulative
/// totals). Resolution composes over an ordered list of this interface
/// rather than nested ad hoc lookups.
pub trait GridSource: Send + Sync {
    /// Names of all variables this source provides.
    fn variable_names(&self) -> Vec<String>;

    /// Steps declared by this source's step dimension, or `None` if the
    /// source has no step dimension.
    fn steps(&self) -> Option<Vec<ForecastStep>>;

    /// Whether `var` is available at `step`.
    fn has_step(&self, var: &str, step: ForecastStep) -> bool;

    /// Retrieve the field for `(var, step)`, if present.
    fn get(&self, var: &str, step: ForecastStep) -> Option<Grid>;

    /// Look up a variable attribute by key.
    fn attribute(&self, var: &str, key: &str) -> Option<String>;

    /// Convenience: whether this source provides `var` at all.
    fn has_variable(&self, var: &str) -> bool {
        self.variable_names().iter().any(|v| v == var)
    }
}
