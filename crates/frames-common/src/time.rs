//! Time handling for forecast steps and valid times.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A forecast step: an hour offset from a file's reference time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct ForecastStep(pub i64);

impl ForecastStep {
    /// The analysis step (offset zero).
    pub const ZERO: ForecastStep = ForecastStep(0);

    pub fn hours(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ForecastStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+{}h", self.0)
    }
}

/// A valid time for forecast data.
///
/// Combines reference time (model run time) and a forecast step offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidTime {
    /// Model run/reference time
    pub reference_time: DateTime<Utc>,
    /// Forecast offset from reference time
    pub step: ForecastStep,
}

impl ValidTime {
    pub fn new(reference_time: DateTime<Utc>, step: ForecastStep) -> Self {
        Self {
            reference_time,
            step,
        }
    }

    /// Calculate the actual valid time (reference + forecast offset).
    pub fn valid_datetime(&self) -> DateTime<Utc> {
        self.reference_time + Duration::hours(self.step.hours())
    }

    /// Human-readable label used in frame titles and metadata sidecars.
    pub fn label(&self) -> String {
        self.valid_datetime().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Frame label for a step, falling back to the bare offset when the file
/// carries no reference time.
pub fn step_label(reference_time: Option<DateTime<Utc>>, step: ForecastStep) -> String {
    match reference_time {
        Some(rt) => ValidTime::new(rt, step).label(),
        None => format!("Step {}", step.hours()),
    }
}
