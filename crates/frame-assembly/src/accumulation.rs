//! Cumulative-to-rate differencing.

use std::collections::HashMap;

use tracing::warn;

use frames_common::Grid;

/// Per-file state machine converting running cumulative totals into
/// per-interval deltas.
///
/// Scope is a single file: construct one tracker per file and drop it when
/// the file is done. State must never be carried across files or shared
/// with render workers.
#[derive(Default)]
pub struct AccumulationTracker {
    /// Last raw cumulative grid seen per canonical variable
    previous: HashMap<String, Grid>,
}

impl AccumulationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a raw cumulative field into a per-interval delta.
    ///
    /// The first occurrence of a variable in a file yields a zero-filled
    /// grid shaped like the raw field, preserving panel layout across the
    /// whole frame sequence. Later occurrences yield `raw - previous` with
    /// negative deltas clamped to zero (counter resets, decoder noise). In
    /// both cases the stored state becomes the raw value, never the delta.
    pub fn delta(&mut self, name: &str, raw: Grid) -> Grid {
        let delta = match self.previous.get(name) {
            Some(previous) => match raw.sub_clamped(previous) {
                Ok(delta) => delta,
                Err(e) => {
                    // Shape changed mid-file; treat as a fresh start.
                    warn!(variable = name, error = %e, "Accumulation shape changed, restarting state");
                    raw.zeros_like()
                }
            },
            None => raw.zeros_like(),
        };
        self.previous.insert(name.to_string(), raw);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::constant_grid;

    #[test]
    fn test_cumulative_sequence() {
        let mut tracker = AccumulationTracker::new();
        let deltas: Vec<f32> = [0.0, 5.0, 5.0, 12.0]
            .into_iter()
            .map(|raw| tracker.delta("Precipitation", constant_grid(2, 2, raw)).values[0])
            .collect();
        // First value is the documented zero-fill policy.
        assert_eq!(deltas, vec![0.0, 5.0, 0.0, 7.0]);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut tracker = AccumulationTracker::new();
        tracker.delta("Precipitation", constant_grid(2, 2, 10.0));
        let d = tracker.delta("Precipitation", constant_grid(2, 2, 4.0));
        assert!(d.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_state_is_raw_not_delta() {
        let mut tracker = AccumulationTracker::new();
        tracker.delta("Precipitation", constant_grid(2, 2, 5.0));
        tracker.delta("Precipitation", constant_grid(2, 2, 8.0)); // delta 3
        let d = tracker.delta("Precipitation", constant_grid(2, 2, 9.0));
        // 9 - 8 (raw), not 9 - 3 (delta)
        assert_eq!(d.values[0], 1.0);
    }

    #[test]
    fn test_fresh_tracker_resets_per_file() {
        let mut first = AccumulationTracker::new();
        first.delta("Precipitation", constant_grid(2, 2, 0.0));
        first.delta("Precipitation", constant_grid(2, 2, 3.0));
        drop(first);

        // New file: step 1 is a first occurrence again.
        let mut second = AccumulationTracker::new();
        let d = second.delta("Precipitation", constant_grid(2, 2, 3.0));
        assert!(d.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_variables_tracked_independently() {
        let mut tracker = AccumulationTracker::new();
        tracker.delta("Precipitation", constant_grid(2, 2, 5.0));
        let d = tracker.delta("Snowfall", constant_grid(2, 2, 5.0));
        assert!(d.values.iter().all(|&v| v == 0.0));
    }
}
