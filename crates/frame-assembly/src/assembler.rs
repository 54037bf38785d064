//! Per-file frame task assembly.

use std::path::PathBuf;

use tracing::{debug, info};

use dataset::{enumerate_steps, DatasetCollection};
use frames_common::{
    time::step_label, CanonicalVariable, FieldBundle, FrameResult, FrameTask, ResolvedField,
};

use crate::accumulation::AccumulationTracker;
use crate::resolver::VariableResolver;
use crate::units::normalize;

/// Builds ordered `FrameTask`s from dataset collections.
///
/// One assembler spans the whole run so that frame indices stay globally
/// unique and strictly increasing in (file order, step order). All work
/// here is single-threaded; accumulation state lives only inside one
/// `assemble_file` call.
pub struct FrameAssembler {
    variables: Vec<CanonicalVariable>,
    frames_dir: PathBuf,
    next_index: u32,
}

impl FrameAssembler {
    pub fn new(variables: Vec<CanonicalVariable>, frames_dir: PathBuf) -> Self {
        Self {
            variables,
            frames_dir,
            next_index: 0,
        }
    }

    /// Frames assigned so far.
    pub fn frames_assigned(&self) -> u32 {
        self.next_index
    }

    /// Assemble all frame tasks for one file's dataset collection.
    ///
    /// Steps with an empty bundle produce no task. Errors surface only for
    /// malformed input (empty collection).
    pub fn assemble_file(&mut self, collection: &DatasetCollection) -> FrameResult<Vec<FrameTask>> {
        let resolver = VariableResolver::new(collection)?;
        let steps = enumerate_steps(collection);
        info!(steps = steps.len(), datasets = collection.len(), "Scanning file");

        // Fresh per file, dropped at the end of this call.
        let mut tracker = AccumulationTracker::new();

        let mut tasks = Vec::new();
        for step in steps {
            let mut bundle = FieldBundle::default();

            for var in &self.variables {
                let Some(raw) = resolver.resolve(var, step) else {
                    continue;
                };
                let grid = if var.is_accumulation {
                    tracker.delta(&var.name, raw)
                } else {
                    raw
                };
                let grid = normalize(var.conversion, grid);
                bundle.push(ResolvedField {
                    name: var.name.clone(),
                    grid,
                    display: var.display.clone(),
                });
            }

            if bundle.is_empty() {
                debug!(step = %step, "No variables resolved, skipping step");
                continue;
            }

            let frame_index = self.next_index;
            self.next_index += 1;

            tasks.push(FrameTask {
                frame_index,
                valid_time: step_label(collection.reference_time(), step),
                image_path: self.frames_dir.join(format!("frame_{:04}.png", frame_index)),
                bundle,
            });
        }

        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use frames_common::builtin_variables;
    use test_utils::{collection_of, constant_grid, scalar_dataset, temperature_grid};

    fn assembler() -> FrameAssembler {
        FrameAssembler::new(builtin_variables(), PathBuf::from("/tmp/frames"))
    }

    #[test]
    fn test_indices_increase_across_files() {
        let mut asm = assembler();
        let c1 = collection_of(
            vec![scalar_dataset("t", &[0, 3], &temperature_grid(4, 4), None)],
            None,
        );
        let c2 = collection_of(
            vec![scalar_dataset("t", &[0], &temperature_grid(4, 4), None)],
            None,
        );

        let t1 = asm.assemble_file(&c1).unwrap();
        let t2 = asm.assemble_file(&c2).unwrap();

        assert_eq!(
            t1.iter().map(|t| t.frame_index).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(t2[0].frame_index, 2);
        assert_eq!(asm.frames_assigned(), 3);
    }

    #[test]
    fn test_image_path_uses_zero_padded_index() {
        let mut asm = assembler();
        let c = collection_of(
            vec![scalar_dataset("t", &[0], &temperature_grid(4, 4), None)],
            None,
        );
        let tasks = asm.assemble_file(&c).unwrap();
        assert_eq!(
            tasks[0].image_path,
            PathBuf::from("/tmp/frames/frame_0000.png")
        );
    }

    #[test]
    fn test_empty_bundle_step_skipped() {
        let mut asm = assembler();
        // "zz" matches no canonical variable, so every step is empty.
        let c = collection_of(
            vec![scalar_dataset("zz", &[0, 3], &constant_grid(2, 2, 1.0), None)],
            None,
        );
        let tasks = asm.assemble_file(&c).unwrap();
        assert!(tasks.is_empty());
        assert_eq!(asm.frames_assigned(), 0);
    }

    #[test]
    fn test_valid_time_label_from_reference_time() {
        let mut asm = assembler();
        let rt = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let c = collection_of(
            vec![scalar_dataset("t", &[6], &temperature_grid(4, 4), None)],
            Some(rt),
        );
        let tasks = asm.assemble_file(&c).unwrap();
        assert_eq!(tasks[0].valid_time, "2024-01-15 18:00:00");
    }

    #[test]
    fn test_temperature_is_converted_in_bundle() {
        let mut asm = assembler();
        let c = collection_of(
            vec![scalar_dataset("t", &[0], &constant_grid(2, 2, 300.0), None)],
            None,
        );
        let tasks = asm.assemble_file(&c).unwrap();
        let field = &tasks[0].bundle.fields[0];
        assert_eq!(field.name, "Temperature");
        assert!((field.grid.values[0] - 26.85).abs() < 1e-4);
    }

    #[test]
    fn test_accumulation_reset_between_files() {
        let mut asm = assembler();
        let precip = |vals: &[i64], value: f32| {
            scalar_dataset("tp", vals, &constant_grid(2, 2, value), Some("accum"))
        };

        // File 1: cumulative 0 then 3.
        let f1a = collection_of(vec![precip(&[0], 0.0)], None);
        let _ = asm.assemble_file(&f1a).unwrap();

        // File 2 starts at raw 3: must be treated as first occurrence.
        let f2 = collection_of(vec![precip(&[0], 3.0)], None);
        let tasks = asm.assemble_file(&f2).unwrap();
        let field = &tasks[0].bundle.fields[0];
        assert!(field.grid.values.iter().all(|&v| v == 0.0));
    }
}
