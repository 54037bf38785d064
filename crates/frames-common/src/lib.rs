//! Common types shared across all forecast-frames crates.

pub mod error;
pub mod frame;
pub mod grid;
pub mod time;
pub mod variable;

pub use error::{FrameError, FrameResult};
pub use frame::{FieldBundle, FrameMetadata, FrameTask, ResolvedField};
pub use grid::Grid;
pub use time::{ForecastStep, ValidTime};
pub use variable::{
    builtin_variables, CanonicalVariable, ColorScaleId, ComponentPair, ConversionRule,
    DisplayConfig, FlowType, VectorComposition,
};
