//! Frame rendering for resolved field bundles.
//!
//! Turns one `FieldBundle` into one multi-panel PNG artifact plus its
//! sidecar metadata record. Rendering is deterministic: every variable has
//! a fixed color scale and fixed value range, so color meaning is stable
//! across the whole frame sequence.
//!
//! The entry point is [`render_frame`]; in production it runs inside a
//! worker process that exits after exactly one frame (see the
//! frame-scheduler crate for the bounded-lifetime contract).

pub mod canvas;
pub mod colorscale;
pub mod compose;
pub mod frame;
pub mod panel;
pub mod png;
pub mod text;

pub use canvas::{Canvas, Color};
pub use frame::render_frame;
