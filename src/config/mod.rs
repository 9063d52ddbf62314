//! Settings bundle, presets and persistence.

pub mod persistence;
pub mod presets;
pub mod types;

pub use presets::{apply_preset, Preset};
pub use types::*;
