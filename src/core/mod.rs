//! Shared constants for the simulation and the terminal shell.

pub mod constants;

pub use constants::*;
