//! Flappy Rehab - a side-scrolling obstacle game for hand rehabilitation.
//!
//! The library holds the simulation (`game`), the input sources that feed it
//! (`input`), the settings bundle (`config`) and the terminal front end (`ui`).

pub mod build_info;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod ui;

pub use config::{ControlMode, InputMode, Settings};
pub use crate::core::constants::*;
pub use game::{RenderFrame, Scene, Session, TickEvent, TickResult};
pub use input::{InputCapabilities, InputDevices, InputSource};
