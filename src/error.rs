//! Error types for settings persistence and the rehab sensor.
//!
//! Neither error ever reaches the simulation: callers log them and fall back
//! to defaults (settings) or neutral readings (sensor).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("failed to open serial port {port} at {baud} baud: {source}")]
    Open {
        port: String,
        baud: u32,
        #[source]
        source: serialport::Error,
    },
    #[error("serial read failed: {0}")]
    Read(#[from] io::Error),
    #[error("serial device error: {0}")]
    Device(#[from] serialport::Error),
    #[error("malformed sensor sample {0:?}")]
    Malformed(String),
}
