//! File-backed logger setup.
//!
//! The terminal is in raw mode while the game runs, so log records go to a
//! file next to the settings instead of stderr.

use crate::config::persistence::app_dir;
use crate::core::constants::LOG_FILE;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

/// Initialise `env_logger` writing to the log file. `RUST_LOG` overrides the
/// default `info` filter. Returns the log path on success.
pub fn init() -> io::Result<PathBuf> {
    let dir = app_dir().map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
