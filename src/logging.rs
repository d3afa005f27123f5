//! Log setup
//!
//! The terminal belongs to the game screen, so logs only go to a file and
//! only when one is requested. Without a file the `log` macros stay silent.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::File;
use std::path::Path;

/// Send log output to `path` at `level`
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to install logger")?;

    log::info!("Logging to {} at {}", path.display(), level);
    Ok(())
}
