use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Logger builder that appends to `path`, since the terminal belongs to the widget.
pub fn file_logger_builder(path: &Path, level: LevelFilter) -> Result<Builder> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)));
    Ok(builder)
}

/// Install the file logger as the global `log` backend.
///
/// Only the first call installs anything; later calls return `Ok(false)`.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<bool> {
    Ok(file_logger_builder(path, level)?.try_init().is_ok())
}
