//! File-based logging using simplelog
//!
//! The terminal belongs to the game, so log records go to a file. The level
//! comes from `RUST_LOG` (error, warn, info, debug, trace) and defaults to info.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "grid_snake.log";

/// Default log location in the system temp directory
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

fn level_from(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize file-based logging, truncating any previous log at `path`
pub fn init(path: &Path) -> Result<()> {
    let level = level_from(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(level_from(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from(Some("warn")), LevelFilter::Warn);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
        assert_eq!(level_from(Some("nonsense")), LevelFilter::Info);
        assert_eq!(level_from(None), LevelFilter::Info);
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with(LOG_FILE));
    }
}
