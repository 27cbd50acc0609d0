//! File logging
//!
//! The terminal belongs to the TUI, so log output goes to
//! `~/.treasury-tui/treasury-tui.log`. The level comes from
//! `TREASURY_TUI_LOG` (error, warn, info, debug, trace), default info.

use crate::config::Config;
use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LEVEL_VAR: &str = "TREASURY_TUI_LOG";

/// Parse a level name, falling back to `Info`
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the file logger and return the log file path
pub fn init() -> Result<PathBuf> {
    let dir = Config::config_dir().context("Could not determine log directory")?;
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("treasury-tui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let level = parse_level(env::var(LEVEL_VAR).ok().as_deref());
    let config = ConfigBuilder::new()
        .add_filter_allow_str("treasury_tui")
        .build();

    WriteLogger::init(level, config, file).context("Logger already initialised")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" warn ")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(Some("off")), LevelFilter::Off);
    }
}
