//! Logger setup. The editor owns the terminal, so it logs to a file; the
//! one-shot subcommands log to stderr.

use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;

use simplelog::{
    ColorChoice, Config, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

use crate::error::{AppError, Result};

/// Parse a level name such as `"info"` or `"off"`, case-insensitively.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim())
        .map_err(|_| AppError::Config(format!("unknown log level {:?}", level)))
}

fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build()
}

/// Route log records to `path`, creating its directory and truncating any
/// previous session's log.
pub fn init_file_logger(level: LevelFilter, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    WriteLogger::init(level, logger_config(), file)
        .map_err(|e| AppError::Config(format!("logger already set: {}", e)))
}

/// Route log records to stderr.
pub fn init_stderr_logger(level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        logger_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| AppError::Config(format!("logger already set: {}", e)))
}
