use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
    #[error("Cannot create log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Logger is already initialised: {0}")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

/// off, error, warn, info, debug or trace, in any case
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(level.to_string()))
}

/// Terminal logger, plus a file logger when `log_file` is given. Call once per process.
pub fn init_logging(level: &str, log_file: Option<&str>) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
