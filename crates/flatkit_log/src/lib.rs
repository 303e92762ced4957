//! Terminal logging bootstrap for flatkit binaries.
//!
//! Diagnostics go to stderr so stdout carries only operator-facing progress.

use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// `Debug` when verbose, `Info` otherwise.
pub fn log_level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global terminal logger. Fails if a logger is already set.
pub fn init_logging(verbose: bool) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    TermLogger::init(
        log_level_for(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
