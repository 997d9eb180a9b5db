use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing::Level;

use crate::config::AppConfig;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The TUI owns the screen, so logs are appended to the configured file.
    File,
    Stderr,
}

pub const fn level(config: &AppConfig) -> Level {
    if config.debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Installs the global subscriber. Call once, early in `main`.
pub fn init(config: &AppConfig, target: LogTarget) -> io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level(config))
        .with_target(false);

    match target {
        LogTarget::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}
