//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Level priority:
//! 1. `--log-level` flag
//! 2. `TASKQ_LOG` environment variable (e.g. "info", "debug")
//! 3. `warn`
//!
//! Logs go to stderr; stdout is reserved for command output.

use clap::ValueEnum;
use tracing::Level;

pub const LOG_ENV: &str = "TASKQ_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) {
    let level = resolve_level(cli_level, std::env::var(LOG_ENV).ok().as_deref());
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    cli_level
        .map(Level::from)
        .or_else(|| env_value.and_then(parse_level_str))
        .unwrap_or(Level::WARN)
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
