//! Engine logging
//!
//! Every engine message goes through one process-wide `Logger`. The default
//! prints colored lines to the console. Applications swap in their own sink
//! with `set_logger`, for instance to forward into the `log` facade.
//!
//! Messages below the minimum severity (`set_min_severity`) are dropped
//! before they are formatted.

use colored::*;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Trace as u8);

/// Log sink
///
/// ```no_run
/// use portal_3d_engine::portal3d::log::{Logger, LogEntry, LogSeverity};
///
/// struct WarningsToStderr;
///
/// impl Logger for WarningsToStderr {
///     fn enabled(&self, severity: LogSeverity) -> bool {
///         severity >= LogSeverity::Warn
///     }
///
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}", entry);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);

    /// Whether entries of this severity are wanted at all. Checked before
    /// the message is formatted.
    fn enabled(&self, _severity: LogSeverity) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, e.g. "portal3d::PortalRenderer" or "portal3d::soft"
    pub source: String,
    pub message: String,
    /// Call site, recorded for errors only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

impl LogEntry {
    /// `(file, line)` when the call site was recorded
    pub fn location(&self) -> Option<(&'static str, u32)> {
        self.file.zip(self.line)
    }
}

/// Uncolored `[SEVERITY] [source] message (file:line)`
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.severity.label(), self.source, self.message)?;
        if let Some((file, line)) = self.location() {
            write!(f, " ({}:{})", file, line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogSeverity {
    /// Per-level chain and sequencer details
    Trace = 0,
    Debug = 1,
    Info = 2,
    /// Clamped configuration, dangling links
    Warn = 3,
    /// Aborted frames, lost contexts
    Error = 4,
}

impl LogSeverity {
    /// Fixed-width label
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn colored_label(self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }

    fn from_u8(value: u8) -> LogSeverity {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

/// Colored console output. Warnings and errors go to stderr.
///
/// `[2026-01-01 12:00:00.000] [WARN ] [portal3d::PortalConfig] message`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let mut line = format!(
            "[{}] [{}] [{}] {}",
            datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
            entry.severity.colored_label(),
            entry.source.bright_blue(),
            entry.message
        );
        if let Some((file, line_number)) = entry.location() {
            line.push_str(&format!(" ({}:{})", file, line_number));
        }

        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== LOGGER SLOT =====

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Replace the process-wide logger.
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(logger);
    }
}

/// Restore `DefaultLogger` and let every severity through again.
pub fn reset_logger() {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(DefaultLogger);
    }
    MIN_SEVERITY.store(LogSeverity::Trace as u8, Ordering::Relaxed);
}

/// Drop every message below `severity`, whatever the logger.
pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
}

pub fn min_severity() -> LogSeverity {
    LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
}

/// Whether a message of this severity would reach the logger.
pub fn enabled(severity: LogSeverity) -> bool {
    if severity < min_severity() {
        return false;
    }
    logger_slot().read().map(|slot| slot.enabled(severity)).unwrap_or(false)
}

fn dispatch(entry: LogEntry) {
    if let Ok(slot) = logger_slot().read() {
        slot.log(&entry);
    }
}

/// Macro entry point for messages without a call site.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    dispatch(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: None,
        line: None,
    });
}

/// Macro entry point for messages carrying `file!()`/`line!()`.
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: Some(file),
        line: Some(line),
    });
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogSeverity::$severity) {
            $crate::log::log($crate::log::LogSeverity::$severity, $source, format!($($arg)*));
        }
    };
}

/// ```no_run
/// portal_3d_engine::engine_trace!("portal3d::CameraChain", "level {} built", 3);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Trace, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Debug, $source, $($arg)*) };
}

/// ```no_run
/// portal_3d_engine::engine_info!("portal3d::demo", "Environment ready");
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Info, $source, $($arg)*) };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Warn, $source, $($arg)*) };
}

/// Errors always carry their call site.
///
/// ```no_run
/// portal_3d_engine::engine_error!("portal3d::soft", "Draw failed: {}", "context lost");
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogSeverity::Error) {
            $crate::log::log_detailed(
                $crate::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!(),
            );
        }
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
