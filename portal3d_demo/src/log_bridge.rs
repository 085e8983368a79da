//! Forwards engine log entries to the `log` facade so `RUST_LOG` filters
//! them together with everything else.

use portal_3d_engine::portal3d::log::{LogEntry, LogSeverity, Logger};

pub struct LogBridge;

pub fn level_of(severity: LogSeverity) -> log::Level {
    match severity {
        LogSeverity::Trace => log::Level::Trace,
        LogSeverity::Debug => log::Level::Debug,
        LogSeverity::Info => log::Level::Info,
        LogSeverity::Warn => log::Level::Warn,
        LogSeverity::Error => log::Level::Error,
    }
}

impl Logger for LogBridge {
    fn enabled(&self, severity: LogSeverity) -> bool {
        level_of(severity) <= log::max_level()
    }

    fn log(&self, entry: &LogEntry) {
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", entry.message))
                .level(level_of(entry.severity))
                .target(&entry.source)
                .file(entry.file)
                .line(entry.line)
                .build(),
        );
    }
}

#[cfg(test)]
#[path = "log_bridge_tests.rs"]
mod tests;
