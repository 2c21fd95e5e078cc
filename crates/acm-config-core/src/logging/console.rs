//! Console logger implementation

use super::deferred::LogLevel;
use super::traits::Logger;

/// Logger printing to stderr, with info records on stdout
///
/// Records below `min_level` are dropped. Bootstrap chatter is mostly debug,
/// so the default threshold is [`LogLevel::Info`].
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::with_prefix("[acm-config]")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            min_level: LogLevel::Info,
        }
    }

    /// Set the lowest level that is printed
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn format(&self, level: LogLevel, message: &str) -> Option<String> {
        self.enabled(level)
            .then(|| format!("{} {} {}", self.prefix, level, message))
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if let Some(line) = self.format(LogLevel::Debug, message) {
            eprintln!("{}", line);
        }
    }

    fn info(&self, message: &str) {
        if let Some(line) = self.format(LogLevel::Info, message) {
            println!("{}", line);
        }
    }

    fn warn(&self, message: &str) {
        if let Some(line) = self.format(LogLevel::Warn, message) {
            eprintln!("{}", line);
        }
    }

    fn error(&self, message: &str) {
        if let Some(line) = self.format(LogLevel::Error, message) {
            eprintln!("{}", line);
        }
    }
}
