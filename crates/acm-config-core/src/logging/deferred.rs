//! Buffering logger for use before the host logging system is ready

use parking_lot::Mutex;

use super::traits::Logger;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A buffered log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that holds records in memory until they are replayed
///
/// The bootstrap runs before the application has set up its logging, so
/// records are kept here and handed over with [`DeferredLogger::replay_to`]
/// once a real logger exists.
#[derive(Debug, Default)]
pub struct DeferredLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl DeferredLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }

    /// Snapshot of the buffered records
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Buffered records at or above `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level >= level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forward every buffered record to `target` and clear the buffer
    pub fn replay_to(&self, target: &dyn Logger) {
        let drained: Vec<LogRecord> = std::mem::take(&mut *self.records.lock());
        for record in drained {
            match record.level {
                LogLevel::Debug => target.debug(&record.message),
                LogLevel::Info => target.info(&record.message),
                LogLevel::Warn => target.warn(&record.message),
                LogLevel::Error => target.error(&record.message),
            }
        }
    }
}

impl Logger for DeferredLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
    }

    #[test]
    fn test_records_are_buffered() {
        let logger = DeferredLogger::new();
        logger.debug("d");
        logger.error("boom");

        assert_eq!(logger.len(), 2);
        let errors = logger.records_at(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "boom");
    }

    #[test]
    fn test_replay_drains_into_target() {
        let source = DeferredLogger::new();
        source.info("first");
        source.warn("second");

        let target = DeferredLogger::new();
        source.replay_to(&target);

        assert!(source.is_empty());
        assert_eq!(
            target.records(),
            vec![
                LogRecord { level: LogLevel::Info, message: "first".to_string() },
                LogRecord { level: LogLevel::Warn, message: "second".to_string() },
            ]
        );
    }
}
