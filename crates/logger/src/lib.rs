//! Logging infrastructure for truecost.
//!
//! Provides a simple, thread-safe logging system with file output
//! and in-memory log storage. The newest warning or error is surfaced
//! on the status line. The logger also backs the `log` facade, so
//! library crates can use `log::info!`.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Position in the log since startup, increasing
    pub seq: u64,
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Logger state
#[derive(Debug)]
struct Logger {
    /// Recent log (last N messages)
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in log
    max_entries: usize,
    /// Sequence number of the next entry
    next_seq: u64,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: PathBuf,
}

impl Logger {
    /// Create new logger instance
    fn new(file_path: PathBuf, max_entries: usize, min_level: LogLevel) -> Self {
        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== truecost log start ===");
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            next_seq: 0,
            min_level,
            file_path,
        }
    }

    /// Add entry to log
    fn add_entry(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        // Write to file (create if deleted)
        if let Ok(mut file) = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
        {
            let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
        }

        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            timestamp,
            level,
            message,
        });
        self.next_seq += 1;

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    fn latest_at_least(&self, level: LogLevel) -> Option<LogEntry> {
        self.entries.iter().rev().find(|e| e.level >= level).cloned()
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Bridge from the `log` facade into the global logger.
struct Facade;

static FACADE: Facade = Facade;

impl log::Log for Facade {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = if record.target().is_empty() {
            record.args().to_string()
        } else {
            format!("{}: {}", record.target(), record.args())
        };
        add(record.level().into(), message);
    }

    fn flush(&self) {}
}

/// Initialize the global logger
///
/// Must be called once at application startup before any logging functions.
/// Subsequent calls will be ignored. Messages logged before `init` are dropped.
///
/// # Arguments
///
/// * `file_path` - Path to the log file
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: PathBuf, max_entries: usize, min_level: LogLevel) {
    if LOGGER.get().is_some() {
        return;
    }
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, max_entries, min_level)));
    if log::set_logger(&FACADE).is_ok() {
        log::set_max_level(min_level.to_filter());
    }
}

fn add(level: LogLevel, message: String) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(|l| l.lock()) {
        logger.add_entry(level, message);
    }
}

/// Log a debug message
pub fn debug(message: impl Into<String>) {
    add(LogLevel::Debug, message.into());
}

/// Log an informational message
pub fn info(message: impl Into<String>) {
    add(LogLevel::Info, message.into());
}

/// Log a warning message
pub fn warn(message: impl Into<String>) {
    add(LogLevel::Warn, message.into());
}

/// Log an error message
pub fn error(message: impl Into<String>) {
    add(LogLevel::Error, message.into());
}

/// Newest stored entry at `level` or above.
pub fn latest_at_least(level: LogLevel) -> Option<LogEntry> {
    match LOGGER.get().map(|l| l.lock()) {
        Some(Ok(logger)) => logger.latest_at_least(level),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn temp_logger(max_entries: usize, min_level: LogLevel) -> (tempfile::TempDir, Logger) {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("logs/test.log"), max_entries, min_level);
        (dir, logger)
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(LogLevel::from_str("debug"), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("WARNING"), Ok(LogLevel::Warn));
        assert!(LogLevel::from_str("verbose").is_err());
    }

    fn messages(logger: &Logger) -> Vec<String> {
        logger.entries.iter().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn test_entries_below_min_level_are_dropped() {
        let (_dir, mut logger) = temp_logger(10, LogLevel::Info);
        logger.add_entry(LogLevel::Debug, "hidden".to_string());
        logger.add_entry(LogLevel::Warn, "shown".to_string());

        assert_eq!(messages(&logger), vec!["shown"]);
        assert_eq!(logger.entries[0].seq, 0);
    }

    #[test]
    fn test_ring_keeps_newest_entries() {
        let (_dir, mut logger) = temp_logger(2, LogLevel::Debug);
        for i in 0..5 {
            logger.add_entry(LogLevel::Info, format!("message {}", i));
        }

        assert_eq!(messages(&logger), vec!["message 3", "message 4"]);
        let seqs: Vec<u64> = logger.entries.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![3, 4]);
    }

    #[test]
    fn test_latest_at_least_skips_lower_levels() {
        let (_dir, mut logger) = temp_logger(10, LogLevel::Debug);
        assert!(logger.latest_at_least(LogLevel::Warn).is_none());

        logger.add_entry(LogLevel::Warn, "first".to_string());
        logger.add_entry(LogLevel::Error, "second".to_string());
        logger.add_entry(LogLevel::Info, "chatter".to_string());

        let latest = logger.latest_at_least(LogLevel::Warn).unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.seq, 1);
        assert_eq!(
            logger.latest_at_least(LogLevel::Debug).unwrap().message,
            "chatter"
        );
    }

    #[test]
    fn test_file_receives_entries() {
        let (dir, mut logger) = temp_logger(10, LogLevel::Debug);
        logger.add_entry(LogLevel::Error, "boom".to_string());

        let content = std::fs::read_to_string(dir.path().join("logs/test.log")).unwrap();
        assert!(content.starts_with("=== truecost log start ==="));
        assert!(content.contains("ERROR: boom"));
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Error), LogLevel::Error);
    }
}
