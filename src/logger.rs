//! Console logger for binaries built on this crate
//!
//! The library itself only talks to the `log` facade, this logger is one way of seeing those records.
use chrono::Local;
use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Colored logger writing to standard error
pub struct SimpleLogger {
    default_level: LevelFilter,
    module_levels: Vec<(String, LevelFilter)>
}

impl SimpleLogger {
    pub fn new() -> SimpleLogger {
        SimpleLogger {
            default_level: LevelFilter::Info,
            module_levels: Vec::new()
        }
    }

    /// Reads the `RUST_LOG` variable
    ///
    /// Accepts a global level and `target=level` entries, separated by commas, like `warn,web_helpers=trace`. Unreadable entries are ignored.
    pub fn from_env() -> SimpleLogger {
        let mut logger = SimpleLogger::new().with_level(LevelFilter::Error);
        if let Ok(spec) = std::env::var("RUST_LOG") {
            for directive in spec.split(',').map(|d| d.trim()).filter(|d| !d.is_empty()) {
                match directive.split_once('=') {
                    Some((target, level)) => if let Ok(level) = level.parse() {
                        logger = logger.with_module_level(target, level);
                    },
                    None => if let Ok(level) = directive.parse() {
                        logger = logger.with_level(level);
                    }
                }
            }
        }
        logger
    }

    pub fn with_level(mut self, level: LevelFilter) -> SimpleLogger {
        self.default_level = level;
        self
    }

    pub fn with_module_level(mut self, target: &str, level: LevelFilter) -> SimpleLogger {
        self.module_levels.push((target.to_string(), level));
        // Longest prefix first, so the most specific target wins
        self.module_levels.sort_by_key(|(name, _level)| std::cmp::Reverse(name.len()));
        self
    }

    fn level_for(&self, target: &str) -> LevelFilter {
        self.module_levels.iter()
            .find(|(name, _level)| target.starts_with(name.as_str()))
            .map(|(_name, level)| *level)
            .unwrap_or(self.default_level)
    }

    /// Most verbose level any target may log at
    fn max_level(&self) -> LevelFilter {
        self.module_levels.iter()
            .map(|(_name, level)| *level)
            .fold(self.default_level, std::cmp::Ord::max)
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.max_level());
        log::set_boxed_logger(Box::new(self))
    }
}

impl Default for SimpleLogger {
    fn default() -> Self {
        SimpleLogger::new()
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level_string = match record.level() {
                Level::Error => record.level().to_string().red(),
                Level::Warn => record.level().to_string().yellow(),
                Level::Info => record.level().to_string().cyan(),
                Level::Debug => record.level().to_string().purple(),
                Level::Trace => record.level().to_string().normal()
            };
            eprintln!(
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                level_string,
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
