//! 输出到stderr的日志

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::env;

/// 覆盖日志级别的环境变量
pub const LOG_ENV: &str = "CPPSA_LOG";

/// 带时间戳的stderr日志
#[derive(Debug)]
struct Logger {
    level: LevelFilter,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{} {:5}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// 根据`-v`的个数计算日志级别，环境变量优先
pub fn level_for(verbosity: usize) -> LevelFilter {
    if let Ok(value) = env::var(LOG_ENV) {
        if let Ok(level) = value.parse::<LevelFilter>() {
            return level;
        }
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// 安装日志，只能调用一次
pub fn init(level: LevelFilter) {
    log::set_boxed_logger(Box::new(Logger { level }))
        .map(|()| log::set_max_level(level))
        .unwrap_or_else(|_| {
            eprintln!("Failed to set logger");
        });
}

/// 日志级别的名称，用于帮助信息
pub fn level_names() -> Vec<&'static str> {
    [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace]
        .iter()
        .map(|level| level.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_names(), ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"]);
    }

    #[test]
    fn test_logger_filters_by_level() {
        let logger = Logger {
            level: LevelFilter::Info,
        };
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!log::Log::enabled(&logger, &debug));
        assert!(log::Log::enabled(&logger, &warn));
    }
}
