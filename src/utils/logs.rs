//! 日志初始化与运行时级别调整

use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LevelFilter> for LogLevel {
    fn from(level: LevelFilter) -> Self {
        match level {
            LevelFilter::Error => LogLevel::Error,
            LevelFilter::Warn => LogLevel::Warn,
            LevelFilter::Info => LogLevel::Info,
            LevelFilter::Debug => LogLevel::Debug,
            LevelFilter::Trace => LogLevel::Trace,
            LevelFilter::Off => LogLevel::Off,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

/// 初始化 env_logger
///
/// 后端允许到 Trace，实际输出由 `log::set_max_level` 控制，
/// 这样运行时可以调整到任意级别。重复初始化（如测试中）会被忽略。
pub fn init_logger(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .filter_module("sqlx", LevelFilter::Warn)
        .filter_module("sea_orm", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("日志系统已初始化，跳过");
    }
    log::set_max_level(level);
}

/// 动态设置日志输出级别（不持久化）
pub fn set_log_level(level: LogLevel) {
    log::set_max_level(level.into());
    log::info!("日志级别已调整为 {:?}", level);
}

/// 获取当前日志级别
pub fn get_log_level() -> LogLevel {
    log::max_level().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_lowercase() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
    }

    #[test]
    fn converts_both_ways() {
        for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace, LogLevel::Off] {
            assert_eq!(LogLevel::from(LevelFilter::from(level)), level);
        }
    }
}
