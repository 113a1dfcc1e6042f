//! 运行配置
//!
//! 所有配置均来自环境变量，未设置时使用默认值。

use std::net::SocketAddr;
use std::str::FromStr;

use log::LevelFilter;

pub const ENV_BIND_ADDR: &str = "GANG_BIND_ADDR";
pub const ENV_DATABASE_URL: &str = "GANG_DATABASE_URL";
pub const ENV_STARTING_CREDITS: &str = "GANG_STARTING_CREDITS";
pub const ENV_CACHE: &str = "GANG_CACHE";
pub const ENV_LOG: &str = "GANG_LOG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STARTING_CREDITS: i32 = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// 为空时由 gang-path 解析默认的 SQLite 文件路径
    pub database_url: Option<String>,
    pub starting_credits: i32,
    pub cache_enabled: bool,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: None,
            starting_credits: DEFAULT_STARTING_CREDITS,
            cache_enabled: true,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// 从环境变量读取配置
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = read(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("无效的监听地址 {}: {}", ENV_BIND_ADDR, e))?;

        let starting_credits = match read(ENV_STARTING_CREDITS) {
            Some(v) => v
                .parse::<i32>()
                .map_err(|e| format!("无效的初始金币 {}: {}", ENV_STARTING_CREDITS, e))?,
            None => DEFAULT_STARTING_CREDITS,
        };
        if starting_credits < 0 {
            return Err(format!("{} 不能为负数", ENV_STARTING_CREDITS));
        }

        let cache_enabled = match read(ENV_CACHE).as_deref() {
            None => true,
            Some("on") | Some("true") | Some("1") => true,
            Some("off") | Some("false") | Some("0") => false,
            Some(other) => return Err(format!("无效的缓存开关 {}: {}", ENV_CACHE, other)),
        };

        let log_level = match read(ENV_LOG) {
            Some(v) => LevelFilter::from_str(&v)
                .map_err(|_| format!("无效的日志级别 {}: {}", ENV_LOG, v))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            bind_addr,
            database_url: read(ENV_DATABASE_URL),
            starting_credits,
            cache_enabled,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.starting_credits, 1000);
        assert!(config.cache_enabled);
        assert!(config.database_url.is_none());
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_STARTING_CREDITS, "1500"),
            (ENV_CACHE, "off"),
            (ENV_LOG, "debug"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.starting_credits, 1500);
        assert!(!config.cache_enabled);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[(ENV_STARTING_CREDITS, "-5")]).is_err());
        assert!(config_from(&[(ENV_CACHE, "maybe")]).is_err());
        assert!(config_from(&[(ENV_BIND_ADDR, "nowhere")]).is_err());
    }
}
