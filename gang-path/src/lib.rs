//! 数据文件位置解析
//!
//! 数据库文件按以下顺序定位：`GANG_DATA_DIR` 环境变量、
//! 可执行文件旁的 `data/gang_manager.db`（便携模式）、系统应用数据目录。

use std::fmt;
use std::path::{Path, PathBuf};

pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "gang_manager.db";

/// 覆盖数据目录的环境变量
pub const DATA_DIR_ENV: &str = "GANG_DATA_DIR";

/// 数据目录的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Env,
    Portable,
    System,
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataMode::Env => "环境变量",
            DataMode::Portable => "便携",
            DataMode::System => "标准",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct DbLocation {
    pub mode: DataMode,
    pub path: PathBuf,
}

impl DbLocation {
    fn under(mode: DataMode, base: &Path) -> Self {
        Self {
            mode,
            path: base.join(DB_DATA_DIR).join(DB_FILE_NAME),
        }
    }

    /// 转换为 sqlite 连接 URL，文件不存在时自动创建
    pub fn sqlite_url(&self) -> Result<String, String> {
        path_to_sqlite_url(&self.path)
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// 可执行文件旁已有数据库文件时为便携模式
pub fn portable_base() -> Option<PathBuf> {
    exe_dir().filter(|dir| dir.join(DB_DATA_DIR).join(DB_FILE_NAME).is_file())
}

fn system_base() -> Result<PathBuf, String> {
    directories::ProjectDirs::from("dev", "gangmanager", "gang-manager")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| "无法获取系统目录信息".to_string())
}

/// 按优先级解析数据库文件位置
pub fn locate_db() -> Result<DbLocation, String> {
    let from_env = std::env::var(DATA_DIR_ENV)
        .ok()
        .map(|dir| dir.trim().to_string())
        .filter(|dir| !dir.is_empty());
    if let Some(dir) = from_env {
        return Ok(DbLocation::under(DataMode::Env, Path::new(&dir)));
    }
    if let Some(base) = portable_base() {
        return Ok(DbLocation::under(DataMode::Portable, &base));
    }
    Ok(DbLocation::under(DataMode::System, &system_base()?))
}

pub fn path_to_sqlite_url(path: &Path) -> Result<String, String> {
    let file_url = url::Url::from_file_path(path)
        .map_err(|_| format!("数据库路径无效: {}", path.display()))?;
    Ok(format!("sqlite:{}?mode=rwc", file_url.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_uses_rwc_mode() {
        let path = std::env::temp_dir().join(DB_FILE_NAME);
        let url = path_to_sqlite_url(&path).unwrap();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("gang_manager.db?mode=rwc"));
    }

    #[test]
    fn relative_path_is_rejected() {
        assert!(path_to_sqlite_url(Path::new("relative/gang.db")).is_err());
    }

    #[test]
    fn location_nests_the_data_dir() {
        let base = std::env::temp_dir();
        let location = DbLocation::under(DataMode::Env, &base);
        assert_eq!(location.path, base.join("data").join("gang_manager.db"));
        assert_eq!(location.mode.to_string(), "环境变量");
    }
}
