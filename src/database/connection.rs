use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::time::Duration;

use crate::config::AppConfig;

/// 解析数据库连接字符串
///
/// 配置中提供了 URL 时直接使用，否则使用 gang-path 解析的默认 SQLite 文件，
/// 并确保其所在目录存在。
pub fn resolve_database_url(config: &AppConfig) -> Result<String, DbErr> {
    if let Some(url) = &config.database_url {
        return Ok(url.clone());
    }

    let location = gang_path::locate_db().map_err(internal)?;
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| internal(format!("无法创建数据库目录: {}", e)))?;
    }
    log::info!(
        "使用{}模式数据库: {}",
        location.mode,
        location.path.display()
    );

    location.sqlite_url().map_err(internal)
}

fn internal(msg: String) -> DbErr {
    DbErr::Conn(RuntimeErr::Internal(msg))
}

/// Establish a SeaORM database connection.
pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let connection_string = resolve_database_url(config)?;
    connect(&connection_string).await
}

/// 按连接字符串建立连接
///
/// SQLite 只允许单写者，连接池大小为 1 即可；内存数据库也依赖这一点保持同一份数据。
pub async fn connect(connection_string: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(connection_string.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    log::debug!("Database connection string: {}", options.get_url());

    Database::connect(options).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}
