pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod utils;

use std::error::Error;

use database::connection;
use migration::MigratorTrait;

use crate::api::{AppState, build_router};
use crate::config::AppConfig;

/// 启动 HTTP 服务，直到收到 Ctrl-C
pub async fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    utils::logs::init_logger(config.log_level);

    let conn = connection::establish_connection(&config).await?;
    log::info!("数据库连接建立成功");

    // 执行数据库迁移
    log::info!("开始执行数据库迁移...");
    migration::Migrator::up(&conn, None).await?;
    log::info!("数据库迁移完成");

    let bind_addr = config.bind_addr;
    let state = AppState::new(conn.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("服务监听于 {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 确保数据库连接在退出前完全关闭
    match connection::close_connection(conn).await {
        Ok(_) => log::info!("数据库连接已成功关闭"),
        Err(e) => log::error!("关闭数据库连接时出错: {}", e),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("收到退出信号，正在关闭服务");
}
