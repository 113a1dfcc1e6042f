//! HTTP 路由
//!
//! 所有接口位于 `/api` 之下，请求与响应均为 JSON。
//! 写操作完成后使受影响帮派的详情缓存失效。

pub mod admin;
pub mod campaigns;
pub mod catalog;
pub mod fighters;
pub mod gangs;
pub mod items;

use std::sync::Arc;

use axum::http::{HeaderName, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{CurrentUser, USER_HEADER};
use crate::cache::{TagCache, gang_tag};
use crate::config::AppConfig;
use crate::database::repository::details_repository::GangDetails;
use crate::entity::profiles;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: Arc<TagCache<GangDetails>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            cache: Arc::new(TagCache::new(config.cache_enabled)),
            config: Arc::new(config),
        }
    }

    /// 使帮派详情缓存失效
    pub fn invalidate_gang(&self, gang_id: i32) {
        self.cache.invalidate_tag(&gang_tag(gang_id));
    }

    pub fn invalidate_gangs(&self, gang_ids: &[i32]) {
        for gang_id in gang_ids {
            self.invalidate_gang(*gang_id);
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/me", get(me))
        .merge(gangs::router())
        .merge(fighters::router())
        .merge(items::router())
        .merge(campaigns::router())
        .merge(catalog::router())
        .merge(admin::router())
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_HEADER)])
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<profiles::Model> {
    Json(user)
}
