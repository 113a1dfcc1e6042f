//! 管理后台路由
//!
//! 参考数据的写操作会影响所有帮派详情中的名称与属性，完成后清空整个缓存。

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::AppState;
use crate::auth::AdminUser;
use crate::database::dto::{
    CampaignTypeInput, CreateProfileData, EffectTypeInput, EquipmentInput, FighterTypeInput,
    GangLineageInput, GangTypeInput, VehicleTypeInput,
};
use crate::database::repository::campaign_types_repository::{
    CampaignTypeDetails, CampaignTypesRepository,
};
use crate::database::repository::catalog_repository::{
    CatalogRepository, EffectTypeDetails, EquipmentDetails, FighterTypeDetails,
};
use crate::database::repository::lineages_repository::LineagesRepository;
use crate::database::repository::profiles_repository::ProfilesRepository;
use crate::entity::{fighter_types, gang_lineages, gang_types, profiles, vehicle_types};
use crate::error::AppResult;
use crate::utils::logs::{LogLevel, get_log_level, set_log_level};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/equipment", post(create_equipment))
        .route(
            "/api/admin/equipment/{id}",
            put(replace_equipment).delete(delete_equipment),
        )
        .route(
            "/api/admin/fighter-types",
            get(list_fighter_types).post(create_fighter_type),
        )
        .route(
            "/api/admin/fighter-types/{id}",
            put(update_fighter_type).delete(delete_fighter_type),
        )
        .route("/api/admin/vehicle-types", post(create_vehicle_type))
        .route(
            "/api/admin/vehicle-types/{id}",
            put(update_vehicle_type).delete(delete_vehicle_type),
        )
        .route("/api/admin/campaign-types", post(create_campaign_type))
        .route(
            "/api/admin/campaign-types/{id}",
            put(update_campaign_type).delete(delete_campaign_type),
        )
        .route("/api/admin/gang-lineages", post(create_lineage))
        .route(
            "/api/admin/gang-lineages/{id}",
            put(update_lineage).delete(delete_lineage),
        )
        .route(
            "/api/admin/gang-types",
            get(list_gang_types).post(create_gang_type),
        )
        .route(
            "/api/admin/gang-types/{id}",
            put(update_gang_type).delete(delete_gang_type),
        )
        .route("/api/admin/effect-types", post(create_effect_type))
        .route(
            "/api/admin/effect-types/{id}",
            put(update_effect_type).delete(delete_effect_type),
        )
        .route("/api/admin/profiles", get(list_profiles).post(create_profile))
        .route("/api/admin/log-level", get(log_level).put(change_log_level))
}

// ==================== 装备 ====================

async fn create_equipment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<EquipmentInput>,
) -> AppResult<(StatusCode, Json<EquipmentDetails>)> {
    let details = CatalogRepository::create_equipment(&state.db, input).await?;
    state.cache.clear();
    Ok((StatusCode::CREATED, Json(details)))
}

async fn replace_equipment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<EquipmentInput>,
) -> AppResult<Json<EquipmentDetails>> {
    let details = CatalogRepository::replace_equipment(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(details))
}

async fn delete_equipment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogRepository::delete_equipment(&state.db, id).await?;
    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 战士类型 ====================

/// 包含隐藏类型
async fn list_fighter_types(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<fighter_types::Model>>> {
    Ok(Json(
        CatalogRepository::list_fighter_types(&state.db, None, true).await?,
    ))
}

async fn create_fighter_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<FighterTypeInput>,
) -> AppResult<(StatusCode, Json<FighterTypeDetails>)> {
    let details = CatalogRepository::create_fighter_type(&state.db, input).await?;
    state.cache.clear();
    Ok((StatusCode::CREATED, Json(details)))
}

async fn update_fighter_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<FighterTypeInput>,
) -> AppResult<Json<FighterTypeDetails>> {
    let details = CatalogRepository::update_fighter_type(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(details))
}

async fn delete_fighter_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogRepository::delete_fighter_type(&state.db, id).await?;
    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 载具类型 ====================

async fn create_vehicle_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<VehicleTypeInput>,
) -> AppResult<(StatusCode, Json<vehicle_types::Model>)> {
    let created = CatalogRepository::create_vehicle_type(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_vehicle_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<VehicleTypeInput>,
) -> AppResult<Json<vehicle_types::Model>> {
    let updated = CatalogRepository::update_vehicle_type(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(updated))
}

async fn delete_vehicle_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogRepository::delete_vehicle_type(&state.db, id).await?;
    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 战役类型 ====================

async fn create_campaign_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<CampaignTypeInput>,
) -> AppResult<(StatusCode, Json<CampaignTypeDetails>)> {
    let details = CampaignTypesRepository::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

async fn update_campaign_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<CampaignTypeInput>,
) -> AppResult<Json<CampaignTypeDetails>> {
    Ok(Json(
        CampaignTypesRepository::update(&state.db, id, input).await?,
    ))
}

async fn delete_campaign_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CampaignTypesRepository::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 帮派血统 ====================

async fn create_lineage(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<GangLineageInput>,
) -> AppResult<(StatusCode, Json<gang_lineages::Model>)> {
    let lineage = LineagesRepository::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(lineage)))
}

async fn update_lineage(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<GangLineageInput>,
) -> AppResult<Json<gang_lineages::Model>> {
    let lineage = LineagesRepository::update(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(lineage))
}

async fn delete_lineage(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<i32>>> {
    let gang_ids = LineagesRepository::delete(&state.db, id).await?;
    state.invalidate_gangs(&gang_ids);
    Ok(Json(gang_ids))
}

// ==================== 帮派类型 ====================

/// 包含隐藏类型
async fn list_gang_types(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<gang_types::Model>>> {
    Ok(Json(CatalogRepository::list_gang_types(&state.db, true).await?))
}

async fn create_gang_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<GangTypeInput>,
) -> AppResult<(StatusCode, Json<gang_types::Model>)> {
    let created = CatalogRepository::create_gang_type(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_gang_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<GangTypeInput>,
) -> AppResult<Json<gang_types::Model>> {
    let updated = CatalogRepository::update_gang_type(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(updated))
}

async fn delete_gang_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogRepository::delete_gang_type(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 效果类型 ====================

async fn create_effect_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(input): Json<EffectTypeInput>,
) -> AppResult<(StatusCode, Json<EffectTypeDetails>)> {
    let details = CatalogRepository::create_effect_type(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

async fn update_effect_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
    Json(input): Json<EffectTypeInput>,
) -> AppResult<Json<EffectTypeDetails>> {
    let details = CatalogRepository::update_effect_type(&state.db, id, input).await?;
    state.cache.clear();
    Ok(Json(details))
}

async fn delete_effect_type(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CatalogRepository::delete_effect_type(&state.db, id).await?;
    state.cache.clear();
    Ok(StatusCode::NO_CONTENT)
}

// ==================== 用户与日志 ====================

async fn list_profiles(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<profiles::Model>>> {
    Ok(Json(ProfilesRepository::list(&state.db).await?))
}

async fn create_profile(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(data): Json<CreateProfileData>,
) -> AppResult<(StatusCode, Json<profiles::Model>)> {
    let profile = ProfilesRepository::create(&state.db, data).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn log_level(AdminUser(_admin): AdminUser) -> Json<LogLevel> {
    Json(get_log_level())
}

async fn change_log_level(
    AdminUser(_admin): AdminUser,
    Json(level): Json<LogLevel>,
) -> Json<LogLevel> {
    set_log_level(level);
    Json(get_log_level())
}
