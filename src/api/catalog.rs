//! 参考数据只读路由（所有登录用户）

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::AppState;
use crate::auth::CurrentUser;
use crate::database::repository::campaign_types_repository::{
    CampaignTypeDetails, CampaignTypesRepository,
};
use crate::database::repository::catalog_repository::{
    CatalogRepository, EffectTypeDetails, EquipmentDetails, EquipmentFilter, FighterTypeDetails,
};
use crate::database::repository::lineages_repository::LineagesRepository;
use crate::entity::{
    campaign_types, equipment, fighter_types, gang_lineages, gang_types, vehicle_types,
};
use crate::error::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct GangTypeQuery {
    pub gang_type_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EffectTypeQuery {
    pub category: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/gang-types", get(list_gang_types))
        .route("/api/fighter-types", get(list_fighter_types))
        .route("/api/fighter-types/{id}", get(fighter_type_details))
        .route("/api/equipment", get(list_equipment))
        .route("/api/equipment/{id}", get(equipment_details))
        .route("/api/vehicle-types", get(list_vehicle_types))
        .route("/api/campaign-types", get(list_campaign_types))
        .route("/api/campaign-types/{id}", get(campaign_type_details))
        .route("/api/gang-lineages", get(list_lineages))
        .route("/api/gang-lineages/{id}", get(lineage))
        .route("/api/effect-types", get(list_effect_types))
}

async fn list_gang_types(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<gang_types::Model>>> {
    Ok(Json(CatalogRepository::list_gang_types(&state.db, false).await?))
}

async fn list_fighter_types(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<GangTypeQuery>,
) -> AppResult<Json<Vec<fighter_types::Model>>> {
    let types = CatalogRepository::list_fighter_types(&state.db, query.gang_type_id, false).await?;
    Ok(Json(types))
}

async fn fighter_type_details(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<FighterTypeDetails>> {
    Ok(Json(CatalogRepository::fighter_type_details(&state.db, id).await?))
}

async fn list_equipment(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(filter): Query<EquipmentFilter>,
) -> AppResult<Json<Vec<equipment::Model>>> {
    Ok(Json(CatalogRepository::list_equipment(&state.db, filter).await?))
}

async fn equipment_details(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetails>> {
    Ok(Json(CatalogRepository::equipment_details(&state.db, id).await?))
}

async fn list_vehicle_types(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<GangTypeQuery>,
) -> AppResult<Json<Vec<vehicle_types::Model>>> {
    Ok(Json(
        CatalogRepository::list_vehicle_types(&state.db, query.gang_type_id).await?,
    ))
}

async fn list_campaign_types(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<campaign_types::Model>>> {
    Ok(Json(CampaignTypesRepository::list(&state.db).await?))
}

async fn campaign_type_details(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CampaignTypeDetails>> {
    Ok(Json(CampaignTypesRepository::details(&state.db, id).await?))
}

async fn list_lineages(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> AppResult<Json<Vec<gang_lineages::Model>>> {
    Ok(Json(LineagesRepository::list(&state.db).await?))
}

async fn lineage(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<gang_lineages::Model>> {
    Ok(Json(LineagesRepository::get(&state.db, id).await?))
}

async fn list_effect_types(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(query): Query<EffectTypeQuery>,
) -> AppResult<Json<Vec<EffectTypeDetails>>> {
    Ok(Json(
        CatalogRepository::list_effect_types(&state.db, query.category).await?,
    ))
}
