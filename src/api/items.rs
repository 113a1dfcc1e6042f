//! 装备购买与载具路由

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, patch, post};
use axum::{Json, Router};

use crate::api::AppState;
use crate::auth::{CurrentUser, ensure_gang_access};
use crate::database::dto::{AddEffectData, BuyEquipmentData, UpdateVehicleData};
use crate::database::repository::effects_repository::EffectWithModifiers;
use crate::database::repository::fighter_equipment_repository::{
    FighterEquipmentRepository, PurchaseResult, RemovedEquipment,
};
use crate::database::repository::vehicles_repository::VehiclesRepository;
use crate::entity::vehicles;
use crate::error::AppResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/fighter-equipment", post(buy_equipment))
        .route("/api/fighter-equipment/{id}", delete(delete_equipment))
        .route(
            "/api/vehicles/{id}",
            patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/vehicles/{id}/effects", post(add_vehicle_effect))
}

async fn buy_equipment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(data): Json<BuyEquipmentData>,
) -> AppResult<(StatusCode, Json<PurchaseResult>)> {
    let gang_id = data.gang_id;
    ensure_gang_access(&state.db, &user, gang_id).await?;
    let result = FighterEquipmentRepository::purchase(&state.db, data).await?;
    state.invalidate_gang(gang_id);
    Ok((StatusCode::CREATED, Json(result)))
}

async fn delete_equipment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RemovedEquipment>> {
    let owned = FighterEquipmentRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, owned.gang_id).await?;
    let removed = FighterEquipmentRepository::delete(&state.db, id).await?;
    state.invalidate_gang(removed.gang_id);
    Ok(Json(removed))
}

async fn update_vehicle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateVehicleData>,
) -> AppResult<Json<vehicles::Model>> {
    let vehicle = VehiclesRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, vehicle.gang_id).await?;
    let updated = VehiclesRepository::update(&state.db, id, data).await?;
    state.invalidate_gang(updated.gang_id);
    Ok(Json(updated))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let vehicle = VehiclesRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, vehicle.gang_id).await?;
    let gang_id = VehiclesRepository::delete(&state.db, id).await?;
    state.invalidate_gang(gang_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_vehicle_effect(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddEffectData>,
) -> AppResult<(StatusCode, Json<EffectWithModifiers>)> {
    let vehicle = VehiclesRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, vehicle.gang_id).await?;
    let effect = VehiclesRepository::add_effect(&state.db, id, data).await?;
    state.invalidate_gang(vehicle.gang_id);
    Ok((StatusCode::CREATED, Json(effect)))
}
