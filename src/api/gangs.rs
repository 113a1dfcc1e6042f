//! 帮派路由

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::AppState;
use crate::auth::{CurrentUser, ensure_gang_access};
use crate::database::dto::{
    BuyVehicleData, CreateGangData, GangCreditsData, HireFighterData, UpdateGangData,
};
use crate::database::repository::details_repository::{DetailsRepository, GangDetails};
use crate::database::repository::fighter_equipment_repository::FighterEquipmentRepository;
use crate::database::repository::fighters_repository::{FightersRepository, HireResult};
use crate::database::repository::gangs_repository::{
    GangBalance, GangsRepository, RatingRecalculation,
};
use crate::database::repository::vehicles_repository::{VehiclePurchase, VehiclesRepository};
use crate::entity::{fighter_equipment, gangs};
use crate::error::AppResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/gangs", get(list_gangs).post(create_gang))
        .route(
            "/api/gangs/{id}",
            get(gang_details).patch(update_gang).delete(delete_gang),
        )
        .route("/api/gangs/{id}/credits", post(change_credits))
        .route("/api/gangs/{id}/rating/recalculate", post(recalculate_rating))
        .route("/api/gangs/{id}/fighters", post(hire_fighter))
        .route("/api/gangs/{id}/vehicles", post(buy_vehicle))
        .route("/api/gangs/{id}/stash", get(list_stash))
}

async fn list_gangs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<gangs::Model>>> {
    Ok(Json(GangsRepository::list_by_user(&state.db, user.id).await?))
}

async fn create_gang(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(data): Json<CreateGangData>,
) -> AppResult<(StatusCode, Json<gangs::Model>)> {
    let gang =
        GangsRepository::create(&state.db, user.id, data, state.config.starting_credits).await?;
    Ok((StatusCode::CREATED, Json(gang)))
}

/// 帮派详情对所有登录用户可见（战役对手需要查看）
async fn gang_details(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<GangDetails>> {
    let details = DetailsRepository::gang_details_cached(&state.db, &state.cache, id).await?;
    Ok(Json(details))
}

async fn update_gang(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateGangData>,
) -> AppResult<Json<gangs::Model>> {
    ensure_gang_access(&state.db, &user, id).await?;
    let gang = GangsRepository::update(&state.db, id, data).await?;
    state.invalidate_gang(id);
    Ok(Json(gang))
}

async fn delete_gang(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_gang_access(&state.db, &user, id).await?;
    GangsRepository::delete(&state.db, id).await?;
    state.invalidate_gang(id);
    Ok(StatusCode::NO_CONTENT)
}

async fn change_credits(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<GangCreditsData>,
) -> AppResult<Json<GangBalance>> {
    ensure_gang_access(&state.db, &user, id).await?;
    let balance = GangsRepository::apply_credits_operation(&state.db, id, data).await?;
    state.invalidate_gang(id);
    Ok(Json(balance))
}

async fn recalculate_rating(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RatingRecalculation>> {
    ensure_gang_access(&state.db, &user, id).await?;
    let result = GangsRepository::recalculate_rating(&state.db, id).await?;
    state.invalidate_gang(id);
    Ok(Json(result))
}

async fn hire_fighter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<HireFighterData>,
) -> AppResult<(StatusCode, Json<HireResult>)> {
    ensure_gang_access(&state.db, &user, id).await?;
    let result = FightersRepository::hire(&state.db, id, data).await?;
    state.invalidate_gang(id);
    Ok((StatusCode::CREATED, Json(result)))
}

async fn buy_vehicle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<BuyVehicleData>,
) -> AppResult<(StatusCode, Json<VehiclePurchase>)> {
    ensure_gang_access(&state.db, &user, id).await?;
    let result = VehiclesRepository::buy(&state.db, id, data).await?;
    state.invalidate_gang(id);
    Ok((StatusCode::CREATED, Json(result)))
}

async fn list_stash(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<fighter_equipment::Model>>> {
    GangsRepository::get(&state.db, id).await?;
    Ok(Json(FighterEquipmentRepository::list_stash(&state.db, id).await?))
}
