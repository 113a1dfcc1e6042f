//! 战士、技能与效果路由

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};

use crate::api::AppState;
use crate::auth::{CurrentUser, ensure_gang_access};
use crate::database::dto::{AddEffectData, AddSkillData, UpdateFighterData};
use crate::database::repository::effects_repository::{
    EffectWithModifiers, EffectsRepository, RemovedEffect,
};
use crate::database::repository::fighters_repository::{FightersRepository, RemovedFighters};
use crate::entity::{fighter_skills, fighters};
use crate::error::AppResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/fighters/{id}",
            patch(update_fighter).delete(delete_fighter),
        )
        .route(
            "/api/fighters/{id}/skills",
            get(list_skills).post(add_skill),
        )
        .route("/api/fighters/{id}/effects", post(add_effect))
        .route("/api/skills/{id}", delete(remove_skill))
        .route("/api/effects/{id}", delete(remove_effect))
}

async fn update_fighter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateFighterData>,
) -> AppResult<Json<fighters::Model>> {
    let fighter = FightersRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, fighter.gang_id).await?;
    let updated = FightersRepository::update(&state.db, id, data).await?;
    state.invalidate_gang(updated.gang_id);
    Ok(Json(updated))
}

async fn delete_fighter(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RemovedFighters>> {
    let fighter = FightersRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, fighter.gang_id).await?;
    let removed = FightersRepository::delete(&state.db, id).await?;
    state.invalidate_gang(removed.gang_id);
    Ok(Json(removed))
}

async fn list_skills(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<fighter_skills::Model>>> {
    FightersRepository::get(&state.db, id).await?;
    Ok(Json(FightersRepository::list_skills(&state.db, id).await?))
}

async fn add_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddSkillData>,
) -> AppResult<(StatusCode, Json<fighter_skills::Model>)> {
    let fighter = FightersRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, fighter.gang_id).await?;
    let skill = FightersRepository::add_skill(&state.db, id, data).await?;
    state.invalidate_gang(fighter.gang_id);
    Ok((StatusCode::CREATED, Json(skill)))
}

async fn remove_skill(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let fighter = FightersRepository::skill_owner(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, fighter.gang_id).await?;
    let gang_id = FightersRepository::remove_skill(&state.db, id).await?;
    state.invalidate_gang(gang_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_effect(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddEffectData>,
) -> AppResult<(StatusCode, Json<EffectWithModifiers>)> {
    let fighter = FightersRepository::get(&state.db, id).await?;
    ensure_gang_access(&state.db, &user, fighter.gang_id).await?;
    let effect = FightersRepository::add_effect(&state.db, id, data).await?;
    state.invalidate_gang(fighter.gang_id);
    Ok((StatusCode::CREATED, Json(effect)))
}

async fn remove_effect(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RemovedEffect>> {
    let effect = EffectsRepository::get(&state.db, id).await?;
    let gang_id = EffectsRepository::gang_id_of(&state.db, &effect).await?;
    ensure_gang_access(&state.db, &user, gang_id).await?;
    let removed = EffectsRepository::remove(&state.db, id).await?;
    state.invalidate_gang(removed.gang_id);
    Ok(Json(removed))
}
