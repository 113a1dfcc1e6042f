//! 战役路由
//!
//! 查看需要成员身份；成员、领地、战斗的管理需要 OWNER 或 ARBITRATOR；
//! 删除战役只允许 OWNER。管理员不受限制。

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};

use crate::api::AppState;
use crate::auth::{
    CurrentUser, ensure_campaign_manager, ensure_campaign_member, ensure_campaign_owner,
};
use crate::database::dto::{
    AddCampaignGangData, AddMemberData, AddTerritoryData, AssignTerritoryData,
    CreateCampaignData, RecordBattleData, UpdateCampaignData,
};
use crate::database::repository::campaigns_repository::{CampaignDetails, CampaignsRepository};
use crate::database::repository::gangs_repository::GangsRepository;
use crate::entity::{
    campaign_battles, campaign_gangs, campaign_members, campaign_territories, campaigns,
};
use crate::error::AppResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/campaigns", get(list_campaigns).post(create_campaign))
        .route(
            "/api/campaigns/{id}",
            get(campaign_details)
                .patch(update_campaign)
                .delete(delete_campaign),
        )
        .route("/api/campaigns/{id}/members", post(add_member))
        .route(
            "/api/campaigns/{id}/members/{user_id}",
            delete(remove_member),
        )
        .route("/api/campaigns/{id}/gangs", post(add_gang))
        .route("/api/campaigns/{id}/gangs/{gang_id}", delete(remove_gang))
        .route("/api/campaigns/{id}/territories", post(add_territory))
        .route(
            "/api/campaign-territories/{id}",
            patch(assign_territory).delete(remove_territory),
        )
        .route("/api/campaigns/{id}/battles", post(record_battle))
        .route("/api/campaign-battles/{id}", delete(delete_battle))
}

async fn list_campaigns(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<campaigns::Model>>> {
    Ok(Json(
        CampaignsRepository::list_for_user(&state.db, user.id).await?,
    ))
}

async fn create_campaign(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(data): Json<CreateCampaignData>,
) -> AppResult<(StatusCode, Json<campaigns::Model>)> {
    let campaign = CampaignsRepository::create(&state.db, user.id, data).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

async fn campaign_details(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CampaignDetails>> {
    ensure_campaign_member(&state.db, &user, id).await?;
    Ok(Json(CampaignsRepository::details(&state.db, id).await?))
}

async fn update_campaign(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCampaignData>,
) -> AppResult<Json<campaigns::Model>> {
    ensure_campaign_manager(&state.db, &user, id).await?;
    let campaign = CampaignsRepository::update(&state.db, id, data).await?;
    let gang_ids = CampaignsRepository::gang_ids(&state.db, id).await?;
    state.invalidate_gangs(&gang_ids);
    Ok(Json(campaign))
}

async fn delete_campaign(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_campaign_owner(&state.db, &user, id).await?;
    let gang_ids = CampaignsRepository::gang_ids(&state.db, id).await?;
    CampaignsRepository::delete(&state.db, id).await?;
    state.invalidate_gangs(&gang_ids);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_member(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddMemberData>,
) -> AppResult<(StatusCode, Json<campaign_members::Model>)> {
    ensure_campaign_manager(&state.db, &user, id).await?;
    let member = CampaignsRepository::add_member(&state.db, id, data).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// 管理者可以移除任何非 OWNER 成员，成员也可以自行退出
async fn remove_member(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, user_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    if user_id == user.id {
        ensure_campaign_member(&state.db, &user, id).await?;
    } else {
        ensure_campaign_manager(&state.db, &user, id).await?;
    }
    let gang_ids = CampaignsRepository::remove_member(&state.db, id, user_id).await?;
    state.invalidate_gangs(&gang_ids);
    Ok(StatusCode::NO_CONTENT)
}

/// 成员可以加入自己的帮派，管理者可以加入任意成员的帮派
async fn add_gang(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddCampaignGangData>,
) -> AppResult<(StatusCode, Json<campaign_gangs::Model>)> {
    ensure_campaign_member(&state.db, &user, id).await?;
    let gang = GangsRepository::get(&state.db, data.gang_id).await?;
    if gang.user_id != user.id {
        ensure_campaign_manager(&state.db, &user, id).await?;
    }
    let link = CampaignsRepository::add_gang(&state.db, id, data).await?;
    state.invalidate_gang(link.gang_id);
    Ok((StatusCode::CREATED, Json(link)))
}

async fn remove_gang(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, gang_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    ensure_campaign_member(&state.db, &user, id).await?;
    let gang = GangsRepository::get(&state.db, gang_id).await?;
    if gang.user_id != user.id {
        ensure_campaign_manager(&state.db, &user, id).await?;
    }
    CampaignsRepository::remove_gang(&state.db, id, gang_id).await?;
    state.invalidate_gang(gang_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_territory(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AddTerritoryData>,
) -> AppResult<(StatusCode, Json<campaign_territories::Model>)> {
    ensure_campaign_manager(&state.db, &user, id).await?;
    let territory = CampaignsRepository::add_territory(&state.db, id, data).await?;
    Ok((StatusCode::CREATED, Json(territory)))
}

async fn assign_territory(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<AssignTerritoryData>,
) -> AppResult<Json<campaign_territories::Model>> {
    let territory = CampaignsRepository::get_territory(&state.db, id).await?;
    ensure_campaign_manager(&state.db, &user, territory.campaign_id).await?;
    let updated = CampaignsRepository::assign_territory(&state.db, id, data).await?;
    Ok(Json(updated))
}

async fn remove_territory(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let territory = CampaignsRepository::get_territory(&state.db, id).await?;
    ensure_campaign_manager(&state.db, &user, territory.campaign_id).await?;
    CampaignsRepository::remove_territory(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn record_battle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(data): Json<RecordBattleData>,
) -> AppResult<(StatusCode, Json<campaign_battles::Model>)> {
    ensure_campaign_manager(&state.db, &user, id).await?;
    let battle = CampaignsRepository::record_battle(&state.db, id, data).await?;
    Ok((StatusCode::CREATED, Json(battle)))
}

async fn delete_battle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let battle = CampaignsRepository::get_battle(&state.db, id).await?;
    ensure_campaign_manager(&state.db, &user, battle.campaign_id).await?;
    CampaignsRepository::delete_battle(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
