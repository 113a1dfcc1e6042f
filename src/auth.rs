//! 请求身份与权限检查
//!
//! 身份认证由上游代理完成，代理在 `x-user-id` 请求头中写入用户 ID。
//! 这里只负责把 ID 解析成用户资料，并提供帮派、战役相关的权限判断。

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sea_orm::DatabaseConnection;

use crate::api::AppState;
use crate::database::repository::campaigns_repository::CampaignsRepository;
use crate::database::repository::gangs_repository::GangsRepository;
use crate::database::repository::profiles_repository::ProfilesRepository;
use crate::entity::{campaign_members, campaigns, gangs, profiles};
use crate::error::{AppError, AppResult};

pub const USER_HEADER: &str = "x-user-id";

/// 当前登录用户
#[derive(Debug, Clone)]
pub struct CurrentUser(pub profiles::Model);

/// 管理员用户，非管理员返回 403
#[derive(Debug, Clone)]
pub struct AdminUser(pub profiles::Model);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i32>().ok())
            .ok_or(AppError::Unauthorized)?;

        let profile = ProfilesRepository::find_by_id(&state.db, user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(CurrentUser(profile))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let CurrentUser(profile) = CurrentUser::from_request_parts(parts, state).await?;
        if !profile.is_admin() {
            log::warn!("用户 {} 尝试访问管理接口", profile.id);
            return Err(AppError::forbidden("需要管理员权限"));
        }
        Ok(AdminUser(profile))
    }
}

/// 帮派写操作的权限：帮派拥有者或管理员
pub async fn ensure_gang_access(
    db: &DatabaseConnection,
    user: &profiles::Model,
    gang_id: i32,
) -> AppResult<gangs::Model> {
    let gang = GangsRepository::get(db, gang_id).await?;
    if gang.user_id != user.id && !user.is_admin() {
        return Err(AppError::forbidden("无权修改该帮派"));
    }
    Ok(gang)
}

/// 查询用户在战役中的角色；管理员视为拥有全部权限，返回 None
async fn campaign_role(
    db: &DatabaseConnection,
    user: &profiles::Model,
    campaign_id: i32,
) -> AppResult<(campaigns::Model, Option<campaign_members::Model>)> {
    let campaign = CampaignsRepository::get(db, campaign_id).await?;
    let membership = CampaignsRepository::membership(db, campaign_id, user.id).await?;
    Ok((campaign, membership))
}

/// 战役成员（或管理员）
pub async fn ensure_campaign_member(
    db: &DatabaseConnection,
    user: &profiles::Model,
    campaign_id: i32,
) -> AppResult<campaigns::Model> {
    let (campaign, membership) = campaign_role(db, user, campaign_id).await?;
    if membership.is_none() && !user.is_admin() {
        return Err(AppError::forbidden("不是该战役的成员"));
    }
    Ok(campaign)
}

/// 战役管理权限：OWNER、ARBITRATOR 或管理员
pub async fn ensure_campaign_manager(
    db: &DatabaseConnection,
    user: &profiles::Model,
    campaign_id: i32,
) -> AppResult<campaigns::Model> {
    let (campaign, membership) = campaign_role(db, user, campaign_id).await?;
    let allowed = user.is_admin() || membership.is_some_and(|m| m.can_manage());
    if !allowed {
        return Err(AppError::forbidden("需要战役创建者或裁判权限"));
    }
    Ok(campaign)
}

/// 战役创建者（或管理员）
pub async fn ensure_campaign_owner(
    db: &DatabaseConnection,
    user: &profiles::Model,
    campaign_id: i32,
) -> AppResult<campaigns::Model> {
    let (campaign, membership) = campaign_role(db, user, campaign_id).await?;
    let allowed = user.is_admin()
        || membership.is_some_and(|m| m.role == campaign_members::ROLE_OWNER);
    if !allowed {
        return Err(AppError::forbidden("只有战役创建者可以执行该操作"));
    }
    Ok(campaign)
}
