use crate::database::dto::CreateProfileData;
use crate::entity::prelude::*;
use crate::entity::profiles;
use crate::error::{AppError, AppResult};
use sea_orm::*;

/// 用户资料仓库
pub struct ProfilesRepository;

impl ProfilesRepository {
    pub async fn find_by_id<C>(conn: &C, id: i32) -> Result<Option<profiles::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Profiles::find_by_id(id).one(conn).await
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<profiles::Model>, DbErr> {
        Profiles::find()
            .order_by_asc(profiles::Column::Username)
            .all(db)
            .await
    }

    /// 创建用户资料，用户名唯一
    pub async fn create(
        db: &DatabaseConnection,
        data: CreateProfileData,
    ) -> AppResult<profiles::Model> {
        let username = data.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::bad_request("用户名不能为空"));
        }
        let role = data
            .user_role
            .unwrap_or_else(|| profiles::ROLE_USER.to_string());
        if role != profiles::ROLE_USER && role != profiles::ROLE_ADMIN {
            return Err(AppError::bad_request(format!("无效的用户角色: {}", role)));
        }

        let exists = Profiles::find()
            .filter(profiles::Column::Username.eq(username.as_str()))
            .count(db)
            .await?;
        if exists > 0 {
            return Err(AppError::bad_request(format!("用户名 {} 已存在", username)));
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let profile = profiles::ActiveModel {
            id: NotSet,
            username: Set(username),
            user_role: Set(role),
            created_at: Set(Some(now)),
        }
        .insert(db)
        .await?;

        log::info!("创建用户 {} ({})", profile.username, profile.id);
        Ok(profile)
    }
}
