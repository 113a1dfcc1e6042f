#![allow(dead_code)]

use gang_manager_lib::api::{AppState, build_router};
use gang_manager_lib::config::AppConfig;
use gang_manager_lib::database::connection::connect;
use gang_manager_lib::database::dto::{
    CreateGangData, CreateProfileData, EquipmentInput, FighterTypeInput, GangTypeInput,
    HireFighterData,
};
use gang_manager_lib::database::repository::catalog_repository::CatalogRepository;
use gang_manager_lib::database::repository::fighters_repository::FightersRepository;
use gang_manager_lib::database::repository::gangs_repository::GangsRepository;
use gang_manager_lib::database::repository::profiles_repository::ProfilesRepository;
use gang_manager_lib::database::repository::rating_repository::RatingRepository;
use gang_manager_lib::database::stats::StatBlock;
use gang_manager_lib::entity::{fighters, gangs, profiles};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

pub const STARTING_CREDITS: i32 = 1000;

/// 应用全部迁移的内存数据库
pub async fn setup_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: Some("sqlite::memory:".to_string()),
        starting_credits: STARTING_CREDITS,
        ..AppConfig::default()
    }
}

pub fn test_router(db: &DatabaseConnection) -> axum::Router {
    build_router(AppState::new(db.clone(), test_config()))
}

pub async fn create_user(db: &DatabaseConnection, username: &str, admin: bool) -> profiles::Model {
    ProfilesRepository::create(
        db,
        CreateProfileData {
            username: username.to_string(),
            user_role: Some(if admin { "admin" } else { "user" }.to_string()),
        },
    )
    .await
    .unwrap()
}

pub async fn create_gang_type(db: &DatabaseConnection, name: &str) -> i32 {
    CatalogRepository::create_gang_type(
        db,
        GangTypeInput {
            gang_type: name.to_string(),
            alignment: "Law Abiding".to_string(),
            is_hidden: false,
        },
    )
    .await
    .unwrap()
    .id
}

pub fn stats() -> StatBlock {
    StatBlock {
        movement: 5,
        weapon_skill: 4,
        ballistic_skill: 4,
        strength: 3,
        toughness: 3,
        wounds: 1,
        initiative: 4,
        attacks: 1,
        leadership: 7,
        cool: 7,
        willpower: 7,
        intelligence: 7,
    }
}

pub async fn create_fighter_type(
    db: &DatabaseConnection,
    gang_type_id: Option<i32>,
    name: &str,
    cost: i32,
    default_equipment_ids: Vec<i32>,
) -> i32 {
    CatalogRepository::create_fighter_type(
        db,
        FighterTypeInput {
            fighter_type: name.to_string(),
            gang_type_id,
            fighter_class: "Ganger".to_string(),
            cost,
            stats: stats(),
            special_rules: vec![],
            is_hidden: false,
            default_equipment_ids,
        },
    )
    .await
    .unwrap()
    .fighter_type
    .id
}

pub fn equipment_input(name: &str, equipment_type: &str, cost: i32) -> EquipmentInput {
    EquipmentInput {
        equipment_name: name.to_string(),
        equipment_category: "Basic Weapons".to_string(),
        equipment_type: equipment_type.to_string(),
        cost,
        availability: Some("C".to_string()),
        faction: None,
        core_equipment: false,
        weapon_profiles: vec![],
        vehicle_profile: None,
        discounts: vec![],
        availabilities: vec![],
        beast_fighter_type_ids: vec![],
    }
}

pub async fn create_equipment(
    db: &DatabaseConnection,
    name: &str,
    equipment_type: &str,
    cost: i32,
) -> i32 {
    CatalogRepository::create_equipment(db, equipment_input(name, equipment_type, cost))
        .await
        .unwrap()
        .equipment
        .id
}

/// 一个用户、一个帮派类型、一个战士类型、一个帮派
pub struct World {
    pub user: profiles::Model,
    pub gang_type_id: i32,
    pub fighter_type_id: i32,
    pub gang: gangs::Model,
}

pub async fn seed_world(db: &DatabaseConnection) -> World {
    let user = create_user(db, "ash", false).await;
    let gang_type_id = create_gang_type(db, "House Escher").await;
    let fighter_type_id = create_fighter_type(db, Some(gang_type_id), "Wyld Runner", 65, vec![]).await;
    let gang = GangsRepository::create(
        db,
        user.id,
        CreateGangData {
            name: "Ash Wastes Crew".to_string(),
            gang_type_id,
            credits: None,
            alignment: None,
            gang_lineage_id: None,
        },
        STARTING_CREDITS,
    )
    .await
    .unwrap();

    World {
        user,
        gang_type_id,
        fighter_type_id,
        gang,
    }
}

pub async fn hire(db: &DatabaseConnection, world: &World, name: &str) -> fighters::Model {
    FightersRepository::hire(
        db,
        world.gang.id,
        HireFighterData {
            fighter_type_id: world.fighter_type_id,
            fighter_name: name.to_string(),
            cost: None,
        },
    )
    .await
    .unwrap()
    .fighter
}

pub async fn gang(db: &DatabaseConnection, gang_id: i32) -> gangs::Model {
    GangsRepository::get(db, gang_id).await.unwrap()
}

/// 缓存评分必须与重新计算的结果一致
pub async fn assert_rating_consistent(db: &DatabaseConnection, gang_id: i32) {
    let stored = gang(db, gang_id).await.rating;
    let computed = RatingRepository::compute_gang_rating(db, gang_id)
        .await
        .unwrap();
    assert_eq!(stored, computed, "cached rating drifted from recomputed rating");
}
