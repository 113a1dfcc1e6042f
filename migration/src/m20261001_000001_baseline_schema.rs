//! 基线表结构
//!
//! 创建参考数据表（帮派类型、战士类型、装备、效果类型、载具类型）
//! 以及游戏数据表（帮派、战士、装备持有、效果、载具）。

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend, Statement, TransactionTrait};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 删除顺序与创建顺序相反，保证外键依赖先被移除
const TABLES: [&str; 20] = [
    "profiles",
    "gang_types",
    "fighter_types",
    "equipment",
    "fighter_defaults",
    "weapon_profiles",
    "vehicle_equipment_profiles",
    "equipment_discounts",
    "equipment_availability",
    "equipment_beasts",
    "fighter_effect_types",
    "fighter_effect_type_modifiers",
    "vehicle_types",
    "gangs",
    "fighters",
    "fighter_skills",
    "vehicles",
    "fighter_equipment",
    "fighter_effects",
    "fighter_effect_modifiers",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 开启事务，保证所有建表操作的原子性
        let txn = conn.begin().await?;

        create_reference_tables(&txn).await?;
        create_gang_tables(&txn).await?;
        create_indexes(&txn).await?;

        txn.commit().await?;

        log::info!("[MIGRATION] baseline schema created");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        // 子表先删
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "DROP TABLE IF EXISTS fighter_exotic_beasts",
        ))
        .await?;
        for table in TABLES.iter().rev() {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("DROP TABLE IF EXISTS \"{}\"", table),
            ))
            .await?;
        }
        Ok(())
    }
}

async fn exec<C>(conn: &C, sql: &str) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await?;
    Ok(())
}

/// 创建管理后台维护的参考数据表
async fn create_reference_tables<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    exec(
        conn,
        r#"CREATE TABLE "profiles" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "username" TEXT NOT NULL UNIQUE,
            "user_role" TEXT NOT NULL DEFAULT 'user',
            "created_at" INTEGER DEFAULT (strftime('%s', 'now'))
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "gang_types" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "gang_type" TEXT NOT NULL,
            "alignment" TEXT NOT NULL DEFAULT 'Law Abiding',
            "is_hidden" BOOLEAN NOT NULL DEFAULT 0
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_types" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_type" TEXT NOT NULL,
            "gang_type_id" INTEGER,
            "fighter_class" TEXT NOT NULL,
            "cost" INTEGER NOT NULL DEFAULT 0,
            "movement" INTEGER NOT NULL DEFAULT 0,
            "weapon_skill" INTEGER NOT NULL DEFAULT 0,
            "ballistic_skill" INTEGER NOT NULL DEFAULT 0,
            "strength" INTEGER NOT NULL DEFAULT 0,
            "toughness" INTEGER NOT NULL DEFAULT 0,
            "wounds" INTEGER NOT NULL DEFAULT 0,
            "initiative" INTEGER NOT NULL DEFAULT 0,
            "attacks" INTEGER NOT NULL DEFAULT 0,
            "leadership" INTEGER NOT NULL DEFAULT 0,
            "cool" INTEGER NOT NULL DEFAULT 0,
            "willpower" INTEGER NOT NULL DEFAULT 0,
            "intelligence" INTEGER NOT NULL DEFAULT 0,
            "special_rules" TEXT,
            "is_hidden" BOOLEAN NOT NULL DEFAULT 0,
            FOREIGN KEY("gang_type_id") REFERENCES "gang_types"("id") ON DELETE SET NULL
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "equipment" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "equipment_name" TEXT NOT NULL,
            "equipment_category" TEXT NOT NULL,
            "equipment_type" TEXT NOT NULL,
            "cost" INTEGER NOT NULL DEFAULT 0,
            "availability" TEXT,
            "faction" TEXT,
            "core_equipment" BOOLEAN NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now'))
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_defaults" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_type_id" INTEGER NOT NULL,
            "equipment_id" INTEGER NOT NULL,
            FOREIGN KEY("fighter_type_id") REFERENCES "fighter_types"("id") ON DELETE CASCADE,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "weapon_profiles" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "weapon_id" INTEGER NOT NULL,
            "profile_name" TEXT NOT NULL,
            "range_short" TEXT,
            "range_long" TEXT,
            "acc_short" TEXT,
            "acc_long" TEXT,
            "strength" TEXT,
            "ap" TEXT,
            "damage" TEXT,
            "ammo" TEXT,
            "traits" TEXT,
            "sort_order" INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY("weapon_id") REFERENCES "equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "vehicle_equipment_profiles" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "equipment_id" INTEGER NOT NULL,
            "upgrade_type" TEXT NOT NULL,
            "movement" INTEGER NOT NULL DEFAULT 0,
            "front" INTEGER NOT NULL DEFAULT 0,
            "side" INTEGER NOT NULL DEFAULT 0,
            "rear" INTEGER NOT NULL DEFAULT 0,
            "hull_points" INTEGER NOT NULL DEFAULT 0,
            "handling" INTEGER NOT NULL DEFAULT 0,
            "save" INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "equipment_discounts" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "equipment_id" INTEGER NOT NULL,
            "gang_type_id" INTEGER,
            "fighter_type_id" INTEGER,
            "adjusted_cost" INTEGER NOT NULL,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE,
            FOREIGN KEY("gang_type_id") REFERENCES "gang_types"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_type_id") REFERENCES "fighter_types"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "equipment_availability" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "equipment_id" INTEGER NOT NULL,
            "gang_type_id" INTEGER NOT NULL,
            "availability" TEXT NOT NULL,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE,
            FOREIGN KEY("gang_type_id") REFERENCES "gang_types"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "equipment_beasts" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "equipment_id" INTEGER NOT NULL,
            "fighter_type_id" INTEGER NOT NULL,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_type_id") REFERENCES "fighter_types"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_effect_types" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "effect_name" TEXT NOT NULL,
            "effect_category" TEXT NOT NULL,
            "equipment_id" INTEGER,
            "credits_increase" INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_effect_type_modifiers" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_effect_type_id" INTEGER NOT NULL,
            "stat_name" TEXT NOT NULL,
            "default_numeric_value" INTEGER NOT NULL,
            FOREIGN KEY("fighter_effect_type_id") REFERENCES "fighter_effect_types"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "vehicle_types" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "vehicle_type" TEXT NOT NULL,
            "gang_type_id" INTEGER,
            "cost" INTEGER NOT NULL DEFAULT 0,
            "movement" INTEGER NOT NULL DEFAULT 0,
            "front" INTEGER NOT NULL DEFAULT 0,
            "side" INTEGER NOT NULL DEFAULT 0,
            "rear" INTEGER NOT NULL DEFAULT 0,
            "hull_points" INTEGER NOT NULL DEFAULT 0,
            "handling" INTEGER NOT NULL DEFAULT 0,
            "save" INTEGER NOT NULL DEFAULT 0,
            "body_slots" INTEGER NOT NULL DEFAULT 0,
            "drive_slots" INTEGER NOT NULL DEFAULT 0,
            "engine_slots" INTEGER NOT NULL DEFAULT 0,
            "special_rules" TEXT,
            FOREIGN KEY("gang_type_id") REFERENCES "gang_types"("id") ON DELETE SET NULL
        )"#,
    )
    .await?;

    Ok(())
}

/// 创建帮派、战士、装备持有等游戏数据表
async fn create_gang_tables<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    exec(
        conn,
        r#"CREATE TABLE "gangs" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "user_id" INTEGER NOT NULL,
            "name" TEXT NOT NULL,
            "gang_type_id" INTEGER NOT NULL,
            "credits" INTEGER NOT NULL DEFAULT 0,
            "reputation" INTEGER NOT NULL DEFAULT 0,
            "rating" INTEGER NOT NULL DEFAULT 0,
            "alignment" TEXT NOT NULL,
            "note" TEXT,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("user_id") REFERENCES "profiles"("id") ON DELETE CASCADE,
            FOREIGN KEY("gang_type_id") REFERENCES "gang_types"("id")
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighters" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "gang_id" INTEGER NOT NULL,
            "user_id" INTEGER NOT NULL,
            "fighter_name" TEXT NOT NULL,
            "fighter_type_id" INTEGER NOT NULL,
            "fighter_class" TEXT NOT NULL,
            "credits" INTEGER NOT NULL DEFAULT 0,
            "cost_adjustment" INTEGER NOT NULL DEFAULT 0,
            "movement" INTEGER NOT NULL DEFAULT 0,
            "weapon_skill" INTEGER NOT NULL DEFAULT 0,
            "ballistic_skill" INTEGER NOT NULL DEFAULT 0,
            "strength" INTEGER NOT NULL DEFAULT 0,
            "toughness" INTEGER NOT NULL DEFAULT 0,
            "wounds" INTEGER NOT NULL DEFAULT 0,
            "initiative" INTEGER NOT NULL DEFAULT 0,
            "attacks" INTEGER NOT NULL DEFAULT 0,
            "leadership" INTEGER NOT NULL DEFAULT 0,
            "cool" INTEGER NOT NULL DEFAULT 0,
            "willpower" INTEGER NOT NULL DEFAULT 0,
            "intelligence" INTEGER NOT NULL DEFAULT 0,
            "xp" INTEGER NOT NULL DEFAULT 0,
            "kills" INTEGER NOT NULL DEFAULT 0,
            "killed" BOOLEAN NOT NULL DEFAULT 0,
            "retired" BOOLEAN NOT NULL DEFAULT 0,
            "enslaved" BOOLEAN NOT NULL DEFAULT 0,
            "starved" BOOLEAN NOT NULL DEFAULT 0,
            "recovery" BOOLEAN NOT NULL DEFAULT 0,
            "note" TEXT,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("gang_id") REFERENCES "gangs"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_type_id") REFERENCES "fighter_types"("id")
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_skills" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_id" INTEGER NOT NULL,
            "skill_name" TEXT NOT NULL,
            "credits_increase" INTEGER NOT NULL DEFAULT 0,
            "xp_cost" INTEGER NOT NULL DEFAULT 0,
            "is_advance" BOOLEAN NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("fighter_id") REFERENCES "fighters"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "vehicles" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "gang_id" INTEGER NOT NULL,
            "fighter_id" INTEGER,
            "vehicle_type_id" INTEGER NOT NULL,
            "vehicle_name" TEXT NOT NULL,
            "cost" INTEGER NOT NULL DEFAULT 0,
            "movement" INTEGER NOT NULL DEFAULT 0,
            "front" INTEGER NOT NULL DEFAULT 0,
            "side" INTEGER NOT NULL DEFAULT 0,
            "rear" INTEGER NOT NULL DEFAULT 0,
            "hull_points" INTEGER NOT NULL DEFAULT 0,
            "handling" INTEGER NOT NULL DEFAULT 0,
            "save" INTEGER NOT NULL DEFAULT 0,
            "body_slots" INTEGER NOT NULL DEFAULT 0,
            "drive_slots" INTEGER NOT NULL DEFAULT 0,
            "engine_slots" INTEGER NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("gang_id") REFERENCES "gangs"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_id") REFERENCES "fighters"("id") ON DELETE SET NULL,
            FOREIGN KEY("vehicle_type_id") REFERENCES "vehicle_types"("id")
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_equipment" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "gang_id" INTEGER NOT NULL,
            "fighter_id" INTEGER,
            "vehicle_id" INTEGER,
            "equipment_id" INTEGER NOT NULL,
            "purchase_cost" INTEGER NOT NULL DEFAULT 0,
            "original_cost" INTEGER NOT NULL DEFAULT 0,
            "is_master_crafted" BOOLEAN NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("gang_id") REFERENCES "gangs"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_id") REFERENCES "fighters"("id") ON DELETE CASCADE,
            FOREIGN KEY("vehicle_id") REFERENCES "vehicles"("id") ON DELETE CASCADE,
            FOREIGN KEY("equipment_id") REFERENCES "equipment"("id")
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_effects" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_id" INTEGER,
            "vehicle_id" INTEGER,
            "fighter_effect_type_id" INTEGER,
            "fighter_equipment_id" INTEGER,
            "effect_name" TEXT NOT NULL,
            "effect_category" TEXT NOT NULL,
            "credits_increase" INTEGER NOT NULL DEFAULT 0,
            "created_at" INTEGER DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("fighter_id") REFERENCES "fighters"("id") ON DELETE CASCADE,
            FOREIGN KEY("vehicle_id") REFERENCES "vehicles"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_effect_type_id") REFERENCES "fighter_effect_types"("id") ON DELETE SET NULL,
            FOREIGN KEY("fighter_equipment_id") REFERENCES "fighter_equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_effect_modifiers" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_effect_id" INTEGER NOT NULL,
            "stat_name" TEXT NOT NULL,
            "numeric_value" INTEGER NOT NULL,
            FOREIGN KEY("fighter_effect_id") REFERENCES "fighter_effects"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    exec(
        conn,
        r#"CREATE TABLE "fighter_exotic_beasts" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "fighter_owner_id" INTEGER NOT NULL,
            "fighter_pet_id" INTEGER NOT NULL,
            "fighter_equipment_id" INTEGER,
            FOREIGN KEY("fighter_owner_id") REFERENCES "fighters"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_pet_id") REFERENCES "fighters"("id") ON DELETE CASCADE,
            FOREIGN KEY("fighter_equipment_id") REFERENCES "fighter_equipment"("id") ON DELETE CASCADE
        )"#,
    )
    .await?;

    Ok(())
}

/// 创建常用查询索引
async fn create_indexes<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let indexes = [
        r#"CREATE INDEX "idx_gangs_user_id" ON "gangs"("user_id")"#,
        r#"CREATE INDEX "idx_fighters_gang_id" ON "fighters"("gang_id")"#,
        r#"CREATE INDEX "idx_fighter_equipment_gang_id" ON "fighter_equipment"("gang_id")"#,
        r#"CREATE INDEX "idx_fighter_equipment_fighter_id" ON "fighter_equipment"("fighter_id")"#,
        r#"CREATE INDEX "idx_fighter_equipment_vehicle_id" ON "fighter_equipment"("vehicle_id")"#,
        r#"CREATE INDEX "idx_fighter_effects_fighter_id" ON "fighter_effects"("fighter_id")"#,
        r#"CREATE INDEX "idx_fighter_effects_vehicle_id" ON "fighter_effects"("vehicle_id")"#,
        r#"CREATE INDEX "idx_vehicles_gang_id" ON "vehicles"("gang_id")"#,
        r#"CREATE INDEX "idx_weapon_profiles_weapon_id" ON "weapon_profiles"("weapon_id")"#,
        r#"CREATE INDEX "idx_equipment_discounts_equipment_id" ON "equipment_discounts"("equipment_id")"#,
    ];

    for sql in indexes {
        exec(conn, sql).await?;
    }

    Ok(())
}
