//! 添加帮派传承（gang lineages）
//!
//! 1. 创建 gang_lineages 表，由管理后台维护
//! 2. gangs 表添加 gang_lineage_id 列，可为空

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. 创建 gang_lineages 表
        manager
            .create_table(
                Table::create()
                    .table(GangLineages::Table)
                    .col(
                        ColumnDef::new(GangLineages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GangLineages::Name).text().not_null())
                    .col(
                        ColumnDef::new(GangLineages::LineageType)
                            .text()
                            .not_null()
                            .default("legacy"),
                    )
                    .col(ColumnDef::new(GangLineages::GangTypeId).integer().null())
                    .col(ColumnDef::new(GangLineages::FighterTypeId).integer().null())
                    .col(ColumnDef::new(GangLineages::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gang_lineages_gang_type")
                            .from(GangLineages::Table, GangLineages::GangTypeId)
                            .to(GangTypes::Table, GangTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gang_lineages_fighter_type")
                            .from(GangLineages::Table, GangLineages::FighterTypeId)
                            .to(FighterTypes::Table, FighterTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. 给 gangs 表添加 gang_lineage_id 列
        // SQLite 不支持通过 ALTER TABLE 添加外键，删除传承时由仓库层清空引用
        manager
            .alter_table(
                Table::alter()
                    .table(Gangs::Table)
                    .add_column(ColumnDef::new(Gangs::GangLineageId).integer().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(
            "此迁移无法回滚，请从备份恢复数据库".to_string(),
        ))
    }
}

#[derive(DeriveIden)]
enum GangLineages {
    Table,
    Id,
    Name,
    LineageType,
    GangTypeId,
    FighterTypeId,
    Description,
}

#[derive(DeriveIden)]
enum GangTypes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FighterTypes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Gangs {
    Table,
    GangLineageId,
}
