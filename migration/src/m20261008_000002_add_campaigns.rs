//! 添加战役相关表
//!
//! 1. campaign_types / territories / campaign_type_triumphs：战役模板（管理后台维护）
//! 2. campaigns / campaign_members / campaign_gangs：战役及参与者
//! 3. campaign_territories / campaign_battles：领地归属与战斗记录

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. 战役类型
        manager
            .create_table(
                Table::create()
                    .table(CampaignTypes::Table)
                    .col(
                        ColumnDef::new(CampaignTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignTypes::CampaignTypeName).text().not_null())
                    .col(ColumnDef::new(CampaignTypes::Description).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Territories::Table)
                    .col(
                        ColumnDef::new(Territories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Territories::CampaignTypeId).integer().not_null())
                    .col(ColumnDef::new(Territories::TerritoryName).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_territories_campaign_type")
                            .from(Territories::Table, Territories::CampaignTypeId)
                            .to(CampaignTypes::Table, CampaignTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignTypeTriumphs::Table)
                    .col(
                        ColumnDef::new(CampaignTypeTriumphs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignTypeTriumphs::CampaignTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CampaignTypeTriumphs::Triumph).text().not_null())
                    .col(ColumnDef::new(CampaignTypeTriumphs::Criteria).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_triumphs_campaign_type")
                            .from(CampaignTypeTriumphs::Table, CampaignTypeTriumphs::CampaignTypeId)
                            .to(CampaignTypes::Table, CampaignTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. 战役与参与者
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::CampaignName).text().not_null())
                    .col(ColumnDef::new(Campaigns::CampaignTypeId).integer().not_null())
                    .col(ColumnDef::new(Campaigns::Description).text().null())
                    .col(
                        ColumnDef::new(Campaigns::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Campaigns::CreatedAt).integer().null())
                    .col(ColumnDef::new(Campaigns::UpdatedAt).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaigns_campaign_type")
                            .from(Campaigns::Table, Campaigns::CampaignTypeId)
                            .to(CampaignTypes::Table, CampaignTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignMembers::Table)
                    .col(
                        ColumnDef::new(CampaignMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignMembers::CampaignId).integer().not_null())
                    .col(ColumnDef::new(CampaignMembers::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(CampaignMembers::Role)
                            .text()
                            .not_null()
                            .default("MEMBER"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_members_campaign")
                            .from(CampaignMembers::Table, CampaignMembers::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_members_profile")
                            .from(CampaignMembers::Table, CampaignMembers::UserId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignGangs::Table)
                    .col(
                        ColumnDef::new(CampaignGangs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignGangs::CampaignId).integer().not_null())
                    .col(ColumnDef::new(CampaignGangs::GangId).integer().not_null())
                    .col(ColumnDef::new(CampaignGangs::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_gangs_campaign")
                            .from(CampaignGangs::Table, CampaignGangs::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_gangs_gang")
                            .from(CampaignGangs::Table, CampaignGangs::GangId)
                            .to(Gangs::Table, Gangs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. 领地与战斗
        manager
            .create_table(
                Table::create()
                    .table(CampaignTerritories::Table)
                    .col(
                        ColumnDef::new(CampaignTerritories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignTerritories::CampaignId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignTerritories::TerritoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignTerritories::TerritoryName)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CampaignTerritories::GangId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_territories_campaign")
                            .from(CampaignTerritories::Table, CampaignTerritories::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_territories_territory")
                            .from(CampaignTerritories::Table, CampaignTerritories::TerritoryId)
                            .to(Territories::Table, Territories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_territories_gang")
                            .from(CampaignTerritories::Table, CampaignTerritories::GangId)
                            .to(Gangs::Table, Gangs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignBattles::Table)
                    .col(
                        ColumnDef::new(CampaignBattles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CampaignBattles::CampaignId).integer().not_null())
                    .col(ColumnDef::new(CampaignBattles::AttackerId).integer().null())
                    .col(ColumnDef::new(CampaignBattles::DefenderId).integer().null())
                    .col(ColumnDef::new(CampaignBattles::WinnerId).integer().null())
                    .col(ColumnDef::new(CampaignBattles::Scenario).text().not_null())
                    .col(ColumnDef::new(CampaignBattles::Note).text().null())
                    .col(ColumnDef::new(CampaignBattles::CreatedAt).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_battles_campaign")
                            .from(CampaignBattles::Table, CampaignBattles::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaign_members_user_id")
                    .table(CampaignMembers::Table)
                    .col(CampaignMembers::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignBattles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignTerritories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignGangs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignTypeTriumphs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Territories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Gangs {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum CampaignTypes {
    Table,
    Id,
    CampaignTypeName,
    Description,
}

#[derive(DeriveIden)]
enum Territories {
    Table,
    Id,
    CampaignTypeId,
    TerritoryName,
}

#[derive(DeriveIden)]
enum CampaignTypeTriumphs {
    Table,
    Id,
    CampaignTypeId,
    Triumph,
    Criteria,
}

#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    CampaignName,
    CampaignTypeId,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CampaignMembers {
    Table,
    Id,
    CampaignId,
    UserId,
    Role,
}

#[derive(DeriveIden)]
enum CampaignGangs {
    Table,
    Id,
    CampaignId,
    GangId,
    UserId,
}

#[derive(DeriveIden)]
enum CampaignTerritories {
    Table,
    Id,
    CampaignId,
    TerritoryId,
    TerritoryName,
    GangId,
}

#[derive(DeriveIden)]
enum CampaignBattles {
    Table,
    Id,
    CampaignId,
    AttackerId,
    DefenderId,
    WinnerId,
    Scenario,
    Note,
    CreatedAt,
}
