mod common;

use common::*;
use gang_manager_lib::database::dto::{
    AddCampaignGangData, AddMemberData, AddTerritoryData, AssignTerritoryData, CampaignTypeInput,
    CreateCampaignData, CreateGangData, RecordBattleData, TriumphInput, UpdateCampaignData,
};
use gang_manager_lib::database::repository::campaign_types_repository::CampaignTypesRepository;
use gang_manager_lib::database::repository::campaigns_repository::CampaignsRepository;
use gang_manager_lib::database::repository::gangs_repository::GangsRepository;
use gang_manager_lib::entity::{campaign_members, gangs};
use gang_manager_lib::error::AppError;
use sea_orm::DatabaseConnection;

async fn campaign_type(db: &DatabaseConnection) -> i32 {
    CampaignTypesRepository::create(
        db,
        CampaignTypeInput {
            campaign_type_name: "Dominion".to_string(),
            description: None,
            territories: vec![
                "Old Ruins".to_string(),
                "Slag Furnace".to_string(),
                "Tunnels".to_string(),
            ],
            triumphs: vec![TriumphInput {
                triumph: "Overlord".to_string(),
                criteria: Some("Most territories".to_string()),
            }],
        },
    )
    .await
    .unwrap()
    .campaign_type
    .id
}

async fn gang_for(db: &DatabaseConnection, user_id: i32, gang_type_id: i32, name: &str) -> gangs::Model {
    GangsRepository::create(
        db,
        user_id,
        CreateGangData {
            name: name.to_string(),
            gang_type_id,
            credits: None,
            alignment: None,
            gang_lineage_id: None,
        },
        STARTING_CREDITS,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn creator_becomes_owner_and_no_territories_are_claimed() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let type_id = campaign_type(&db).await;

    let campaign = CampaignsRepository::create(
        &db,
        world.user.id,
        CreateCampaignData {
            campaign_name: "Ash Wastes War".to_string(),
            campaign_type_id: type_id,
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(campaign.status, "active");

    let details = CampaignsRepository::details(&db, campaign.id).await.unwrap();
    assert_eq!(details.members.len(), 1);
    assert_eq!(details.members[0].member.role, campaign_members::ROLE_OWNER);
    assert_eq!(details.members[0].username.as_deref(), Some("ash"));
    assert!(details.territories.is_empty());
    assert_eq!(details.triumphs.len(), 1);

    let listed = CampaignsRepository::list_for_user(&db, world.user.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn full_campaign_flow() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let rival_user = create_user(&db, "kade", false).await;
    let rival_gang = gang_for(&db, rival_user.id, world.gang_type_id, "Iron Jackals").await;
    let type_id = campaign_type(&db).await;
    let campaign = CampaignsRepository::create(
        &db,
        world.user.id,
        CreateCampaignData {
            campaign_name: "Ash Wastes War".to_string(),
            campaign_type_id: type_id,
            description: Some("Season one".to_string()),
        },
    )
    .await
    .unwrap();

    // 帮派拥有者必须先成为成员
    let not_member = CampaignsRepository::add_gang(
        &db,
        campaign.id,
        AddCampaignGangData {
            gang_id: rival_gang.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(not_member, AppError::BadRequest(_)));

    let owner_again = CampaignsRepository::add_member(
        &db,
        campaign.id,
        AddMemberData {
            user_id: rival_user.id,
            role: Some("owner".to_string()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(owner_again, AppError::BadRequest(_)));

    CampaignsRepository::add_member(
        &db,
        campaign.id,
        AddMemberData {
            user_id: rival_user.id,
            role: None,
        },
    )
    .await
    .unwrap();
    for gang_id in [world.gang.id, rival_gang.id] {
        CampaignsRepository::add_gang(&db, campaign.id, AddCampaignGangData { gang_id })
            .await
            .unwrap();
    }
    let duplicate =
        CampaignsRepository::add_gang(&db, campaign.id, AddCampaignGangData { gang_id: rival_gang.id })
            .await
            .unwrap_err();
    assert!(matches!(duplicate, AppError::BadRequest(_)));

    let type_details = CampaignTypesRepository::details(&db, type_id).await.unwrap();
    let ruins = type_details
        .territories
        .iter()
        .find(|t| t.territory_name == "Old Ruins")
        .unwrap();
    let territory = CampaignsRepository::add_territory(
        &db,
        campaign.id,
        AddTerritoryData {
            territory_id: ruins.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(territory.gang_id, None);

    let claimed = CampaignsRepository::assign_territory(
        &db,
        territory.id,
        AssignTerritoryData {
            gang_id: Some(rival_gang.id),
        },
    )
    .await
    .unwrap();
    assert_eq!(claimed.gang_id, Some(rival_gang.id));

    let bad_winner = CampaignsRepository::record_battle(
        &db,
        campaign.id,
        RecordBattleData {
            attacker_id: Some(world.gang.id),
            defender_id: None,
            winner_id: Some(rival_gang.id),
            scenario: "Ambush".to_string(),
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(bad_winner, AppError::BadRequest(_)));

    let battle = CampaignsRepository::record_battle(
        &db,
        campaign.id,
        RecordBattleData {
            attacker_id: Some(world.gang.id),
            defender_id: Some(rival_gang.id),
            winner_id: Some(world.gang.id),
            scenario: "Ambush".to_string(),
            note: None,
        },
    )
    .await
    .unwrap();

    let updated = CampaignsRepository::update(
        &db,
        campaign.id,
        UpdateCampaignData {
            status: Some("paused".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "paused");

    // 移除成员会让其帮派退出战役并释放领地
    let detached = CampaignsRepository::remove_member(&db, campaign.id, rival_user.id)
        .await
        .unwrap();
    assert_eq!(detached, vec![rival_gang.id]);
    let details = CampaignsRepository::details(&db, campaign.id).await.unwrap();
    assert_eq!(details.gangs.len(), 1);
    assert_eq!(details.territories[0].gang_id, None);
    assert_eq!(details.battles.len(), 1);

    let owner_removal = CampaignsRepository::remove_member(&db, campaign.id, world.user.id)
        .await
        .unwrap_err();
    assert!(matches!(owner_removal, AppError::BadRequest(_)));

    CampaignsRepository::delete_battle(&db, battle.id).await.unwrap();
    CampaignsRepository::delete(&db, campaign.id).await.unwrap();
    assert!(matches!(
        CampaignsRepository::get(&db, campaign.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn territory_from_another_campaign_type_is_rejected() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let type_id = campaign_type(&db).await;
    let other_type = CampaignTypesRepository::create(
        &db,
        CampaignTypeInput {
            campaign_type_name: "Uprising".to_string(),
            description: None,
            territories: vec!["Spire".to_string()],
            triumphs: vec![],
        },
    )
    .await
    .unwrap();
    let campaign = CampaignsRepository::create(
        &db,
        world.user.id,
        CreateCampaignData {
            campaign_name: "Ash Wastes War".to_string(),
            campaign_type_id: type_id,
            description: None,
        },
    )
    .await
    .unwrap();

    let err = CampaignsRepository::add_territory(
        &db,
        campaign.id,
        AddTerritoryData {
            territory_id: other_type.territories[0].id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
