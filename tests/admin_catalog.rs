mod common;

use common::*;
use gang_manager_lib::database::dto::{
    AvailabilityInput, CampaignTypeInput, CreateCampaignData, CreateGangData, DiscountInput,
    GangLineageInput, WeaponProfileInput,
};
use gang_manager_lib::database::repository::campaign_types_repository::CampaignTypesRepository;
use gang_manager_lib::database::repository::campaigns_repository::CampaignsRepository;
use gang_manager_lib::database::repository::catalog_repository::{
    CatalogRepository, EquipmentFilter,
};
use gang_manager_lib::database::repository::gangs_repository::GangsRepository;
use gang_manager_lib::database::repository::lineages_repository::LineagesRepository;
use gang_manager_lib::error::AppError;

fn lasgun_profile(name: &str) -> WeaponProfileInput {
    WeaponProfileInput {
        profile_name: name.to_string(),
        range_short: Some("8\"".to_string()),
        range_long: Some("24\"".to_string()),
        acc_short: Some("+1".to_string()),
        acc_long: None,
        strength: Some("3".to_string()),
        ap: None,
        damage: Some("1".to_string()),
        ammo: Some("2+".to_string()),
        traits: Some("Plentiful".to_string()),
        sort_order: 0,
    }
}

#[tokio::test]
async fn failed_availability_rows_do_not_abort_equipment_creation() {
    let db = setup_db().await;
    let gang_type_id = create_gang_type(&db, "House Goliath").await;

    let mut input = equipment_input("Lasgun", "weapon", 15);
    input.weapon_profiles = vec![lasgun_profile("Lasgun")];
    input.availabilities = vec![
        AvailabilityInput {
            gang_type_id,
            availability: "R9".to_string(),
        },
        AvailabilityInput {
            gang_type_id: 9999,
            availability: "R12".to_string(),
        },
    ];

    let details = CatalogRepository::create_equipment(&db, input).await.unwrap();
    assert_eq!(details.weapon_profiles.len(), 1);
    assert_eq!(details.availabilities.len(), 1);
    assert_eq!(details.availabilities[0].gang_type_id, gang_type_id);
    assert_eq!(details.availabilities[0].availability, "R9");
}

#[tokio::test]
async fn equipment_validation_and_replacement() {
    let db = setup_db().await;
    let gang_type_id = create_gang_type(&db, "House Goliath").await;

    let bad_type = CatalogRepository::create_equipment(&db, equipment_input("Rock", "rock", 1))
        .await
        .unwrap_err();
    assert!(matches!(bad_type, AppError::BadRequest(_)));

    let mut input = equipment_input("Lasgun", "weapon", 15);
    input.weapon_profiles = vec![lasgun_profile("Lasgun")];
    input.discounts = vec![DiscountInput {
        gang_type_id: Some(gang_type_id),
        fighter_type_id: None,
        adjusted_cost: 10,
    }];
    let created = CatalogRepository::create_equipment(&db, input).await.unwrap();
    assert_eq!(created.discounts.len(), 1);

    let mut replacement = equipment_input("Lasgun (Hotshot)", "weapon", 30);
    replacement.weapon_profiles = vec![
        lasgun_profile("Standard"),
        lasgun_profile("Hotshot"),
    ];
    let replaced = CatalogRepository::replace_equipment(&db, created.equipment.id, replacement)
        .await
        .unwrap();
    assert_eq!(replaced.equipment.equipment_name, "Lasgun (Hotshot)");
    assert_eq!(replaced.equipment.cost, 30);
    assert_eq!(replaced.weapon_profiles.len(), 2);
    assert!(replaced.discounts.is_empty());

    let weapons = CatalogRepository::list_equipment(
        &db,
        EquipmentFilter {
            equipment_type: Some("weapon".to_string()),
            equipment_category: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(weapons.len(), 1);

    CatalogRepository::delete_equipment(&db, created.equipment.id)
        .await
        .unwrap();
    assert!(matches!(
        CatalogRepository::equipment_details(&db, created.equipment.id)
            .await
            .unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn types_in_use_cannot_be_deleted() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let item_id = create_equipment(&db, "Autogun", "weapon", 15).await;
    hire(&db, &world, "Vex").await;

    let fighter_type = CatalogRepository::delete_fighter_type(&db, world.fighter_type_id)
        .await
        .unwrap_err();
    assert!(matches!(fighter_type, AppError::BadRequest(_)));

    let gang_type = CatalogRepository::delete_gang_type(&db, world.gang_type_id)
        .await
        .unwrap_err();
    assert!(matches!(gang_type, AppError::BadRequest(_)));

    // 未被持有的装备可以删除
    CatalogRepository::delete_equipment(&db, item_id).await.unwrap();

    let unused = create_fighter_type(&db, None, "Hive Scum", 30, vec![]).await;
    CatalogRepository::delete_fighter_type(&db, unused).await.unwrap();
}

#[tokio::test]
async fn fighter_types_with_no_gang_type_are_listed_for_every_gang_type() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let other_gang_type = create_gang_type(&db, "House Orlock").await;
    create_fighter_type(&db, None, "Hive Scum", 30, vec![]).await;
    create_fighter_type(&db, Some(other_gang_type), "Road Boss", 110, vec![]).await;

    let names: Vec<String> =
        CatalogRepository::list_fighter_types(&db, Some(world.gang_type_id), false)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.fighter_type)
            .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Wyld Runner".to_string()));
    assert!(names.contains(&"Hive Scum".to_string()));
}

#[tokio::test]
async fn campaign_type_update_keeps_listed_territories() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let created = CampaignTypesRepository::create(
        &db,
        CampaignTypeInput {
            campaign_type_name: "Dominion".to_string(),
            description: None,
            territories: vec!["Old Ruins".to_string(), "Tunnels".to_string()],
            triumphs: vec![],
        },
    )
    .await
    .unwrap();
    let ruins_id = created
        .territories
        .iter()
        .find(|t| t.territory_name == "Old Ruins")
        .unwrap()
        .id;

    let updated = CampaignTypesRepository::update(
        &db,
        created.campaign_type.id,
        CampaignTypeInput {
            campaign_type_name: "Dominion".to_string(),
            description: Some("Revised".to_string()),
            territories: vec!["Old Ruins".to_string(), "Sludge Sea".to_string()],
            triumphs: vec![],
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.territories.len(), 2);
    assert!(updated.territories.iter().any(|t| t.id == ruins_id));
    assert!(
        !updated
            .territories
            .iter()
            .any(|t| t.territory_name == "Tunnels")
    );

    CampaignsRepository::create(
        &db,
        world.user.id,
        CreateCampaignData {
            campaign_name: "Ash Wastes War".to_string(),
            campaign_type_id: created.campaign_type.id,
            description: None,
        },
    )
    .await
    .unwrap();
    let in_use = CampaignTypesRepository::delete(&db, created.campaign_type.id)
        .await
        .unwrap_err();
    assert!(matches!(in_use, AppError::BadRequest(_)));
}

#[tokio::test]
async fn deleting_a_lineage_detaches_its_gangs() {
    let db = setup_db().await;
    let world = seed_world(&db).await;

    let bad = LineagesRepository::create(
        &db,
        GangLineageInput {
            name: "House of Chains".to_string(),
            lineage_type: "bloodline".to_string(),
            gang_type_id: None,
            fighter_type_id: None,
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(bad, AppError::BadRequest(_)));

    let lineage = LineagesRepository::create(
        &db,
        GangLineageInput {
            name: "House of Chains".to_string(),
            lineage_type: "affiliation".to_string(),
            gang_type_id: Some(world.gang_type_id),
            fighter_type_id: None,
            description: None,
        },
    )
    .await
    .unwrap();
    let affiliated = GangsRepository::create(
        &db,
        world.user.id,
        CreateGangData {
            name: "Chain Gang".to_string(),
            gang_type_id: world.gang_type_id,
            credits: None,
            alignment: None,
            gang_lineage_id: Some(lineage.id),
        },
        STARTING_CREDITS,
    )
    .await
    .unwrap();
    assert_eq!(affiliated.gang_lineage_id, Some(lineage.id));

    let detached = LineagesRepository::delete(&db, lineage.id).await.unwrap();
    assert_eq!(detached, vec![affiliated.id]);
    assert_eq!(gang(&db, affiliated.id).await.gang_lineage_id, None);
    assert_eq!(gang(&db, world.gang.id).await.gang_lineage_id, None);
}
