mod common;

use common::*;
use gang_manager_lib::database::dto::{
    AddEffectData, AddSkillData, BuyEquipmentData, BuyVehicleData, GangCreditsData,
    CreditsOperation, HireFighterData, ModifierInput, UpdateFighterData, UpdateVehicleData,
    VehicleTypeInput,
};
use gang_manager_lib::database::repository::catalog_repository::CatalogRepository;
use gang_manager_lib::database::repository::details_repository::DetailsRepository;
use gang_manager_lib::database::repository::effects_repository::EffectsRepository;
use gang_manager_lib::database::repository::fighter_equipment_repository::FighterEquipmentRepository;
use gang_manager_lib::database::repository::fighters_repository::FightersRepository;
use gang_manager_lib::database::repository::gangs_repository::GangsRepository;
use gang_manager_lib::database::repository::vehicles_repository::VehiclesRepository;
use gang_manager_lib::error::AppError;

#[tokio::test]
async fn hiring_grants_default_equipment_for_free() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let knife = create_equipment(&db, "Fighting knife", "weapon", 15).await;
    let champion = create_fighter_type(&db, Some(world.gang_type_id), "Champion", 120, vec![knife]).await;

    let result = FightersRepository::hire(
        &db,
        world.gang.id,
        HireFighterData {
            fighter_type_id: champion,
            fighter_name: "Kyra".to_string(),
            cost: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(result.equipment.len(), 1);
    assert_eq!(result.equipment[0].purchase_cost, 0);
    assert_eq!(result.equipment[0].original_cost, 15);
    assert_eq!(result.fighter.credits, 120);
    assert_eq!(result.fighter.strength, 3);
    assert_eq!(result.gang.credits, STARTING_CREDITS - 120);
    assert_eq!(result.gang.rating, 120);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn status_changes_move_the_rating() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    hire(&db, &world, "Nyx").await;
    assert_eq!(gang(&db, world.gang.id).await.rating, 130);

    let update = |data: UpdateFighterData| FightersRepository::update(&db, fighter.id, data);

    update(UpdateFighterData {
        killed: Some(true),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 65);

    // 已离队时修改花费修正不影响评分
    update(UpdateFighterData {
        cost_adjustment: Some(20),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 65);

    update(UpdateFighterData {
        killed: Some(false),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 150);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn skills_spend_xp_and_are_not_refunded() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    FightersRepository::update(
        &db,
        fighter.id,
        UpdateFighterData {
            xp: Some(8),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let too_expensive = FightersRepository::add_skill(
        &db,
        fighter.id,
        AddSkillData {
            skill_name: "Nerves of Steel".to_string(),
            credits_increase: 20,
            xp_cost: 9,
            is_advance: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(too_expensive, AppError::BadRequest(_)));

    let skill = FightersRepository::add_skill(
        &db,
        fighter.id,
        AddSkillData {
            skill_name: "Nerves of Steel".to_string(),
            credits_increase: 20,
            xp_cost: 6,
            is_advance: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(FightersRepository::get(&db, fighter.id).await.unwrap().xp, 2);
    assert_eq!(gang(&db, world.gang.id).await.rating, 85);

    let gang_id = FightersRepository::remove_skill(&db, skill.id).await.unwrap();
    assert_eq!(gang_id, world.gang.id);
    assert_eq!(FightersRepository::get(&db, fighter.id).await.unwrap().xp, 2);
    assert_eq!(gang(&db, world.gang.id).await.rating, 65);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn custom_effects_validate_stat_names() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;

    let bad = FightersRepository::add_effect(
        &db,
        fighter.id,
        AddEffectData {
            effect_name: Some("Broken hull".to_string()),
            modifiers: Some(vec![ModifierInput {
                stat_name: "hull_points".to_string(),
                numeric_value: -1,
            }]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(bad, AppError::BadRequest(_)));

    let effect = FightersRepository::add_effect(
        &db,
        fighter.id,
        AddEffectData {
            effect_name: Some("Head wound".to_string()),
            effect_category: Some("injuries".to_string()),
            credits_increase: Some(-5),
            modifiers: Some(vec![ModifierInput {
                stat_name: "intelligence".to_string(),
                numeric_value: 1,
            }]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 60);

    let details = DetailsRepository::gang_details(&db, world.gang.id)
        .await
        .unwrap();
    assert_eq!(details.fighters[0].effective_stats.intelligence, 8);

    let removed = EffectsRepository::remove(&db, effect.effect.id).await.unwrap();
    assert_eq!(removed.rating_delta, 5);
    assert_eq!(gang(&db, world.gang.id).await.rating, 65);
    assert_rating_consistent(&db, world.gang.id).await;
}

async fn vehicle_type(db: &sea_orm::DatabaseConnection) -> i32 {
    CatalogRepository::create_vehicle_type(
        db,
        VehicleTypeInput {
            vehicle_type: "Ridgehauler".to_string(),
            gang_type_id: None,
            cost: 150,
            movement: 7,
            front: 10,
            side: 9,
            rear: 8,
            hull_points: 6,
            handling: 6,
            save: 5,
            body_slots: 3,
            drive_slots: 2,
            engine_slots: 2,
            special_rules: vec!["Cargo".to_string()],
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn vehicles_count_only_while_crewed_by_an_active_fighter() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let driver = hire(&db, &world, "Driver").await;
    let vehicle_type_id = vehicle_type(&db).await;

    let uncrewed = VehiclesRepository::buy(
        &db,
        world.gang.id,
        BuyVehicleData {
            vehicle_type_id,
            vehicle_name: None,
            cost: None,
            fighter_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(uncrewed.vehicle.vehicle_name, "Ridgehauler");
    assert_eq!(uncrewed.rating_delta, 0);
    assert_eq!(uncrewed.gang.credits, STARTING_CREDITS - 65 - 150);

    let ram = create_equipment(&db, "Ram", "vehicle_upgrade", 20).await;
    FighterEquipmentRepository::purchase(
        &db,
        BuyEquipmentData {
            gang_id: world.gang.id,
            fighter_id: None,
            vehicle_id: Some(uncrewed.vehicle.id),
            equipment_id: ram,
            manual_cost: None,
            is_master_crafted: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 65);

    let crewed = VehiclesRepository::update(
        &db,
        uncrewed.vehicle.id,
        UpdateVehicleData {
            vehicle_name: None,
            fighter_id: Some(Some(driver.id)),
        },
    )
    .await
    .unwrap();
    assert_eq!(crewed.fighter_id, Some(driver.id));
    assert_eq!(gang(&db, world.gang.id).await.rating, 65 + 150 + 20);
    assert_rating_consistent(&db, world.gang.id).await;

    let damage = VehiclesRepository::add_effect(
        &db,
        crewed.id,
        AddEffectData {
            effect_name: Some("Loss of power".to_string()),
            modifiers: Some(vec![ModifierInput {
                stat_name: "movement".to_string(),
                numeric_value: -1,
            }]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(damage.effect.vehicle_id, Some(crewed.id));

    let details = DetailsRepository::gang_details(&db, world.gang.id)
        .await
        .unwrap();
    assert!(details.vehicles.is_empty());
    let ridden = &details.fighters[0].vehicles[0];
    assert_eq!(ridden.effective_stats.movement, 6);
    assert_eq!(ridden.total_cost, 170);

    // 删除载具不退款
    let credits_before = gang(&db, world.gang.id).await.credits;
    VehiclesRepository::delete(&db, crewed.id).await.unwrap();
    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, credits_before);
    assert_eq!(after.rating, 65);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn crew_from_another_gang_is_rejected() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let vehicle_type_id = vehicle_type(&db).await;
    let rival = GangsRepository::create(
        &db,
        world.user.id,
        gang_manager_lib::database::dto::CreateGangData {
            name: "Rivals".to_string(),
            gang_type_id: world.gang_type_id,
            credits: None,
            alignment: None,
            gang_lineage_id: None,
        },
        STARTING_CREDITS,
    )
    .await
    .unwrap();
    let outsider = FightersRepository::hire(
        &db,
        rival.id,
        HireFighterData {
            fighter_type_id: world.fighter_type_id,
            fighter_name: "Outsider".to_string(),
            cost: Some(0),
        },
    )
    .await
    .unwrap()
    .fighter;

    let err = VehiclesRepository::buy(
        &db,
        world.gang.id,
        BuyVehicleData {
            vehicle_type_id,
            vehicle_name: Some("Stolen".to_string()),
            cost: None,
            fighter_id: Some(outsider.id),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(gang(&db, world.gang.id).await.credits, STARTING_CREDITS);
}

#[tokio::test]
async fn deleting_a_fighter_takes_companions_without_refund() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let owner = hire(&db, &world, "Beastmaster").await;
    let beast_type = create_fighter_type(&db, None, "Phyrr cat", 110, vec![]).await;
    let mut input = equipment_input("Phyrr cat", "wargear", 110);
    input.beast_fighter_type_ids = vec![beast_type];
    let cat = CatalogRepository::create_equipment(&db, input)
        .await
        .unwrap()
        .equipment
        .id;
    let purchase = FighterEquipmentRepository::purchase(
        &db,
        BuyEquipmentData {
            gang_id: world.gang.id,
            fighter_id: Some(owner.id),
            vehicle_id: None,
            equipment_id: cat,
            manual_cost: None,
            is_master_crafted: false,
        },
    )
    .await
    .unwrap();
    let credits_before = purchase.gang.credits;

    let removed = FightersRepository::delete(&db, owner.id).await.unwrap();
    assert_eq!(removed.fighter_ids.len(), 2);
    assert!(removed.fighter_ids.contains(&purchase.beasts[0].id));
    assert_eq!(removed.rating_delta, -(65 + 110));

    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, credits_before);
    assert_eq!(after.rating, 0);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn credit_operations_never_go_negative() {
    let db = setup_db().await;
    let world = seed_world(&db).await;

    let added = GangsRepository::apply_credits_operation(
        &db,
        world.gang.id,
        GangCreditsData {
            operation: CreditsOperation::Add,
            amount: 250,
        },
    )
    .await
    .unwrap();
    assert_eq!(added.credits, STARTING_CREDITS + 250);

    let err = GangsRepository::apply_credits_operation(
        &db,
        world.gang.id,
        GangCreditsData {
            operation: CreditsOperation::Subtract,
            amount: 5000,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InsufficientCredits { .. }));
    assert_eq!(gang(&db, world.gang.id).await.credits, STARTING_CREDITS + 250);
}

#[tokio::test]
async fn credit_and_rating_changes_stay_in_range() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let before = gang(&db, world.gang.id).await;

    let err = GangsRepository::apply_credits_operation(
        &db,
        world.gang.id,
        GangCreditsData {
            operation: CreditsOperation::Add,
            amount: i32::MAX,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // 绕过输入上限的内部调整同样不会越界
    let err = GangsRepository::adjust_credits(&db, world.gang.id, i32::MAX - 10)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let err = GangsRepository::adjust_rating(&db, world.gang.id, i32::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = FightersRepository::add_skill(
        &db,
        fighter.id,
        AddSkillData {
            skill_name: "Iron Will".to_string(),
            credits_increase: i32::MAX,
            xp_cost: 0,
            is_advance: false,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = FightersRepository::update(
        &db,
        fighter.id,
        UpdateFighterData {
            cost_adjustment: Some(i32::MIN),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // 帮派仍可读取且数值未变
    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, before.credits);
    assert_eq!(after.rating, before.rating);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn recalculation_repairs_a_drifted_rating() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    hire(&db, &world, "Vex").await;
    GangsRepository::adjust_rating(&db, world.gang.id, 999)
        .await
        .unwrap();

    let result = GangsRepository::recalculate_rating(&db, world.gang.id)
        .await
        .unwrap();
    assert_eq!(result.previous_rating, 65 + 999);
    assert_eq!(result.rating, 65);
    assert_rating_consistent(&db, world.gang.id).await;
}
