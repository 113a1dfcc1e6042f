mod common;

use common::*;
use gang_manager_lib::database::dto::{
    BuyEquipmentData, DiscountInput, EffectTypeInput, ModifierInput, UpdateFighterData,
};
use gang_manager_lib::database::repository::catalog_repository::CatalogRepository;
use gang_manager_lib::database::repository::details_repository::DetailsRepository;
use gang_manager_lib::database::repository::fighter_equipment_repository::FighterEquipmentRepository;
use gang_manager_lib::database::repository::fighters_repository::FightersRepository;
use gang_manager_lib::entity::prelude::*;
use gang_manager_lib::error::AppError;
use sea_orm::{EntityTrait, PaginatorTrait};

fn buy(gang_id: i32, fighter_id: Option<i32>, equipment_id: i32) -> BuyEquipmentData {
    BuyEquipmentData {
        gang_id,
        fighter_id,
        vehicle_id: None,
        equipment_id,
        manual_cost: None,
        is_master_crafted: false,
    }
}

#[tokio::test]
async fn purchase_debits_exact_cost_and_raises_rating() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let lasgun = create_equipment(&db, "Lasgun", "weapon", 15).await;

    let before = gang(&db, world.gang.id).await;
    assert_eq!(before.credits, STARTING_CREDITS - 65);
    assert_eq!(before.rating, 65);

    let result = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), lasgun))
        .await
        .unwrap();
    assert_eq!(result.price.final_cost, 15);
    assert_eq!(result.rating_delta, 15);
    assert_eq!(result.gang.credits, before.credits - 15);
    assert_eq!(result.gang.rating, before.rating + 15);
    assert_eq!(result.equipment.original_cost, 15);

    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn deleting_equipment_restores_credits_and_rating() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let plasma = create_equipment(&db, "Plasma pistol", "weapon", 50).await;
    let before = gang(&db, world.gang.id).await;

    let bought = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), plasma))
        .await
        .unwrap();
    let removed = FighterEquipmentRepository::delete(&db, bought.equipment.id)
        .await
        .unwrap();

    assert_eq!(removed.refund, 50);
    assert_eq!(removed.rating_delta, -50);
    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, before.credits);
    assert_eq!(after.rating, before.rating);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn master_crafted_rounds_up_for_weapons_only() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let autogun = create_equipment(&db, "Autogun", "weapon", 42).await;
    let armour = create_equipment(&db, "Flak armour", "wargear", 42).await;

    let mut data = buy(world.gang.id, Some(fighter.id), autogun);
    data.is_master_crafted = true;
    let weapon = FighterEquipmentRepository::purchase(&db, data).await.unwrap();
    // 42 × 1.25 = 52.5 → 55
    assert_eq!(weapon.price.final_cost, 55);
    assert!(weapon.equipment.is_master_crafted);

    let mut data = buy(world.gang.id, Some(fighter.id), armour);
    data.is_master_crafted = true;
    let wargear = FighterEquipmentRepository::purchase(&db, data).await.unwrap();
    assert_eq!(wargear.price.final_cost, 42);
    assert!(!wargear.equipment.is_master_crafted);

    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn unaffordable_purchase_leaves_gang_unchanged() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let lascannon = create_equipment(&db, "Lascannon", "weapon", 5000).await;
    let before = gang(&db, world.gang.id).await;

    let err = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), lascannon))
        .await
        .unwrap_err();
    match err {
        AppError::InsufficientCredits {
            required,
            available,
        } => {
            assert_eq!(required, 5000);
            assert_eq!(available, before.credits);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, before.credits);
    assert_eq!(after.rating, before.rating);
    assert_eq!(FighterEquipment::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn negative_manual_cost_is_rejected() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let knife = create_equipment(&db, "Knife", "weapon", 5).await;

    let mut data = buy(world.gang.id, None, knife);
    data.manual_cost = Some(-10);
    let err = FighterEquipmentRepository::purchase(&db, data).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn oversized_manual_cost_is_rejected_without_charging() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let autogun = create_equipment(&db, "Autogun", "weapon", 15).await;
    let before = gang(&db, world.gang.id).await;

    let mut data = buy(world.gang.id, Some(fighter.id), autogun);
    data.manual_cost = Some(20_000_000);
    data.is_master_crafted = true;
    let err = FighterEquipmentRepository::purchase(&db, data).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, before.credits);
    assert_eq!(after.rating, before.rating);
}

#[tokio::test]
async fn stash_purchase_costs_credits_but_not_rating() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let grenade = create_equipment(&db, "Frag grenades", "wargear", 30).await;

    let result = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, None, grenade))
        .await
        .unwrap();
    assert_eq!(result.rating_delta, 0);
    assert_eq!(result.gang.credits, STARTING_CREDITS - 30);
    assert_eq!(result.gang.rating, 0);

    let stash = FighterEquipmentRepository::list_stash(&db, world.gang.id)
        .await
        .unwrap();
    assert_eq!(stash.len(), 1);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn fighter_type_discount_beats_gang_type_discount_and_manual_cost_wins() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;

    let mut input = equipment_input("Needle rifle", "weapon", 60);
    input.discounts = vec![
        DiscountInput {
            gang_type_id: Some(world.gang_type_id),
            fighter_type_id: None,
            adjusted_cost: 50,
        },
        DiscountInput {
            gang_type_id: None,
            fighter_type_id: Some(world.fighter_type_id),
            adjusted_cost: 40,
        },
    ];
    let rifle = CatalogRepository::create_equipment(&db, input)
        .await
        .unwrap()
        .equipment
        .id;

    let on_fighter = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), rifle))
        .await
        .unwrap();
    assert_eq!(on_fighter.price.final_cost, 40);

    let in_stash = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, None, rifle))
        .await
        .unwrap();
    assert_eq!(in_stash.price.final_cost, 50);

    let mut data = buy(world.gang.id, None, rifle);
    data.manual_cost = Some(35);
    let manual = FighterEquipmentRepository::purchase(&db, data).await.unwrap();
    assert_eq!(manual.price.final_cost, 35);
    assert_eq!(manual.price.discounted_cost, 50);
}

#[tokio::test]
async fn equipment_effects_are_created_and_counted() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let stimm = create_equipment(&db, "Stimm-slug stash", "wargear", 30).await;
    CatalogRepository::create_effect_type(
        &db,
        EffectTypeInput {
            effect_name: "Stimmed".to_string(),
            effect_category: "equipment".to_string(),
            equipment_id: Some(stimm),
            credits_increase: 10,
            modifiers: vec![ModifierInput {
                stat_name: "strength".to_string(),
                numeric_value: 1,
            }],
        },
    )
    .await
    .unwrap();

    let result = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), stimm))
        .await
        .unwrap();
    assert_eq!(result.effects.len(), 1);
    assert_eq!(result.effects[0].modifiers.len(), 1);
    assert_eq!(result.effects[0].effect.fighter_id, Some(fighter.id));
    assert_eq!(result.rating_delta, 40);

    let details = DetailsRepository::gang_details(&db, world.gang.id)
        .await
        .unwrap();
    let view = &details.fighters[0];
    assert_eq!(view.effective_stats.strength, 4);
    assert_eq!(view.total_cost, 65 + 30 + 10);
    assert_eq!(details.computed_rating, details.gang.rating);

    let removed = FighterEquipmentRepository::delete(&db, result.equipment.id)
        .await
        .unwrap();
    assert_eq!(removed.rating_delta, -40);
    assert_eq!(FighterEffects::find().count(&db).await.unwrap(), 0);
    assert_rating_consistent(&db, world.gang.id).await;
}

#[tokio::test]
async fn exotic_beasts_report_zero_credits_and_leave_with_their_equipment() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let owner = hire(&db, &world, "Beastmaster").await;

    let collar = create_equipment(&db, "Spiked collar", "wargear", 0).await;
    let cyber_mastiff =
        create_fighter_type(&db, None, "Cyber-mastiff", 100, vec![collar]).await;
    let mut input = equipment_input("Cyber-mastiff", "wargear", 100);
    input.beast_fighter_type_ids = vec![cyber_mastiff];
    let mastiff_item = CatalogRepository::create_equipment(&db, input)
        .await
        .unwrap()
        .equipment
        .id;

    let before = gang(&db, world.gang.id).await;
    let result = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(owner.id), mastiff_item))
        .await
        .unwrap();
    assert_eq!(result.beasts.len(), 1);
    let beast = &result.beasts[0];
    assert_eq!(beast.credits, 100);
    // 异兽本身不计入评分，只计入购买花费
    assert_eq!(result.rating_delta, 100);
    assert_eq!(result.gang.credits, before.credits - 100);
    assert_rating_consistent(&db, world.gang.id).await;

    let details = DetailsRepository::gang_details(&db, world.gang.id)
        .await
        .unwrap();
    let pet = details
        .fighters
        .iter()
        .find(|f| f.fighter.id == beast.id)
        .unwrap();
    assert_eq!(pet.fighter.credits, 0);
    assert_eq!(pet.owner_id, Some(owner.id));
    assert_eq!(pet.equipment.len(), 1);
    assert_eq!(pet.equipment[0].item.purchase_cost, 0);

    let removed = FighterEquipmentRepository::delete(&db, result.equipment.id)
        .await
        .unwrap();
    assert_eq!(removed.removed_beasts, vec![beast.id]);
    assert!(Fighters::find_by_id(beast.id).one(&db).await.unwrap().is_none());
    let after = gang(&db, world.gang.id).await;
    assert_eq!(after.credits, before.credits);
    assert_eq!(after.rating, before.rating);
}

#[tokio::test]
async fn equipment_on_inactive_fighter_does_not_count() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let fighter = hire(&db, &world, "Vex").await;
    let sword = create_equipment(&db, "Power sword", "weapon", 50).await;
    FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), sword))
        .await
        .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 115);

    FightersRepository::update(
        &db,
        fighter.id,
        UpdateFighterData {
            retired: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(gang(&db, world.gang.id).await.rating, 0);

    let result = FighterEquipmentRepository::purchase(&db, buy(world.gang.id, Some(fighter.id), sword))
        .await
        .unwrap();
    assert_eq!(result.rating_delta, 0);
    assert_rating_consistent(&db, world.gang.id).await;
}
