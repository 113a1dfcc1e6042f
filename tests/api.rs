mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use common::*;
use gang_manager_lib::auth::USER_HEADER;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    user_id: Option<i32>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        request = request.header(USER_HEADER, user_id.to_string());
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check_needs_no_user() {
    let db = setup_db().await;
    let router = test_router(&db);

    let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn requests_without_a_known_user_are_unauthorized() {
    let db = setup_db().await;
    let router = test_router(&db);

    let (status, _) = send(&router, Method::GET, "/api/gangs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&router, Method::GET, "/api/gangs", Some(4242), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let db = setup_db().await;
    let user = create_user(&db, "ash", false).await;
    let admin = create_user(&db, "root", true).await;
    let router = test_router(&db);

    let (status, _) = send(&router, Method::GET, "/api/admin/gang-types", Some(user.id), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/admin/gang-types",
        Some(admin.id),
        Some(json!({ "gang_type": "House Cawdor", "alignment": "Law Abiding" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["gang_type"], "House Cawdor");

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/admin/log-level",
        Some(admin.id),
        Some(json!("debug")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("debug"));
}

#[tokio::test]
async fn only_the_owner_may_change_a_gang() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let rival = create_user(&db, "kade", false).await;
    let router = test_router(&db);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/gangs",
        Some(rival.id),
        Some(json!({ "name": "Iron Jackals", "gang_type_id": world.gang_type_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["credits"], STARTING_CREDITS);
    assert_eq!(body["rating"], 0);

    let uri = format!("/api/gangs/{}", world.gang.id);
    let (status, _) = send(
        &router,
        Method::PATCH,
        &uri,
        Some(rival.id),
        Some(json!({ "name": "Stolen" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 详情对其他用户可见
    let (status, body) = send(&router, Method::GET, &uri, Some(rival.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ash Wastes Crew");

    let (status, _) = send(&router, Method::DELETE, &uri, Some(world.user.id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&router, Method::GET, &uri, Some(rival.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn purchases_are_visible_in_cached_gang_details() {
    let db = setup_db().await;
    let world = seed_world(&db).await;
    let item_id = create_equipment(&db, "Frag Grenades", "wargear", 30).await;
    let router = test_router(&db);
    let uri = format!("/api/gangs/{}", world.gang.id);

    let (status, before) = send(&router, Method::GET, &uri, Some(world.user.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["credits"], STARTING_CREDITS);
    assert_eq!(before["stash"].as_array().unwrap().len(), 0);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/fighter-equipment",
        Some(world.user.id),
        Some(json!({ "gang_id": world.gang.id, "equipment_id": item_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, after) = send(&router, Method::GET, &uri, Some(world.user.id), None).await;
    assert_eq!(after["credits"], STARTING_CREDITS - 30);
    assert_eq!(after["stash"].as_array().unwrap().len(), 1);
    assert_eq!(after["stash"][0]["equipment_name"], "Frag Grenades");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/fighter-equipment",
        Some(world.user.id),
        Some(json!({ "gang_id": world.gang.id, "equipment_id": item_id, "manual_cost": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
