//! Local bodies, their wards, and the optional ward pagination.

mod common;

use axum::http::StatusCode;
use common::{admin_cookie, body_json, delete_auth, get, post_json_auth};
use sqlx::PgPool;

async fn create_local_body(pool: &PgPool, cookie: &str, name: &str) -> i64 {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/local-bodies",
        serde_json::json!({ "name": name }),
        cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_ward(pool: &PgPool, cookie: &str, local_body_id: i64, ward_no: &str) -> StatusCode {
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/local-bodies/{local_body_id}/wards"),
        serde_json::json!({ "ward_no": ward_no, "place_name": format!("Place {ward_no}") }),
        cookie,
    )
    .await
    .status()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wards_are_unpaginated_unless_both_page_and_limit_are_given(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let id = create_local_body(&pool, &cookie, "Kottayam").await;
    for n in 1..=8 {
        assert_eq!(create_ward(&pool, &cookie, id, &n.to_string()).await, StatusCode::CREATED);
    }

    let json = body_json(get(common::build_test_app(pool.clone()), &format!("/api/local-bodies/{id}/wards")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 8);
    assert!(json.get("pagination").is_none());

    let json = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/local-bodies/{id}/wards?page=1")).await,
    )
    .await;
    assert!(json.get("pagination").is_none());

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/local-bodies/{id}/wards?page=2&limit=6"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 8);
    assert_eq!(json["pagination"]["totalPages"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ward_numbers_are_unique_per_local_body(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let first = create_local_body(&pool, &cookie, "Pala").await;
    let second = create_local_body(&pool, &cookie, "Vaikom").await;

    assert_eq!(create_ward(&pool, &cookie, first, "1").await, StatusCode::CREATED);
    assert_eq!(create_ward(&pool, &cookie, first, "1").await, StatusCode::CONFLICT);
    assert_eq!(create_ward(&pool, &cookie, second, "1").await, StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ward_for_missing_local_body_is_404(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    assert_eq!(create_ward(&pool, &cookie, 4242, "1").await, StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool), "/api/local-bodies/4242/wards").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ward_must_belong_to_path_local_body(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let first = create_local_body(&pool, &cookie, "Ettumanoor").await;
    let second = create_local_body(&pool, &cookie, "Changanassery").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/local-bodies/{first}/wards"),
        serde_json::json!({ "ward_no": "3", "place_name": "Market" }),
        &cookie,
    )
    .await;
    let ward_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/local-bodies/{second}/wards/{ward_id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_local_body_removes_its_wards(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let id = create_local_body(&pool, &cookie, "Erattupetta").await;
    create_ward(&pool, &cookie, id, "1").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/local-bodies/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM local_body_wards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
