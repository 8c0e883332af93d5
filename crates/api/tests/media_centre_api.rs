//! Media centre sections and posts, plus the public project listings.

mod common;

use axum::http::StatusCode;
use common::{admin_cookie, body_json, get, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn create(pool: &PgPool, cookie: &str, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(common::build_test_app(pool.clone()), uri, body, cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inactive_sections_are_hidden_from_public(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let live = create(
        &pool,
        &cookie,
        "/api/media-centre/sections",
        serde_json::json!({ "section_name": "Press" }),
    )
    .await;
    assert_eq!(live["media_type"], "article");
    let hidden = create(
        &pool,
        &cookie,
        "/api/media-centre/sections",
        serde_json::json!({ "section_name": "Drafts", "is_active": false, "media_type": "video" }),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/media-centre/sections").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/media-centre/sections/all", &cookie).await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/media-centre/sections/{}/posts", hidden["id"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn section_media_type_is_validated(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/media-centre/sections",
        serde_json::json!({ "section_name": "Pods", "media_type": "podcast" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn latest_lists_featured_posts_of_active_sections(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let section = create(
        &pool,
        &cookie,
        "/api/media-centre/sections",
        serde_json::json!({ "section_name": "News" }),
    )
    .await;
    let section_id = section["id"].as_i64().unwrap();
    for (title, featured) in [("Featured", true), ("Plain", false)] {
        create(
            &pool,
            &cookie,
            "/api/media-centre/posts",
            serde_json::json!({ "section_id": section_id, "title": title, "is_featured": featured }),
        )
        .await;
    }

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/media-centre/latest").await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Featured"]);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/media-centre/sections/{section_id}"),
        serde_json::json!({ "is_active": false }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(common::build_test_app(pool), "/api/media-centre/latest").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn post_needs_existing_section(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/media-centre/posts",
        serde_json::json!({ "section_id": 999, "title": "Orphan" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/media-centre/posts",
        serde_json::json!({ "title": "No section" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_projects_only_show_active(pool: PgPool) {
    let cookie = admin_cookie(&pool, "admin").await;
    create(
        &pool,
        &cookie,
        "/api/projects",
        serde_json::json!({ "title": "Library", "year": 2024 }),
    )
    .await;
    create(
        &pool,
        &cookie,
        "/api/projects",
        serde_json::json!({ "title": "Hidden library", "year": 2024, "is_active": false }),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/projects/public/year/2024").await).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "Library");

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/projects/public/search?q=library").await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 1);

    let response = get(common::build_test_app(pool.clone()), "/api/projects/public/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get_auth(common::build_test_app(pool), "/api/projects/all", &cookie).await).await;
    assert_eq!(json["pagination"]["total"], 2);
}
