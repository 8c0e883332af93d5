//! Upload endpoints and reaping of replaced or orphaned files.

mod common;

use std::path::Path;

use axum::http::StatusCode;
use common::{
    admin_cookie, body_json, delete_auth, get, get_auth, post_json_auth, post_multipart_auth,
    put_json_auth, FilePart,
};
use sqlx::PgPool;

const PNG: FilePart<'static> = FilePart {
    field: "file",
    filename: "photo.png",
    content_type: "image/png",
    bytes: b"\x89PNG fake image bytes",
};

fn on_disk(root: &Path, url: &str) -> bool {
    let name = url.trim_start_matches("/uploads/");
    root.join(name).exists()
}

async fn upload(app: axum::Router, uri: &str, file: FilePart<'_>, cookie: &str) -> String {
    let response = post_multipart_auth(app, uri, &[], &[file], cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_file_and_serves_it(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = || common::build_test_app_with_uploads(pool.clone(), dir.path());

    let url = upload(app(), "/api/sectors/upload", PNG, &cookie).await;
    assert!(url.starts_with("/uploads/") && url.ends_with(".png"), "{url}");
    assert!(on_disk(dir.path(), &url));

    let response = get(app(), &url).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn icons_land_in_icon_subdir(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let url = upload(app, "/api/achievements/upload-icon", PNG, &cookie).await;
    assert!(url.starts_with("/uploads/icons/"), "{url}");
    assert!(on_disk(dir.path(), &url));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_content_type_is_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let pdf = FilePart {
        field: "file",
        filename: "doc.pdf",
        content_type: "application/pdf",
        bytes: b"%PDF",
    };
    let response = post_multipart_auth(app, "/api/sectors/upload", &[], &[pdf], &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_filename_does_not_choose_the_extension(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let disguised = FilePart {
        filename: "page.html",
        ..PNG
    };
    let url = upload(app, "/api/sectors/upload", disguised, &cookie).await;
    assert!(url.ends_with(".png"), "{url}");
    assert!(!url.contains("html"));
    assert!(on_disk(dir.path(), &url));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_file_field_is_400(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let response =
        post_multipart_auth(app, "/api/sectors/upload", &[("note", "hi")], &[], &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replaced_and_deleted_images_are_reaped(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = || common::build_test_app_with_uploads(pool.clone(), dir.path());

    let first = upload(app(), "/api/sectors/upload", PNG, &cookie).await;
    let response = post_json_auth(
        app(),
        "/api/sectors",
        serde_json::json!({ "name": "Water", "image_url": first }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Updating another field keeps the image.
    let response = put_json_auth(
        app(),
        &format!("/api/sectors/{id}"),
        serde_json::json!({ "description": "Drinking water" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(on_disk(dir.path(), &first));

    let second = upload(app(), "/api/sectors/upload", PNG, &cookie).await;
    let response = put_json_auth(
        app(),
        &format!("/api/sectors/{id}"),
        serde_json::json!({ "image_url": second }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(dir.path(), &first), "replaced image is reaped");
    assert!(on_disk(dir.path(), &second));

    let response = delete_auth(app(), &format!("/api/sectors/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(dir.path(), &second), "deleted row's image is reaped");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_update_reaps_dropped_images(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = || common::build_test_app_with_uploads(pool.clone(), dir.path());

    let a = upload(app(), "/api/projects/upload", PNG, &cookie).await;
    let b = upload(app(), "/api/projects/upload", PNG, &cookie).await;
    let response = post_json_auth(
        app(),
        "/api/projects",
        serde_json::json!({ "title": "Road", "images": [a, b] }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app(),
        &format!("/api/projects/{id}"),
        serde_json::json!({ "images": [b] }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(dir.path(), &a));
    assert!(on_disk(dir.path(), &b));

    let response = delete_auth(app(), &format!("/api/projects/{id}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(dir.path(), &b));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn media_centre_upload_reports_kind(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = || common::build_test_app_with_uploads(pool.clone(), dir.path());

    let video = FilePart {
        field: "file",
        filename: "clip.mp4",
        content_type: "video/mp4",
        bytes: b"fake mp4",
    };
    let response = post_multipart_auth(app(), "/api/media-centre/upload", &[], &[video], &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "video");

    let response = post_multipart_auth(app(), "/api/media-centre/upload", &[], &[PNG], &cookie).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "image");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn file_browser_lists_and_deletes(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let cookie = admin_cookie(&pool, "admin").await;
    let app = || common::build_test_app_with_uploads(pool.clone(), dir.path());

    let url = upload(app(), "/api/sectors/upload", PNG, &cookie).await;
    let filename = url.trim_start_matches("/uploads/").to_string();

    let json = body_json(get_auth(app(), "/api/gallery/admin/files", &cookie).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["filename"].as_str())
        .collect();
    assert!(names.contains(&filename.as_str()));

    let response = delete_auth(app(), &format!("/api/gallery/admin/files/{filename}"), &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(dir.path(), &url));

    let response = delete_auth(app(), "/api/gallery/admin/files/..%2Fsecret", &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
