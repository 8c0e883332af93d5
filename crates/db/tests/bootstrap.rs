use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    portfolio_db::health_check(&pool).await.unwrap();

    let tables = [
        "admin_users",
        "password_resets",
        "sectors",
        "local_bodies",
        "local_body_wards",
        "event_types",
        "events",
        "event_content",
        "event_media",
        "achievements",
        "core_vision_pillars",
        "ente_nadu_cards",
        "ente_nadu_testimonials",
        "manifesto_development_goals",
        "manifesto_long_term_commitments",
        "recognitions",
        "visual_stories",
        "timelines",
        "hero_sections",
        "media_sections",
        "media_posts",
        "projects",
        "contact_enquiries",
        "enquiry_communications",
    ];

    for table in tables {
        sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
    }
}

/// The hero singleton is seeded by the migration.
#[sqlx::test(migrations = "./migrations")]
async fn test_hero_singleton_seeded(pool: PgPool) {
    let hero = portfolio_db::repositories::HeroRepo::get(&pool).await.unwrap();
    assert_eq!(hero.map(|h| h.id), Some(1));
}

/// `updated_at` moves forward on update via the shared trigger.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (created, updated): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as(
            "INSERT INTO sectors (name, display_order) VALUES ('Health', 0) \
             RETURNING created_at, updated_at",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(created, updated);

    let bumped: chrono::DateTime<chrono::Utc> =
        sqlx::query_scalar("UPDATE sectors SET name = 'Healthcare' RETURNING updated_at")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(bumped >= updated);
}
