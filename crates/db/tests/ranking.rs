//! Integration tests for display ranks: append on create, promote to top.

use portfolio_core::search::PageRequest;
use portfolio_db::models::achievement::AchievementInput;
use portfolio_db::models::ente_nadu::TestimonialInput;
use portfolio_db::repositories::{AchievementRepo, TestimonialRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn achievement(title: &str) -> AchievementInput {
    AchievementInput {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

fn quote(text: &str) -> TestimonialInput {
    TestimonialInput {
        quote: Some(text.to_string()),
        ..Default::default()
    }
}

async fn titles(pool: &PgPool) -> Vec<String> {
    let (rows, _) = AchievementRepo::list(pool, None, &PageRequest::new(None, Some(50), 10))
        .await
        .unwrap();
    rows.into_iter().map(|a| a.title).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_appends_ranks(pool: PgPool) {
    let a = AchievementRepo::create(&pool, &achievement("A")).await.unwrap();
    let b = AchievementRepo::create(&pool, &achievement("B")).await.unwrap();
    let c = AchievementRepo::create(&pool, &achievement("C")).await.unwrap();

    assert_eq!((a.order_index, b.order_index, c.order_index), (0, 1, 2));
    assert_eq!(titles(&pool).await, vec!["A", "B", "C"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_rank_is_kept(pool: PgPool) {
    let input = AchievementInput {
        order_index: Some(9),
        ..achievement("Pinned")
    };
    let row = AchievementRepo::create(&pool, &input).await.unwrap();
    assert_eq!(row.order_index, 9);

    let next = AchievementRepo::create(&pool, &achievement("Next")).await.unwrap();
    assert_eq!(next.order_index, 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_equal_ranks_newest_first(pool: PgPool) {
    for title in ["Old", "New"] {
        let input = AchievementInput {
            order_index: Some(0),
            ..achievement(title)
        };
        AchievementRepo::create(&pool, &input).await.unwrap();
    }
    assert_eq!(titles(&pool).await, vec!["New", "Old"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_moves_row_to_top(pool: PgPool) {
    AchievementRepo::create(&pool, &achievement("A")).await.unwrap();
    AchievementRepo::create(&pool, &achievement("B")).await.unwrap();
    let c = AchievementRepo::create(&pool, &achievement("C")).await.unwrap();

    assert!(AchievementRepo::promote(&pool, c.id).await.unwrap());
    assert_eq!(titles(&pool).await, vec!["C", "A", "B"]);

    let promoted = AchievementRepo::find_by_id(&pool, c.id).await.unwrap().unwrap();
    assert_eq!(promoted.order_index, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_promote_missing_row_changes_nothing(pool: PgPool) {
    let a = AchievementRepo::create(&pool, &achievement("A")).await.unwrap();

    assert!(!AchievementRepo::promote(&pool, 9999).await.unwrap());
    let unchanged = AchievementRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(unchanged.order_index, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_rank_when_omitted(pool: PgPool) {
    AchievementRepo::create(&pool, &achievement("A")).await.unwrap();
    let b = AchievementRepo::create(&pool, &achievement("B")).await.unwrap();

    let updated = AchievementRepo::update(&pool, b.id, &achievement("B2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "B2");
    assert_eq!(updated.order_index, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_testimonial_ranks_are_scoped_by_type(pool: PgPool) {
    let t1 = TestimonialRepo::create(&pool, "text", &quote("one")).await.unwrap();
    let t2 = TestimonialRepo::create(&pool, "text", &quote("two")).await.unwrap();
    let v1 = TestimonialRepo::create(&pool, "video", &quote("clip")).await.unwrap();

    assert_eq!((t1.order_index, t2.order_index), (0, 1));
    assert_eq!(v1.order_index, 0);

    assert!(TestimonialRepo::promote(&pool, t2.id).await.unwrap());

    let video = TestimonialRepo::find_by_id(&pool, v1.id).await.unwrap().unwrap();
    assert_eq!(video.order_index, 0, "other scope must not shift");

    let first = TestimonialRepo::find_by_id(&pool, t1.id).await.unwrap().unwrap();
    assert_eq!(first.order_index, 1);
}
