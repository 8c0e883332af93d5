//! Repository for the `ente_nadu_testimonials` table.
//!
//! Testimonials are ranked per `type`: promoting a video testimonial
//! never shifts text testimonials.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::ente_nadu::{Testimonial, TestimonialInput};
use crate::rank::RankedTable;

const COLUMNS: &str = "\
    id, type, author_name, house_name, quote, avatar_url, video_url, \
    thumbnail_url, caption, order_index, created_at, updated_at";

/// `$1` = type filter, `$2` = search pattern; either may be `NULL`.
const FILTER: &str = "\
    WHERE ($1::text IS NULL OR type = $1) \
      AND ($2::text IS NULL OR author_name ILIKE $2 OR quote ILIKE $2 OR caption ILIKE $2)";

pub const RANK: RankedTable = RankedTable::scoped("ente_nadu_testimonials", "order_index", "type");

pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn list(
        pool: &PgPool,
        kind: Option<&str>,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Testimonial>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM ente_nadu_testimonials {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(kind)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM ente_nadu_testimonials {FILTER} \
             ORDER BY {} LIMIT $3 OFFSET $4",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, Testimonial>(&query)
            .bind(kind)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ente_nadu_testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a testimonial. `kind` is the validated type; a missing rank
    /// appends to the end of that type's list.
    pub async fn create(
        pool: &PgPool,
        kind: &str,
        input: &TestimonialInput,
    ) -> Result<Testimonial, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => RANK.next_rank(pool, Some(kind)).await?,
        };
        let query = format!(
            "INSERT INTO ente_nadu_testimonials \
                 (type, author_name, house_name, quote, avatar_url, video_url, \
                  thumbnail_url, caption, order_index) \
             VALUES ($1, NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), NULLIF(BTRIM($4), ''), \
                     NULLIF(BTRIM($5), ''), NULLIF(BTRIM($6), ''), NULLIF(BTRIM($7), ''), \
                     NULLIF(BTRIM($8), ''), $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(kind)
            .bind(&input.author_name)
            .bind(&input.house_name)
            .bind(&input.quote)
            .bind(&input.avatar_url)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.caption)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        kind: &str,
        input: &TestimonialInput,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE ente_nadu_testimonials SET \
                 type = $2, \
                 author_name = NULLIF(BTRIM(COALESCE($3, author_name)), ''), \
                 house_name = NULLIF(BTRIM(COALESCE($4, house_name)), ''), \
                 quote = NULLIF(BTRIM(COALESCE($5, quote)), ''), \
                 avatar_url = NULLIF(BTRIM(COALESCE($6, avatar_url)), ''), \
                 video_url = NULLIF(BTRIM(COALESCE($7, video_url)), ''), \
                 thumbnail_url = NULLIF(BTRIM(COALESCE($8, thumbnail_url)), ''), \
                 caption = NULLIF(BTRIM(COALESCE($9, caption)), ''), \
                 order_index = COALESCE($10, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(kind)
            .bind(&input.author_name)
            .bind(&input.house_name)
            .bind(&input.quote)
            .bind(&input.avatar_url)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.caption)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("DELETE FROM ente_nadu_testimonials WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a testimonial to the top of its own type.
    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
