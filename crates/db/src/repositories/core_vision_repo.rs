//! Repository for the `core_vision_pillars` table.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::core_vision::{Pillar, PillarInput};
use crate::rank::RankedTable;

const COLUMNS: &str = "id, title, description, image_url, order_index, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

pub const RANK: RankedTable = RankedTable::unscoped("core_vision_pillars", "order_index");

pub struct PillarRepo;

impl PillarRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Pillar>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM core_vision_pillars {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM core_vision_pillars {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, Pillar>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pillar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM core_vision_pillars WHERE id = $1");
        sqlx::query_as::<_, Pillar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &PillarInput) -> Result<Pillar, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO core_vision_pillars (title, description, image_url, order_index) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pillar>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PillarInput,
    ) -> Result<Option<Pillar>, sqlx::Error> {
        let query = format!(
            "UPDATE core_vision_pillars SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 image_url = NULLIF(BTRIM(COALESCE($4, image_url)), ''), \
                 order_index = COALESCE($5, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pillar>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Pillar>, sqlx::Error> {
        let query = format!("DELETE FROM core_vision_pillars WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Pillar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
