//! Repository for the `recognitions` table.

use portfolio_core::content::DEFAULT_RECOGNITION_ICON;
use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::recognition::{Recognition, RecognitionInput};
use crate::rank::RankedTable;

const COLUMNS: &str = "id, description, icon_name, icon_url, order_index, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR description ILIKE $1)";

pub const RANK: RankedTable = RankedTable::unscoped("recognitions", "order_index");

pub struct RecognitionRepo;

impl RecognitionRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Recognition>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM recognitions {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM recognitions {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, Recognition>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recognition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recognitions WHERE id = $1");
        sqlx::query_as::<_, Recognition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &RecognitionInput) -> Result<Recognition, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO recognitions (description, icon_name, icon_url, order_index) \
             VALUES (BTRIM($1), COALESCE(NULLIF(BTRIM($2), ''), $5), NULLIF(BTRIM($3), ''), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recognition>(&query)
            .bind(&input.description)
            .bind(&input.icon_name)
            .bind(&input.icon_url)
            .bind(rank)
            .bind(DEFAULT_RECOGNITION_ICON)
            .fetch_one(pool)
            .await
    }

    /// Partial update: every field is optional.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RecognitionInput,
    ) -> Result<Option<Recognition>, sqlx::Error> {
        let query = format!(
            "UPDATE recognitions SET \
                 description = COALESCE(NULLIF(BTRIM($2), ''), description), \
                 icon_name = COALESCE(NULLIF(BTRIM($3), ''), icon_name), \
                 icon_url = NULLIF(BTRIM(COALESCE($4, icon_url)), ''), \
                 order_index = COALESCE($5, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recognition>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.icon_name)
            .bind(&input.icon_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Recognition>, sqlx::Error> {
        let query = format!("DELETE FROM recognitions WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Recognition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
