//! Repository for the `achievements` table.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::achievement::{Achievement, AchievementInput};
use crate::rank::RankedTable;

/// Column list for `achievements` queries.
const COLUMNS: &str = "id, title, description, icon_url, order_index, created_at, updated_at";

/// Predicate shared by the count and page queries. `$1` is an `ILIKE`
/// pattern or `NULL`.
const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

pub const RANK: RankedTable = RankedTable::unscoped("achievements", "order_index");

/// Provides data access for achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    /// One page of achievements in display order, plus the filtered total.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Achievement>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM achievements {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM achievements {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, Achievement>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements WHERE id = $1");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an achievement. A missing `order_index` appends it to the end.
    pub async fn create(pool: &PgPool, input: &AchievementInput) -> Result<Achievement, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO achievements (title, description, icon_url, order_index) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    /// Update an achievement. Omitted fields keep their value; an empty
    /// string clears an optional field.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AchievementInput,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "UPDATE achievements SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 icon_url = NULLIF(BTRIM(COALESCE($4, icon_url)), ''), \
                 order_index = COALESCE($5, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    /// Delete an achievement, returning the removed row so its icon can be
    /// reaped.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!("DELETE FROM achievements WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Achievement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move an achievement to the top. Returns `false` if it does not exist.
    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
