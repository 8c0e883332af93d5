//! Repository for the `ente_nadu_cards` table.

use portfolio_core::content::DEFAULT_CARD_ICON;
use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::ente_nadu::{EnteNaduCard, EnteNaduCardInput};
use crate::rank::RankedTable;

const COLUMNS: &str = "\
    id, title, description, icon_name, icon_url, order_index, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

pub const RANK: RankedTable = RankedTable::unscoped("ente_nadu_cards", "order_index");

/// Provides data access for Ente Nadu cards.
pub struct EnteNaduCardRepo;

impl EnteNaduCardRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<EnteNaduCard>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM ente_nadu_cards {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM ente_nadu_cards {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, EnteNaduCard>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EnteNaduCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ente_nadu_cards WHERE id = $1");
        sqlx::query_as::<_, EnteNaduCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a card. A blank `icon_name` falls back to the default icon.
    pub async fn create(pool: &PgPool, input: &EnteNaduCardInput) -> Result<EnteNaduCard, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO ente_nadu_cards (title, description, icon_name, icon_url, order_index) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), COALESCE(NULLIF(BTRIM($3), ''), $6), \
                     NULLIF(BTRIM($4), ''), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EnteNaduCard>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_name)
            .bind(&input.icon_url)
            .bind(rank)
            .bind(DEFAULT_CARD_ICON)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EnteNaduCardInput,
    ) -> Result<Option<EnteNaduCard>, sqlx::Error> {
        let query = format!(
            "UPDATE ente_nadu_cards SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 icon_name = COALESCE(NULLIF(BTRIM($4), ''), icon_name), \
                 icon_url = NULLIF(BTRIM(COALESCE($5, icon_url)), ''), \
                 order_index = COALESCE($6, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EnteNaduCard>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_name)
            .bind(&input.icon_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<EnteNaduCard>, sqlx::Error> {
        let query = format!("DELETE FROM ente_nadu_cards WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, EnteNaduCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
