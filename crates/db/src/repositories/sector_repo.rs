//! Repository for the `sectors` table.

use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::sector::{Sector, SectorInput};
use crate::rank::RankedTable;

const COLUMNS: &str = "id, name, description, image_url, display_order, created_at, updated_at";

pub const RANK: RankedTable = RankedTable::unscoped("sectors", "display_order");

pub struct SectorRepo;

impl SectorRepo {
    /// Every sector in display order. Sectors feed dropdowns, so the list
    /// is not paginated.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sectors ORDER BY {}", RANK.order_by());
        sqlx::query_as::<_, Sector>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sectors WHERE id = $1");
        sqlx::query_as::<_, Sector>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a sector. Duplicate names fail with `uq_sectors_name`.
    pub async fn create(pool: &PgPool, input: &SectorInput) -> Result<Sector, sqlx::Error> {
        let rank: Rank = match input.display_order {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO sectors (name, description, image_url, display_order) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sector>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SectorInput,
    ) -> Result<Option<Sector>, sqlx::Error> {
        let query = format!(
            "UPDATE sectors SET \
                 name = COALESCE(NULLIF(BTRIM($2), ''), name), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 image_url = NULLIF(BTRIM(COALESCE($4, image_url)), ''), \
                 display_order = COALESCE($5, display_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sector>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Sector>, sqlx::Error> {
        let query = format!("DELETE FROM sectors WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Sector>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
