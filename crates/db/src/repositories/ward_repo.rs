//! Repository for the `local_body_wards` table.
//!
//! Wards are always addressed through their local body; every query is
//! scoped by `local_body_id`.

use portfolio_core::search::PageRequest;
use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::local_body::{Ward, WardInput};

const COLUMNS: &str = "id, local_body_id, ward_no, place_name, created_at, updated_at";

const FILTER: &str = "\
    WHERE local_body_id = $1 \
      AND ($2::text IS NULL OR ward_no ILIKE $2 OR place_name ILIKE $2)";

/// Numeric ward numbers sort numerically; anything else sorts after them
/// as text.
const ORDER: &str = "\
    CASE WHEN ward_no ~ '^[0-9]{1,18}$' THEN ward_no::bigint END ASC NULLS LAST, ward_no ASC, id ASC";

pub struct WardRepo;

impl WardRepo {
    pub async fn list_all(
        pool: &PgPool,
        local_body_id: DbId,
        search: Option<&str>,
    ) -> Result<Vec<Ward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM local_body_wards {FILTER} ORDER BY {ORDER}");
        sqlx::query_as::<_, Ward>(&query)
            .bind(local_body_id)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    pub async fn list_page(
        pool: &PgPool,
        local_body_id: DbId,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Ward>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM local_body_wards {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(local_body_id)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM local_body_wards {FILTER} ORDER BY {ORDER} LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, Ward>(&query)
            .bind(local_body_id)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    /// Insert a ward. A duplicate number in the same local body fails with
    /// `uq_local_body_wards_ward_no`; an unknown local body fails the
    /// foreign key.
    pub async fn create(
        pool: &PgPool,
        local_body_id: DbId,
        input: &WardInput,
    ) -> Result<Ward, sqlx::Error> {
        let query = format!(
            "INSERT INTO local_body_wards (local_body_id, ward_no, place_name) \
             VALUES ($1, BTRIM($2), BTRIM($3)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ward>(&query)
            .bind(local_body_id)
            .bind(&input.ward_no)
            .bind(&input.place_name)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        local_body_id: DbId,
        id: DbId,
        input: &WardInput,
    ) -> Result<Option<Ward>, sqlx::Error> {
        let query = format!(
            "UPDATE local_body_wards SET ward_no = BTRIM($3), place_name = BTRIM($4) \
             WHERE id = $1 AND local_body_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ward>(&query)
            .bind(id)
            .bind(local_body_id)
            .bind(&input.ward_no)
            .bind(&input.place_name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, local_body_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM local_body_wards WHERE id = $1 AND local_body_id = $2")
            .bind(id)
            .bind(local_body_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
