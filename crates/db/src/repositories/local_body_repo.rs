//! Repository for the `local_bodies` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::local_body::{LocalBody, LocalBodyInput};

const COLUMNS: &str = "\
    id, name, description, short_description, cover_image, population, area, \
    created_at, updated_at";

pub struct LocalBodyRepo;

impl LocalBodyRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<LocalBody>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM local_bodies ORDER BY name ASC");
        sqlx::query_as::<_, LocalBody>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LocalBody>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM local_bodies WHERE id = $1");
        sqlx::query_as::<_, LocalBody>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM local_bodies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &LocalBodyInput) -> Result<LocalBody, sqlx::Error> {
        let query = format!(
            "INSERT INTO local_bodies \
                 (name, description, short_description, cover_image, population, area) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), \
                     NULLIF(BTRIM($4), ''), NULLIF(BTRIM($5), ''), NULLIF(BTRIM($6), '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocalBody>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.cover_image)
            .bind(&input.population)
            .bind(&input.area)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &LocalBodyInput,
    ) -> Result<Option<LocalBody>, sqlx::Error> {
        let query = format!(
            "UPDATE local_bodies SET \
                 name = COALESCE(NULLIF(BTRIM($2), ''), name), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 short_description = NULLIF(BTRIM(COALESCE($4, short_description)), ''), \
                 cover_image = NULLIF(BTRIM(COALESCE($5, cover_image)), ''), \
                 population = NULLIF(BTRIM(COALESCE($6, population)), ''), \
                 area = NULLIF(BTRIM(COALESCE($7, area)), '') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocalBody>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.short_description)
            .bind(&input.cover_image)
            .bind(&input.population)
            .bind(&input.area)
            .fetch_optional(pool)
            .await
    }

    /// Delete a local body. Its wards cascade; events and projects keep
    /// their rows with `local_body_id` set to `NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<LocalBody>, sqlx::Error> {
        let query = format!("DELETE FROM local_bodies WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, LocalBody>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Name lookup for enquiry emails.
    pub async fn name_of(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM local_bodies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
