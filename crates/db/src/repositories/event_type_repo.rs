//! Repository for the `event_types` table.

use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::event_type::{EventType, EventTypeInput};

const COLUMNS: &str = "id, type_name, description, created_at, updated_at";

pub struct EventTypeRepo;

impl EventTypeRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types ORDER BY type_name ASC");
        sqlx::query_as::<_, EventType>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &EventTypeInput) -> Result<EventType, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_types (type_name, description) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventType>(&query)
            .bind(&input.type_name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EventTypeInput,
    ) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!(
            "UPDATE event_types SET \
                 type_name = COALESCE(NULLIF(BTRIM($2), ''), type_name), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), '') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventType>(&query)
            .bind(id)
            .bind(&input.type_name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
