//! Repository for the `timelines` table.

use portfolio_core::search::PageRequest;
use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::timeline::{Timeline, TimelineRecord};

const COLUMNS: &str = "id, year, title, image_url, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR year ILIKE $1)";

pub struct TimelineRepo;

impl TimelineRepo {
    /// Newest year first; entries sharing a year are newest-created first.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Timeline>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM timelines {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM timelines {FILTER} \
             ORDER BY year DESC, created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Timeline>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Timeline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timelines WHERE id = $1");
        sqlx::query_as::<_, Timeline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, record: &TimelineRecord) -> Result<Timeline, sqlx::Error> {
        let query = format!(
            "INSERT INTO timelines (year, title, image_url) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Timeline>(&query)
            .bind(&record.year)
            .bind(&record.title)
            .bind(&record.image_url)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        record: &TimelineRecord,
    ) -> Result<Option<Timeline>, sqlx::Error> {
        let query = format!(
            "UPDATE timelines SET year = $2, title = $3, image_url = $4 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Timeline>(&query)
            .bind(id)
            .bind(&record.year)
            .bind(&record.title)
            .bind(&record.image_url)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Timeline>, sqlx::Error> {
        let query = format!("DELETE FROM timelines WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Timeline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
