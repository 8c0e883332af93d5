//! Repository for the `visual_stories` table.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::visual_story::{VisualStory, VisualStoryRecord};
use crate::rank::RankedTable;

const COLUMNS: &str = "\
    id, title, description, video_type, video_url, thumbnail_url, \
    order_index, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

pub const RANK: RankedTable = RankedTable::unscoped("visual_stories", "order_index");

pub struct VisualStoryRepo;

impl VisualStoryRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<VisualStory>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM visual_stories {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM visual_stories {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            RANK.order_by()
        );
        let rows = sqlx::query_as::<_, VisualStory>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VisualStory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visual_stories WHERE id = $1");
        sqlx::query_as::<_, VisualStory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rank for a story created without an explicit `order_index`.
    pub async fn next_rank(pool: &PgPool) -> Result<Rank, sqlx::Error> {
        RANK.next_rank(pool, None).await
    }

    pub async fn create(pool: &PgPool, record: &VisualStoryRecord) -> Result<VisualStory, sqlx::Error> {
        let query = format!(
            "INSERT INTO visual_stories \
                 (title, description, video_type, video_url, thumbnail_url, order_index) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisualStory>(&query)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.video_type)
            .bind(&record.video_url)
            .bind(&record.thumbnail_url)
            .bind(record.order_index)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every column with the merged record built by the handler.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        record: &VisualStoryRecord,
    ) -> Result<Option<VisualStory>, sqlx::Error> {
        let query = format!(
            "UPDATE visual_stories SET \
                 title = $2, description = $3, video_type = $4, video_url = $5, \
                 thumbnail_url = $6, order_index = $7 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VisualStory>(&query)
            .bind(id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.video_type)
            .bind(&record.video_url)
            .bind(&record.thumbnail_url)
            .bind(record.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<VisualStory>, sqlx::Error> {
        let query = format!("DELETE FROM visual_stories WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, VisualStory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
