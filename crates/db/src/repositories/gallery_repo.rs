//! Read-only views over `event_media` for the public gallery and the
//! admin media list.

use portfolio_core::search::PageRequest;
use sqlx::PgPool;

use crate::models::event::{EventFilter, GalleryItem};

const SELECT: &str = "\
    SELECT em.id, em.event_id, em.media_type, em.file_url, em.caption, em.thumbnail_url, \
           em.youtube_url, em.created_at, \
           e.event_name, e.event_date, e.event_type_id, et.type_name, \
           e.local_body_id, lb.name AS local_body_name, e.sector_id, s.name AS sector_name \
    FROM event_media em \
    JOIN events e ON e.id = em.event_id \
    LEFT JOIN event_types et ON et.id = e.event_type_id \
    LEFT JOIN local_bodies lb ON lb.id = e.local_body_id \
    LEFT JOIN sectors s ON s.id = e.sector_id";

const FILTER: &str = "\
    WHERE ($1::text IS NULL OR em.media_type = $1) \
      AND ($2::bigint IS NULL OR e.event_type_id = $2) \
      AND ($3::bigint IS NULL OR e.local_body_id = $3) \
      AND ($4::bigint IS NULL OR e.sector_id = $4) \
      AND ($5::int IS NULL OR EXTRACT(YEAR FROM e.event_date)::int = $5) \
      AND ($6::text IS NULL OR e.event_name ILIKE $6 OR em.caption ILIKE $6)";

pub struct GalleryRepo;

impl GalleryRepo {
    /// Every media item of `media_type` matching the filter, ordered by
    /// event type name (untyped last) and then newest event first.
    pub async fn list(
        pool: &PgPool,
        media_type: &str,
        filter: &EventFilter,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "{SELECT} {FILTER} \
             ORDER BY et.type_name ASC NULLS LAST, e.event_date DESC, em.id DESC"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(media_type)
            .bind(filter.event_type_id)
            .bind(filter.local_body_id)
            .bind(filter.sector_id)
            .bind(filter.year)
            .bind(&filter.search)
            .fetch_all(pool)
            .await
    }

    /// Flat, paginated list for the admin media screen. `media_type` may
    /// be `None` to include both photos and videos.
    pub async fn list_page(
        pool: &PgPool,
        media_type: Option<&str>,
        filter: &EventFilter,
        page: &PageRequest,
    ) -> Result<(Vec<GalleryItem>, i64), sqlx::Error> {
        let count = format!(
            "SELECT COUNT(*) FROM event_media em JOIN events e ON e.id = em.event_id {FILTER}"
        );
        let total: i64 = sqlx::query_scalar(&count)
            .bind(media_type)
            .bind(filter.event_type_id)
            .bind(filter.local_body_id)
            .bind(filter.sector_id)
            .bind(filter.year)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        let query = format!("{SELECT} {FILTER} ORDER BY em.created_at DESC, em.id DESC LIMIT $7 OFFSET $8");
        let rows = sqlx::query_as::<_, GalleryItem>(&query)
            .bind(media_type)
            .bind(filter.event_type_id)
            .bind(filter.local_body_id)
            .bind(filter.sector_id)
            .bind(filter.year)
            .bind(&filter.search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }
}
