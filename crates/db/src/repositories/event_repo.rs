//! Repository for `events`, `event_content`, and `event_media`.

use portfolio_core::search::PageRequest;
use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{
    Event, EventFilter, EventMedia, EventParagraph, EventRecord, EventSummary, NewEventMedia,
};

/// Column list for `events` queries.
const COLUMNS: &str = "\
    id, event_name, event_date, event_time, event_time_to, venue, short_description, \
    status, event_type_id, local_body_id, sector_id, created_at, updated_at";

/// `events` columns qualified with the `e` alias, for joined queries.
const E_COLUMNS: &str = "\
    e.id, e.event_name, e.event_date, e.event_time, e.event_time_to, e.venue, \
    e.short_description, e.status, e.event_type_id, e.local_body_id, e.sector_id, \
    e.created_at, e.updated_at";

/// Taxonomy names plus the first photo as a cover.
const SUMMARY_EXTRAS: &str = "\
    et.type_name, lb.name AS local_body_name, s.name AS sector_name, \
    (SELECT em.file_url FROM event_media em \
      WHERE em.event_id = e.id AND em.media_type = 'photo' \
      ORDER BY em.id ASC LIMIT 1) AS cover_image";

const JOINS: &str = "\
    LEFT JOIN event_types et ON et.id = e.event_type_id \
    LEFT JOIN local_bodies lb ON lb.id = e.local_body_id \
    LEFT JOIN sectors s ON s.id = e.sector_id";

const FILTER: &str = "\
    WHERE ($1::text IS NULL OR e.status = $1) \
      AND ($2::bigint IS NULL OR e.event_type_id = $2) \
      AND ($3::bigint IS NULL OR e.local_body_id = $3) \
      AND ($4::bigint IS NULL OR e.sector_id = $4) \
      AND ($5::int IS NULL OR EXTRACT(YEAR FROM e.event_date)::int = $5) \
      AND ($6::text IS NULL OR e.event_name ILIKE $6 OR e.venue ILIKE $6)";

const MEDIA_COLUMNS: &str = "\
    id, event_id, media_type, file_url, caption, thumbnail_url, youtube_url, created_at";

const CONTENT_COLUMNS: &str = "id, event_id, content_order, paragraph_text, created_at";

/// Provides data access for events and their content and media.
pub struct EventRepo;

impl EventRepo {
    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// One page of events, newest date first.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        page: &PageRequest,
    ) -> Result<(Vec<EventSummary>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM events e {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(&filter.status)
            .bind(filter.event_type_id)
            .bind(filter.local_body_id)
            .bind(filter.sector_id)
            .bind(filter.year)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {E_COLUMNS}, {SUMMARY_EXTRAS} FROM events e {JOINS} {FILTER} \
             ORDER BY e.event_date DESC, e.id DESC LIMIT $7 OFFSET $8"
        );
        let rows = sqlx::query_as::<_, EventSummary>(&query)
            .bind(&filter.status)
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

    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<EventSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {E_COLUMNS}, {SUMMARY_EXTRAS} FROM events e {JOINS} WHERE e.id = $1"
        );
        sqlx::query_as::<_, EventSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &PgPool, record: &EventRecord) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                 (event_name, event_date, event_time, event_time_to, venue, short_description, \
                  status, event_type_id, local_body_id, sector_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&record.event_name)
            .bind(record.event_date)
            .bind(record.event_time)
            .bind(record.event_time_to)
            .bind(&record.venue)
            .bind(&record.short_description)
            .bind(&record.status)
            .bind(record.event_type_id)
            .bind(record.local_body_id)
            .bind(record.sector_id)
            .fetch_one(pool)
            .await
    }

    /// Replace every column of an event, status included.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        record: &EventRecord,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET \
                 event_name = $2, event_date = $3, event_time = $4, event_time_to = $5, \
                 venue = $6, short_description = $7, status = $8, \
                 event_type_id = $9, local_body_id = $10, sector_id = $11 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&record.event_name)
            .bind(record.event_date)
            .bind(record.event_time)
            .bind(record.event_time_to)
            .bind(&record.venue)
            .bind(&record.short_description)
            .bind(&record.status)
            .bind(record.event_type_id)
            .bind(record.local_body_id)
            .bind(record.sector_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event and return the media rows it held, so their files
    /// can be reaped. `None` means the event did not exist.
    ///
    /// The event row is locked before the media snapshot. A concurrent
    /// [`Self::add_media`] needs a key-share lock on the same row for its
    /// foreign key, so it waits and then fails instead of attaching a file
    /// that would never be reaped.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<EventMedia>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let media_query =
            format!("SELECT {MEDIA_COLUMNS} FROM event_media WHERE event_id = $1 ORDER BY id");
        let media = sqlx::query_as::<_, EventMedia>(&media_query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(media))
    }

    // -----------------------------------------------------------------------
    // Content paragraphs
    // -----------------------------------------------------------------------

    pub async fn list_content(pool: &PgPool, event_id: DbId) -> Result<Vec<EventParagraph>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM event_content WHERE event_id = $1 \
             ORDER BY content_order ASC, id ASC"
        );
        sqlx::query_as::<_, EventParagraph>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Replace all paragraphs of an event in one transaction.
    ///
    /// `paragraphs` holds `(content_order, paragraph_text)` pairs. Returns
    /// `None` when the event does not exist; nothing is modified then.
    pub async fn replace_content(
        pool: &PgPool,
        event_id: DbId,
        paragraphs: &[(i32, String)],
    ) -> Result<Option<Vec<EventParagraph>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM event_content WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        let orders: Vec<i32> = paragraphs.iter().map(|(order, _)| *order).collect();
        let texts: Vec<String> = paragraphs.iter().map(|(_, text)| text.clone()).collect();
        sqlx::query(
            "INSERT INTO event_content (event_id, content_order, paragraph_text) \
             SELECT $1, t.content_order, t.paragraph_text \
             FROM UNNEST($2::int[], $3::text[]) AS t(content_order, paragraph_text)",
        )
        .bind(event_id)
        .bind(&orders)
        .bind(&texts)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM event_content WHERE event_id = $1 \
             ORDER BY content_order ASC, id ASC"
        );
        let content = sqlx::query_as::<_, EventParagraph>(&query)
            .bind(event_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(content))
    }

    // -----------------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------------

    pub async fn list_media(pool: &PgPool, event_id: DbId) -> Result<Vec<EventMedia>, sqlx::Error> {
        let query = format!(
            "SELECT {MEDIA_COLUMNS} FROM event_media WHERE event_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, EventMedia>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a media row. Fails the foreign key if the event was deleted
    /// in the meantime.
    pub async fn add_media(pool: &PgPool, media: &NewEventMedia) -> Result<EventMedia, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_media \
                 (event_id, media_type, file_url, caption, thumbnail_url, youtube_url) \
             VALUES ($1, $2, $3, NULLIF(BTRIM($4), ''), $5, $6) \
             RETURNING {MEDIA_COLUMNS}"
        );
        sqlx::query_as::<_, EventMedia>(&query)
            .bind(media.event_id)
            .bind(&media.media_type)
            .bind(&media.file_url)
            .bind(&media.caption)
            .bind(&media.thumbnail_url)
            .bind(&media.youtube_url)
            .fetch_one(pool)
            .await
    }

    /// Delete one media row, returning it so its files can be reaped.
    pub async fn delete_media(pool: &PgPool, media_id: DbId) -> Result<Option<EventMedia>, sqlx::Error> {
        let query = format!("DELETE FROM event_media WHERE id = $1 RETURNING {MEDIA_COLUMNS}");
        sqlx::query_as::<_, EventMedia>(&query)
            .bind(media_id)
            .fetch_optional(pool)
            .await
    }
}
