//! Repositories for `media_sections` and `media_posts`.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::media_centre::{
    MediaPost, MediaPostFilter, MediaPostInput, MediaSection, MediaSectionInput,
};
use crate::rank::RankedTable;

const SECTION_COLUMNS: &str = "\
    id, section_name, description, display_order, is_active, media_type, created_at, updated_at";

/// Post columns joined with the owning section's name. Requires the
/// `mp` / `ms` aliases.
const POST_SELECT: &str = "\
    SELECT mp.id, mp.section_id, ms.section_name, mp.title, mp.content, mp.thumbnail_url, \
           mp.video_url, mp.is_featured, mp.published_at, mp.created_at, mp.updated_at \
    FROM media_posts mp \
    JOIN media_sections ms ON ms.id = mp.section_id";

const POST_FILTER: &str = "\
    WHERE ($1::bigint IS NULL OR mp.section_id = $1) \
      AND ($2::bool IS NULL OR mp.is_featured = $2) \
      AND ($3::text IS NULL OR mp.title ILIKE $3)";

pub const SECTION_RANK: RankedTable = RankedTable::unscoped("media_sections", "display_order");

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

pub struct MediaSectionRepo;

impl MediaSectionRepo {
    /// Sections in display order; `active_only` hides disabled ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<MediaSection>, sqlx::Error> {
        let query = format!(
            "SELECT {SECTION_COLUMNS} FROM media_sections \
             WHERE ($1 = FALSE OR is_active) \
             ORDER BY {}",
            SECTION_RANK.order_by()
        );
        sqlx::query_as::<_, MediaSection>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaSection>, sqlx::Error> {
        let query = format!("SELECT {SECTION_COLUMNS} FROM media_sections WHERE id = $1");
        sqlx::query_as::<_, MediaSection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `media_type` must already be validated.
    pub async fn create(
        pool: &PgPool,
        input: &MediaSectionInput,
        media_type: &str,
    ) -> Result<MediaSection, sqlx::Error> {
        let rank: Rank = match input.display_order {
            Some(rank) => rank,
            None => SECTION_RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO media_sections (section_name, description, display_order, is_active, media_type) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), $3, COALESCE($4, TRUE), $5) \
             RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as::<_, MediaSection>(&query)
            .bind(&input.section_name)
            .bind(&input.description)
            .bind(rank)
            .bind(input.is_active)
            .bind(media_type)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MediaSectionInput,
        media_type: Option<&str>,
    ) -> Result<Option<MediaSection>, sqlx::Error> {
        let query = format!(
            "UPDATE media_sections SET \
                 section_name = COALESCE(NULLIF(BTRIM($2), ''), section_name), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 display_order = COALESCE($4, display_order), \
                 is_active = COALESCE($5, is_active), \
                 media_type = COALESCE($6, media_type) \
             WHERE id = $1 \
             RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as::<_, MediaSection>(&query)
            .bind(id)
            .bind(&input.section_name)
            .bind(&input.description)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(media_type)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section and, by cascade, its posts. Returns the thumbnail
    /// URLs those posts held, or `None` if the section did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let thumbnails: Vec<String> = sqlx::query_scalar(
            "SELECT thumbnail_url FROM media_posts \
             WHERE section_id = $1 AND thumbnail_url IS NOT NULL",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM media_sections WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(thumbnails))
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        SECTION_RANK.promote(pool, id).await
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

pub struct MediaPostRepo;

impl MediaPostRepo {
    /// Featured posts from active sections, newest first.
    pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<MediaPost>, sqlx::Error> {
        let query = format!(
            "{POST_SELECT} WHERE mp.is_featured AND ms.is_active \
             ORDER BY mp.published_at DESC, mp.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, MediaPost>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// One page of posts, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MediaPostFilter,
        page: &PageRequest,
    ) -> Result<(Vec<MediaPost>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM media_posts mp {POST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(filter.section_id)
            .bind(filter.is_featured)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "{POST_SELECT} {POST_FILTER} \
             ORDER BY mp.published_at DESC, mp.id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, MediaPost>(&query)
            .bind(filter.section_id)
            .bind(filter.is_featured)
            .bind(&filter.search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaPost>, sqlx::Error> {
        let query = format!("{POST_SELECT} WHERE mp.id = $1");
        sqlx::query_as::<_, MediaPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a post. `published_at` defaults to now.
    pub async fn create(pool: &PgPool, input: &MediaPostInput) -> Result<MediaPost, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO media_posts \
                 (section_id, title, content, thumbnail_url, video_url, is_featured, published_at) \
             VALUES ($1, BTRIM($2), NULLIF(BTRIM($3), ''), NULLIF(BTRIM($4), ''), \
                     NULLIF(BTRIM($5), ''), COALESCE($6, FALSE), COALESCE($7, NOW())) \
             RETURNING id",
        )
        .bind(input.section_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.thumbnail_url)
        .bind(&input.video_url)
        .bind(input.is_featured)
        .bind(input.published_at)
        .fetch_one(pool)
        .await?;

        let query = format!("{POST_SELECT} WHERE mp.id = $1");
        sqlx::query_as::<_, MediaPost>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MediaPostInput,
    ) -> Result<Option<MediaPost>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE media_posts SET \
                 section_id = COALESCE($2, section_id), \
                 title = COALESCE(NULLIF(BTRIM($3), ''), title), \
                 content = NULLIF(BTRIM(COALESCE($4, content)), ''), \
                 thumbnail_url = NULLIF(BTRIM(COALESCE($5, thumbnail_url)), ''), \
                 video_url = NULLIF(BTRIM(COALESCE($6, video_url)), ''), \
                 is_featured = COALESCE($7, is_featured), \
                 published_at = COALESCE($8, published_at) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(input.section_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.thumbnail_url)
        .bind(&input.video_url)
        .bind(input.is_featured)
        .bind(input.published_at)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a post, returning its thumbnail URL (if any) for reaping.
    /// The outer `None` means the post did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Option<String>>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM media_posts WHERE id = $1 RETURNING thumbnail_url")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
