//! Repository for the `projects` table.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectFilter, ProjectInput};
use crate::rank::RankedTable;

const SELECT: &str = "\
    SELECT p.id, p.title, p.description, p.project_content, p.images, p.tags, p.year, \
           p.sector_id, s.name AS sector_name, p.local_body_id, lb.name AS local_body_name, \
           p.display_order, p.is_active, p.created_at, p.updated_at \
    FROM projects p \
    LEFT JOIN sectors s ON s.id = p.sector_id \
    LEFT JOIN local_bodies lb ON lb.id = p.local_body_id";

const FILTER: &str = "\
    WHERE ($1::text IS NULL OR p.title ILIKE $1 OR p.tags ILIKE $1 OR p.description ILIKE $1) \
      AND ($2::bigint IS NULL OR p.sector_id = $2) \
      AND ($3::bigint IS NULL OR p.local_body_id = $3) \
      AND ($4::int IS NULL OR p.year = $4) \
      AND ($5::bool IS NULL OR p.is_active = $5)";

pub const RANK: RankedTable = RankedTable::unscoped("projects", "display_order");

pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM projects p {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(&filter.search)
            .bind(filter.sector_id)
            .bind(filter.local_body_id)
            .bind(filter.year)
            .bind(filter.is_active)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "{SELECT} {FILTER} ORDER BY p.display_order ASC, p.id DESC LIMIT $6 OFFSET $7"
        );
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(&filter.search)
            .bind(filter.sector_id)
            .bind(filter.local_body_id)
            .bind(filter.year)
            .bind(filter.is_active)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("{SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &ProjectInput) -> Result<Project, sqlx::Error> {
        let rank: Rank = match input.display_order {
            Some(rank) => rank,
            None => RANK.next_rank(pool, None).await?,
        };
        let images = input.images.clone().unwrap_or_default();
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO projects \
                 (title, description, project_content, images, tags, year, sector_id, \
                  local_body_id, display_order, is_active) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), $4, \
                     NULLIF(BTRIM($5), ''), $6, $7, $8, $9, COALESCE($10, TRUE)) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.project_content)
        .bind(Json(&images))
        .bind(&input.tags)
        .bind(input.year)
        .bind(input.sector_id)
        .bind(input.local_body_id)
        .bind(rank)
        .bind(input.is_active)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Partial update. `images`, when given, replaces the whole array.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE projects SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 project_content = NULLIF(BTRIM(COALESCE($4, project_content)), ''), \
                 images = COALESCE($5, images), \
                 tags = NULLIF(BTRIM(COALESCE($6, tags)), ''), \
                 year = COALESCE($7, year), \
                 sector_id = COALESCE($8, sector_id), \
                 local_body_id = COALESCE($9, local_body_id), \
                 display_order = COALESCE($10, display_order), \
                 is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.project_content)
        .bind(input.images.as_ref().map(Json))
        .bind(&input.tags)
        .bind(input.year)
        .bind(input.sector_id)
        .bind(input.local_body_id)
        .bind(input.display_order)
        .bind(input.is_active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a project, returning its image URLs for reaping.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let images: Option<Json<Vec<String>>> =
            sqlx::query_scalar("DELETE FROM projects WHERE id = $1 RETURNING images")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(images.map(|Json(urls)| urls))
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        RANK.promote(pool, id).await
    }
}
