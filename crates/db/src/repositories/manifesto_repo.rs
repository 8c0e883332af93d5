//! Repositories for the two manifesto tables.

use portfolio_core::search::PageRequest;
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

use crate::models::manifesto::{
    DevelopmentGoal, DevelopmentGoalInput, LongTermCommitment, LongTermCommitmentInput,
};
use crate::rank::RankedTable;

const GOAL_COLUMNS: &str = "id, title, description, order_index, created_at, updated_at";

const COMMITMENT_COLUMNS: &str = "\
    id, title, description, icon_url, order_index, created_at, updated_at";

const FILTER: &str = "WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

pub const GOAL_RANK: RankedTable =
    RankedTable::unscoped("manifesto_development_goals", "order_index");

pub const COMMITMENT_RANK: RankedTable =
    RankedTable::unscoped("manifesto_long_term_commitments", "order_index");

// ---------------------------------------------------------------------------
// Development goals
// ---------------------------------------------------------------------------

pub struct DevelopmentGoalRepo;

impl DevelopmentGoalRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<DevelopmentGoal>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM manifesto_development_goals {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {GOAL_COLUMNS} FROM manifesto_development_goals {FILTER} \
             ORDER BY {} LIMIT $2 OFFSET $3",
            GOAL_RANK.order_by()
        );
        let rows = sqlx::query_as::<_, DevelopmentGoal>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn create(
        pool: &PgPool,
        input: &DevelopmentGoalInput,
    ) -> Result<DevelopmentGoal, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => GOAL_RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO manifesto_development_goals (title, description, order_index) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), $3) \
             RETURNING {GOAL_COLUMNS}"
        );
        sqlx::query_as::<_, DevelopmentGoal>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DevelopmentGoalInput,
    ) -> Result<Option<DevelopmentGoal>, sqlx::Error> {
        let query = format!(
            "UPDATE manifesto_development_goals SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 order_index = COALESCE($4, order_index) \
             WHERE id = $1 \
             RETURNING {GOAL_COLUMNS}"
        );
        sqlx::query_as::<_, DevelopmentGoal>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manifesto_development_goals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        GOAL_RANK.promote(pool, id).await
    }
}

// ---------------------------------------------------------------------------
// Long-term commitments
// ---------------------------------------------------------------------------

pub struct LongTermCommitmentRepo;

impl LongTermCommitmentRepo {
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<LongTermCommitment>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM manifesto_long_term_commitments {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COMMITMENT_COLUMNS} FROM manifesto_long_term_commitments {FILTER} \
             ORDER BY {} LIMIT $2 OFFSET $3",
            COMMITMENT_RANK.order_by()
        );
        let rows = sqlx::query_as::<_, LongTermCommitment>(&query)
            .bind(search)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LongTermCommitment>, sqlx::Error> {
        let query =
            format!("SELECT {COMMITMENT_COLUMNS} FROM manifesto_long_term_commitments WHERE id = $1");
        sqlx::query_as::<_, LongTermCommitment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &LongTermCommitmentInput,
    ) -> Result<LongTermCommitment, sqlx::Error> {
        let rank: Rank = match input.order_index {
            Some(rank) => rank,
            None => COMMITMENT_RANK.next_rank(pool, None).await?,
        };
        let query = format!(
            "INSERT INTO manifesto_long_term_commitments (title, description, icon_url, order_index) \
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), $4) \
             RETURNING {COMMITMENT_COLUMNS}"
        );
        sqlx::query_as::<_, LongTermCommitment>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(rank)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &LongTermCommitmentInput,
    ) -> Result<Option<LongTermCommitment>, sqlx::Error> {
        let query = format!(
            "UPDATE manifesto_long_term_commitments SET \
                 title = COALESCE(NULLIF(BTRIM($2), ''), title), \
                 description = NULLIF(BTRIM(COALESCE($3, description)), ''), \
                 icon_url = NULLIF(BTRIM(COALESCE($4, icon_url)), ''), \
                 order_index = COALESCE($5, order_index) \
             WHERE id = $1 \
             RETURNING {COMMITMENT_COLUMNS}"
        );
        sqlx::query_as::<_, LongTermCommitment>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.icon_url)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LongTermCommitment>, sqlx::Error> {
        let query = format!(
            "DELETE FROM manifesto_long_term_commitments WHERE id = $1 RETURNING {COMMITMENT_COLUMNS}"
        );
        sqlx::query_as::<_, LongTermCommitment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn promote(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        COMMITMENT_RANK.promote(pool, id).await
    }
}
