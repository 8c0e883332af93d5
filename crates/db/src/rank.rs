//! SQL side of the display-rank rules in `portfolio_core::ordering`.
//!
//! Each orderable repository declares a [`RankedTable`] constant and
//! delegates `next_rank` / `promote` to it, so every table shifts and pins
//! ranks the same way.

use portfolio_core::ordering::{self, TOP_RANK};
use portfolio_core::types::{DbId, Rank};
use sqlx::PgPool;

/// Describes the rank column of an orderable table.
///
/// `scope_column`, when set, partitions the ranking (testimonials rank
/// independently per `type`). The column must be textual.
#[derive(Debug, Clone, Copy)]
pub struct RankedTable {
    pub table: &'static str,
    pub rank_column: &'static str,
    pub scope_column: Option<&'static str>,
}

impl RankedTable {
    /// A table ranked as a single list.
    pub const fn unscoped(table: &'static str, rank_column: &'static str) -> Self {
        Self {
            table,
            rank_column,
            scope_column: None,
        }
    }

    /// A table ranked separately per value of `scope_column`.
    pub const fn scoped(
        table: &'static str,
        rank_column: &'static str,
        scope_column: &'static str,
    ) -> Self {
        Self {
            table,
            rank_column,
            scope_column: Some(scope_column),
        }
    }

    /// `ORDER BY` body: rank ascending, then `id DESC`.
    pub fn order_by(&self) -> String {
        ordering::order_by(self.rank_column)
    }

    /// Rank for a row appended to `scope` (ignored for unscoped tables).
    pub async fn next_rank(&self, pool: &PgPool, scope: Option<&str>) -> Result<Rank, sqlx::Error> {
        let max: Option<Rank> = match self.scope_column {
            Some(col) => {
                let query = format!(
                    "SELECT MAX({}) FROM {} WHERE {col} = $1",
                    self.rank_column, self.table
                );
                sqlx::query_scalar(&query)
                    .bind(scope)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                let query = format!("SELECT MAX({}) FROM {}", self.rank_column, self.table);
                sqlx::query_scalar(&query).fetch_one(pool).await?
            }
        };
        Ok(ordering::next_rank(max))
    }

    /// Move a row to the top of its scope.
    ///
    /// Runs in one transaction: lock the target row, shift every row in
    /// the scope down by one (the target included), then pin the target
    /// to rank 0. Returns `false` without modifying anything when the row
    /// does not exist.
    pub async fn promote(&self, pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let shifted = match self.scope_column {
            Some(col) => {
                let lock = format!("SELECT {col} FROM {} WHERE id = $1 FOR UPDATE", self.table);
                let scope: Option<String> = sqlx::query_scalar(&lock)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
                let Some(scope) = scope else {
                    tx.rollback().await?;
                    return Ok(false);
                };
                let shift = format!(
                    "UPDATE {} SET {rank} = {rank} + 1 WHERE {col} = $1",
                    self.table,
                    rank = self.rank_column
                );
                sqlx::query(&shift).bind(scope).execute(&mut *tx).await?
            }
            None => {
                let lock = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", self.table);
                let found: Option<DbId> = sqlx::query_scalar(&lock)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;
                if found.is_none() {
                    tx.rollback().await?;
                    return Ok(false);
                }
                let shift = format!(
                    "UPDATE {} SET {rank} = {rank} + 1",
                    self.table,
                    rank = self.rank_column
                );
                sqlx::query(&shift).execute(&mut *tx).await?
            }
        };

        let pin = format!("UPDATE {} SET {} = $2 WHERE id = $1", self.table, self.rank_column);
        sqlx::query(&pin)
            .bind(id)
            .bind(TOP_RANK)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            table = self.table,
            id,
            shifted = shifted.rows_affected(),
            "Promoted row to top"
        );
        Ok(true)
    }
}
