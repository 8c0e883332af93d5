//! Manifesto development goals and long-term commitments.

use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `manifesto_development_goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DevelopmentGoal {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevelopmentGoalInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order_index: Option<Rank>,
}

/// A row from the `manifesto_long_term_commitments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LongTermCommitment {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LongTermCommitmentInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Option<Rank>,
}
