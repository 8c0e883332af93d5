//! Achievement highlights shown on the landing page.

use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for create and update. On update, omitted fields keep their value
/// and an empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AchievementInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Option<Rank>,
}
