use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `core_vision_pillars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pillar {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PillarInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order_index: Option<Rank>,
}
