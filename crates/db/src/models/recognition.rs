use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recognitions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recognition {
    pub id: DbId,
    pub description: String,
    pub icon_name: String,
    pub icon_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionInput {
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Option<Rank>,
}
