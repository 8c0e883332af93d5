use portfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `timelines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Timeline {
    pub id: DbId,
    /// Free-form label such as `"2016"` or `"2016-2021"`.
    pub year: String,
    pub title: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct TimelineRecord {
    pub year: String,
    pub title: String,
    pub image_url: Option<String>,
}
