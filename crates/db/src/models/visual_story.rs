use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `visual_stories` table.
///
/// `video_url` is either an external link (`video_type = "url"`) or an
/// `/uploads/...` path (`video_type = "upload"`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisualStory {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_type: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values written on create and update. Visual stories arrive
/// as multipart forms, so there is no `Deserialize` DTO.
#[derive(Debug, Clone)]
pub struct VisualStoryRecord {
    pub title: String,
    pub description: Option<String>,
    pub video_type: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub order_index: Rank,
}
