//! Media centre sections and the posts filed under them.

use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaSection {
    pub id: DbId,
    pub section_name: String,
    pub description: Option<String>,
    pub display_order: Rank,
    pub is_active: bool,
    pub media_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaSectionInput {
    pub section_name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<Rank>,
    pub is_active: Option<bool>,
    pub media_type: Option<String>,
}

/// A row from `media_posts` joined with its section name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaPost {
    pub id: DbId,
    pub section_id: DbId,
    pub section_name: String,
    pub title: String,
    pub content: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub is_featured: bool,
    pub published_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPostInput {
    pub section_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub is_featured: Option<bool>,
    pub published_at: Option<Timestamp>,
}

/// Filters for the admin post list.
#[derive(Debug, Clone, Default)]
pub struct MediaPostFilter {
    pub section_id: Option<DbId>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
}
