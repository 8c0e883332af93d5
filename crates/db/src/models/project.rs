//! Development projects with image galleries.

use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from `projects` joined with sector and local body names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub project_content: Option<String>,
    /// Image URLs, first one is the cover.
    pub images: Json<Vec<String>>,
    pub tags: Option<String>,
    pub year: Option<i32>,
    pub sector_id: Option<DbId>,
    pub sector_name: Option<String>,
    pub local_body_id: Option<DbId>,
    pub local_body_name: Option<String>,
    pub display_order: Rank,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_content: Option<String>,
    pub images: Option<Vec<String>>,
    pub tags: Option<String>,
    pub year: Option<i32>,
    pub sector_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub display_order: Option<Rank>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub sector_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub year: Option<i32>,
    pub is_active: Option<bool>,
}
