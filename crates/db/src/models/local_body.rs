//! Local bodies (panchayats and municipalities) and their wards.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `local_bodies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocalBody {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub cover_image: Option<String>,
    /// Free text; sources publish figures like `"32,451 (2011)"`.
    pub population: Option<String>,
    pub area: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalBodyInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub cover_image: Option<String>,
    pub population: Option<String>,
    pub area: Option<String>,
}

/// A row from the `local_body_wards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ward {
    pub id: DbId,
    pub local_body_id: DbId,
    pub ward_no: String,
    pub place_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WardInput {
    pub ward_no: Option<String>,
    pub place_name: Option<String>,
}
