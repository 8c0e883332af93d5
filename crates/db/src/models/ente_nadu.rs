//! "Ente Nadu" (my homeland) cards and resident testimonials.

use portfolio_core::types::{DbId, Rank, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// A row from the `ente_nadu_cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnteNaduCard {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Name of a frontend icon component; `icon_url` overrides it when set.
    pub icon_name: String,
    pub icon_url: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnteNaduCardInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon_name: Option<String>,
    pub icon_url: Option<String>,
    pub order_index: Option<Rank>,
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

/// A row from the `ente_nadu_testimonials` table.
///
/// Ranked separately per `type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub author_name: Option<String>,
    pub house_name: Option<String>,
    pub quote: Option<String>,
    pub avatar_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub caption: Option<String>,
    pub order_index: Rank,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub author_name: Option<String>,
    pub house_name: Option<String>,
    pub quote: Option<String>,
    pub avatar_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub caption: Option<String>,
    pub order_index: Option<Rank>,
}
