//! Events, their paragraph content, and attached media.

use chrono::{NaiveDate, NaiveTime};
use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `events` table.
///
/// `status` is whatever was computed at the last write; it is not
/// refreshed on read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub event_time_to: Option<NaiveTime>,
    pub venue: String,
    pub short_description: Option<String>,
    pub status: String,
    pub event_type_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub sector_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event joined with its taxonomy names and first photo.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub type_name: Option<String>,
    pub local_body_name: Option<String>,
    pub sector_name: Option<String>,
    pub cover_image: Option<String>,
}

/// A row from the `event_content` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventParagraph {
    pub id: DbId,
    pub event_id: DbId,
    pub content_order: i32,
    pub paragraph_text: String,
    pub created_at: Timestamp,
}

/// A row from the `event_media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventMedia {
    pub id: DbId,
    pub event_id: DbId,
    pub media_type: String,
    pub file_url: String,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub created_at: Timestamp,
}

/// An event media row joined with its event and event type, used by the
/// public gallery and the admin media list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub media: EventMedia,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_type_id: Option<DbId>,
    pub type_name: Option<String>,
    pub local_body_id: Option<DbId>,
    pub local_body_name: Option<String>,
    pub sector_id: Option<DbId>,
    pub sector_name: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Raw body for event create and update. Dates and times arrive as
/// strings and are parsed by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub event_time_to: Option<String>,
    pub venue: Option<String>,
    pub short_description: Option<String>,
    pub event_type_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub sector_id: Option<DbId>,
}

/// Parsed event values written on create and update, status included.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub event_time_to: Option<NaiveTime>,
    pub venue: String,
    pub short_description: Option<String>,
    pub status: String,
    pub event_type_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub sector_id: Option<DbId>,
}

/// One paragraph in a content replace request.
#[derive(Debug, Clone, Deserialize)]
pub struct ParagraphInput {
    pub content_order: Option<i32>,
    pub paragraph_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEventMedia {
    pub event_id: DbId,
    pub media_type: String,
    pub file_url: String,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
}

/// Filters shared by the event list and the gallery.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<String>,
    pub event_type_id: Option<DbId>,
    pub local_body_id: Option<DbId>,
    pub sector_id: Option<DbId>,
    pub year: Option<i32>,
    /// `ILIKE` pattern, already escaped and wrapped in `%`.
    pub search: Option<String>,
}
