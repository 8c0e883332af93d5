//! Public contact enquiries and the follow-ups sent to them.

use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `contact_enquiries` joined with the panchayat name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enquiry {
    pub id: DbId,
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub panchayat_id: Option<DbId>,
    pub panchayat_name: Option<String>,
    pub category: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryInput {
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub panchayat_id: Option<DbId>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Validated values for a new enquiry.
#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub panchayat_id: Option<DbId>,
    pub category: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnquiryFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// A row from the `enquiry_communications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Communication {
    pub id: DbId,
    pub enquiry_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub channel: String,
    pub recipient: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
