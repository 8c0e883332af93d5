//! Repositories for `contact_enquiries` and `enquiry_communications`.

use portfolio_core::search::PageRequest;
use portfolio_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Communication, Enquiry, EnquiryFilter, NewEnquiry};

const SELECT: &str = "\
    SELECT c.id, c.full_name, c.mobile, c.email, c.panchayat_id, lb.name AS panchayat_name, \
           c.category, c.subject, c.message, c.status, c.created_at, c.updated_at \
    FROM contact_enquiries c \
    LEFT JOIN local_bodies lb ON lb.id = c.panchayat_id";

const FILTER: &str = "\
    WHERE ($1::text IS NULL OR c.full_name ILIKE $1 OR c.email ILIKE $1 \
           OR c.subject ILIKE $1 OR c.message ILIKE $1) \
      AND ($2::text IS NULL OR c.category = $2) \
      AND ($3::text IS NULL OR c.status = $3)";

const COMMUNICATION_COLUMNS: &str = "\
    id, enquiry_id, type, recipient, message, status, created_at, updated_at";

// ---------------------------------------------------------------------------
// Enquiries
// ---------------------------------------------------------------------------

pub struct EnquiryRepo;

impl EnquiryRepo {
    pub async fn create(pool: &PgPool, enquiry: &NewEnquiry) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO contact_enquiries \
                 (full_name, mobile, email, panchayat_id, category, subject, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(&enquiry.full_name)
        .bind(&enquiry.mobile)
        .bind(&enquiry.email)
        .bind(enquiry.panchayat_id)
        .bind(&enquiry.category)
        .bind(&enquiry.subject)
        .bind(&enquiry.message)
        .fetch_one(pool)
        .await
    }

    /// Newest enquiries first.
    pub async fn list(
        pool: &PgPool,
        filter: &EnquiryFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Enquiry>, i64), sqlx::Error> {
        let count = format!("SELECT COUNT(*) FROM contact_enquiries c {FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.status)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "{SELECT} {FILTER} ORDER BY c.created_at DESC, c.id DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, Enquiry>(&query)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enquiry>, sqlx::Error> {
        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Enquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the workflow status. Returns `true` if the enquiry exists.
    pub async fn update_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE contact_enquiries SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_enquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Communications
// ---------------------------------------------------------------------------

/// Log of outbound messages sent in reply to an enquiry.
pub struct CommunicationRepo;

impl CommunicationRepo {
    pub async fn record(
        pool: &PgPool,
        enquiry_id: DbId,
        channel: &str,
        recipient: &str,
        message: Option<&str>,
        status: &str,
    ) -> Result<Communication, sqlx::Error> {
        let query = format!(
            "INSERT INTO enquiry_communications (enquiry_id, type, recipient, message, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COMMUNICATION_COLUMNS}"
        );
        sqlx::query_as::<_, Communication>(&query)
            .bind(enquiry_id)
            .bind(channel)
            .bind(recipient)
            .bind(message)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_enquiry(
        pool: &PgPool,
        enquiry_id: DbId,
    ) -> Result<Vec<Communication>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMUNICATION_COLUMNS} FROM enquiry_communications \
             WHERE enquiry_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Communication>(&query)
            .bind(enquiry_id)
            .fetch_all(pool)
            .await
    }
}
