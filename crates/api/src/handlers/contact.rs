//! Handlers for `/api/contact`: the public enquiry form, the admin inbox,
//! and follow-up messages over SMS, WhatsApp, and voice.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::content::{
    require_text, trim_optional, CommunicationChannel, CommunicationStatus, EnquiryCategory,
    EnquiryStatus,
};
use portfolio_core::search::{like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_db::models::contact::{
    Communication, Enquiry, EnquiryFilter, EnquiryInput, NewEnquiry,
};
use portfolio_db::repositories::{CommunicationRepo, EnquiryRepo};
use portfolio_db::DbPool;
use portfolio_notify::templates::{self, EnquirySummary};
use portfolio_notify::{Mailer, MessagingError};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::lenient;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::tasks::spawn_logged;

const DEFAULT_LIMIT: i64 = 15;

#[derive(Debug, Deserialize)]
pub struct EnquiryListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: Option<String>,
    /// Defaults to the enquiry's mobile number.
    pub recipient: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedEnquiry {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Public form
// ---------------------------------------------------------------------------

/// POST /api/contact
///
/// Stores the enquiry, then emails a confirmation to the submitter and an
/// alert to the admin inbox in the background.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<EnquiryInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedEnquiry>>)> {
    let enquiry = validate_enquiry(&input)?;
    let id = EnquiryRepo::create(&state.pool, &enquiry).await?;
    tracing::info!(id, category = %enquiry.category, "Contact enquiry received");

    match state.mailer.clone() {
        Some(mailer) => {
            let panchayat = match enquiry.panchayat_id {
                Some(_) => EnquiryRepo::find_by_id(&state.pool, id)
                    .await?
                    .and_then(|e| e.panchayat_name),
                None => None,
            };
            let summary = EnquirySummary {
                id,
                full_name: enquiry.full_name,
                mobile: enquiry.mobile,
                email: enquiry.email,
                panchayat: panchayat.unwrap_or_else(|| "N/A".into()),
                category: enquiry.category,
                subject: enquiry.subject.unwrap_or_else(|| "N/A".into()),
                message: enquiry.message,
            };
            spawn_logged(
                "enquiry_emails",
                send_enquiry_emails(
                    state.pool.clone(),
                    mailer,
                    state.config.admin_alert_email.clone(),
                    summary,
                ),
            );
        }
        None => tracing::warn!(id, "Email disabled; enquiry confirmation not sent"),
    }

    Ok(ApiResponse::created(
        "Your enquiry has been submitted successfully.",
        CreatedEnquiry { id },
    ))
}

/// Check required fields and normalize the category.
pub fn validate_enquiry(input: &EnquiryInput) -> AppResult<NewEnquiry> {
    const REQUIRED: &str = "Full name, mobile, email and message are required.";
    let full_name = require_text(input.full_name.as_deref(), REQUIRED)?;
    let mobile = require_text(input.mobile.as_deref(), REQUIRED)?;
    let email = require_text(input.email.as_deref(), REQUIRED)?;
    let message = require_text(input.message.as_deref(), REQUIRED)?;
    let category = EnquiryCategory::parse_or_default(input.category.as_deref())?;

    Ok(NewEnquiry {
        full_name,
        mobile,
        email,
        panchayat_id: input.panchayat_id,
        category: category.as_str().to_string(),
        subject: trim_optional(input.subject.as_deref()),
        message,
    })
}

/// Confirmation to the submitter (recorded as an email communication)
/// followed by the admin alert.
async fn send_enquiry_emails(
    pool: DbPool,
    mailer: std::sync::Arc<Mailer>,
    admin_inbox: Option<String>,
    summary: EnquirySummary,
) -> Result<(), sqlx::Error> {
    let confirmation = templates::enquiry_received(mailer.app_name(), &summary);
    let status = match mailer.send(&summary.email, &confirmation).await {
        Ok(()) => CommunicationStatus::Sent,
        Err(e) => {
            tracing::warn!(enquiry_id = summary.id, error = %e, "Enquiry confirmation failed");
            CommunicationStatus::Failed
        }
    };
    CommunicationRepo::record(
        &pool,
        summary.id,
        CommunicationChannel::Email.as_str(),
        &summary.email,
        Some(confirmation.subject.as_str()),
        status.as_str(),
    )
    .await?;

    if let Some(inbox) = admin_inbox {
        let alert = templates::admin_enquiry_alert(mailer.app_name(), &summary);
        if let Err(e) = mailer.send(&inbox, &alert).await {
            tracing::warn!(enquiry_id = summary.id, error = %e, "Admin enquiry alert failed");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin inbox
// ---------------------------------------------------------------------------

/// GET /api/contact
pub async fn list(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppQuery(params): AppQuery<EnquiryListParams>,
) -> AppResult<Json<ApiResponse<Vec<Enquiry>>>> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(EnquiryStatus::from_str(raw)?.as_str().to_string()),
    };
    let category = params
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let filter = EnquiryFilter {
        search: like_pattern(params.search.as_deref()),
        category,
        status,
    };
    let (enquiries, total) = EnquiryRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page("Enquiries fetched.", enquiries, page.paginate(total)))
}

/// GET /api/contact/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Enquiry>>> {
    let enquiry = find_enquiry(&state, id).await?;
    Ok(ApiResponse::ok("Enquiry fetched.", enquiry))
}

/// PATCH /api/contact/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<StatusRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let status = EnquiryStatus::from_str(input.status.as_deref().unwrap_or("").trim())?;
    if !EnquiryRepo::update_status(&state.pool, id, status.as_str()).await? {
        return Err(AppError::not_found("Enquiry", id));
    }
    tracing::info!(id, status = status.as_str(), admin_id = admin.admin_id, "Enquiry status updated");
    Ok(ApiResponse::message(format!("Status updated to {}.", status.as_str())))
}

/// DELETE /api/contact/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !EnquiryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Enquiry", id));
    }
    tracing::info!(id, admin_id = admin.admin_id, "Enquiry deleted");
    Ok(ApiResponse::message("Enquiry deleted."))
}

/// GET /api/contact/{id}/communications
pub async fn communications(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Vec<Communication>>>> {
    find_enquiry(&state, id).await?;
    let rows = CommunicationRepo::list_for_enquiry(&state.pool, id).await?;
    Ok(ApiResponse::ok("Communications fetched.", rows))
}

async fn find_enquiry(state: &AppState, id: DbId) -> AppResult<Enquiry> {
    EnquiryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Enquiry", id))
}

// ---------------------------------------------------------------------------
// Follow-up messages
// ---------------------------------------------------------------------------

/// POST /api/contact/{id}/send-sms
pub async fn send_sms(
    state: State<AppState>,
    admin: AuthAdmin,
    id: AppPath<DbId>,
    body: AppJson<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<Communication>>> {
    send_follow_up(state, admin, id, body, CommunicationChannel::Sms).await
}

/// POST /api/contact/{id}/send-whatsapp
pub async fn send_whatsapp(
    state: State<AppState>,
    admin: AuthAdmin,
    id: AppPath<DbId>,
    body: AppJson<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<Communication>>> {
    send_follow_up(state, admin, id, body, CommunicationChannel::Whatsapp).await
}

/// POST /api/contact/{id}/send-voice
pub async fn send_voice(
    state: State<AppState>,
    admin: AuthAdmin,
    id: AppPath<DbId>,
    body: AppJson<SendMessageRequest>,
) -> AppResult<Json<ApiResponse<Communication>>> {
    send_follow_up(state, admin, id, body, CommunicationChannel::Voice).await
}

/// Deliver a follow-up and record the outcome.
///
/// A disabled channel is rejected before anything is recorded. A provider
/// failure is recorded as `failed` and surfaces as 502.
async fn send_follow_up(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<SendMessageRequest>,
    channel: CommunicationChannel,
) -> AppResult<Json<ApiResponse<Communication>>> {
    let message = require_text(input.message.as_deref(), "Message is required.")?;
    let enquiry = find_enquiry(&state, id).await?;
    let recipient = trim_optional(input.recipient.as_deref()).unwrap_or(enquiry.mobile);

    let outcome = deliver(&state, channel, &recipient, &message)
        .await
        .ok_or_else(|| {
            AppError::BadRequest(format!("{} sending is not configured.", channel.label()))
        })?;

    let status = match outcome {
        Ok(()) => CommunicationStatus::Sent,
        Err(_) => CommunicationStatus::Failed,
    };
    let record = CommunicationRepo::record(
        &state.pool,
        id,
        channel.as_str(),
        &recipient,
        Some(message.as_str()),
        status.as_str(),
    )
    .await?;

    if let Err(e) = outcome {
        tracing::warn!(enquiry_id = id, channel = channel.as_str(), error = %e, "Follow-up failed");
        return Err(AppError::Upstream(format!("Failed to send {}.", channel.label())));
    }

    tracing::info!(
        enquiry_id = id,
        channel = channel.as_str(),
        admin_id = admin.admin_id,
        "Follow-up sent"
    );
    Ok(ApiResponse::ok(
        format!("{} sent successfully.", channel.label()),
        record,
    ))
}

/// Send through the provider for `channel`, or `None` when it is disabled.
async fn deliver(
    state: &AppState,
    channel: CommunicationChannel,
    to: &str,
    message: &str,
) -> Option<Result<(), MessagingError>> {
    let messengers = &state.messengers;
    match channel {
        CommunicationChannel::Sms => Some(messengers.sms.as_ref()?.send(to, message).await),
        CommunicationChannel::Whatsapp => {
            Some(messengers.whatsapp.as_ref()?.send(to, message).await)
        }
        CommunicationChannel::Voice => Some(messengers.voice.as_ref()?.send(to, message).await),
        CommunicationChannel::Email => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EnquiryInput {
        EnquiryInput {
            full_name: Some("  Asha  ".into()),
            mobile: Some("9999999999".into()),
            email: Some("asha@example.com".into()),
            message: Some("Streetlight broken".into()),
            ..Default::default()
        }
    }

    #[test]
    fn category_defaults_to_general() {
        let enquiry = validate_enquiry(&input()).unwrap();
        assert_eq!(enquiry.category, "general");
        assert_eq!(enquiry.full_name, "Asha");
        assert_eq!(enquiry.subject, None);
    }

    #[test]
    fn category_is_case_insensitive() {
        let enquiry = validate_enquiry(&EnquiryInput {
            category: Some("Local Issues".into()),
            ..input()
        })
        .unwrap();
        assert_eq!(enquiry.category, "local issues");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = validate_enquiry(&EnquiryInput {
            category: Some("complaints".into()),
            ..input()
        });
        assert!(result.is_err());
    }

    #[test]
    fn missing_message_is_rejected() {
        let result = validate_enquiry(&EnquiryInput {
            message: Some("   ".into()),
            ..input()
        });
        assert!(result.is_err());
    }
}
