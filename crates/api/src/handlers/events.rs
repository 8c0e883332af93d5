//! Handlers for `/api/events`.
//!
//! Status is derived from the event's date and start time on every create
//! and update and stored with the row. Reads return the stored value.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use portfolio_core::content::{
    trim_optional, youtube_thumbnail_url, youtube_video_id, EventMediaType,
};
use portfolio_core::event_status::{compute_status, parse_event_date, parse_event_time, EventStatus};
use portfolio_core::search::{like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_core::uploads::UploadKind;
use portfolio_db::models::event::{
    Event, EventFilter, EventInput, EventMedia, EventParagraph, EventRecord, EventSummary,
    NewEventMedia, ParagraphInput,
};
use portfolio_db::repositories::EventRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::lenient;
use crate::response::{ApiResponse, UploadedFile};
use crate::state::AppState;
use crate::uploads::{collect_form, store_single, UploadForm};

const DEFAULT_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub event_type_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub local_body_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub sector_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

impl EventListParams {
    fn filter(&self) -> AppResult<EventFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(EventStatus::from_str(raw)?.as_str().to_string()),
        };
        Ok(EventFilter {
            status,
            event_type_id: self.event_type_id,
            local_body_id: self.local_body_id,
            sector_id: self.sector_id,
            year: self.year,
            search: like_pattern(self.search.as_deref()),
        })
    }
}

/// An event with its paragraphs and media split by kind.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: EventSummary,
    pub content: Vec<EventParagraph>,
    pub photos: Vec<EventMedia>,
    pub videos: Vec<EventMedia>,
}

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub paragraphs: Option<Vec<ParagraphInput>>,
}

#[derive(Debug, Deserialize)]
pub struct YoutubeRequest {
    pub youtube_url: Option<String>,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/events
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EventListParams>,
) -> AppResult<Json<ApiResponse<Vec<EventSummary>>>> {
    let filter = params.filter()?;
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let (rows, total) = EventRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page("Events fetched.", rows, page.paginate(total)))
}

/// GET /api/events/by-status?status=upcoming|ongoing|past
pub async fn by_status(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EventListParams>,
) -> AppResult<Json<ApiResponse<Vec<EventSummary>>>> {
    let status = EventStatus::from_str(params.status.as_deref().unwrap_or("").trim())?;
    let filter = EventFilter {
        status: Some(status.as_str().to_string()),
        ..params.filter()?
    };
    let page = PageRequest::new(params.page, params.limit, DEFAULT_LIMIT);
    let (rows, total) = EventRepo::list(&state.pool, &filter, &page).await?;
    Ok(ApiResponse::page(
        format!("{} events fetched.", status.as_str()),
        rows,
        page.paginate(total),
    ))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<EventDetail>>> {
    let event = EventRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    let content = EventRepo::list_content(&state.pool, id).await?;
    let (photos, videos): (Vec<_>, Vec<_>) = EventRepo::list_media(&state.pool, id)
        .await?
        .into_iter()
        .partition(|m| m.media_type == EventMediaType::Photo.as_str());

    Ok(ApiResponse::ok(
        "Event fetched.",
        EventDetail {
            event,
            content,
            photos,
            videos,
        },
    ))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Validate an event body and compute its status for the current time.
/// Any `status` the client sends is ignored.
fn build_record(state: &AppState, input: &EventInput) -> AppResult<EventRecord> {
    let (Some(event_name), Some(raw_date), Some(venue)) = (
        trim_optional(input.event_name.as_deref()),
        trim_optional(input.event_date.as_deref()),
        trim_optional(input.venue.as_deref()),
    ) else {
        return Err(AppError::validation(
            "event_name, event_date, and venue are required.",
        ));
    };

    let event_date = parse_event_date(&raw_date)?;
    let event_time = input.event_time.as_deref().and_then(parse_event_time);
    let event_time_to = input.event_time_to.as_deref().and_then(parse_event_time);
    let status = compute_status(event_date, event_time, state.config.event_utc_offset, Utc::now());

    Ok(EventRecord {
        event_name,
        event_date,
        event_time,
        event_time_to,
        venue,
        short_description: trim_optional(input.short_description.as_deref()),
        status: status.as_str().to_string(),
        event_type_id: input.event_type_id,
        local_body_id: input.local_body_id,
        sector_id: input.sector_id,
    })
}

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppJson(input): AppJson<EventInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Event>>)> {
    let record = build_record(&state, &input)?;
    let event = EventRepo::create(&state.pool, &record).await?;
    tracing::info!(
        id = event.id,
        status = %event.status,
        admin_id = admin.admin_id,
        "Event created"
    );
    Ok(ApiResponse::created("Event created.", event))
}

/// PUT /api/events/{id}
///
/// Replaces every field; the status is recomputed.
pub async fn update(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EventInput>,
) -> AppResult<Json<ApiResponse<Event>>> {
    let record = build_record(&state, &input)?;
    let event = EventRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    tracing::info!(id, status = %event.status, admin_id = admin.admin_id, "Event updated");
    Ok(ApiResponse::ok("Event updated.", event))
}

/// DELETE /api/events/{id}
///
/// Content and media rows cascade; their files are reaped afterwards.
pub async fn delete(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let media = EventRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    let media_count = media.len();
    state.uploads.reap_all(media_files(media)).await;

    tracing::info!(id, media_count, admin_id = admin.admin_id, "Event deleted");
    Ok(ApiResponse::message("Event deleted."))
}

/// Every file a set of media rows points at.
fn media_files(media: Vec<EventMedia>) -> impl Iterator<Item = String> {
    media
        .into_iter()
        .flat_map(|m| std::iter::once(m.file_url).chain(m.thumbnail_url))
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// POST /api/events/{id}/content
///
/// Replaces all paragraphs. A paragraph without `content_order` takes
/// its position in the request.
pub async fn replace_content(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ContentRequest>,
) -> AppResult<Json<ApiResponse<Vec<EventParagraph>>>> {
    let paragraphs = input.paragraphs.unwrap_or_default();
    if paragraphs.is_empty() {
        return Err(AppError::validation("paragraphs must be a non-empty array."));
    }

    let mut rows = Vec::with_capacity(paragraphs.len());
    for (position, p) in paragraphs.iter().enumerate() {
        let text = trim_optional(p.paragraph_text.as_deref()).ok_or_else(|| {
            AppError::validation(format!("paragraph_text is required (paragraph {}).", position + 1))
        })?;
        let order = p
            .content_order
            .unwrap_or_else(|| i32::try_from(position + 1).unwrap_or(i32::MAX));
        rows.push((order, text));
    }

    let content = EventRepo::replace_content(&state.pool, id, &rows)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    tracing::info!(id, paragraphs = content.len(), admin_id = admin.admin_id, "Event content replaced");
    Ok(ApiResponse::ok("Event content saved.", content))
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// POST /api/events/{id}/media (multipart: file, media_type, caption,
/// thumbnail?)
pub async fn add_media(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<EventMedia>>)> {
    let form = collect_form(
        &state.uploads,
        &mut multipart,
        &[("file", UploadKind::Media), ("thumbnail", UploadKind::Thumbnail)],
    )
    .await?;

    let result = insert_media(&state, id, &form).await;
    if result.is_err() {
        state.uploads.reap_all(form.file_urls()).await;
    }
    let media = result?;

    tracing::info!(
        event_id = id,
        media_id = media.id,
        media_type = %media.media_type,
        admin_id = admin.admin_id,
        "Event media added"
    );
    Ok(ApiResponse::created("Media uploaded successfully.", media))
}

async fn insert_media(state: &AppState, event_id: DbId, form: &UploadForm) -> AppResult<EventMedia> {
    let file_url = form
        .file("file")
        .ok_or_else(|| AppError::BadRequest("No file uploaded.".into()))?;
    let media_type = EventMediaType::from_str(form.text("media_type").unwrap_or(""))?;
    if !EventRepo::exists(&state.pool, event_id).await? {
        return Err(AppError::not_found("Event", event_id));
    }

    let media = NewEventMedia {
        event_id,
        media_type: media_type.as_str().to_string(),
        file_url: file_url.to_string(),
        caption: form.text("caption").map(str::to_string),
        thumbnail_url: form.file("thumbnail").map(str::to_string),
        youtube_url: None,
    };
    Ok(EventRepo::add_media(&state.pool, &media).await?)
}

/// POST /api/events/{id}/youtube
///
/// Stores a YouTube link as a video media row. The thumbnail defaults to
/// YouTube's own preview image.
pub async fn add_youtube(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<YoutubeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EventMedia>>)> {
    let url = trim_optional(input.youtube_url.as_deref())
        .ok_or_else(|| AppError::validation("youtube_url is required."))?;
    let video_id = youtube_video_id(&url)
        .ok_or_else(|| AppError::validation("youtube_url is not a valid YouTube link."))?;
    if !EventRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Event", id));
    }

    let thumbnail_url = trim_optional(input.thumbnail_url.as_deref())
        .unwrap_or_else(|| youtube_thumbnail_url(video_id));
    let media = NewEventMedia {
        event_id: id,
        media_type: EventMediaType::Video.as_str().to_string(),
        file_url: url.clone(),
        caption: input.caption,
        thumbnail_url: Some(thumbnail_url),
        youtube_url: Some(url),
    };
    let media = EventRepo::add_media(&state.pool, &media).await?;

    tracing::info!(event_id = id, media_id = media.id, admin_id = admin.admin_id, "YouTube video added");
    Ok(ApiResponse::created("YouTube video added.", media))
}

/// POST /api/events/{id}/upload-inline-image
///
/// Stores an image embedded in event content and returns its absolute URL.
pub async fn upload_inline_image(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedFile>>> {
    let url = store_single(&state.uploads, &mut multipart, UploadKind::Image).await?;
    if !EventRepo::exists(&state.pool, id).await? {
        state.uploads.reap(&url).await;
        return Err(AppError::not_found("Event", id));
    }
    Ok(ApiResponse::ok(
        "Image uploaded.",
        UploadedFile {
            url: state.uploads.absolute_url(&url),
        },
    ))
}

/// DELETE /api/events/media/{media_id}
pub async fn delete_media(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(media_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let media = EventRepo::delete_media(&state.pool, media_id)
        .await?
        .ok_or_else(|| AppError::not_found("Media item", media_id))?;
    state.uploads.reap_all(media_files(vec![media])).await;

    tracing::info!(media_id, admin_id = admin.admin_id, "Event media deleted");
    Ok(ApiResponse::message("Media deleted successfully."))
}
