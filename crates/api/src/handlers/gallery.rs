//! Handlers for `/api/gallery`: public photo and video galleries built
//! from event media, plus the admin media and upload-file browsers.

use axum::extract::State;
use axum::Json;
use portfolio_core::content::{EventMediaType, UNCATEGORIZED_GROUP};
use portfolio_core::search::{like_pattern, PageRequest};
use portfolio_core::types::DbId;
use portfolio_db::models::event::{EventFilter, GalleryItem};
use portfolio_db::repositories::{EventRepo, GalleryRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::AuthAdmin;
use crate::query::lenient;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::uploads::StoredFile;

const ADMIN_MEDIA_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GalleryParams {
    #[serde(default, deserialize_with = "lenient")]
    pub event_type_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub local_body_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub sector_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    pub search: Option<String>,
    /// Alias of `search` used by the search routes.
    pub q: Option<String>,
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub limit: Option<i64>,
}

impl GalleryParams {
    fn filter(&self) -> EventFilter {
        EventFilter {
            status: None,
            event_type_id: self.event_type_id,
            local_body_id: self.local_body_id,
            sector_id: self.sector_id,
            year: self.year,
            search: like_pattern(self.q.as_deref().or(self.search.as_deref())),
        }
    }
}

/// Media of one event type. Exactly one of `images` / `videos` is set.
#[derive(Debug, Serialize)]
pub struct GalleryGroup {
    pub event_type_id: Option<DbId>,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<GalleryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<GalleryItem>>,
}

#[derive(Debug, Serialize)]
pub struct Gallery {
    pub total: usize,
    pub groups: Vec<GalleryGroup>,
}

/// Group items (already ordered by type) into consecutive runs sharing an
/// event type. Items without a type land in one "Uncategorized" group.
pub fn group_by_type(items: Vec<GalleryItem>, kind: EventMediaType) -> Gallery {
    let total = items.len();
    let mut runs: Vec<(Option<DbId>, String, Vec<GalleryItem>)> = Vec::new();

    for item in items {
        match runs.last_mut() {
            Some((type_id, _, group)) if *type_id == item.event_type_id => group.push(item),
            _ => {
                let name = item
                    .type_name
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED_GROUP.to_string());
                runs.push((item.event_type_id, name, vec![item]));
            }
        }
    }

    let groups = runs
        .into_iter()
        .map(|(event_type_id, event_type, items)| {
            let (images, videos) = match kind {
                EventMediaType::Photo => (Some(items), None),
                EventMediaType::Video => (None, Some(items)),
            };
            GalleryGroup {
                event_type_id,
                event_type,
                images,
                videos,
            }
        })
        .collect();
    Gallery { total, groups }
}

async fn gallery(
    state: &AppState,
    kind: EventMediaType,
    filter: EventFilter,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let items = GalleryRepo::list(&state.pool, kind.as_str(), &filter).await?;
    let message = match kind {
        EventMediaType::Photo => "Gallery images fetched.",
        EventMediaType::Video => "Gallery videos fetched.",
    };
    Ok(ApiResponse::ok(message, group_by_type(items, kind)))
}

async fn search(
    state: &AppState,
    kind: EventMediaType,
    params: GalleryParams,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = params.filter();
    if filter.search.is_none() {
        return Err(AppError::validation("Search query is required."));
    }
    gallery(state, kind, filter).await
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// GET /api/gallery/images
pub async fn images(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    gallery(&state, EventMediaType::Photo, params.filter()).await
}

/// GET /api/gallery/images/local-body/{id}
pub async fn images_by_local_body(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        local_body_id: Some(id),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Photo, filter).await
}

/// GET /api/gallery/images/sector/{id}
pub async fn images_by_sector(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        sector_id: Some(id),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Photo, filter).await
}

/// GET /api/gallery/images/year/{year}
pub async fn images_by_year(
    State(state): State<AppState>,
    AppPath(year): AppPath<i32>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        year: Some(year),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Photo, filter).await
}

/// GET /api/gallery/images/search?q=
pub async fn search_images(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    search(&state, EventMediaType::Photo, params).await
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// GET /api/gallery/videos
pub async fn videos(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    gallery(&state, EventMediaType::Video, params.filter()).await
}

/// GET /api/gallery/videos/local-body/{id}
pub async fn videos_by_local_body(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        local_body_id: Some(id),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Video, filter).await
}

/// GET /api/gallery/videos/sector/{id}
pub async fn videos_by_sector(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        sector_id: Some(id),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Video, filter).await
}

/// GET /api/gallery/videos/year/{year}
pub async fn videos_by_year(
    State(state): State<AppState>,
    AppPath(year): AppPath<i32>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    let filter = EventFilter {
        year: Some(year),
        ..params.filter()
    };
    gallery(&state, EventMediaType::Video, filter).await
}

/// GET /api/gallery/videos/search?q=
pub async fn search_videos(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Gallery>>> {
    search(&state, EventMediaType::Video, params).await
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/gallery/admin/media?media_type=&search=&page=&limit=
pub async fn admin_media(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<Json<ApiResponse<Vec<GalleryItem>>>> {
    let media_type = match params.media_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(EventMediaType::from_str(raw)?),
    };
    let page = PageRequest::new(params.page, params.limit, ADMIN_MEDIA_LIMIT);
    let (rows, total) = GalleryRepo::list_page(
        &state.pool,
        media_type.map(|m| m.as_str()),
        &params.filter(),
        &page,
    )
    .await?;
    Ok(ApiResponse::page("Media fetched.", rows, page.paginate(total)))
}

/// DELETE /api/gallery/admin/media/{id}
pub async fn admin_delete_media(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let media = EventRepo::delete_media(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Media item", id))?;
    state
        .uploads
        .reap_all(std::iter::once(media.file_url).chain(media.thumbnail_url))
        .await;

    tracing::info!(media_id = id, admin_id = admin.admin_id, "Gallery media deleted");
    Ok(ApiResponse::message("Media deleted successfully."))
}

/// GET /api/gallery/admin/files
pub async fn admin_files(
    State(state): State<AppState>,
    _admin: AuthAdmin,
) -> AppResult<Json<ApiResponse<Vec<StoredFile>>>> {
    let files = state
        .uploads
        .list_files()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to list uploads: {e}")))?;
    Ok(ApiResponse::ok("Files fetched.", files))
}

/// DELETE /api/gallery/admin/files/{filename}
pub async fn admin_delete_file(
    State(state): State<AppState>,
    admin: AuthAdmin,
    AppPath(filename): AppPath<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.uploads.delete_file(&filename).await?;
    tracing::info!(filename = %filename, admin_id = admin.admin_id, "Upload file deleted");
    Ok(ApiResponse::message("File deleted successfully."))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use portfolio_db::models::event::EventMedia;

    use super::*;

    fn item(id: DbId, type_id: Option<DbId>, type_name: Option<&str>) -> GalleryItem {
        GalleryItem {
            media: EventMedia {
                id,
                event_id: 1,
                media_type: "photo".into(),
                file_url: format!("/uploads/{id}.jpg"),
                caption: None,
                thumbnail_url: None,
                youtube_url: None,
                created_at: Utc::now(),
            },
            event_name: "Event".into(),
            event_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            event_type_id: type_id,
            type_name: type_name.map(str::to_string),
            local_body_id: None,
            local_body_name: None,
            sector_id: None,
            sector_name: None,
        }
    }

    #[test]
    fn groups_consecutive_items_by_type() {
        let items = vec![
            item(1, Some(10), Some("Meetings")),
            item(2, Some(10), Some("Meetings")),
            item(3, Some(20), Some("Rallies")),
            item(4, None, None),
        ];
        let gallery = group_by_type(items, EventMediaType::Photo);

        assert_eq!(gallery.total, 4);
        let names: Vec<_> = gallery.groups.iter().map(|g| g.event_type.as_str()).collect();
        assert_eq!(names, ["Meetings", "Rallies", "Uncategorized"]);
        assert_eq!(gallery.groups[0].images.as_ref().unwrap().len(), 2);
        assert!(gallery.groups[0].videos.is_none());
    }

    #[test]
    fn video_groups_serialize_under_videos_key() {
        let gallery = group_by_type(vec![item(1, None, None)], EventMediaType::Video);
        let json = serde_json::to_value(&gallery).unwrap();
        assert!(json["groups"][0].get("images").is_none());
        assert_eq!(json["groups"][0]["videos"].as_array().unwrap().len(), 1);
        assert_eq!(json["groups"][0]["event_type"], "Uncategorized");
        assert!(json["groups"][0]["event_type_id"].is_null());
    }

    #[test]
    fn q_takes_precedence_over_search() {
        let params = GalleryParams {
            q: Some("rally".into()),
            search: Some("other".into()),
            ..Default::default()
        };
        assert_eq!(params.filter().search.as_deref(), Some("%rally%"));
    }
}
