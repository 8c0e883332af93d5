//! Shared response envelope for API handlers.
//!
//! Every response is `{ success, message, data?, pagination? }`. Use
//! [`ApiResponse`] instead of ad-hoc `serde_json::json!` bodies so the
//! envelope stays uniform.

use axum::http::StatusCode;
use axum::Json;
use portfolio_core::search::Pagination;
use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(ApiResponse::ok("Achievements fetched", rows).into())
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
        })
    }

    /// A list page with its pagination block.
    pub fn page(message: impl Into<String>, data: T, pagination: Pagination) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
        })
    }

    /// `201 Created` with the new row.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(message, data))
    }
}

impl ApiResponse<()> {
    /// Success without a payload (deletes, promote, logout).
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
            pagination: None,
        })
    }
}

/// Body of the single-file upload endpoints.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub url: String,
}
