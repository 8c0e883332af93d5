//! `Json`, `Path` and `Query` with rejections mapped into [`AppError`].
//!
//! axum's stock rejections answer in plain text (and 422 for a body that
//! parses but does not fit the type). Handlers take these wrappers instead
//! so every malformed request gets the JSON envelope with status 400.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected a JSON body with Content-Type: application/json.".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON.".to_string(),
            JsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
            other => other.body_text(),
        };
        AppError::BadRequest(message)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Path rejected");
        AppError::BadRequest("Invalid path parameter.".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    async fn by_id(AppPath(id): AppPath<i64>) -> String {
        id.to_string()
    }

    async fn named(AppJson(_): AppJson<Named>) -> StatusCode {
        StatusCode::CREATED
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(by_id))
            .route("/items", post(named))
    }

    async fn envelope(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn non_numeric_id_is_400_envelope() {
        let response = app()
            .oneshot(Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, json) = envelope(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid path parameter.");
    }

    #[tokio::test]
    async fn wrong_field_type_is_400_not_422() {
        let request = Request::post("/items")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":5}"#))
            .unwrap();
        let (status, json) = envelope(app().oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn missing_content_type_is_400_envelope() {
        let request = Request::post("/items").body(Body::from(r#"{"name":"x"}"#)).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
