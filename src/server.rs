//! HTTP surface: `POST /generate-image` and `GET /health`.

use crate::app::App;
use crate::error::ErrorKind;
use crate::models::DEFAULT_ASPECT_RATIO;
use crate::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<App>,
    pub api_key_set: bool,
}

/// Request body for `POST /generate-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    pub image: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_set: bool,
}

/// Wraps a core error so handlers can return it directly.
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.0.to_string(),
            kind: self.0.kind(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-image", post(generate_image_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!(
        "Health check: API key {}",
        if state.api_key_set { "set" } else { "not set" }
    );
    Json(HealthResponse {
        status: "ok".to_string(),
        api_key_set: state.api_key_set,
    })
}

async fn generate_image_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    debug!(
        "Image generation request received: prompt_len={}, aspect_ratio={}",
        request.prompt.len(),
        request.aspect_ratio
    );

    let image = state
        .app
        .generate_image(&request.prompt, &request.aspect_ratio)
        .await
        .map_err(|e| {
            warn!("Image generation failed ({:?}): {}", e.kind(), e);
            ApiError(e)
        })?;

    info!("Image generated: {} bytes", image.byte_len);

    Ok(Json(GenerateImageResponse {
        image: image.base64,
        mime_type: image.format.mime_type().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::TINY_PNG;
    use crate::ai::response::{Part, ProviderResponse};
    use crate::ai::MockImageProvider;
    use axum::body::Body;
    use axum::http::Request;
    use base64::Engine as _;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router(provider: &MockImageProvider, api_key_set: bool) -> Router {
        router(AppState {
            app: Arc::new(App::with_provider(Arc::new(provider.clone()))),
            api_key_set,
        })
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-image")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_reports_api_key() {
        let response = test_router(&MockImageProvider::new(), false)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok", "api_key_set": false }));
    }

    #[tokio::test]
    async fn test_generate_returns_base64_image() {
        let provider = MockImageProvider::new();
        let (status, body) = post_json(
            test_router(&provider, true),
            json!({ "prompt": "a red apple on a table" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mime_type"], "image/png");
        let image = base64::engine::general_purpose::STANDARD
            .decode(body["image"].as_str().unwrap())
            .unwrap();
        assert_eq!(image, TINY_PNG);
        assert_eq!(provider.requests()[0].aspect_ratio(), "16:9");
    }

    #[tokio::test]
    async fn test_blank_prompt_is_bad_request() {
        let provider = MockImageProvider::new();
        let (status, body) = post_json(
            test_router(&provider, true),
            json!({ "prompt": "   ", "aspect_ratio": "1:1" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_input");
        assert_eq!(body["detail"], "Prompt cannot be empty");
        assert_eq!(provider.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_core_failures_are_internal_errors() {
        let provider = MockImageProvider::new()
            .with_response(ProviderResponse::from_parts(vec![Part::text("no image")]));
        let (status, body) =
            post_json(test_router(&provider, true), json!({ "prompt": "a cat" })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "no_image_found");
        assert_eq!(body["detail"], "No images generated");
    }

    #[tokio::test]
    async fn test_missing_prompt_field_is_rejected_before_core() {
        let provider = MockImageProvider::new();
        let (status, _) =
            post_json(test_router(&provider, true), json!({ "aspect_ratio": "1:1" })).await;

        assert!(status.is_client_error());
        assert_eq!(provider.get_call_count(), 0);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::InvalidInput("x".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::InvalidImageFormat).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(Error::Provider("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
