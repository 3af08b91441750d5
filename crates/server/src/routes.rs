//! API routes for faqbot

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use faqbot_core::AppError;
use faqbot_knowledge::{AskResponse, FaqService, QUESTION_REQUIRED};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

type ServiceArc = Arc<FaqService>;

/// An `AppError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_user_error() {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": self.0.to_string() })))
                .into_response();
        }

        tracing::error!("Ask failed ({}): {}", self.0.kind(), self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.kind(), "message": self.0.to_string() })),
        )
            .into_response()
    }
}

// ============================================================================
// Ask Routes
// ============================================================================

pub fn ask_routes() -> Router<ServiceArc> {
    Router::new()
        .route("/ask", ask_method_router())
        .route("/api/ask", ask_method_router())
}

fn ask_method_router() -> MethodRouter<ServiceArc> {
    post(ask).fallback(method_not_allowed)
}

async fn ask(
    State(service): State<ServiceArc>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected ask body: {}", rejection);
        AppError::InvalidInput(QUESTION_REQUIRED.to_string())
    })?;

    let response = service.ask(body.get("question")).await?;
    Ok(Json(response))
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn health_routes() -> Router<ServiceArc> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
