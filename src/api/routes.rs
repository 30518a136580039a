//! HTTP API route definitions.

use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{self, generate_pdf, metrics_text, props, root, AppState};
use crate::error::ErrorBody;
use crate::props::PropRecord;

/// OpenAPI document for the public routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "EVPlus Backend", description = "PrizePicks props as JSON and PDF"),
    paths(handlers::root, handlers::props, handlers::generate_pdf),
    components(schemas(PropRecord, ErrorBody))
)]
pub struct ApiDoc;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/props", get(props))
        .route("/api/generate-pdf", get(generate_pdf))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
