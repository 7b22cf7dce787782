use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Captcha Solver API",
        version = "1.0.0",
        description = "Reads the text out of base64-encoded captcha images using Tesseract OCR.",
    ),
    paths(handlers::solve::solve, handlers::health::health_check),
    components(schemas(
        dto::SolveRequest,
        dto::SolveResponse,
        dto::ErrorResponse,
        handlers::health::HealthData,
        handlers::health::OcrStatus,
    )),
    tags(
        (name = "solve", description = "Captcha text extraction"),
        (name = "health", description = "Health check"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
