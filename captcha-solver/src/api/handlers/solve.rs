use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::api::dto::{ErrorResponse, SolveRequest, SolveResponse};
use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::error::Result;

/// `POST /solve`
///
/// Decodes the base64 image in `data`, runs OCR over it and returns the
/// trimmed text.
#[utoipa::path(
    post,
    path = "/solve",
    tag = "solve",
    request_body = SolveRequest,
    responses(
        (status = 200, description = "Text extracted from the image", body = SolveResponse),
        (status = 400, description = "Missing `data`, invalid base64 or undecodable image", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 422, description = "OCR engine failed on the image", body = ErrorResponse),
        (status = 503, description = "OCR engine not available", body = ErrorResponse),
    )
)]
pub async fn solve(
    State(state): State<AppState>,
    AppJson(req): AppJson<SolveRequest>,
) -> Result<Json<SolveResponse>> {
    let solution = state.solver.solve(&req.data).await?;

    info!(chars = solution.chars().count(), "Captcha solved");

    Ok(Json(SolveResponse { solution }))
}
