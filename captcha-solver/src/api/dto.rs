//! Request and response bodies for the solve endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /solve`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SolveRequest {
    /// Base64-encoded image bytes (PNG, JPEG, GIF, BMP, TIFF, WebP).
    /// A `data:image/...;base64,` URL is also accepted.
    pub data: String,
}

/// Successful result of `POST /solve`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct SolveResponse {
    /// Text recognised in the image, without leading or trailing whitespace.
    pub solution: String,
}

/// Error body returned by every failing request.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Mirrors the HTTP status code.
    pub code: u16,
}
