use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl SolverError {
    pub fn status(&self) -> StatusCode {
        match self {
            SolverError::MissingField(_) | SolverError::Validation(_) | SolverError::Decode(_) => {
                StatusCode::BAD_REQUEST
            }
            SolverError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            SolverError::Ocr(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SolverError::OcrUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SolverError::NotFound(_) => StatusCode::NOT_FOUND,
            SolverError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SolverError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SolverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            SolverError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while handling request");
                "An internal error occurred".to_string()
            }
            SolverError::OcrUnavailable(msg) => {
                tracing::error!(reason = %msg, "OCR engine unavailable");
                self.to_string()
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            SolverError::MissingField("data".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SolverError::Decode("bad base64".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SolverError::Ocr("engine failed".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            SolverError::PayloadTooLarge("too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn unavailable_engine_is_503() {
        assert_eq!(
            SolverError::OcrUnavailable("no tessdata".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn error_body_is_json_with_code() {
        let response = SolverError::MissingField("data".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "error responses must be JSON"
        );

        let json = body_json(response).await;
        assert_eq!(json["code"], 400);
        assert_eq!(json["error"], "Missing required field: data");
    }

    #[tokio::test]
    async fn internal_error_does_not_leak_details() {
        let response = SolverError::Internal("mutex poisoned at 0xdead".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "An internal error occurred");
    }
}
