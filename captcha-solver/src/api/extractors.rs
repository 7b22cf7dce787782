use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::SolverError;

/// `axum::Json` with rejections reported as [`SolverError`] JSON bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(SolverError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for SolverError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> SolverError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return SolverError::PayloadTooLarge("Request body exceeds the configured limit".into());
    }

    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            match extract_missing_field(&message) {
                Some(field) => SolverError::MissingField(field.to_string()),
                None => SolverError::Validation(format!("Invalid JSON: {message}")),
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            SolverError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            SolverError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            SolverError::Internal("Failed to read request body".to_string())
        }
        _ => SolverError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
