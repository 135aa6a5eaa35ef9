use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use todolist_infra::{ErrorCodePolicy, RepositoryError};

pub fn repository_error_to_response(
    err: RepositoryError,
    policy: ErrorCodePolicy,
) -> axum::response::Response {
    match (&err, policy) {
        // Validation is a request-boundary failure under either policy.
        (RepositoryError::Validation(msg), _) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone())
        }
        (_, ErrorCodePolicy::Legacy) => {
            tracing::error!(error = %err, "request failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err.to_string())
        }
        (RepositoryError::DuplicateTitle(_), ErrorCodePolicy::Strict) => {
            json_error(StatusCode::CONFLICT, "duplicate_title", err.to_string())
        }
        (RepositoryError::NotFound(_), ErrorCodePolicy::Strict) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        (RepositoryError::StoreUnavailable(_), ErrorCodePolicy::Strict) => {
            tracing::error!(error = %err, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", err.to_string())
        }
    }
}

/// Error body: `{"error": <message>, "code": <machine code>}`.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
