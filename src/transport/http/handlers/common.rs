use crate::store::StoreError;
use crate::transport::http::types::ErrorBody;
use axum::http::StatusCode;
use axum::Json;

/// Maps store outcomes onto the HTTP status contract: 400 for duplicate ids,
/// constraint violations and malformed payloads, 404 for absent ids.
pub fn error_response(err: StoreError) -> (StatusCode, Json<ErrorBody>) {
    match err {
        StoreError::DuplicateKey(id) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: format!("PassengerId {} already exists", id),
                violations: None,
            }),
        ),
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("Passenger with ID {} not found", id),
                violations: None,
            }),
        ),
        StoreError::Validation(violations) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Record validation failed".to_string(),
                violations: Some(violations),
            }),
        ),
        StoreError::MalformedInput(violations) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Malformed passenger payload".to_string(),
                violations: Some(violations),
            }),
        ),
    }
}
