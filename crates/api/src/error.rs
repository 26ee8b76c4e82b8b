//! Mapping engine errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use engine::EngineError;

/// Wrapper so engine errors can be returned straight from handlers with `?`.
///
/// Lookup-by-key failures become 404; every other rejection (validation
/// failures, illegal transitions, surfaced integrity errors) is 400.  The
/// body is always `{"error": "<message>"}`.
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
