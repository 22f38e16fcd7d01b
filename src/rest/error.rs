// rest/error.rs — The single boundary where failures become HTTP responses.
//
// Every handler returns `Result<Json<Value>, ApiError>`; this IntoResponse
// impl is the only place a failure kind is translated to a status/message
// pair. Unexpected failures are logged with full context and reported
// generically — internal detail never reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::registry::RegionError;

#[derive(Debug)]
pub enum ApiError {
    /// A required request field was absent. Distinct from every domain error.
    MissingParameter(&'static str),
    Region(RegionError),
}

impl From<RegionError> for ApiError {
    fn from(err: RegionError) -> Self {
        ApiError::Region(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::MissingParameter(field) => (
                StatusCode::BAD_REQUEST,
                "missing_parameter",
                format!("missing required field {field}"),
            ),
            ApiError::Region(RegionError::Unexpected(inner)) => {
                error!(error = ?inner, "unexpected failure handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "unexpected",
                    "an unexpected error occurred".to_string(),
                )
            }
            ApiError::Region(err) => {
                let status = match err {
                    RegionError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RegionError::AlreadyExists { .. }
                    | RegionError::Overflow { .. }
                    | RegionError::Underflow { .. } => StatusCode::CONFLICT,
                    RegionError::OutOfBounds { .. } => StatusCode::BAD_REQUEST,
                    // Already matched above; kept for exhaustiveness.
                    RegionError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind(), err.to_string())
            }
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

/// Extract a required field from an optional request value.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ApiError> {
    value.ok_or(ApiError::MissingParameter(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Namespace;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ApiError::MissingParameter("key"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Region(RegionError::NotFound {
                    namespace: Namespace::Buffer,
                    key: "k".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Region(RegionError::AlreadyExists {
                    namespace: Namespace::General,
                    key: "k".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Region(RegionError::Overflow {
                    key: "k".into(),
                    capacity: 1,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Region(RegionError::Underflow { key: "k".into() }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Region(RegionError::OutOfBounds {
                    key: "k".into(),
                    index: -1,
                    size: 3,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Region(RegionError::Unexpected(anyhow::anyhow!("boom"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn required_reports_the_field_name() {
        let missing: Option<u64> = None;
        match required(missing, "size") {
            Err(ApiError::MissingParameter(field)) => assert_eq!(field, "size"),
            other => panic!("expected MissingParameter, got {other:?}"),
        }
        assert_eq!(required(Some(7u64), "size").unwrap(), 7);
    }
}
