//! Error Conversion
//!
//! Converts `ApiError` values into HTTP responses. The response body is
//! JSON with a machine-readable `category` and a human-readable `error`
//! message; no internal detail is exposed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(ref source) = self {
            tracing::error!("Storage failure: {:?}", source);
        }

        let status = self.status_code();
        let body = serde_json::json!({
            "category": self.category(),
            "error": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}
