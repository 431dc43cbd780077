//! JSON response envelope.
//!
//! Every endpoint answers with the same shape:
//!
//! ```json
//! { "code": 200, "details": "...", "errors": {...}, "data": {...} }
//! ```
//!
//! Only `code` is always present; the other fields are omitted when empty.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize = ()> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope carrying only a status code.
    pub fn status(code: u16) -> Self {
        Self {
            code,
            details: None,
            errors: None,
            data: None,
        }
    }

    /// 200 envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::status(StatusCode::OK.as_u16()).with_data(data)
    }

    /// 201 envelope carrying `data`.
    pub fn created(data: T) -> Self {
        Self::status(StatusCode::CREATED.as_u16()).with_data(data)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
