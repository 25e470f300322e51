use crate::sleep::SleepError;
use axum::{http::StatusCode, Json};
use serde_json::json;
use tracing::warn;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<SleepError> for AppError {
    fn from(err: SleepError) -> Self {
        warn!("rejected sleep entry: {err}");
        Self::bad_request("Invalid time format")
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
