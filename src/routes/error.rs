use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use evlog::meta;
use serde_json::json;

use crate::runtime::get_logger;

/// A failed request: a status and a message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with `context` followed by the full error chain.
    pub fn internal(context: &str, err: &anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {:#}", context, err))
    }

    fn log(&self) {
        if self.status.is_server_error() {
            get_logger().error("Request failed.", meta![
                "Status" => self.status,
                "Error" => self.message,
            ]);
        } else {
            get_logger().info("Request rejected.", meta![
                "Status" => self.status,
                "Error" => self.message,
            ]);
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status, format!("{}\n", self.message)).into_response()
    }
}

/// `AppError` rendered as `{"message": ...}` for the JSON API.
#[derive(Debug)]
pub struct JsonError(pub AppError);

impl From<AppError> for JsonError {
    fn from(err: AppError) -> Self {
        JsonError(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        self.0.log();
        (self.0.status, Json(json!({ "message": self.0.message }))).into_response()
    }
}
