use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated(reason) => {
                // Log the precise failure; the body stays generic so the
                // response cannot be used as a verification oracle.
                tracing::warn!(error = %reason, "Request authentication failed");
                error_resp(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "authentication required",
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                error_resp(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    "internal error",
                )
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, detail: &str) -> Response {
    let body = serde_json::json!({ "error": code.as_str(), "detail": detail });
    (status, Json(body)).into_response()
}
