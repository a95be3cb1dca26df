use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = %self, "Request failed");

        let code = self.code();
        match self {
            AppError::InvalidPayload(msg) => error_resp(StatusCode::BAD_REQUEST, code, Some(msg)),
            AppError::Unauthorized => error_resp(StatusCode::UNAUTHORIZED, code, None),
            AppError::NotFound(_) => error_resp(StatusCode::NOT_FOUND, code, None),
            AppError::MissingProductId { event_type } => error_resp(
                StatusCode::UNPROCESSABLE_ENTITY,
                code,
                Some(format!("Event {} requires a product_id", event_type)),
            ),
            AppError::Persistence(_) | AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, code, None)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
