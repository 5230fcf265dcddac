use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFoundError(String),
    ConflictError(String),
    UnprocessableError(String),
    UpstreamError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::UpstreamError(msg) => {
                tracing::warn!("Upstream collaborator failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

/// Persistence port errors arrive as boxed trait objects; fold them into the
/// internal-error path.
pub fn store_error(err: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    AppError::Anyhow(anyhow::anyhow!("cart store failure: {}", err))
}
