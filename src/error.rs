use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_shopping::ShoppingListError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Authentication credentials were not provided or are invalid")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Shopping list error: {0}")]
    ShoppingListError(#[from] ShoppingListError),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(err) => AppError::DatabaseError(err),
            Err(err) => AppError::InternalError(err.to_string()),
        }
    }
}

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        let (status_code, detail) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, error_display),
            AppError::NotFound => (StatusCode::NOT_FOUND, error_display),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ShoppingListError(ShoppingListError::InvalidLine(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::ShoppingListError(ShoppingListError::RenderingUnavailable(err)) => {
                tracing::error!("Shopping list rendering failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}
