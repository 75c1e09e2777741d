use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use registry_types::api::{ErrorBody, NotFoundBody};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username header missing")]
    MissingUsernameHeader,

    #[error("Username is required")]
    MissingUsernameField,

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("User already exists")]
    UserExists(String),

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn error_body(status: StatusCode, error: &str, message: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message,
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingUsernameHeader => error_body(
                StatusCode::BAD_REQUEST,
                "Username header missing",
                "Please provide username in X-Username or Username header".into(),
            ),
            ApiError::MissingUsernameField => error_body(
                StatusCode::BAD_REQUEST,
                "Username is required",
                "Please provide username in request body".into(),
            ),
            ApiError::UserNotFound(username) => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    success: false,
                    message: format!("User {} not found", username),
                    username: None,
                }),
            )
                .into_response(),
            ApiError::UserExists(username) => error_body(
                StatusCode::CONFLICT,
                "User already exists",
                format!("User {} already exists in database", username),
            ),
            ApiError::Database(e) => {
                error!("Storage failure: {:#}", e);
                internal()
            }
            ApiError::Join(e) => {
                error!("spawn_blocking join error: {}", e);
                internal()
            }
        }
    }
}

fn internal() -> Response {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        "The request could not be completed".into(),
    )
}
