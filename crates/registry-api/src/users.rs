use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use anyhow::Context;
use tracing::info;

use registry_db::{CreateUser, models::UserRow};
use registry_types::api::{AddUserRequest, AddUserResponse, DeleteUserResponse, ListUsersResponse};
use registry_types::models::User;

use crate::error::ApiError;
use crate::state::AppState;

/// A stored timestamp that cannot be parsed is a storage fault, not a value
/// to paper over.
fn to_user(row: UserRow) -> anyhow::Result<User> {
    let created_at = row
        .created_at
        .parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // SQLite's CURRENT_TIMESTAMP is "YYYY-MM-DD HH:MM:SS" in UTC, no zone suffix.
            chrono::NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .with_context(|| format!("corrupt created_at '{}' on user {}", row.created_at, row.id))?;

    Ok(User {
        id: row.id,
        username: row.username,
        created_at,
    })
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ListUsersResponse>, ApiError> {
    let rows = state.run_db(|db| db.list_users()).await?;
    let users = rows.into_iter().map(to_user).collect::<anyhow::Result<Vec<User>>>()?;

    Ok(Json(ListUsersResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

/// POST /api/users
///
/// The body is parsed by hand so that a missing, malformed or incomplete
/// body always gets the same 400 response.
pub async fn add_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: AddUserRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::MissingUsernameField)?;
    let username = req.username;

    let name = username.clone();
    match state.run_db(move |db| db.create_user(&name)).await? {
        CreateUser::Created => {
            info!("Added user {}", username);
            Ok((
                StatusCode::CREATED,
                Json(AddUserResponse {
                    success: true,
                    message: format!("User {} added successfully", username),
                    username,
                }),
            ))
        }
        CreateUser::AlreadyExists => Err(ApiError::UserExists(username)),
    }
}

/// DELETE /api/users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let name = username.clone();
    let removed = state.run_db(move |db| db.delete_user(&name)).await?;

    if !removed {
        return Err(ApiError::UserNotFound(username));
    }

    info!("Deleted user {}", username);
    Ok(Json(DeleteUserResponse {
        success: true,
        message: format!("User {} deleted successfully", username),
    }))
}
