use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use registry_types::api::{NotFoundBody, VerifyResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Header names checked in order; the first non-empty one wins. Values are
/// read as UTF-8 so non-ASCII usernames match exactly.
pub const USERNAME_HEADERS: [&str; 2] = ["x-username", "username"];

fn username_from_headers(headers: &HeaderMap) -> Option<String> {
    USERNAME_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}

/// GET|POST /api/verify — existence check for other services.
pub async fn verify_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let username = username_from_headers(&headers).ok_or(ApiError::MissingUsernameHeader)?;

    let lookup = username.clone();
    let exists = state.run_db(move |db| db.user_exists(&lookup)).await?;
    debug!("verify {}: exists={}", username, exists);

    if exists {
        Ok(Json(VerifyResponse {
            success: true,
            message: format!("User {} exists", username),
            username,
        })
        .into_response())
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            Json(NotFoundBody {
                success: false,
                message: format!("User {} not found", username),
                username: Some(username),
            }),
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn x_username_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("username", HeaderValue::from_static("bob"));
        headers.insert("x-username", HeaderValue::from_static("alice"));
        assert_eq!(username_from_headers(&headers).as_deref(), Some("alice"));
    }

    #[test]
    fn falls_back_to_username_header() {
        let mut headers = HeaderMap::new();
        headers.insert("username", HeaderValue::from_static("bob"));
        assert_eq!(username_from_headers(&headers).as_deref(), Some("bob"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-username", HeaderValue::from_static(""));
        assert_eq!(username_from_headers(&headers), None);

        headers.insert("username", HeaderValue::from_static("carol"));
        assert_eq!(username_from_headers(&headers).as_deref(), Some("carol"));
    }

    #[test]
    fn utf8_value_is_read_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert("x-username", HeaderValue::from_bytes("josé".as_bytes()).unwrap());
        assert_eq!(username_from_headers(&headers).as_deref(), Some("josé"));
    }

    #[test]
    fn invalid_utf8_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-username", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        headers.insert("username", HeaderValue::from_static("bob"));
        assert_eq!(username_from_headers(&headers).as_deref(), Some("bob"));
    }
}
