pub mod error;
pub mod info;
pub mod state;
pub mod ui;
pub mod users;
pub mod verify;

use axum::{
    Router,
    routing::{delete, get},
};

pub use state::{AppState, AppStateInner};

/// Route table of the registry service. Layers (CORS, tracing) are added by
/// the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/verify", get(verify::verify_user).post(verify::verify_user))
        .route("/api/users", get(users::list_users).post(users::add_user))
        .route("/api/users/{username}", delete(users::delete_user))
        .route("/api/info", get(info::api_info))
        .with_state(state)
}
