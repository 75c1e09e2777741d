use std::collections::BTreeMap;

use axum::Json;

use registry_types::api::ApiInfo;

const ENDPOINTS: [(&str, &str); 5] = [
    ("/", "Visual database viewer"),
    ("/api/verify", "Verify user exists (requires X-Username header)"),
    ("/api/users", "GET: List all users, POST: Add new user"),
    ("/api/users/<username>", "DELETE: Delete a user"),
    ("/api/info", "This API information"),
];

/// GET /api/info
pub async fn api_info() -> Json<ApiInfo> {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(path, desc)| (path.to_string(), desc.to_string()))
        .collect();

    Json(ApiInfo {
        message: "User Management API".into(),
        endpoints,
    })
}
