use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::User;

// -- Errors --

/// Body of every 400/409/500 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Body of a 404 from verify or delete. `username` is only echoed by verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundBody {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

// -- Verify --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<User>,
}

/// Only `username` is read; other fields in the body are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddUserResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

// -- Info --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}
