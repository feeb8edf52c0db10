use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student account. The password is stored verbatim, matching the
/// original contract; `User` is never serialized to the wire.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub student_id: String,
}
