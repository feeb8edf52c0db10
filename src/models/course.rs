use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. `id` is the public catalog id assigned at seed
/// time (1..=6) and is the only course identifier in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCourseRequest {
    pub course_id: i64,
}
