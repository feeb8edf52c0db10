use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Course, User};

/// Owns the registration business rules: first login creates the
/// account, and course selection is a toggle against the user's set.
#[derive(Clone)]
pub struct RegistrationService {
    db: SqlitePool,
}

impl RegistrationService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Logs a student in. An unseen student id creates the account with
    /// the submitted password; a known one must match it verbatim.
    pub async fn authenticate(&self, student_id: &str, password: &str) -> Result<User, AppError> {
        match repository::find_user_by_student_id(&self.db, student_id).await? {
            None => {
                let user = repository::insert_user(&self.db, student_id, password).await?;
                info!("created account for student {}", student_id);
                Ok(user)
            }
            Some(user) if user.password == password => Ok(user),
            Some(_) => Err(AppError::InvalidCredentials),
        }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(repository::fetch_courses(&self.db).await?)
    }

    /// The user's selections, resolved to full course records.
    pub async fn user_courses(&self, student_id: &str) -> Result<Vec<Course>, AppError> {
        let user = repository::find_user_by_student_id(&self.db, student_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(repository::fetch_selected_courses(&self.db, user.id).await?)
    }

    /// Flips membership of `course_id` in the user's selection set and
    /// returns the post-toggle selections. Both lookups run before any
    /// write, so a failed call never mutates either store.
    pub async fn toggle_course(
        &self,
        student_id: &str,
        course_id: i64,
    ) -> Result<Vec<Course>, AppError> {
        let user = repository::find_user_by_student_id(&self.db, student_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        let course = repository::find_course_by_id(&self.db, course_id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        let added = repository::toggle_selection(&self.db, user.id, course.id).await?;
        debug!(
            "student {} {} course {}",
            student_id,
            if added { "selected" } else { "deselected" },
            course.code
        );

        Ok(repository::fetch_selected_courses(&self.db, user.id).await?)
    }
}
