use axum::Json;
use axum::extract::Path;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/courses", get(list_courses))
        .route(
            "/api/user/{student_id}/courses",
            get(user_courses).post(toggle_course),
        )
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .registration
        .authenticate(&req.student_id, &req.password)
        .await?;
    Ok(Json(LoginResponse {
        success: true,
        student_id: user.student_id,
    }))
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.registration.list_courses().await?;
    Ok(Json(courses))
}

async fn user_courses(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.registration.user_courses(&student_id).await?;
    Ok(Json(courses))
}

async fn toggle_course(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(req): Json<ToggleCourseRequest>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state
        .registration
        .toggle_course(&student_id, req.course_id)
        .await?;
    Ok(Json(courses))
}
