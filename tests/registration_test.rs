use std::collections::HashSet;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use coursereg::db::repository;
use coursereg::error::AppError;
use coursereg::services::RegistrationService;

async fn setup() -> (SqlitePool, RegistrationService) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    repository::seed_courses(&pool)
        .await
        .expect("Failed to seed courses");

    let service = RegistrationService::new(pool.clone());
    (pool, service)
}

fn ids(courses: &[coursereg::models::Course]) -> HashSet<i64> {
    courses.iter().map(|c| c.id).collect()
}

#[tokio::test]
async fn first_login_creates_account() {
    let (_pool, service) = setup().await;

    let user = service
        .authenticate("alice", "secret")
        .await
        .expect("First login should create the account");
    assert_eq!(user.student_id, "alice");

    // Same password logs in again.
    service
        .authenticate("alice", "secret")
        .await
        .expect("Repeat login with the same password should succeed");

    // Wrong password is rejected, not treated as a new account.
    let err = service
        .authenticate("alice", "wrong")
        .await
        .expect_err("Wrong password should be rejected");
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn catalog_is_seeded_exactly_once() {
    let (pool, service) = setup().await;

    // A restart re-runs seeding against the same store; it must not
    // duplicate the catalog.
    assert!(!repository::seed_courses(&pool).await.expect("Re-seed failed"));

    let courses = service.list_courses().await.expect("Failed to list courses");
    assert_eq!(courses.len(), 6);
    let codes: HashSet<&str> = courses.iter().map(|c| c.code.as_str()).collect();
    for code in ["CS101", "DS200", "DES305", "CLD401", "MOB102", "SEC250"] {
        assert!(codes.contains(code), "missing seeded course {code}");
    }
}

#[tokio::test]
async fn fresh_user_has_no_selections() {
    let (_pool, service) = setup().await;

    service
        .authenticate("bob", "pw")
        .await
        .expect("Login failed");
    let courses = service
        .user_courses("bob")
        .await
        .expect("Failed to fetch selections");
    assert!(courses.is_empty());
}

#[tokio::test]
async fn toggling_twice_is_identity() {
    let (_pool, service) = setup().await;
    service
        .authenticate("carol", "pw")
        .await
        .expect("Login failed");

    service
        .toggle_course("carol", 5)
        .await
        .expect("First toggle failed");
    let after_pair = service
        .toggle_course("carol", 5)
        .await
        .expect("Second toggle failed");

    assert!(after_pair.is_empty());
}

#[tokio::test]
async fn unknown_user_or_course_fails_without_mutation() {
    let (_pool, service) = setup().await;
    service
        .authenticate("dave", "pw")
        .await
        .expect("Login failed");

    let err = service
        .toggle_course("nobody", 1)
        .await
        .expect_err("Unknown student id should fail");
    assert!(matches!(err, AppError::UserNotFound));

    let err = service
        .toggle_course("dave", 99)
        .await
        .expect_err("Unknown course id should fail");
    assert!(matches!(err, AppError::CourseNotFound));

    let err = service
        .user_courses("nobody")
        .await
        .expect_err("Unknown student id should fail");
    assert!(matches!(err, AppError::UserNotFound));

    // Neither failed call touched dave's selections.
    let courses = service
        .user_courses("dave")
        .await
        .expect("Failed to fetch selections");
    assert!(courses.is_empty());
}

#[tokio::test]
async fn registration_scenario() {
    let (_pool, service) = setup().await;

    service
        .authenticate("s1", "p")
        .await
        .expect("Login failed");

    let selections = service
        .toggle_course("s1", 2)
        .await
        .expect("Toggle 2 failed");
    assert_eq!(ids(&selections), HashSet::from([2]));

    let selections = service
        .toggle_course("s1", 4)
        .await
        .expect("Toggle 4 failed");
    assert_eq!(ids(&selections), HashSet::from([2, 4]));

    let selections = service
        .toggle_course("s1", 2)
        .await
        .expect("Toggle 2 again failed");
    assert_eq!(ids(&selections), HashSet::from([4]));

    let selections = service
        .user_courses("s1")
        .await
        .expect("Failed to fetch selections");
    assert_eq!(ids(&selections), HashSet::from([4]));
}

#[tokio::test]
async fn selections_are_independent_between_users() {
    let (_pool, service) = setup().await;
    service.authenticate("u1", "pw").await.expect("Login failed");
    service.authenticate("u2", "pw").await.expect("Login failed");

    service.toggle_course("u1", 1).await.expect("Toggle failed");
    service.toggle_course("u2", 2).await.expect("Toggle failed");

    let u1 = service.user_courses("u1").await.expect("Fetch failed");
    let u2 = service.user_courses("u2").await.expect("Fetch failed");
    assert_eq!(ids(&u1), HashSet::from([1]));
    assert_eq!(ids(&u2), HashSet::from([2]));
}
