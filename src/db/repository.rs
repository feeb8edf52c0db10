use sqlx::SqlitePool;

use crate::models::{Course, User};

/// The fixed catalog, inserted once when the courses table is empty.
/// Ids are the public catalog ids (1..=6) and never change.
const SEED_COURSES: [(i64, &str, &str, &str, &str); 6] = [
    (1, "Web Development Bootcamp", "CS101", "Master HTML, CSS, and JavaScript.", "fa-code"),
    (2, "Data Science Fundamentals", "DS200", "Learn Python, Pandas, and ML.", "fa-database"),
    (3, "UI/UX Design Mastery", "DES305", "Create stunning user interfaces.", "fa-pen-nib"),
    (4, "Cloud Computing AWS", "CLD401", "Deploy scalable applications.", "fa-cloud"),
    (5, "Mobile App with Flutter", "MOB102", "Build native iOS and Android apps.", "fa-mobile-screen"),
    (6, "Cybersecurity Basics", "SEC250", "Protect systems and networks.", "fa-shield-halved"),
];

/// Seeds the catalog if it is empty. Returns true when rows were
/// inserted, false when the catalog already existed.
pub async fn seed_courses(db: &SqlitePool) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(db)
        .await?;
    if count > 0 {
        return Ok(false);
    }

    let mut tx = db.begin().await?;
    for (id, title, code, description, icon) in SEED_COURSES {
        sqlx::query(
            "INSERT INTO courses (id, title, code, description, icon) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind(code)
        .bind(description)
        .bind(icon)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(true)
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, icon FROM courses ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description, icon FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn find_user_by_student_id(
    db: &SqlitePool,
    student_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, student_id, password FROM users WHERE student_id = ?")
        .bind(student_id)
        .fetch_optional(db)
        .await
}

pub async fn insert_user(
    db: &SqlitePool,
    student_id: &str,
    password: &str,
) -> Result<User, sqlx::Error> {
    let id = sqlx::query("INSERT INTO users (student_id, password) VALUES (?, ?)")
        .bind(student_id)
        .bind(password)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(User {
        id,
        student_id: student_id.to_string(),
        password: password.to_string(),
    })
}

/// The user's selections resolved to full course records, in catalog
/// order. Membership is a set; ordering carries no meaning.
pub async fn fetch_selected_courses(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT c.id, c.title, c.code, c.description, c.icon
        FROM courses c
        JOIN selections s ON s.course_id = c.id
        WHERE s.user_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Flips membership of `course_id` in the user's selection set inside
/// one transaction, so the read-modify-write cannot interleave with a
/// concurrent toggle for the same user. Returns true when the course
/// was added, false when it was removed.
pub async fn toggle_selection(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    let removed = sqlx::query("DELETE FROM selections WHERE user_id = ? AND course_id = ?")
        .bind(user_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let added = removed == 0;
    if added {
        sqlx::query("INSERT INTO selections (user_id, course_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(added)
}
