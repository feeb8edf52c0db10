use sqlx::SqlitePool;

use crate::services::RegistrationService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub registration: RegistrationService,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        let registration = RegistrationService::new(db.clone());
        Self { db, registration }
    }
}
