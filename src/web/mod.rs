pub mod error;
pub mod routes;

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::scheduled_activity_service::ScheduledActivityService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub scheduling: Arc<ScheduledActivityService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, scheduling: ScheduledActivityService) -> Self {
        Self {
            pool,
            scheduling: Arc::new(scheduling),
        }
    }
}

pub fn router(state: AppState) -> Router {
    routes::router().with_state(state)
}
