pub mod activity_participant_repo;
pub mod activity_preference_repo;
pub mod activity_repo;
pub mod scheduled_activity_repo;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::SqlitePool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
