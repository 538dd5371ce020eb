use sqlx::SqlitePool;

use crate::models::ActivityRow;

const SQL_LOAD_ACTIVITY: &str = r#"
SELECT
  id,
  name,
  estimated_duration_secs,
  location_id
FROM activities
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_activity(pool: &SqlitePool, activity_id: &str) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LOAD_ACTIVITY)
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}
