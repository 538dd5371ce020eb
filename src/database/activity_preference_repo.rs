use sqlx::SqlitePool;

use crate::models::ActivityPreferenceRow;

const SQL_LOAD_PREFERENCE: &str = r#"
SELECT
  id,
  user_id,
  activity_id,
  frequency,
  frequency_period,
  days_of_week
FROM activity_preferences
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_preference(
    pool: &SqlitePool,
    preference_id: &str,
) -> sqlx::Result<Option<ActivityPreferenceRow>> {
    sqlx::query_as::<_, ActivityPreferenceRow>(SQL_LOAD_PREFERENCE)
        .bind(preference_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_ROSTER: &str = r#"
SELECT user_id
FROM activity_preference_participants
WHERE activity_preference_id = ?1
ORDER BY user_id ASC
"#;

pub async fn list_roster(pool: &SqlitePool, preference_id: &str) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(SQL_LIST_ROSTER)
        .bind(preference_id)
        .fetch_all(pool)
        .await
}
