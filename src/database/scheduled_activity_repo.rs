use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::ScheduledActivity;

const SQL_INSERT_SCHEDULED_ACTIVITY: &str = r#"
INSERT INTO scheduled_activities (
  id,
  activity_id,
  is_active,
  scheduled_at,
  activity_preference_id
) VALUES (?1, ?2, ?3, ?4, ?5)
RETURNING id, activity_id, is_active, scheduled_at, activity_preference_id
"#;

pub struct NewScheduledActivity<'a> {
    pub id: &'a str,
    pub activity_id: &'a str,
    pub is_active: bool,
    pub scheduled_at: DateTime<Utc>,
    pub activity_preference_id: Option<&'a str>,
}

pub async fn insert_scheduled_activity<'e, E>(
    executor: E,
    new: NewScheduledActivity<'_>,
) -> sqlx::Result<ScheduledActivity>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ScheduledActivity>(SQL_INSERT_SCHEDULED_ACTIVITY)
        .bind(new.id)
        .bind(new.activity_id)
        .bind(new.is_active)
        .bind(new.scheduled_at)
        .bind(new.activity_preference_id)
        .fetch_one(executor)
        .await
}

const SQL_LOAD_SCHEDULED_ACTIVITY: &str = r#"
SELECT id, activity_id, is_active, scheduled_at, activity_preference_id
FROM scheduled_activities
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_scheduled_activity(
    pool: &SqlitePool,
    id: &str,
) -> sqlx::Result<Option<ScheduledActivity>> {
    sqlx::query_as::<_, ScheduledActivity>(SQL_LOAD_SCHEDULED_ACTIVITY)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_SCHEDULED_ACTIVITIES: &str = r#"
SELECT id, activity_id, is_active, scheduled_at, activity_preference_id
FROM scheduled_activities
ORDER BY datetime(scheduled_at) ASC, id ASC
"#;

pub async fn list_scheduled_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ScheduledActivity>> {
    sqlx::query_as::<_, ScheduledActivity>(SQL_LIST_SCHEDULED_ACTIVITIES)
        .fetch_all(pool)
        .await
}

const SQL_LIST_BY_ACTIVE_FLAG: &str = r#"
SELECT id, activity_id, is_active, scheduled_at, activity_preference_id
FROM scheduled_activities
WHERE is_active = ?1
ORDER BY datetime(scheduled_at) ASC, id ASC
"#;

pub async fn list_by_active_flag(
    pool: &SqlitePool,
    is_active: bool,
) -> sqlx::Result<Vec<ScheduledActivity>> {
    sqlx::query_as::<_, ScheduledActivity>(SQL_LIST_BY_ACTIVE_FLAG)
        .bind(is_active)
        .fetch_all(pool)
        .await
}

// Half-open range on the start instant: [from, to).
const SQL_LIST_STARTING_BETWEEN: &str = r#"
SELECT id, activity_id, is_active, scheduled_at, activity_preference_id
FROM scheduled_activities
WHERE datetime(scheduled_at) >= datetime(?1)
  AND datetime(scheduled_at) < datetime(?2)
ORDER BY datetime(scheduled_at) ASC
"#;

pub async fn list_starting_between(
    pool: &SqlitePool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> sqlx::Result<Vec<ScheduledActivity>> {
    sqlx::query_as::<_, ScheduledActivity>(SQL_LIST_STARTING_BETWEEN)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
}

/// Updatable columns. `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct ScheduledActivityChanges<'a> {
    pub activity_id: Option<&'a str>,
    pub is_active: Option<bool>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

const SQL_UPDATE_SCHEDULED_ACTIVITY: &str = r#"
UPDATE scheduled_activities
SET
  activity_id = COALESCE(?1, activity_id),
  is_active = COALESCE(?2, is_active),
  scheduled_at = COALESCE(?3, scheduled_at)
WHERE id = ?4
RETURNING id, activity_id, is_active, scheduled_at, activity_preference_id
"#;

pub async fn update_scheduled_activity(
    pool: &SqlitePool,
    id: &str,
    changes: ScheduledActivityChanges<'_>,
) -> sqlx::Result<Option<ScheduledActivity>> {
    sqlx::query_as::<_, ScheduledActivity>(SQL_UPDATE_SCHEDULED_ACTIVITY)
        .bind(changes.activity_id)
        .bind(changes.is_active)
        .bind(changes.scheduled_at)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_SCHEDULED_ACTIVITY: &str = r#"
DELETE FROM scheduled_activities
WHERE id = ?1
"#;

pub async fn delete_scheduled_activity(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_SCHEDULED_ACTIVITY)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LOAD_PREFERENCE_ID: &str = r#"
SELECT activity_preference_id
FROM scheduled_activities
WHERE id = ?1
"#;

/// Outer `None`: no such scheduled activity. Inner `None`: ad-hoc occurrence.
pub async fn load_preference_id<'e, E>(
    executor: E,
    scheduled_activity_id: &str,
) -> sqlx::Result<Option<Option<String>>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, Option<String>>(SQL_LOAD_PREFERENCE_ID)
        .bind(scheduled_activity_id)
        .fetch_optional(executor)
        .await
}
