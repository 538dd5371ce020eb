use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{ActivityParticipant, InviteStatus};

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (
  id,
  user_id,
  scheduled_activity_id,
  invite_status
) VALUES (?1, ?2, ?3, ?4)
RETURNING id, user_id, scheduled_activity_id, invite_status
"#;

pub struct NewActivityParticipant<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub scheduled_activity_id: &'a str,
    pub invite_status: InviteStatus,
}

pub async fn insert_participant<'e, E>(
    executor: E,
    new: NewActivityParticipant<'_>,
) -> sqlx::Result<ActivityParticipant>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ActivityParticipant>(SQL_INSERT_PARTICIPANT)
        .bind(new.id)
        .bind(new.user_id)
        .bind(new.scheduled_activity_id)
        .bind(new.invite_status)
        .fetch_one(executor)
        .await
}

const SQL_LOAD_PARTICIPANT: &str = r#"
SELECT id, user_id, scheduled_activity_id, invite_status
FROM activity_participants
WHERE id = ?1
"#;

pub async fn load_participant(
    pool: &SqlitePool,
    id: &str,
) -> sqlx::Result<Option<ActivityParticipant>> {
    sqlx::query_as::<_, ActivityParticipant>(SQL_LOAD_PARTICIPANT)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_PARTICIPANTS_ALL: &str = r#"
SELECT id, user_id, scheduled_activity_id, invite_status
FROM activity_participants
ORDER BY scheduled_activity_id ASC, user_id ASC
"#;

pub async fn list_participants_all(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityParticipant>> {
    sqlx::query_as::<_, ActivityParticipant>(SQL_LIST_PARTICIPANTS_ALL)
        .fetch_all(pool)
        .await
}

const SQL_LIST_FOR_SCHEDULED_ACTIVITY: &str = r#"
SELECT id, user_id, scheduled_activity_id, invite_status
FROM activity_participants
WHERE scheduled_activity_id = ?1
ORDER BY user_id ASC
"#;

pub async fn list_for_scheduled_activity(
    pool: &SqlitePool,
    scheduled_activity_id: &str,
) -> sqlx::Result<Vec<ActivityParticipant>> {
    sqlx::query_as::<_, ActivityParticipant>(SQL_LIST_FOR_SCHEDULED_ACTIVITY)
        .bind(scheduled_activity_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_FOR_USER_IN_SERIES: &str = r#"
SELECT ap.id, ap.user_id, ap.scheduled_activity_id, ap.invite_status
FROM activity_participants ap
JOIN scheduled_activities sa ON sa.id = ap.scheduled_activity_id
WHERE ap.user_id = ?1
  AND sa.activity_preference_id = ?2
ORDER BY datetime(sa.scheduled_at) ASC
"#;

pub async fn list_for_user_in_series(
    pool: &SqlitePool,
    user_id: &str,
    preference_id: &str,
) -> sqlx::Result<Vec<ActivityParticipant>> {
    sqlx::query_as::<_, ActivityParticipant>(SQL_LIST_FOR_USER_IN_SERIES)
        .bind(user_id)
        .bind(preference_id)
        .fetch_all(pool)
        .await
}

const SQL_UPDATE_INVITE_STATUS: &str = r#"
UPDATE activity_participants
SET invite_status = ?1
WHERE id = ?2
RETURNING id, user_id, scheduled_activity_id, invite_status
"#;

pub async fn update_invite_status(
    pool: &SqlitePool,
    id: &str,
    status: InviteStatus,
) -> sqlx::Result<Option<ActivityParticipant>> {
    sqlx::query_as::<_, ActivityParticipant>(SQL_UPDATE_INVITE_STATUS)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_PARTICIPANT: &str = r#"
DELETE FROM activity_participants
WHERE id = ?1
"#;

pub async fn delete_participant(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_PARTICIPANT)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_FUTURE_SERIES_PARTICIPATION: &str = r#"
DELETE FROM activity_participants
WHERE user_id = ?1
  AND scheduled_activity_id IN (
    SELECT id
    FROM scheduled_activities
    WHERE activity_preference_id = ?2
      AND datetime(scheduled_at) >= datetime(?3)
  )
"#;

pub async fn delete_future_series_participation<'e, E>(
    executor: E,
    user_id: &str,
    preference_id: &str,
    now: DateTime<Utc>,
) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(SQL_DELETE_FUTURE_SERIES_PARTICIPATION)
        .bind(user_id)
        .bind(preference_id)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
