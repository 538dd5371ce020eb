#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

use friendsocial::database;
use friendsocial::services::scheduled_activity_service::ScheduledActivityService;

// A single connection keeps the in-memory database alive and shared.
pub async fn setup_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    database::run_migrations(&pool).await.unwrap();
    pool
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn service_at(pool: &SqlitePool, now: DateTime<Utc>) -> ScheduledActivityService {
    ScheduledActivityService::with_sqlite_lookups(pool.clone()).with_clock(Arc::new(move || now))
}

pub async fn insert_activity(pool: &SqlitePool, id: &str, minutes: i64) {
    sqlx::query(
        "INSERT INTO activities (id, name, estimated_duration_secs, location_id) VALUES (?1, ?2, ?3, NULL)",
    )
    .bind(id)
    .bind(format!("activity {}", id))
    .bind(minutes * 60)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_preference(
    pool: &SqlitePool,
    id: &str,
    activity_id: &str,
    frequency: i64,
    period: &str,
    days_of_week: &str,
    roster: &[&str],
) {
    sqlx::query(
        "INSERT INTO activity_preferences (id, user_id, activity_id, frequency, frequency_period, days_of_week) \
         VALUES (?1, 'owner', ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(activity_id)
    .bind(frequency)
    .bind(period)
    .bind(days_of_week)
    .execute(pool)
    .await
    .unwrap();

    for user_id in roster {
        sqlx::query(
            "INSERT INTO activity_preference_participants (activity_preference_id, user_id) VALUES (?1, ?2)",
        )
        .bind(id)
        .bind(*user_id)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_participations(pool: &SqlitePool, user_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_participants WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
