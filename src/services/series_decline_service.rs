use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::{activity_participant_repo, scheduled_activity_repo};
use crate::error::{persistence, Result, SchedulingError};

/// Removes `user_id`'s participation in every occurrence of the series that
/// `scheduled_activity_id` belongs to, starting at or after `now`. Past
/// occurrences and other users are untouched. Returns the number of rows
/// removed; repeating the call removes nothing and succeeds.
pub async fn decline_series(
    pool: &SqlitePool,
    user_id: &str,
    scheduled_activity_id: &str,
    now: DateTime<Utc>,
) -> Result<u64> {
    let mut tx = pool
        .begin()
        .await
        .map_err(persistence("begin decline transaction"))?;

    let preference_id = scheduled_activity_repo::load_preference_id(&mut *tx, scheduled_activity_id)
        .await
        .map_err(persistence(format!(
            "load preference of scheduled activity {}",
            scheduled_activity_id
        )))?
        .ok_or_else(|| {
            SchedulingError::not_found(format!("scheduled activity {}", scheduled_activity_id))
        })?
        .ok_or_else(|| {
            SchedulingError::not_found(format!(
                "recurring series for scheduled activity {}",
                scheduled_activity_id
            ))
        })?;

    let removed = activity_participant_repo::delete_future_series_participation(
        &mut *tx,
        user_id,
        &preference_id,
        now,
    )
    .await
    .map_err(persistence(format!(
        "delete participations of user {} in preference {}",
        user_id, preference_id
    )))?;

    tx.commit()
        .await
        .map_err(persistence(format!("commit decline of preference {}", preference_id)))?;

    info!(user_id, %preference_id, removed, "series_declined");
    Ok(removed)
}
