use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::activity_participant_repo::{self, NewActivityParticipant};
use crate::database::scheduled_activity_repo::{self, NewScheduledActivity};
use crate::error::{persistence, Result};
use crate::models::{InviteStatus, ScheduledActivity};

/// Inserts one active occurrence. Used by the single and ad-hoc creation paths,
/// which do not fan out participants.
pub async fn write_occurrence(
    pool: &SqlitePool,
    activity_id: &str,
    scheduled_at: DateTime<Utc>,
    is_active: bool,
) -> Result<ScheduledActivity> {
    let id = Uuid::new_v4().to_string();
    scheduled_activity_repo::insert_scheduled_activity(
        pool,
        NewScheduledActivity {
            id: &id,
            activity_id,
            is_active,
            scheduled_at,
            activity_preference_id: None,
        },
    )
    .await
    .map_err(persistence(format!(
        "insert scheduled activity (activity_id={}, scheduled_at={})",
        activity_id, scheduled_at
    )))
}

/// Writes a whole recurring series: one occurrence per instant tagged with the
/// preference id, then a Pending participation per (occurrence, roster user).
/// Everything commits in one transaction or nothing does.
pub async fn write_series(
    pool: &SqlitePool,
    preference_id: &str,
    activity_id: &str,
    instants: &[DateTime<Utc>],
    roster: &[String],
) -> Result<Vec<ScheduledActivity>> {
    let mut tx = pool
        .begin()
        .await
        .map_err(persistence("begin series transaction"))?;

    let mut created = Vec::with_capacity(instants.len());
    for scheduled_at in instants {
        let id = Uuid::new_v4().to_string();
        let occurrence = scheduled_activity_repo::insert_scheduled_activity(
            &mut *tx,
            NewScheduledActivity {
                id: &id,
                activity_id,
                is_active: true,
                scheduled_at: *scheduled_at,
                activity_preference_id: Some(preference_id),
            },
        )
        .await
        .map_err(|e| {
            warn!(preference_id, %scheduled_at, error = %e, "series_insert_failed");
            persistence(format!(
                "insert scheduled activity for preference {} at {}",
                preference_id, scheduled_at
            ))(e)
        })?;
        created.push(occurrence);
    }

    for occurrence in &created {
        for user_id in roster {
            let id = Uuid::new_v4().to_string();
            activity_participant_repo::insert_participant(
                &mut *tx,
                NewActivityParticipant {
                    id: &id,
                    user_id,
                    scheduled_activity_id: &occurrence.id,
                    invite_status: InviteStatus::Pending,
                },
            )
            .await
            .map_err(|e| {
                warn!(
                    preference_id,
                    scheduled_activity_id = %occurrence.id,
                    user_id = %user_id,
                    error = %e,
                    "series_participant_insert_failed"
                );
                persistence(format!(
                    "invite user {} to scheduled activity {} of preference {}",
                    user_id, occurrence.id, preference_id
                ))(e)
            })?;
        }
    }

    tx.commit()
        .await
        .map_err(persistence(format!("commit series of preference {}", preference_id)))?;

    info!(
        preference_id,
        occurrences = created.len(),
        participants = created.len() * roster.len(),
        "series_written"
    );
    Ok(created)
}
