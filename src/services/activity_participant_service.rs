use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::{activity_participant_repo, scheduled_activity_repo};
use crate::error::{persistence, Result, SchedulingError};
use crate::models::{ActivityParticipant, InviteStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct NewParticipantRequest {
    pub user_id: String,
    pub scheduled_activity_id: String,
    #[serde(default)]
    pub invite_status: InviteStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateParticipantRequest {
    pub invite_status: InviteStatus,
}

pub async fn create_participant(
    pool: &SqlitePool,
    req: NewParticipantRequest,
) -> Result<ActivityParticipant> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(SchedulingError::validation("user_id must not be empty"));
    }

    let exists = scheduled_activity_repo::load_scheduled_activity(pool, &req.scheduled_activity_id)
        .await
        .map_err(persistence(format!(
            "load scheduled activity {}",
            req.scheduled_activity_id
        )))?
        .is_some();
    if !exists {
        return Err(SchedulingError::not_found(format!(
            "scheduled activity {}",
            req.scheduled_activity_id
        )));
    }

    let id = Uuid::new_v4().to_string();
    let res = activity_participant_repo::insert_participant(
        pool,
        activity_participant_repo::NewActivityParticipant {
            id: &id,
            user_id,
            scheduled_activity_id: &req.scheduled_activity_id,
            invite_status: req.invite_status,
        },
    )
    .await;

    match res {
        Ok(participant) => {
            info!(
                id = %participant.id,
                user_id = %participant.user_id,
                scheduled_activity_id = %participant.scheduled_activity_id,
                invite_status = %participant.invite_status,
                "participant_created"
            );
            Ok(participant)
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(SchedulingError::validation(format!(
                "user {} already participates in scheduled activity {}",
                user_id, req.scheduled_activity_id
            )))
        }
        Err(e) => Err(persistence(format!(
            "insert participant {} for scheduled activity {}",
            user_id, req.scheduled_activity_id
        ))(e)),
    }
}

pub async fn read_participant(pool: &SqlitePool, id: &str) -> Result<Option<ActivityParticipant>> {
    activity_participant_repo::load_participant(pool, id)
        .await
        .map_err(persistence(format!("load participant {}", id)))
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ActivityParticipant>> {
    activity_participant_repo::list_participants_all(pool)
        .await
        .map_err(persistence("list participants"))
}

pub async fn list_participants(
    pool: &SqlitePool,
    scheduled_activity_id: &str,
) -> Result<Vec<ActivityParticipant>> {
    activity_participant_repo::list_for_scheduled_activity(pool, scheduled_activity_id)
        .await
        .map_err(persistence(format!(
            "list participants of scheduled activity {}",
            scheduled_activity_id
        )))
}

/// `Ok(None)` when no participation has this id.
pub async fn update_invite_status(
    pool: &SqlitePool,
    id: &str,
    req: UpdateParticipantRequest,
) -> Result<Option<ActivityParticipant>> {
    activity_participant_repo::update_invite_status(pool, id, req.invite_status)
        .await
        .map_err(persistence(format!("update invite status of participant {}", id)))
}

/// `Ok(false)` when no participation has this id.
pub async fn delete_participant(pool: &SqlitePool, id: &str) -> Result<bool> {
    let removed = activity_participant_repo::delete_participant(pool, id)
        .await
        .map_err(persistence(format!("delete participant {}", id)))?;
    Ok(removed > 0)
}
