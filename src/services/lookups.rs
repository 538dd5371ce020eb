//! Read-only handles the scheduling service needs from the surrounding record
//! stores. Injected at construction so tests can swap them out.

use async_trait::async_trait;
use chrono::TimeDelta;
use sqlx::SqlitePool;

use crate::database::{activity_preference_repo, activity_repo};
use crate::error::{persistence, Result, SchedulingError};
use crate::models::ActivityPreferenceRow;

#[async_trait]
pub trait PreferenceReader: Send + Sync {
    async fn read_preference(&self, preference_id: &str) -> Result<Option<ActivityPreferenceRow>>;
}

#[async_trait]
pub trait RosterReader: Send + Sync {
    /// User ids invited by default to every occurrence of the preference.
    async fn read_roster(&self, preference_id: &str) -> Result<Vec<String>>;
}

#[async_trait]
pub trait DurationResolver: Send + Sync {
    /// Fails with `NotFound` when the activity does not exist.
    async fn estimated_duration(&self, activity_id: &str) -> Result<TimeDelta>;
}

/// SQLite-backed implementation of all three lookups.
#[derive(Clone)]
pub struct SqliteLookups {
    pool: SqlitePool,
}

impl SqliteLookups {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceReader for SqliteLookups {
    async fn read_preference(&self, preference_id: &str) -> Result<Option<ActivityPreferenceRow>> {
        activity_preference_repo::load_preference(&self.pool, preference_id)
            .await
            .map_err(persistence(format!("load activity preference {}", preference_id)))
    }
}

#[async_trait]
impl RosterReader for SqliteLookups {
    async fn read_roster(&self, preference_id: &str) -> Result<Vec<String>> {
        activity_preference_repo::list_roster(&self.pool, preference_id)
            .await
            .map_err(persistence(format!("load roster of preference {}", preference_id)))
    }
}

#[async_trait]
impl DurationResolver for SqliteLookups {
    async fn estimated_duration(&self, activity_id: &str) -> Result<TimeDelta> {
        let activity = activity_repo::load_activity(&self.pool, activity_id)
            .await
            .map_err(persistence(format!("load activity {}", activity_id)))?
            .ok_or_else(|| SchedulingError::not_found(format!("activity {}", activity_id)))?;
        TimeDelta::try_seconds(activity.estimated_duration_secs).ok_or_else(|| {
            SchedulingError::validation(format!(
                "activity {} has an out-of-range duration of {}s",
                activity_id, activity.estimated_duration_secs
            ))
        })
    }
}
