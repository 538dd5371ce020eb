use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::database::scheduled_activity_repo::{self, ScheduledActivityChanges};
use crate::error::{persistence, Result, SchedulingError};
use crate::models::ScheduledActivity;
use crate::services::availability_service::{self, TimeWindow};
use crate::services::lookups::{DurationResolver, PreferenceReader, RosterReader, SqliteLookups};
use crate::services::recurrence::{self, RecurrenceRule};
use crate::services::{occurrence_writer, series_decline_service, time_input};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, Deserialize)]
pub struct NewScheduledActivityRequest {
    pub activity_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMultipleRequest {
    pub activity_id: String,
    #[serde(default)]
    pub selected_dates: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepeatScheduledActivityRequest {
    pub preference_id: String,
    pub start_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeclineRepeatedActivityRequest {
    pub user_id: String,
    pub scheduled_activity_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduledActivityRequest {
    pub activity_id: Option<String>,
    pub is_active: Option<bool>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

pub struct ScheduledActivityService {
    pool: SqlitePool,
    preferences: Arc<dyn PreferenceReader>,
    roster: Arc<dyn RosterReader>,
    durations: Arc<dyn DurationResolver>,
    clock: Clock,
}

impl ScheduledActivityService {
    pub fn new(
        pool: SqlitePool,
        preferences: Arc<dyn PreferenceReader>,
        roster: Arc<dyn RosterReader>,
        durations: Arc<dyn DurationResolver>,
    ) -> Self {
        Self {
            pool,
            preferences,
            roster,
            durations,
            clock: Arc::new(Utc::now),
        }
    }

    /// Wires every lookup to the same SQLite pool.
    pub fn with_sqlite_lookups(pool: SqlitePool) -> Self {
        let lookups = Arc::new(SqliteLookups::new(pool.clone()));
        Self::new(pool, lookups.clone(), lookups.clone(), lookups)
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub async fn create(&self, req: NewScheduledActivityRequest) -> Result<ScheduledActivity> {
        self.durations.estimated_duration(&req.activity_id).await?;
        let created = occurrence_writer::write_occurrence(
            &self.pool,
            &req.activity_id,
            req.scheduled_at,
            req.is_active,
        )
        .await?;
        info!(id = %created.id, activity_id = %created.activity_id, "scheduled_activity_created");
        Ok(created)
    }

    /// Ad-hoc batch: one occurrence per selected date whose window is free and
    /// not in the past. Conflicting and past dates are left out of the result.
    pub async fn create_multiple(&self, req: CreateMultipleRequest) -> Result<Vec<ScheduledActivity>> {
        let tz = time_input::parse_time_zone(&req.time_zone)?;
        let start_time = time_input::parse_time_of_day(&req.start_time)?;
        let end_time = time_input::parse_time_of_day(&req.end_time)?;
        if end_time <= start_time {
            return Err(SchedulingError::validation(format!(
                "end time {} must be after start time {}",
                end_time, start_time
            )));
        }
        let dates = req
            .selected_dates
            .iter()
            .map(|d| time_input::parse_date(d))
            .collect::<Result<Vec<NaiveDate>>>()?;

        self.durations.estimated_duration(&req.activity_id).await?;

        let now = self.now();
        let mut created = Vec::new();
        for date in dates {
            let start = time_input::resolve_local(date, start_time, tz)?.with_timezone(&Utc);
            let end = time_input::resolve_local(date, end_time, tz)?.with_timezone(&Utc);

            if start < now {
                debug!(%date, "skipping past date");
                continue;
            }

            let desired = TimeWindow::new(start, end);
            let available = availability_service::is_available(
                &self.pool,
                self.durations.as_ref(),
                date,
                tz,
                &desired,
            )
            .await?;
            if !available {
                debug!(%date, activity_id = %req.activity_id, "skipping conflicting date");
                continue;
            }

            let occurrence =
                occurrence_writer::write_occurrence(&self.pool, &req.activity_id, start, true)
                    .await?;
            created.push(occurrence);
        }

        info!(
            activity_id = %req.activity_id,
            requested = req.selected_dates.len(),
            created = created.len(),
            "scheduled_activities_created"
        );
        Ok(created)
    }

    /// Expands the preference over the six-month horizon and writes the series
    /// with its roster invitations atomically. No conflict check is done here.
    pub async fn create_recurring_series(
        &self,
        req: RepeatScheduledActivityRequest,
    ) -> Result<Vec<ScheduledActivity>> {
        let tz = time_input::parse_time_zone(&req.time_zone)?;
        let start_time = time_input::parse_time_of_day(&req.start_time)?;

        let preference = self
            .preferences
            .read_preference(&req.preference_id)
            .await?
            .ok_or_else(|| {
                SchedulingError::not_found(format!("activity preference {}", req.preference_id))
            })?;
        let rule = RecurrenceRule::from_preference(&preference)?;
        debug!(
            preference_id = %preference.id,
            period = %rule.period(),
            weekdays = rule.weekdays().len(),
            %tz,
            "expanding_preference"
        );

        let instants: Vec<DateTime<Utc>> = recurrence::expand(&rule, start_time, tz, self.now())
            .map(|dt| dt.with_timezone(&Utc))
            .collect();
        let roster = self.roster.read_roster(&preference.id).await?;

        occurrence_writer::write_series(
            &self.pool,
            &preference.id,
            &preference.activity_id,
            &instants,
            &roster,
        )
        .await
    }

    pub async fn decline_series(&self, req: DeclineRepeatedActivityRequest) -> Result<u64> {
        series_decline_service::decline_series(
            &self.pool,
            &req.user_id,
            &req.scheduled_activity_id,
            self.now(),
        )
        .await
    }

    pub async fn read(&self, id: &str) -> Result<Option<ScheduledActivity>> {
        scheduled_activity_repo::load_scheduled_activity(&self.pool, id)
            .await
            .map_err(persistence(format!("load scheduled activity {}", id)))
    }

    pub async fn read_all(&self) -> Result<Vec<ScheduledActivity>> {
        scheduled_activity_repo::list_scheduled_activities(&self.pool)
            .await
            .map_err(persistence("list scheduled activities"))
    }

    pub async fn list_by_active(&self, is_active: bool) -> Result<Vec<ScheduledActivity>> {
        scheduled_activity_repo::list_by_active_flag(&self.pool, is_active)
            .await
            .map_err(persistence(format!("list scheduled activities with is_active={}", is_active)))
    }

    /// `Ok(None)` when no scheduled activity has this id.
    pub async fn update(
        &self,
        id: &str,
        req: UpdateScheduledActivityRequest,
    ) -> Result<Option<ScheduledActivity>> {
        if let Some(activity_id) = req.activity_id.as_deref() {
            self.durations.estimated_duration(activity_id).await?;
        }
        scheduled_activity_repo::update_scheduled_activity(
            &self.pool,
            id,
            ScheduledActivityChanges {
                activity_id: req.activity_id.as_deref(),
                is_active: req.is_active,
                scheduled_at: req.scheduled_at,
            },
        )
        .await
        .map_err(persistence(format!("update scheduled activity {}", id)))
    }

    /// `Ok(false)` when no scheduled activity has this id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let removed = scheduled_activity_repo::delete_scheduled_activity(&self.pool, id)
            .await
            .map_err(persistence(format!("delete scheduled activity {}", id)))?;
        Ok(removed > 0)
    }
}
