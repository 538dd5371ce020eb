use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

use crate::database::scheduled_activity_repo;
use crate::error::{persistence, Result, SchedulingError};
use crate::services::lookups::DurationResolver;
use crate::services::time_input::local_day_bounds;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

pub fn first_conflict<'a>(desired: &TimeWindow, existing: &'a [TimeWindow]) -> Option<&'a TimeWindow> {
    existing.iter().find(|w| w.overlaps(desired))
}

/// True when `desired` overlaps none of the occurrences starting on `date`
/// (local calendar day in `tz`). Each occurrence's end is its start plus the
/// activity's estimated duration.
pub async fn is_available(
    pool: &SqlitePool,
    durations: &dyn DurationResolver,
    date: NaiveDate,
    tz: Tz,
    desired: &TimeWindow,
) -> Result<bool> {
    let (day_start, day_end) = local_day_bounds(date, tz)?;
    let scheduled = scheduled_activity_repo::list_starting_between(pool, day_start, day_end)
        .await
        .map_err(persistence(format!("list scheduled activities on {}", date)))?;

    let mut duration_cache = HashMap::new();
    let mut existing = Vec::with_capacity(scheduled.len());
    for occurrence in &scheduled {
        let duration = match duration_cache.get(&occurrence.activity_id) {
            Some(d) => *d,
            None => {
                let d = durations.estimated_duration(&occurrence.activity_id).await?;
                duration_cache.insert(occurrence.activity_id.clone(), d);
                d
            }
        };
        let end = occurrence.scheduled_at.checked_add_signed(duration).ok_or_else(|| {
            SchedulingError::validation(format!(
                "scheduled activity {} ends out of range",
                occurrence.id
            ))
        })?;
        existing.push(TimeWindow::new(occurrence.scheduled_at, end));
    }

    if let Some(conflict) = first_conflict(desired, &existing) {
        debug!(
            %date,
            desired_start = %desired.start,
            conflict_start = %conflict.start,
            conflict_end = %conflict.end,
            "slot_unavailable"
        );
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 6, 10, h1, m1, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 10, h2, m2, 0).unwrap(),
        )
    }

    #[test]
    fn partial_overlap_conflicts_both_ways() {
        let a = window(10, 0, 11, 0);
        let b = window(10, 30, 11, 30);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        let a = window(10, 0, 11, 0);
        let b = window(11, 0, 12, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_conflicts() {
        let outer = window(9, 0, 17, 0);
        let inner = window(12, 0, 12, 30);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn first_conflict_picks_the_overlapping_window() {
        let existing = vec![window(8, 0, 9, 0), window(14, 0, 15, 0), window(16, 0, 17, 0)];
        let hit = first_conflict(&window(14, 30, 15, 30), &existing).unwrap();
        assert_eq!(*hit, window(14, 0, 15, 0));
        assert!(first_conflict(&window(15, 0, 16, 0), &existing).is_none());
    }
}
