//! Expansion of an activity preference into concrete occurrence instants.
//!
//! The calculator walks every calendar day from "now" up to a fixed six-month
//! horizon, keeps days whose weekday is in the preference's set, and then keeps
//! only days that fall into every N-th period bucket counted from "now".
//!
//! Period buckets are fixed-size: a week is 168 hours, a month is 730 hours.
//! Month buckets only approximate calendar months and drift against them over
//! the horizon.
//!
//! All functions take "now" explicitly so expansion is deterministic.

use chrono::{Datelike, DateTime, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchedulingError};
use crate::models::ActivityPreferenceRow;
use crate::services::time_input::{self, resolve_local};

pub const HORIZON_MONTHS: u32 = 6;
const HOURS_PER_DAY: i64 = 24;
const HOURS_PER_WEEK: i64 = 168;
const HOURS_PER_MONTH_BUCKET: i64 = 730;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyPeriod {
    Week,
    Month,
}

impl FrequencyPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            FrequencyPeriod::Week => "week",
            FrequencyPeriod::Month => "month",
        }
    }

    fn bucket_hours(self) -> i64 {
        match self {
            FrequencyPeriod::Week => HOURS_PER_WEEK,
            FrequencyPeriod::Month => HOURS_PER_MONTH_BUCKET,
        }
    }
}

impl fmt::Display for FrequencyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyPeriod {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(FrequencyPeriod::Week),
            "month" => Ok(FrequencyPeriod::Month),
            other => Err(SchedulingError::validation(format!(
                "invalid frequency period '{}'",
                other
            ))),
        }
    }
}

/// A validated "every N weeks/months on these weekdays" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    frequency: u32,
    period: FrequencyPeriod,
    weekdays: Vec<Weekday>,
}

impl RecurrenceRule {
    pub fn new(frequency: i64, period: FrequencyPeriod, weekdays: Vec<Weekday>) -> Result<Self> {
        let frequency = u32::try_from(frequency)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                SchedulingError::validation(format!(
                    "frequency must be a positive integer, got {}",
                    frequency
                ))
            })?;
        if weekdays.is_empty() {
            return Err(SchedulingError::validation("weekday set must not be empty"));
        }
        Ok(Self {
            frequency,
            period,
            weekdays,
        })
    }

    pub fn from_preference(pref: &ActivityPreferenceRow) -> Result<Self> {
        let period = pref.frequency_period.parse::<FrequencyPeriod>()?;
        let weekdays = time_input::parse_weekdays(&pref.days_of_week)?;
        Self::new(pref.frequency, period, weekdays)
    }

    pub fn period(&self) -> FrequencyPeriod {
        self.period
    }

    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    fn keeps(&self, date: NaiveDate, days_elapsed: i64) -> bool {
        if !self.weekdays.contains(&date.weekday()) {
            return false;
        }
        let elapsed_periods = days_elapsed * HOURS_PER_DAY / self.period.bucket_hours();
        elapsed_periods % i64::from(self.frequency) == 0
    }
}

/// Iterator over the occurrence instants of a rule, in chronological order.
/// Single pass; build a new one with [`expand`] to start over.
#[derive(Debug)]
pub struct Occurrences {
    rule: RecurrenceRule,
    time_of_day: NaiveTime,
    tz: Tz,
    start: NaiveDateTime,
    horizon: NaiveDateTime,
    day: u64,
}

impl Iterator for Occurrences {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.start.checked_add_days(Days::new(self.day))?;
            if current >= self.horizon {
                return None;
            }
            let days_elapsed = self.day as i64;
            self.day += 1;

            if !self.rule.keeps(current.date(), days_elapsed) {
                continue;
            }
            // Only unrepresentable local times fail here; those days are skipped.
            if let Ok(instant) = resolve_local(current.date(), self.time_of_day, self.tz) {
                return Some(instant);
            }
        }
    }
}

/// Expands `rule` from `now` to `now + 6 months`, placing each kept day at
/// `time_of_day` in `tz`. Day 0 is today's date in `tz`.
pub fn expand(rule: &RecurrenceRule, time_of_day: NaiveTime, tz: Tz, now: DateTime<Utc>) -> Occurrences {
    let start = now.with_timezone(&tz).naive_local();
    let horizon = start
        .checked_add_months(Months::new(HORIZON_MONTHS))
        .unwrap_or(start);
    Occurrences {
        rule: rule.clone(),
        time_of_day,
        tz,
        start,
        horizon,
        day: 0,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn weekday_from(i: u8) -> Weekday {
        Weekday::try_from(i % 7).unwrap()
    }

    proptest! {
        #[test]
        fn occurrences_stay_in_horizon_and_weekday_set(
            start_secs in 1_600_000_000i64..1_900_000_000i64,
            n in 1i64..6,
            monthly in any::<bool>(),
            day_ids in proptest::collection::vec(0u8..7, 1..7),
            hour in 0u32..24,
        ) {
            let now = Utc.timestamp_opt(start_secs, 0).unwrap();
            let period = if monthly { FrequencyPeriod::Month } else { FrequencyPeriod::Week };
            let days: Vec<Weekday> = day_ids.into_iter().map(weekday_from).collect();
            let rule = RecurrenceRule::new(n, period, days.clone()).unwrap();
            let horizon = now.checked_add_months(Months::new(HORIZON_MONTHS)).unwrap();

            for dt in expand(&rule, NaiveTime::from_hms_opt(hour, 0, 0).unwrap(), Tz::UTC, now) {
                prop_assert!(days.contains(&dt.weekday()));
                prop_assert!(dt.date_naive() >= now.date_naive());
                prop_assert!(dt.date_naive() <= horizon.date_naive());
            }
        }

        #[test]
        fn amsterdam_occurrences_follow_local_calendar(
            start_secs in 1_700_000_000i64..1_800_000_000i64,
            n in 1i64..4,
            day_ids in proptest::collection::vec(0u8..7, 1..7),
            hour in 0u32..24,
        ) {
            let tz = Tz::Europe__Amsterdam;
            let now = Utc.timestamp_opt(start_secs, 0).unwrap();
            let local_now = now.with_timezone(&tz).naive_local();
            let local_horizon = local_now.checked_add_months(Months::new(HORIZON_MONTHS)).unwrap();
            let days: Vec<Weekday> = day_ids.into_iter().map(weekday_from).collect();
            let rule = RecurrenceRule::new(n, FrequencyPeriod::Week, days.clone()).unwrap();

            let dates: Vec<NaiveDate> = expand(&rule, NaiveTime::from_hms_opt(hour, 30, 0).unwrap(), tz, now)
                .map(|dt| dt.date_naive())
                .collect();
            for date in &dates {
                prop_assert!(days.contains(&date.weekday()));
                prop_assert!(*date >= local_now.date());
                prop_assert!(*date <= local_horizon.date());
            }
            for day in rule.weekdays() {
                let same: Vec<&NaiveDate> = dates.iter().filter(|d| d.weekday() == *day).collect();
                for pair in same.windows(2) {
                    prop_assert_eq!((*pair[1] - *pair[0]).num_days(), 7 * n);
                }
            }
        }

        #[test]
        fn same_weekday_occurrences_are_exactly_n_weeks_apart(
            start_secs in 1_600_000_000i64..1_900_000_000i64,
            n in 1i64..5,
            day_ids in proptest::collection::vec(0u8..7, 1..4),
        ) {
            let now = Utc.timestamp_opt(start_secs, 0).unwrap();
            let days: Vec<Weekday> = day_ids.into_iter().map(weekday_from).collect();
            let rule = RecurrenceRule::new(n, FrequencyPeriod::Week, days.clone()).unwrap();
            let dates: Vec<NaiveDate> = expand(&rule, NaiveTime::from_hms_opt(12, 0, 0).unwrap(), Tz::UTC, now)
                .map(|dt| dt.date_naive())
                .collect();

            for day in rule.weekdays() {
                let same: Vec<&NaiveDate> = dates.iter().filter(|d| d.weekday() == *day).collect();
                for pair in same.windows(2) {
                    prop_assert_eq!((*pair[1] - *pair[0]).num_days(), 7 * n);
                }
            }
        }
    }
}
