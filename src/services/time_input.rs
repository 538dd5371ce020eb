//! Parsing of the time-related request fields: timezone, time-of-day, calendar
//! date and weekday tokens. Every failure is a `SchedulingError::Validation`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, SchedulingError};

pub fn parse_time_zone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| SchedulingError::validation(format!("invalid time zone '{}'", raw)))
}

/// Accepts an RFC 3339 timestamp (its wall-clock time as written is used) or
/// `HH:MM[:SS]`. Sub-second precision is dropped.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.time())
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| SchedulingError::validation(format!("invalid time of day '{}'", raw)))?;
    Ok(parsed.with_nanosecond(0).unwrap_or(parsed))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SchedulingError::validation(format!("invalid date '{}'", raw)))
}

/// Comma-separated weekday tokens. Numbers follow the `0 = Sunday` convention;
/// English names and three-letter abbreviations are accepted too. Duplicates
/// collapse, order is preserved.
pub fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let day = parse_weekday_token(token)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(SchedulingError::validation("weekday set must not be empty"));
    }
    Ok(days)
}

fn parse_weekday_token(token: &str) -> Result<Weekday> {
    if let Ok(n) = token.parse::<u8>() {
        return match n {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            _ => Err(SchedulingError::validation(format!(
                "invalid day of week '{}'",
                token
            ))),
        };
    }
    token
        .parse::<Weekday>()
        .map_err(|_| SchedulingError::validation(format!("invalid day of week '{}'", token)))
}

/// Combines a local date and time-of-day into an instant. Ambiguous local
/// times (DST fall-back) resolve to the earliest instant; times inside a DST
/// gap are moved forward by one hour.
pub fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Tz>> {
    let naive = date.and_time(time);
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Ok(dt);
    }
    tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
        .earliest()
        .ok_or_else(|| {
            SchedulingError::validation(format!("{} does not exist in {}", naive, tz.name()))
        })
}

/// UTC bounds `[start, end)` of a local calendar day.
pub fn local_day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = resolve_local(date, NaiveTime::MIN, tz)?;
    let next = date
        .succ_opt()
        .ok_or_else(|| SchedulingError::validation(format!("date {} is out of range", date)))?;
    let end = resolve_local(next, NaiveTime::MIN, tz)?;
    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}
