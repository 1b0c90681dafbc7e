//! Lenient timestamp parsing shared by the builders.
//!
//! The backend mixes RFC 3339 timestamps, naive ISO datetimes and bare
//! clock times. Every parser here returns `None` instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

const CLOCK_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%-I:%M %p", "%I:%M %p"];

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let prefix = value.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Parse a bare clock time such as `09:30` or `2:15 PM`.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Parse an RFC 3339 or naive ISO datetime into `tz`.
///
/// Naive values are read as local time in `tz`; a time skipped by a DST
/// transition yields `None`.
pub fn parse_instant(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();
    if !value.contains('T') {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| localize(naive, tz))
}

/// Parse a datetime, falling back to a clock time on `day`.
pub fn parse_instant_on(value: &str, day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    parse_instant(value, tz).or_else(|| {
        let time = parse_clock(value)?;
        localize(NaiveDateTime::new(day, time), tz)
    })
}

fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    let resolved = tz.from_local_datetime(&naive);
    let dt = resolved.earliest().or_else(|| resolved.latest());
    if dt.is_none() {
        log::debug!("Local time {} does not exist in {}", naive, tz);
    }
    dt
}
