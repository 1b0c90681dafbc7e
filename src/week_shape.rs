//! Per-day meeting shape for the current Monday–Friday.
//!
//! Used when the week snapshot has no precomputed day shapes: meetings
//! from the live timeline are bucketed by start date and each day gets a
//! density classification from its meeting count.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;

use crate::datetime::{parse_clock, parse_instant};
use crate::format::format_clock;
use crate::types::{DayShape, Density, PrepStatus, TimelineMeeting, WeekMeeting};

const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Monday of the week containing `today`. Sunday belongs to the week
/// that is ending, so it maps back six days.
pub fn week_monday(today: NaiveDate) -> NaiveDate {
    let offset = match today.weekday() {
        Weekday::Sun => -6,
        wd => 1 - wd.number_from_monday() as i64,
    };
    today + Duration::days(offset)
}

/// Derive exactly five day shapes (Monday–Friday) from timeline meetings.
///
/// Meetings are bucketed by the backend's `YYYY-MM-DD` prefix of
/// `start_time`, not by the local date in `tz`. A `2026-02-10T02:00:00Z`
/// meeting counts under Tuesday even though its displayed time is
/// Monday evening in New York.
pub fn derive_shape_from_timeline(
    meetings: &[TimelineMeeting],
    today: NaiveDate,
    tz: &Tz,
    default_meeting_minutes: u32,
) -> Vec<DayShape> {
    let monday = week_monday(today);

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day_name)| {
            let date = (monday + Duration::days(i as i64)).format("%Y-%m-%d").to_string();
            let day_meetings: Vec<&TimelineMeeting> = meetings
                .iter()
                .filter(|m| m.start_time.get(..10) == Some(date.as_str()))
                .collect();

            let meeting_minutes: u32 = day_meetings
                .iter()
                .map(|m| meeting_minutes(m, tz, default_meeting_minutes))
                .sum();

            log::debug!(
                "Week shape {} {}: {} meetings, {} min",
                day_name,
                date,
                day_meetings.len(),
                meeting_minutes
            );

            DayShape {
                day_name: day_name.to_string(),
                density: Density::from_meeting_count(day_meetings.len()),
                meeting_count: day_meetings.len(),
                meeting_minutes,
                meetings: day_meetings.iter().map(|m| to_week_meeting(m, tz)).collect(),
                available_blocks: Vec::new(),
                date,
            }
        })
        .collect()
}

fn meeting_minutes(meeting: &TimelineMeeting, tz: &Tz, fallback: u32) -> u32 {
    let Some(end_raw) = meeting.end_time.as_deref() else {
        return fallback;
    };
    let (Some(start), Some(end)) = (
        parse_instant(&meeting.start_time, tz),
        parse_instant(end_raw, tz),
    ) else {
        return fallback;
    };

    let minutes = end.signed_duration_since(start).num_minutes();
    if minutes > 0 {
        minutes as u32
    } else {
        fallback
    }
}

fn to_week_meeting(meeting: &TimelineMeeting, tz: &Tz) -> WeekMeeting {
    let time = parse_instant(&meeting.start_time, tz)
        .map(|dt| format_clock(dt.time()))
        .or_else(|| parse_clock(&meeting.start_time).map(format_clock))
        .unwrap_or_else(|| "TBD".to_string());

    WeekMeeting {
        time,
        title: meeting.title.clone(),
        account: meeting
            .entities
            .iter()
            .find(|e| e.entity_type == "account")
            .map(|e| e.name.clone()),
        meeting_type: meeting.meeting_type,
        prep_status: if meeting.has_prep {
            PrepStatus::PrepReady
        } else {
            PrepStatus::PrepNeeded
        },
    }
}
