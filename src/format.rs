//! Display strings for the week and focus pages.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use regex::Regex;

use crate::datetime::{parse_clock, parse_date_prefix, parse_instant};
use crate::types::ReadinessCheck;

const OPEN_BLOCK: &str = "Open block";
const READINESS_SEPARATOR: &str = " · ";

fn plural(count: i64, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Render a clock time the way the pages show it, e.g. `9:05 AM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Phrase for when an action is due relative to `today`.
///
/// A positive `days_overdue` from the backend wins over the date. Zero is
/// treated as "not provided" and falls through to the date comparison.
pub fn format_due_context(
    due_date: Option<&str>,
    days_overdue: Option<i64>,
    today: NaiveDate,
) -> Option<String> {
    if let Some(days) = days_overdue.filter(|d| *d > 0) {
        return Some(format!("{} overdue", plural(days, "day", "days")));
    }

    let due = parse_date_prefix(due_date?)?;
    let diff = (due - today).num_days();

    let phrase = match diff {
        d if d < 0 => format!("{} overdue", plural(-d, "day", "days")),
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        2..=6 => format!("due {}", due.format("%A")),
        _ => format!("due {}", due.format("%b %-d")),
    };
    Some(phrase)
}

fn format_block_side(value: &str, tz: &Tz) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    if let Some(dt) = parse_instant(value, tz) {
        return Some(format_clock(dt.time()));
    }
    if let Some(time) = parse_clock(value) {
        return Some(format_clock(time));
    }
    // Unknown format: show whatever the backend sent.
    Some(value.to_string())
}

/// Render a free block's start/end as a time range.
pub fn format_block_range(start: &str, end: &str, tz: &Tz) -> String {
    match (format_block_side(start, tz), format_block_side(end, tz)) {
        (Some(s), Some(e)) => format!("{} - {}", s, e),
        (Some(side), None) | (None, Some(side)) => side,
        (None, None) => OPEN_BLOCK.to_string(),
    }
}

fn leading_number(message: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)").expect("leading number regex"))
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_prep_check(check_type: &str) -> bool {
    matches!(check_type, "no_prep" | "prep_needed" | "agenda_needed")
}

/// Collapse readiness checks into one summary line, e.g.
/// `3 meetings need prep · 2 overdue actions · 1 stale contact`.
pub fn synthesize_readiness(checks: &[ReadinessCheck]) -> String {
    let prep_count = checks.iter().filter(|c| is_prep_check(&c.check_type)).count() as i64;
    let overdue: Vec<&ReadinessCheck> = checks
        .iter()
        .filter(|c| c.check_type == "overdue_action")
        .collect();
    let stale_count = checks
        .iter()
        .filter(|c| c.check_type == "stale_contact")
        .count() as i64;

    let mut parts = Vec::new();
    if prep_count > 0 {
        parts.push(if prep_count == 1 {
            "1 meeting needs prep".to_string()
        } else {
            format!("{} meetings need prep", prep_count)
        });
    }
    if let Some(first) = overdue.first() {
        // The backend reports overdue actions as one aggregate check whose
        // message leads with the count.
        let count = leading_number(&first.message).unwrap_or(overdue.len() as i64);
        parts.push(plural(count, "overdue action", "overdue actions"));
    }
    if stale_count > 0 {
        parts.push(plural(stale_count, "stale contact", "stale contacts"));
    }

    parts.join(READINESS_SEPARATOR)
}
