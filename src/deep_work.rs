//! Deep-work block selection for the week page.
//!
//! Takes each day's free blocks, keeps the long ones that start before the
//! end of the workday, and pairs them with any live suggestion that
//! overlaps in time.

use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::BriefingConfig;
use crate::datetime::{parse_date_prefix, parse_instant, parse_instant_on};
use crate::format::format_block_range;
use crate::types::{DayShape, LiveProactiveSuggestion, TimeBlock};

/// Thresholds for what counts as a deep-work block.
#[derive(Debug, Clone, Copy)]
pub struct DeepWorkRules {
    pub min_minutes: u32,
    pub cutoff_hour: u32,
    pub cap: usize,
}

impl Default for DeepWorkRules {
    fn default() -> Self {
        Self::from(&BriefingConfig::default())
    }
}

impl From<&BriefingConfig> for DeepWorkRules {
    fn from(config: &BriefingConfig) -> Self {
        Self {
            min_minutes: config.deep_work_min_minutes,
            cutoff_hour: config.deep_work_cutoff_hour,
            cap: config.deep_work_block_cap,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepWorkBlock {
    pub day_name: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    /// Display range, e.g. `9:00 AM - 11:00 AM`.
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

type Interval = (DateTime<Tz>, DateTime<Tz>);

fn block_interval(block: &TimeBlock, shape: &DayShape, tz: &Tz) -> Option<Interval> {
    let start = match parse_date_prefix(&shape.date) {
        Some(day) => parse_instant_on(&block.start, day, tz),
        None => parse_instant(&block.start, tz),
    }?;
    let end = parse_date_prefix(&shape.date)
        .and_then(|day| parse_instant_on(&block.end, day, tz))
        .filter(|end| *end > start)
        .unwrap_or_else(|| start + Duration::minutes(block.duration_minutes as i64));
    Some((start, end))
}

fn suggestion_interval(
    suggestion: &LiveProactiveSuggestion,
    shape: &DayShape,
    tz: &Tz,
) -> Option<Interval> {
    let day = parse_date_prefix(&suggestion.date).or_else(|| parse_date_prefix(&shape.date))?;
    let start = parse_instant_on(&suggestion.start, day, tz)?;
    let end = parse_instant_on(&suggestion.end, day, tz)?;
    Some((start, end))
}

/// Select up to `rules.cap` deep-work blocks across the week, longest
/// first, each enriched with the first live suggestion that overlaps it.
pub fn filter_deep_work_blocks(
    shapes: &[DayShape],
    suggestions: &[LiveProactiveSuggestion],
    rules: DeepWorkRules,
    tz: &Tz,
) -> Vec<DeepWorkBlock> {
    let mut blocks = Vec::new();

    for shape in shapes {
        for block in &shape.available_blocks {
            if block.duration_minutes < rules.min_minutes {
                continue;
            }
            let Some((start, end)) = block_interval(block, shape, tz) else {
                log::warn!(
                    "Deep work: dropping {} block with unreadable start {:?}",
                    shape.day_name,
                    block.start
                );
                continue;
            };
            if start.hour() >= rules.cutoff_hour {
                continue;
            }

            // Any overlap counts, not just an exact match.
            let matched = suggestions.iter().find(|s| {
                suggestion_interval(s, shape, tz)
                    .is_some_and(|(s_start, s_end)| s_start < end && s_end > start)
            });

            blocks.push(DeepWorkBlock {
                day_name: shape.day_name.clone(),
                date: shape.date.clone(),
                start: block.start.clone(),
                end: block.end.clone(),
                duration_minutes: block.duration_minutes,
                range: format_block_range(&block.start, &block.end, tz),
                suggestion_title: matched.map(|s| s.title.clone()),
                suggestion_reason: matched.map(|s| s.reason.clone()),
                action_id: matched.and_then(|s| s.action_id.clone()),
            });
        }
    }

    blocks.sort_by(|a, b| b.duration_minutes.cmp(&a.duration_minutes));
    blocks.truncate(rules.cap);
    blocks
}
