//! Week page assembly.
//!
//! Runs a week snapshot, the live timeline and live suggestions through the
//! individual builders and returns one serialisable page model.

use serde::Serialize;

use crate::context::ViewContext;
use crate::deep_work::{filter_deep_work_blocks, DeepWorkBlock, DeepWorkRules};
use crate::format::{format_due_context, synthesize_readiness};
use crate::top_three::{pick_top_three, TopThreeInput, TopThreeItem};
use crate::types::{DayShape, LiveProactiveSuggestion, TimelineMeeting, WeekAction, WeekOverview};
use crate::week_shape::derive_shape_from_timeline;

/// An action line with its due phrase resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekActionLine {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_context: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekViewModel {
    pub week_number: String,
    pub date_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    pub day_shapes: Vec<DayShape>,
    pub top_three: Vec<TopThreeItem>,
    pub deep_work_blocks: Vec<DeepWorkBlock>,
    pub readiness_summary: String,
    pub overdue: Vec<WeekActionLine>,
    pub due_this_week: Vec<WeekActionLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

fn action_lines(ctx: &ViewContext, actions: &[WeekAction]) -> Vec<WeekActionLine> {
    let today = ctx.today();
    actions
        .iter()
        .map(|a| WeekActionLine {
            id: a.id.clone(),
            title: a.title.clone(),
            account: a.account.clone(),
            priority: a.priority.clone(),
            due_context: format_due_context(a.due_date.as_deref(), a.days_overdue, today),
        })
        .collect()
}

pub fn build_week_view_model(
    ctx: &ViewContext,
    overview: &WeekOverview,
    timeline: &[TimelineMeeting],
    suggestions: &[LiveProactiveSuggestion],
) -> WeekViewModel {
    let day_shapes = match overview.day_shapes.as_deref() {
        Some(shapes) if !shapes.is_empty() => shapes.to_vec(),
        _ => {
            log::debug!(
                "Week {}: no precomputed day shapes, deriving from {} timeline meetings",
                overview.week_number,
                timeline.len()
            );
            derive_shape_from_timeline(
                timeline,
                ctx.today(),
                ctx.timezone(),
                ctx.config.default_meeting_minutes,
            )
        }
    };

    let summary = overview.action_summary.as_ref();
    let overdue = summary.and_then(|s| s.overdue.as_deref()).unwrap_or_default();
    let due_this_week = summary
        .and_then(|s| s.due_this_week_items.as_deref())
        .unwrap_or_default();

    let top_three = pick_top_three(TopThreeInput {
        top_priority: overview.top_priority.as_ref(),
        overdue,
        due_this_week,
        suggestions,
        days: &overview.days,
    });

    let deep_work_blocks = filter_deep_work_blocks(
        &day_shapes,
        suggestions,
        DeepWorkRules::from(&ctx.config),
        ctx.timezone(),
    );

    let readiness_summary = overview
        .readiness_checks
        .as_deref()
        .map(synthesize_readiness)
        .unwrap_or_default();

    let has_meetings = day_shapes.iter().any(|d| d.meeting_count > 0)
        || overview.days.iter().any(|d| !d.meetings.is_empty());
    let empty_state = if !has_meetings && overdue.is_empty() && due_this_week.is_empty() {
        Some(ctx.personality().empty_week_message().to_string())
    } else {
        None
    };

    WeekViewModel {
        week_number: overview.week_number.clone(),
        date_range: overview.date_range.clone(),
        narrative: overview.week_narrative.clone(),
        overdue: action_lines(ctx, overdue),
        due_this_week: action_lines(ctx, due_this_week),
        day_shapes,
        top_three,
        deep_work_blocks,
        readiness_summary,
        empty_state,
    }
}
