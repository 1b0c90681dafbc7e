use std::collections::HashSet;

use serde::Serialize;

use crate::types::{LiveProactiveSuggestion, TopPriority, WeekAction, WeekDay};

const TOP_THREE_LIMIT: usize = 3;

/// Where a top-three item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopThreeSource {
    TopPriority,
    Overdue,
    DueThisWeek,
    Suggestion,
    Meeting,
}

/// One of the three items featured on the week page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopThreeItem {
    pub title: String,
    pub context: String,
    pub source: TopThreeSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
}

/// Candidate pools for the picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopThreeInput<'a> {
    pub top_priority: Option<&'a TopPriority>,
    pub overdue: &'a [WeekAction],
    pub due_this_week: &'a [WeekAction],
    pub suggestions: &'a [LiveProactiveSuggestion],
    pub days: &'a [WeekDay],
}

#[derive(Debug)]
struct Candidate {
    score: f32,
    item: TopThreeItem,
}

fn priority_weight(priority: &str) -> f32 {
    match priority.to_ascii_uppercase().as_str() {
        "P1" => 3.0,
        "P2" => 2.0,
        _ => 1.0,
    }
}

fn title_key(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn action_item(action: &WeekAction, source: TopThreeSource, context: String) -> TopThreeItem {
    TopThreeItem {
        title: action.title.clone(),
        context,
        source,
        action_id: Some(action.id.clone()),
        meeting_id: None,
    }
}

fn overdue_context(action: &WeekAction) -> String {
    let days = action.days_overdue.unwrap_or(1).max(1);
    let mut context = format!(
        "{} day{} overdue",
        days,
        if days == 1 { "" } else { "s" }
    );
    if let Some(account) = action.account.as_deref() {
        context.push_str(" · ");
        context.push_str(account);
    }
    context
}

fn due_context(action: &WeekAction) -> String {
    match action.account.as_deref() {
        Some(account) => format!("Due this week · {}", account),
        None => "Due this week".to_string(),
    }
}

fn collect_candidates(input: &TopThreeInput<'_>) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for action in input.overdue {
        let severity = action.days_overdue.unwrap_or(1).max(1) as f32;
        candidates.push(Candidate {
            score: severity * 10.0 + priority_weight(&action.priority),
            item: action_item(action, TopThreeSource::Overdue, overdue_context(action)),
        });
    }

    for action in input.due_this_week {
        candidates.push(Candidate {
            score: priority_weight(&action.priority),
            item: action_item(action, TopThreeSource::DueThisWeek, due_context(action)),
        });
    }

    for suggestion in input.suggestions {
        candidates.push(Candidate {
            score: suggestion.total_score * 10.0,
            item: TopThreeItem {
                title: suggestion.title.clone(),
                context: suggestion.reason.clone(),
                source: TopThreeSource::Suggestion,
                action_id: suggestion.action_id.clone(),
                meeting_id: None,
            },
        });
    }

    candidates
}

/// Synthetic candidates from external meetings, used only when there is
/// nothing else to rank.
fn meeting_candidates(days: &[WeekDay]) -> Vec<Candidate> {
    days.iter()
        .flat_map(|day| {
            day.meetings
                .iter()
                .filter(|m| m.meeting_type.is_external())
                .map(move |m| {
                    let mut context = format!("{} {}", day.day_name, m.time);
                    if let Some(account) = m.account.as_deref() {
                        context.push_str(" · ");
                        context.push_str(account);
                    }
                    Candidate {
                        score: 0.0,
                        item: TopThreeItem {
                            title: m.title.clone(),
                            context,
                            source: TopThreeSource::Meeting,
                            action_id: None,
                            meeting_id: None,
                        },
                    }
                })
        })
        .collect()
}

/// Pick up to three featured items for the week.
///
/// The AI top priority always leads. The rest are ranked by score with
/// ties kept in pool order, skipping titles already picked.
pub fn pick_top_three(input: TopThreeInput<'_>) -> Vec<TopThreeItem> {
    let mut picked: Vec<TopThreeItem> = Vec::with_capacity(TOP_THREE_LIMIT);
    let mut seen_titles: HashSet<String> = HashSet::new();

    if let Some(top) = input.top_priority {
        seen_titles.insert(title_key(&top.title));
        picked.push(TopThreeItem {
            title: top.title.clone(),
            context: top.reason.clone(),
            source: TopThreeSource::TopPriority,
            action_id: top.action_id.clone(),
            meeting_id: top.meeting_id.clone(),
        });
    }

    let mut candidates = collect_candidates(&input);
    if candidates.is_empty() {
        log::debug!("Top three: no action or suggestion candidates, falling back to meetings");
        candidates = meeting_candidates(input.days);
    }

    // Stable sort keeps pool order for equal scores.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    for candidate in candidates {
        if picked.len() == TOP_THREE_LIMIT {
            break;
        }
        if !seen_titles.insert(title_key(&candidate.item.title)) {
            continue;
        }
        picked.push(candidate.item);
    }

    picked
}
