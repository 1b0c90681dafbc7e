//! Snapshot types supplied by the backend and the shapes derived from them.
//!
//! Everything here is plain data: decoded fresh from each backend response,
//! read by the view-model builders, never mutated in place.

use serde::{Deserialize, Serialize};

/// Meeting type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingType {
    Customer,
    Qbr,
    Training,
    TeamSync,
    OneOnOne,
    Partnership,
    AllHands,
    External,
    Personal,
    /// Also catches labels this crate does not know, such as `focus`.
    #[serde(other)]
    Internal,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Customer => "customer",
            MeetingType::Qbr => "qbr",
            MeetingType::Training => "training",
            MeetingType::Internal => "internal",
            MeetingType::TeamSync => "team_sync",
            MeetingType::OneOnOne => "one_on_one",
            MeetingType::Partnership => "partnership",
            MeetingType::AllHands => "all_hands",
            MeetingType::External => "external",
            MeetingType::Personal => "personal",
        }
    }

    /// Meetings with people outside the user's organisation.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            MeetingType::Customer
                | MeetingType::Qbr
                | MeetingType::Partnership
                | MeetingType::External
        )
    }
}

// =============================================================================
// Focus Data Types
// =============================================================================

/// A single action row as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusAction {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_on: Option<String>,
}

impl FocusAction {
    pub fn is_p1(&self) -> bool {
        self.priority.eq_ignore_ascii_case("P1")
    }
}

/// Ranked action with feasibility/risk metadata computed upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedFocusAction {
    pub action: FocusAction,
    pub score: i32,
    pub effort_minutes: u32,
    pub feasible: bool,
    pub at_risk: bool,
    pub reason: String,
}

impl PrioritizedFocusAction {
    pub fn id(&self) -> &str {
        &self.action.id
    }
}

/// High-level capacity summary for today's focus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusImplications {
    pub achievable_count: u32,
    pub total_count: u32,
    pub at_risk_count: u32,
    pub summary: String,
}

/// Focus page snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_statement: Option<String>,
    #[serde(default)]
    pub prioritized_actions: Vec<PrioritizedFocusAction>,
    /// Ordered action ids chosen upstream as today's top three.
    #[serde(default)]
    pub top_three: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implications: Option<FocusImplications>,
}

// =============================================================================
// Week Overview Types
// =============================================================================

/// Week page snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekOverview {
    #[serde(default)]
    pub week_number: String,
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub days: Vec<WeekDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_summary: Option<WeekActionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_narrative: Option<String>,
    /// AI-identified top priority (absent until enrichment runs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_priority: Option<TopPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_checks: Option<Vec<ReadinessCheck>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_shapes: Option<Vec<DayShape>>,
}

/// A single day in the week overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    pub date: String,
    pub day_name: String,
    #[serde(default)]
    pub meetings: Vec<WeekMeeting>,
}

/// Simplified meeting info for the week view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMeeting {
    pub time: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: MeetingType,
    pub prep_status: PrepStatus,
}

/// Prep status for the week view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepStatus {
    PrepNeeded,
    AgendaNeeded,
    BringUpdates,
    ContextNeeded,
    PrepReady,
    DraftReady,
    Done,
}

/// Weekly action summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekActionSummary {
    #[serde(default)]
    pub overdue_count: usize,
    #[serde(default)]
    pub due_this_week: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue: Option<Vec<WeekAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_this_week_items: Option<Vec<WeekAction>>,
}

/// A single action item for the week view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAction {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Advisory entry about meeting prep or a stale relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheck {
    pub check_type: String,
    pub message: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// How meeting-saturated a calendar day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Light,
    Moderate,
    #[serde(alias = "busy")]
    Heavy,
    Packed,
}

impl Density {
    /// Classify a day by its meeting count.
    pub fn from_meeting_count(count: usize) -> Self {
        match count {
            c if c >= 5 => Density::Packed,
            4 => Density::Heavy,
            2 | 3 => Density::Moderate,
            _ => Density::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Light => "light",
            Density::Moderate => "moderate",
            Density::Heavy => "heavy",
            Density::Packed => "packed",
        }
    }
}

/// Per-day density shape for the week view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayShape {
    pub day_name: String,
    pub date: String,
    pub meeting_count: usize,
    pub meeting_minutes: u32,
    pub density: Density,
    #[serde(default)]
    pub meetings: Vec<WeekMeeting>,
    #[serde(default)]
    pub available_blocks: Vec<TimeBlock>,
}

/// Available time block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(default)]
    pub day: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_use: Option<String>,
}

/// AI-identified top priority for the week
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPriority {
    pub title: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

// =============================================================================
// Timeline + Suggestions
// =============================================================================

/// An entity linked to a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedEntity {
    pub id: String,
    pub name: String,
    pub entity_type: String,
}

/// A scheduled meeting from the backend's meeting timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMeeting {
    pub id: String,
    pub title: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub meeting_type: MeetingType,
    #[serde(default)]
    pub has_prep: bool,
    #[serde(default)]
    pub entities: Vec<LinkedEntity>,
}

/// Live suggestion pairing a free block with an action worth doing in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveProactiveSuggestion {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub date: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub block_minutes: u32,
    pub title: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default)]
    pub capacity_fit: f32,
    #[serde(default)]
    pub urgency_impact: f32,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub total_score: f32,
}
