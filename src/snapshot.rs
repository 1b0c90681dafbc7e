//! Decoding of backend snapshot payloads.

use serde::de::DeserializeOwned;

use crate::error::{Result, ViewModelError};
use crate::types::{FocusData, LiveProactiveSuggestion, TimelineMeeting, WeekOverview};

fn decode<T: DeserializeOwned>(what: &'static str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        log::warn!("Failed to decode {} snapshot: {}", what, e);
        ViewModelError::json(what, e)
    })
}

pub fn decode_focus_data(json: &str) -> Result<FocusData> {
    decode("focus data", json)
}

pub fn decode_week_overview(json: &str) -> Result<WeekOverview> {
    decode("week overview", json)
}

pub fn decode_timeline(json: &str) -> Result<Vec<TimelineMeeting>> {
    decode("meeting timeline", json)
}

pub fn decode_suggestions(json: &str) -> Result<Vec<LiveProactiveSuggestion>> {
    decode("live suggestions", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Density, MeetingType};

    #[test]
    fn decodes_focus_payload() {
        let json = r#"{
            "focusStatement": "Protect the Acme renewal",
            "prioritizedActions": [{
                "action": {"id": "a1", "title": "Send quote", "priority": "P1", "status": "pending",
                           "dueDate": "2026-02-10", "accountId": "acme"},
                "score": 90, "effortMinutes": 20, "feasible": true, "atRisk": false,
                "reason": "Overdue by 1 day; P1 priority"
            }],
            "topThree": ["a1"],
            "implications": {"achievableCount": 1, "totalCount": 1, "atRiskCount": 0, "summary": "ok"}
        }"#;

        let data = decode_focus_data(json).unwrap();
        assert_eq!(data.prioritized_actions[0].action.account_id.as_deref(), Some("acme"));
        assert_eq!(data.top_three, vec!["a1".to_string()]);
        assert_eq!(data.implications.unwrap().achievable_count, 1);
    }

    #[test]
    fn decodes_week_overview_with_legacy_density() {
        let json = r#"{
            "weekNumber": "W07",
            "dateRange": "Feb 9 – Feb 13",
            "days": [{"date": "2026-02-09", "dayName": "Monday", "meetings": [
                {"time": "9:00 AM", "title": "Acme QBR", "account": "Acme", "type": "qbr", "prepStatus": "prep_needed"}
            ]}],
            "readinessChecks": [{"checkType": "no_prep", "message": "Acme QBR has no prep", "severity": "action_needed"}],
            "dayShapes": [{"dayName": "Monday", "date": "2026-02-09", "meetingCount": 6,
                           "meetingMinutes": 240, "density": "busy", "meetings": [], "availableBlocks": []}]
        }"#;

        let overview = decode_week_overview(json).unwrap();
        assert_eq!(overview.days[0].meetings[0].meeting_type, MeetingType::Qbr);
        assert_eq!(overview.day_shapes.unwrap()[0].density, Density::Heavy);
        assert!(overview.top_priority.is_none());
    }

    #[test]
    fn decodes_timeline_and_suggestions() {
        let timeline = decode_timeline(
            r#"[{"id": "m1", "title": "Kickoff", "startTime": "2026-02-09T10:00:00Z",
                 "meetingType": "customer", "hasPrep": true}]"#,
        )
        .unwrap();
        assert!(timeline[0].end_time.is_none());
        assert!(timeline[0].entities.is_empty());

        let suggestions = decode_suggestions(
            r#"[{"start": "2026-02-09T13:00:00", "end": "2026-02-09T14:00:00",
                 "title": "Draft proposal", "reason": "strong fit", "totalScore": 0.82}]"#,
        )
        .unwrap();
        assert!((suggestions[0].total_score - 0.82).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_payload_reports_what_failed() {
        let err = decode_week_overview("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("week overview"));
    }

    #[test]
    fn timeline_survives_unrecognised_meeting_type() {
        let timeline = decode_timeline(
            r#"[{"id": "m1", "title": "Acme sync", "startTime": "2026-02-09T10:00:00Z",
                 "meetingType": "customer"},
                {"id": "m2", "title": "Candidate loop", "startTime": "2026-02-09T13:00:00Z",
                 "meetingType": "interview"}]"#,
        )
        .unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].meeting_type, MeetingType::Customer);
        assert_eq!(timeline[1].meeting_type, MeetingType::Internal);
    }
}
