use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::context::ViewContext;
use crate::types::{FocusData, PrioritizedFocusAction};

const TOP_THREE_LIMIT: usize = 3;

/// Focus page split into the three sections the page renders.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusViewModel {
    pub top_three: Vec<PrioritizedFocusAction>,
    pub at_risk: Vec<PrioritizedFocusAction>,
    pub other_priorities: Vec<PrioritizedFocusAction>,
}

/// Focus view with "other priorities" narrowed to P1 and capped.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusViewModelExtended {
    pub top_three: Vec<PrioritizedFocusAction>,
    pub at_risk: Vec<PrioritizedFocusAction>,
    pub other_priorities: Vec<PrioritizedFocusAction>,
    /// P1 count before the cap was applied.
    pub other_priorities_total: usize,
    pub show_view_all: bool,
}

pub fn build_focus_view_model(data: &FocusData) -> FocusViewModel {
    let by_id: HashMap<&str, &PrioritizedFocusAction> = data
        .prioritized_actions
        .iter()
        .map(|p| (p.id(), p))
        .collect();

    let mut top_ids: HashSet<&str> = HashSet::new();
    let mut top_three = Vec::new();
    for id in &data.top_three {
        if top_three.len() == TOP_THREE_LIMIT {
            break;
        }
        // Backend may reference an action that has since been removed.
        let Some(action) = by_id.get(id.as_str()) else {
            log::debug!("Focus top three references unknown action {}", id);
            continue;
        };
        if top_ids.insert(action.id()) {
            top_three.push((*action).clone());
        }
    }

    let mut at_risk = Vec::new();
    let mut other_priorities = Vec::new();
    for action in &data.prioritized_actions {
        if top_ids.contains(action.id()) {
            continue;
        }
        if action.at_risk {
            at_risk.push(action.clone());
        } else {
            other_priorities.push(action.clone());
        }
    }

    FocusViewModel {
        top_three,
        at_risk,
        other_priorities,
    }
}

pub fn build_focus_view_model_extended(
    data: &FocusData,
    visible_cap: usize,
) -> FocusViewModelExtended {
    let base = build_focus_view_model(data);

    let p1: Vec<PrioritizedFocusAction> = base
        .other_priorities
        .into_iter()
        .filter(|p| p.action.is_p1())
        .collect();
    let other_priorities_total = p1.len();
    let other_priorities = p1.into_iter().take(visible_cap).collect();

    FocusViewModelExtended {
        top_three: base.top_three,
        at_risk: base.at_risk,
        other_priorities,
        other_priorities_total,
        show_view_all: other_priorities_total > visible_cap,
    }
}

/// Focus page model: the sectioned actions plus the page's header copy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusPageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implications_summary: Option<String>,
    #[serde(flatten)]
    pub sections: FocusViewModelExtended,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

pub fn build_focus_page(ctx: &ViewContext, data: &FocusData) -> FocusPageModel {
    let sections = build_focus_view_model_extended(data, ctx.config.other_priorities_cap);
    let empty_state = data
        .prioritized_actions
        .is_empty()
        .then(|| ctx.personality().empty_focus_message().to_string());

    FocusPageModel {
        focus_statement: data.focus_statement.clone(),
        implications_summary: data.implications.as_ref().map(|i| i.summary.clone()),
        sections,
        empty_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BriefingConfig;
    use crate::types::FocusAction;

    fn action(id: &str, priority: &str, at_risk: bool) -> PrioritizedFocusAction {
        PrioritizedFocusAction {
            action: FocusAction {
                id: id.to_string(),
                title: format!("Action {}", id),
                priority: priority.to_string(),
                status: "pending".to_string(),
                due_date: None,
                account_id: None,
                account_name: None,
                context: None,
                waiting_on: None,
            },
            score: 50,
            effort_minutes: 30,
            feasible: !at_risk,
            at_risk,
            reason: "P1 priority".to_string(),
        }
    }

    fn focus(actions: Vec<PrioritizedFocusAction>, top: &[&str]) -> FocusData {
        FocusData {
            prioritized_actions: actions,
            top_three: top.iter().map(|s| s.to_string()).collect(),
            ..FocusData::default()
        }
    }

    fn ids(actions: &[PrioritizedFocusAction]) -> Vec<&str> {
        actions.iter().map(|a| a.id()).collect()
    }

    #[test]
    fn partitions_top_three_at_risk_and_other() {
        let data = focus(
            vec![
                action("a1", "P1", false),
                action("a2", "P2", false),
                action("a3", "P1", true),
                action("a4", "P1", false),
            ],
            &["a1", "a2"],
        );

        let vm = build_focus_view_model(&data);
        assert_eq!(ids(&vm.top_three), vec!["a1", "a2"]);
        assert_eq!(ids(&vm.at_risk), vec!["a3"]);
        assert_eq!(ids(&vm.other_priorities), vec!["a4"]);
    }

    #[test]
    fn top_three_keeps_given_order_and_drops_dangling_ids() {
        let data = focus(
            vec![
                action("a1", "P1", false),
                action("a2", "P1", false),
                action("a3", "P1", false),
            ],
            &["a3", "gone", "a1"],
        );

        let vm = build_focus_view_model(&data);
        assert_eq!(ids(&vm.top_three), vec!["a3", "a1"]);
        assert_eq!(ids(&vm.other_priorities), vec!["a2"]);
    }

    #[test]
    fn top_three_never_exceeds_three() {
        let actions: Vec<_> = (1..=5).map(|i| action(&format!("a{}", i), "P1", false)).collect();
        let data = focus(actions, &["a1", "a2", "a3", "a4", "a5", "a1"]);

        let vm = build_focus_view_model(&data);
        assert_eq!(vm.top_three.len(), 3);
        assert_eq!(ids(&vm.other_priorities), vec!["a4", "a5"]);
    }

    #[test]
    fn at_risk_action_in_top_three_is_not_repeated() {
        let data = focus(vec![action("a1", "P1", true), action("a2", "P1", true)], &["a1"]);

        let vm = build_focus_view_model(&data);
        assert_eq!(ids(&vm.top_three), vec!["a1"]);
        assert_eq!(ids(&vm.at_risk), vec!["a2"]);
    }

    #[test]
    fn sections_are_pairwise_disjoint() {
        let data = focus(
            vec![
                action("a1", "P1", true),
                action("a2", "P2", false),
                action("a3", "P1", true),
                action("a4", "P3", false),
                action("a5", "P1", false),
            ],
            &["a1", "a4", "missing"],
        );

        let vm = build_focus_view_model(&data);
        let mut seen = HashSet::new();
        for id in ids(&vm.top_three)
            .into_iter()
            .chain(ids(&vm.at_risk))
            .chain(ids(&vm.other_priorities))
        {
            assert!(seen.insert(id), "{} appeared in two sections", id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn empty_snapshot_gives_empty_sections() {
        let vm = build_focus_view_model(&FocusData::default());
        assert!(vm.top_three.is_empty());
        assert!(vm.at_risk.is_empty());
        assert!(vm.other_priorities.is_empty());
    }

    #[test]
    fn extended_filters_to_p1_and_caps() {
        let mut actions = vec![action("top", "P1", false), action("p2", "P2", false)];
        actions.extend((1..=7).map(|i| action(&format!("p1-{}", i), "P1", false)));
        let data = focus(actions, &["top"]);

        let vm = build_focus_view_model_extended(&data, 5);
        assert_eq!(vm.other_priorities.len(), 5);
        assert_eq!(vm.other_priorities_total, 7);
        assert!(vm.show_view_all);
        assert!(vm.other_priorities.iter().all(|p| p.action.is_p1()));
        assert_eq!(vm.other_priorities[0].id(), "p1-1");
    }

    #[test]
    fn extended_hides_view_all_at_exact_cap() {
        let actions: Vec<_> = (1..=5).map(|i| action(&format!("a{}", i), "P1", false)).collect();
        let data = focus(actions, &[]);

        let vm = build_focus_view_model_extended(&data, 5);
        assert_eq!(vm.other_priorities_total, 5);
        assert!(!vm.show_view_all);
    }

    #[test]
    fn focus_page_uses_config_cap_and_personality() {
        let config = BriefingConfig {
            other_priorities_cap: 2,
            personality: crate::context::Personality::Friendly,
            ..BriefingConfig::default()
        };
        let ctx = ViewContext::at(config, chrono_tz::UTC, chrono::Utc::now());

        let actions: Vec<_> = (1..=4).map(|i| action(&format!("a{}", i), "P1", false)).collect();
        let page = build_focus_page(&ctx, &focus(actions, &["a1"]));
        assert_eq!(page.sections.other_priorities.len(), 2);
        assert_eq!(page.sections.other_priorities_total, 3);
        assert!(page.sections.show_view_all);
        assert!(page.empty_state.is_none());

        let empty = build_focus_page(&ctx, &FocusData::default());
        assert_eq!(
            empty.empty_state.as_deref(),
            Some(crate::context::Personality::Friendly.empty_focus_message())
        );
    }
}
