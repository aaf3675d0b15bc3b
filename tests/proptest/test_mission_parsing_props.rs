//! Property-based tests for mission parsing
//!
//! These tests generate INI sections and verify the mission fields derived
//! from them, including the list and conditional unlock rules.

use cncclient::ini::{split_list, IniFile};
use cncclient::models::mission::UNDEFINED_MISSION_NAME;
use cncclient::models::{ConditionalMissionUnlock, Mission};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,9}"
}

fn parse_mission(body: &str, is_campaign: bool) -> Mission {
    let ini = IniFile::parse(&format!("[TEST]\n{}", body));
    Mission::from_section(ini.section("TEST").unwrap(), is_campaign)
}

proptest! {
    #[test]
    fn test_lists_never_contain_empty_entries(raw in "[A-Z,]{0,30}") {
        let mission = parse_mission(&format!("GlobalVariables={}\n", raw), false);
        prop_assert!(mission.global_variables.iter().all(|v| !v.is_empty()));
        prop_assert_eq!(mission.global_variables, split_list(&raw));
    }

    #[test]
    fn test_gui_name_prefers_ui_name(
        ui_name in proptest::option::of("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]"),
        description in proptest::option::of("[A-Za-z][A-Za-z ]{0,15}[A-Za-z]"),
    ) {
        let mut body = String::new();
        if let Some(d) = &description {
            body.push_str(&format!("Description={}\n", d));
        }
        if let Some(u) = &ui_name {
            body.push_str(&format!("UIName={}\n", u));
        }

        let mission = parse_mission(&body, false);
        let expected = ui_name
            .or(description)
            .unwrap_or_else(|| UNDEFINED_MISSION_NAME.to_string());
        prop_assert_eq!(mission.gui_name, expected);
    }

    #[test]
    fn test_requires_unlocking_defaults_to_campaign_flag(is_campaign in any::<bool>()) {
        let mission = parse_mission("Scenario=X.MAP\n", is_campaign);
        prop_assert_eq!(mission.requires_unlocking, is_campaign);
        prop_assert!(!mission.is_unlocked);
    }

    #[test]
    fn test_conditional_unlock_scan_stops_at_gap(
        before in 0usize..5,
        after in 1usize..4,
        target in ident(),
        var in ident(),
    ) {
        let mut body = String::new();
        for i in 0..before {
            body.push_str(&format!("ConditionalMissionUnlock{}={}:{}=yes\n", i, target, var));
        }
        // Index `before` is missing
        for i in (before + 1)..(before + 1 + after) {
            body.push_str(&format!("ConditionalMissionUnlock{}={}:{}=no\n", i, target, var));
        }

        let mission = parse_mission(&body, true);
        prop_assert_eq!(mission.conditional_mission_unlocks.len(), before);
        prop_assert!(mission
            .conditional_mission_unlocks
            .iter()
            .all(|u| u.prerequisites == vec![(var.clone(), true)]));
    }

    #[test]
    fn test_conditional_unlock_parse_keeps_order(
        target in ident(),
        vars in proptest::collection::vec((ident(), any::<bool>()), 1..6),
    ) {
        let conditions: Vec<String> = vars
            .iter()
            .map(|(name, state)| format!("{}={}", name, if *state { "yes" } else { "no" }))
            .collect();
        let data = format!("{}:{}", target, conditions.join(","));

        let unlock = ConditionalMissionUnlock::parse(&data).unwrap();
        prop_assert_eq!(unlock.mission, target);
        prop_assert_eq!(unlock.prerequisites, vars);
    }

    #[test]
    fn test_description_markers_become_newlines(parts in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
        let mission = parse_mission(&format!("LongDescription={}\n", parts.join("@")), false);
        prop_assert!(!mission.gui_description.contains('@'));
        prop_assert_eq!(mission.gui_description.lines().count(), parts.len());
    }
}
