//! Conditional Mission Unlocks
//!
//! A rule that unlocks a mission once a set of campaign global variables
//! hold the required values. Rules are written in mission sections as
//! `ConditionalMissionUnlockN=Mission:VAR_A=yes,VAR_B=no`.

use std::collections::HashMap;

use crate::ini::parse_bool;

/// Unlocks `mission` when every prerequisite variable has the given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalMissionUnlock {
    /// Internal name of the mission that gets unlocked
    pub mission: String,
    /// Global variable names and the state each must have
    pub prerequisites: Vec<(String, bool)>,
}

impl ConditionalMissionUnlock {
    /// Parse a rule, returning `None` if it is malformed
    pub fn parse(data: &str) -> Option<Self> {
        let (mission, conditions) = data.split_once(':')?;
        let mission = mission.trim();
        if mission.is_empty() {
            return None;
        }

        let mut prerequisites = Vec::new();
        for condition in conditions.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let (name, state) = condition.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            prerequisites.push((name.to_string(), parse_bool(state)?));
        }

        if prerequisites.is_empty() {
            return None;
        }

        Some(Self {
            mission: mission.to_string(),
            prerequisites,
        })
    }

    /// Whether the current global variable states satisfy this rule
    ///
    /// Variables missing from `states` count as disabled.
    pub fn is_satisfied(&self, states: &HashMap<String, bool>) -> bool {
        self.prerequisites
            .iter()
            .all(|(name, required)| states.get(name).copied().unwrap_or(false) == *required)
    }
}
