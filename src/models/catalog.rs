//! Mission Catalog
//!
//! Loads the mission list from Battle(E).ini (`[Battles]` list section) or
//! INI/Campaigns.ini (`[Campaigns]` list section). The list section maps
//! arbitrary keys to mission section names; listed order is display order.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{Error, Result};
use crate::ini::IniFile;

use super::mission::Mission;

/// List section of Battle(E).ini
pub const BATTLES_SECTION: &str = "Battles";

/// List section of INI/Campaigns.ini
pub const CAMPAIGNS_SECTION: &str = "Campaigns";

/// Missions loaded from one list file, in list order
#[derive(Debug, Clone, Default)]
pub struct MissionCatalog {
    missions: Vec<Mission>,
    by_name: HashMap<String, usize>,
}

impl MissionCatalog {
    /// Load a catalog from an INI file on disk
    pub fn load(path: &Path, list_section: &str, is_campaign: bool) -> Result<Self> {
        let ini = IniFile::load(path)?;
        let catalog = Self::from_ini(&ini, list_section, is_campaign)?;
        info!(
            "Loaded {} missions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Build a catalog from a parsed INI document
    ///
    /// Entries naming a section that does not exist are skipped. A name
    /// listed twice is only loaded once.
    pub fn from_ini(ini: &IniFile, list_section: &str, is_campaign: bool) -> Result<Self> {
        let list = ini
            .section(list_section)
            .ok_or_else(|| Error::IniSectionNotFound {
                section: list_section.to_string(),
            })?;

        let mut catalog = MissionCatalog::default();

        for (_, section_name) in list.entries() {
            if section_name.is_empty() || catalog.by_name.contains_key(section_name) {
                continue;
            }

            let Some(section) = ini.section(section_name) else {
                warn!(
                    "Section [{}] listed in [{}] does not exist",
                    section_name, list_section
                );
                continue;
            };

            let mission = Mission::from_section(section, is_campaign);
            catalog
                .by_name
                .insert(mission.internal_name.clone(), catalog.missions.len());
            catalog.missions.push(mission);
        }

        Ok(catalog)
    }

    /// All missions in list order
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Look up a mission by internal name
    pub fn get(&self, internal_name: &str) -> Option<&Mission> {
        self.by_name
            .get(internal_name)
            .map(|&idx| &self.missions[idx])
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    /// Mark the listed missions as unlocked
    ///
    /// Only missions that require unlocking are affected. Returns the number
    /// of missions whose state changed.
    pub fn apply_unlocks(&mut self, unlocked: &HashSet<String>) -> usize {
        let mut changed = 0;
        for mission in &mut self.missions {
            if mission.requires_unlocking
                && !mission.is_unlocked
                && unlocked.contains(&mission.internal_name)
            {
                mission.set_unlocked(true);
                changed += 1;
            }
        }
        changed
    }

    /// Missions that winning `internal_name` unlocks, given the current
    /// global variable states
    ///
    /// Combines the direct `UnlockMissions` list with every satisfied
    /// conditional unlock rule.
    pub fn unlocks_for_victory(
        &self,
        internal_name: &str,
        global_variables: &HashMap<String, bool>,
    ) -> Vec<String> {
        let Some(mission) = self.get(internal_name) else {
            return Vec::new();
        };

        let mut result: Vec<String> = mission.unlock_missions.clone();
        for rule in &mission.conditional_mission_unlocks {
            if rule.is_satisfied(global_variables) && !result.contains(&rule.mission) {
                result.push(rule.mission.clone());
            }
        }
        result
    }
}
