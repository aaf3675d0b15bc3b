//! Mission Model
//!
//! A singleplayer mission listed in Battle(E).ini or INI/Campaigns.ini.
//! Missions are parsed once when the mission list loads and are read-only
//! afterwards, apart from the unlock state tracked by campaign progress.

use crate::ini::IniSection;

use super::conditional_unlock::ConditionalMissionUnlock;

/// Display name used when a section has neither `UIName` nor `Description`
pub const UNDEFINED_MISSION_NAME: &str = "Undefined mission";

/// Prefix of the numbered conditional unlock keys
pub const CONDITIONAL_UNLOCK_KEY: &str = "ConditionalMissionUnlock";

/// Marker used in INI descriptions in place of a line break
const LINE_BREAK_MARKER: &str = "@";

#[cfg(windows)]
const NEWLINE: &str = "\r\n";
#[cfg(not(windows))]
const NEWLINE: &str = "\n";

/// A mission (or campaign placeholder) parsed from an INI section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    /// Section name of the mission
    pub internal_name: String,
    pub side: i32,
    /// Scenario file of the mission
    pub scenario: String,
    /// Name shown in the mission list
    pub gui_name: String,
    pub icon_path: String,
    /// Long description with line breaks already expanded
    pub gui_description: String,
    pub required_addon: bool,
    pub enabled: bool,
    pub build_off_ally: bool,
    pub player_always_on_normal_difficulty: bool,

    /// If set, this is not a mission but a dummy entry for a campaign
    pub campaign_internal_name: Option<String>,

    /// The global variables relevant to this mission
    pub global_variables: Vec<String>,

    /// Whether the mission is unlocked by playing other missions
    pub requires_unlocking: bool,

    /// Whether the player has unlocked this mission
    pub is_unlocked: bool,

    /// Missions that winning this mission unlocks directly
    pub unlock_missions: Vec<String>,

    pub conditional_mission_unlocks: Vec<ConditionalMissionUnlock>,

    /// The global variables that this mission utilizes
    pub used_global_variables: Vec<String>,

    /// The global variables that winning this mission unlocks
    pub unlock_global_variables: Vec<String>,
}

impl Mission {
    /// Build a mission from its INI section
    ///
    /// `is_campaign_mission` is the default for `RequiresUnlocking`.
    pub fn from_section(section: &IniSection, is_campaign_mission: bool) -> Self {
        let mut gui_name = section.get_string("Description", UNDEFINED_MISSION_NAME);
        if section.key_exists("UIName") {
            gui_name = section.get_string("UIName", &gui_name);
        }

        let gui_description = section
            .get_string("LongDescription", "")
            .replace(LINE_BREAK_MARKER, NEWLINE);

        Self {
            internal_name: section.name().to_string(),
            side: section.get_int("Side", 0),
            scenario: section.get_string("Scenario", ""),
            gui_name,
            icon_path: section.get_string("IconPath", ""),
            gui_description,
            required_addon: section.get_bool("RequiredAddon", false),
            enabled: section.get_bool("Enabled", true),
            build_off_ally: section.get_bool("BuildOffAlly", false),
            player_always_on_normal_difficulty: section
                .get_bool("PlayerAlwaysOnNormalDifficulty", false),
            campaign_internal_name: section
                .value("CampaignInternalName")
                .map(str::to_string),
            global_variables: section.get_list("GlobalVariables"),
            requires_unlocking: section.get_bool("RequiresUnlocking", is_campaign_mission),
            is_unlocked: false,
            unlock_missions: section.get_list("UnlockMissions"),
            conditional_mission_unlocks: parse_conditional_unlocks(section),
            used_global_variables: section.get_list("UsedGlobalVariables"),
            unlock_global_variables: section.get_list("UnlockGlobalVariables"),
        }
    }

    /// Whether this entry stands for a whole campaign rather than a mission
    pub fn is_campaign_entry(&self) -> bool {
        self.campaign_internal_name.is_some()
    }

    /// Whether the player may start this mission
    pub fn is_playable(&self) -> bool {
        self.enabled && (!self.requires_unlocking || self.is_unlocked)
    }

    pub fn set_unlocked(&mut self, unlocked: bool) {
        self.is_unlocked = unlocked;
    }
}

/// Scan `ConditionalMissionUnlock0`, `1`, ... until the first missing or
/// blank key. Entries that do not parse are skipped.
fn parse_conditional_unlocks(section: &IniSection) -> Vec<ConditionalMissionUnlock> {
    let mut unlocks = Vec::new();

    for i in 0.. {
        let key = format!("{}{}", CONDITIONAL_UNLOCK_KEY, i);
        let data = match section.value(&key) {
            Some(data) if !data.trim().is_empty() => data,
            _ => break,
        };

        match ConditionalMissionUnlock::parse(data) {
            Some(unlock) => unlocks.push(unlock),
            None => debug!(
                "Skipping malformed {} in mission {}: {}",
                key,
                section.name(),
                data
            ),
        }
    }

    unlocks
}
