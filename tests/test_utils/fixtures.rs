//! Test Fixtures
//!
//! Common test data and fixtures for testing

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cncclient::launch::LaunchConfiguration;

/// A Battle(E).ini with a mix of complete, minimal and broken entries
pub fn battle_ini() -> &'static str {
    "\
; Singleplayer missions
[Battles]
0=GDI1
1=NOD1
2=DOES_NOT_EXIST
3=FIRESTORM

[GDI1]
Side=0
Scenario=GDI1A.MAP
Description=Reinforce Phoenix Base
LongDescription=Hold the base.@Wait for reinforcements.
IconPath=gdi1.png
UnlockMissions=GDI2,GDI3
UnlockGlobalVariables=PHOENIX_HELD
ConditionalMissionUnlock0=GDI_SECRET:PHOENIX_HELD=yes,CIVILIANS_LOST=no

[NOD1]
Side=1
Scenario=NOD1A.MAP
UIName=Silos Needed
RequiresUnlocking=yes
GlobalVariables=A,,B

[FIRESTORM]
CampaignInternalName=FS
RequiredAddon=yes
Enabled=no
"
}

/// Launch configuration for `dir` with a millisecond preprocessing poll
pub fn fast_config(dir: &Path) -> LaunchConfiguration {
    let mut config = LaunchConfiguration::new(dir);
    config.preprocess_poll_interval = Duration::from_millis(1);
    config
}

/// Write `content` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
