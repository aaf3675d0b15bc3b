//! Data Models
//!
//! Plain data types read by the launcher and the UI layer: singleplayer
//! missions and campaigns parsed from INI files, and chat messages from
//! the online service.

pub mod catalog;
pub mod color;
pub mod conditional_unlock;
pub mod irc_message;
pub mod mission;

// Re-export main types for convenience
pub use catalog::MissionCatalog;
pub use color::Color;
pub use conditional_unlock::ConditionalMissionUnlock;
pub use irc_message::IrcMessage;
pub use mission::Mission;
