//! Test Utilities and Mocks
//!
//! Fakes for the launcher's collaborators and shared fixtures.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::{battle_ini, fast_config, write_file};
pub use mocks::{
    InstantPreprocessor, MockProcessOps, RecordingNotifier, RecordingSession, StuckPreprocessor,
};
