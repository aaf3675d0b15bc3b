//! Property-based tests for executable resolution and command lines
//!
//! These tests generate executable names and argument strings and verify the
//! shape of the resulting game command line.

use std::path::Path;

use cncclient::launch::command::{shim_arguments, spawn_arguments, split_arguments};
use cncclient::launch::{resolve_executable, GameExecutables, LaunchCommand, LaunchConfiguration};
use cncclient::platform::OsVersion;
use proptest::prelude::*;

fn exe_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,12}\\.(exe|sh)"
}

fn executables() -> impl Strategy<Value = GameExecutables> {
    (exe_name(), exe_name(), proptest::option::of(exe_name())).prop_map(
        |(executable_name, unix_executable_name, launcher_executable_name)| GameExecutables {
            executable_name,
            unix_executable_name,
            launcher_executable_name,
        },
    )
}

proptest! {
    #[test]
    fn test_without_launcher_binary_is_executable(exes in executables()) {
        let exes = GameExecutables { launcher_executable_name: None, ..exes };
        let resolved = resolve_executable(OsVersion::Windows, &exes);
        prop_assert_eq!(resolved.binary, exes.executable_name);
        prop_assert_eq!(resolved.inner_marker, "");
    }

    #[test]
    fn test_with_launcher_marker_quotes_executable(exes in executables(), launcher in exe_name()) {
        let exes = GameExecutables { launcher_executable_name: Some(launcher.clone()), ..exes };
        let resolved = resolve_executable(OsVersion::Windows, &exes);
        prop_assert_eq!(resolved.binary, launcher);
        prop_assert_eq!(resolved.inner_marker, format!("\"{}\" ", exes.executable_name));
    }

    #[test]
    fn test_unix_always_uses_unix_executable(exes in executables()) {
        let resolved = resolve_executable(OsVersion::Unix, &exes);
        prop_assert_eq!(resolved.binary, exes.unix_executable_name);
        prop_assert!(resolved.inner_marker.is_empty());
    }

    #[test]
    fn test_empty_extra_ends_with_spawn(marker in "(\"[a-z]{1,8}\\.exe\" )?") {
        let arguments = spawn_arguments(&marker, "");
        prop_assert!(arguments.ends_with("-SPAWN"));
        prop_assert!(!arguments.ends_with(' '));
        prop_assert_eq!(arguments, format!("{}-SPAWN", marker));
    }

    #[test]
    fn test_extra_appended_verbatim(extra in "[ -~]{1,40}") {
        let arguments = spawn_arguments("", &extra);
        prop_assert_eq!(arguments, format!("-SPAWN {}", extra));
    }

    #[test]
    fn test_shim_wraps_direct_arguments(
        binary in exe_name(),
        extra in "[A-Za-z0-9 -]{0,20}",
    ) {
        let path = Path::new("games").join(&binary);
        let shim = shim_arguments(&path, "", &extra);
        let direct = spawn_arguments("", &extra);

        prop_assert!(shim.starts_with("c=16 /R \""));
        prop_assert!(shim.ends_with(&direct));
    }

    #[test]
    fn test_split_plain_tokens(tokens in proptest::collection::vec("[A-Za-z0-9=/.-]{1,10}", 0..8)) {
        let joined = tokens.join(" ");
        prop_assert_eq!(split_arguments(&joined), tokens);
    }

    #[test]
    fn test_split_keeps_quoted_spaces(word_a in "[a-z]{1,6}", word_b in "[a-z]{1,6}") {
        let quoted = format!("-X \"{} {}\" -Y", word_a, word_b);
        prop_assert_eq!(
            split_arguments(&quoted),
            vec!["-X".to_string(), format!("{} {}", word_a, word_b), "-Y".to_string()]
        );
    }

    #[test]
    fn test_command_arguments_follow_mode(
        windowed in any::<bool>(),
        shim in any::<bool>(),
        extra in "[A-Za-z0-9 -]{0,20}",
    ) {
        let mut config = LaunchConfiguration::new("game");
        config.windowed_mode = windowed;
        config.use_display_shim = shim;
        config.extra_command_line = extra.clone();

        let resolved = resolve_executable(OsVersion::Windows, &config.executables);
        let command = LaunchCommand::build(&config, &resolved);

        prop_assert_eq!(command.via_shim, windowed && shim);
        prop_assert_eq!(command.arguments.starts_with("c=16 /R"), windowed && shim);
        prop_assert!(command.arguments.ends_with(&spawn_arguments("", &extra)));
    }
}
