//! cncclient - command-line front end for the launcher client core
//!
//! Launches the configured game and waits for it to exit, lists missions
//! from the game's INI files, or prints the effective configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{mpsc, Arc};

use anyhow::{bail, Context};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use cncclient::config::ClientConfig;
use cncclient::launch::{
    BackgroundTask, GameProcessLauncher, IniPreprocessor, LifecycleEvent, LocalSession,
    PreprocessingTask,
};
use cncclient::models::catalog::{BATTLES_SECTION, CAMPAIGNS_SECTION};
use cncclient::MissionCatalog;

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq)]
enum CommandKind {
    Launch,
    Missions { file: PathBuf, campaign: bool },
    ShowConfig,
}

/// Parsed command line
#[derive(Debug)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    command: CommandKind,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> anyhow::Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut config_path = None;
        let mut debug = false;
        let mut campaign = false;
        let mut positional = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let Some(path) = args.get(i + 1) else {
                        bail!("Missing config file path");
                    };
                    config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--debug" | "-d" => debug = true,
                "--campaign" => campaign = true,
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("{} v{}", cncclient::NAME, cncclient::VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => bail!("Unknown option: {}", arg),
                arg => positional.push(arg.to_string()),
            }
            i += 1;
        }

        let command = match positional.first().map(String::as_str) {
            None | Some("launch") => CommandKind::Launch,
            Some("config") => CommandKind::ShowConfig,
            Some("missions") => {
                let Some(file) = positional.get(1) else {
                    bail!("missions requires an INI file path");
                };
                CommandKind::Missions {
                    file: PathBuf::from(file),
                    campaign,
                }
            }
            Some(other) => bail!("Unknown command: {}", other),
        };

        Ok(Self {
            config_path,
            debug,
            command,
        })
    }
}

/// Print help information
fn print_help() {
    println!("cncclient - game launcher client");
    println!();
    println!("USAGE:");
    println!("    cncclient [OPTIONS] [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    launch                     Start the game and wait for it to exit (default)");
    println!("    missions <FILE>            List missions from Battle(E).ini");
    println!("    config                     Print the effective configuration");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>        Path to configuration file");
    println!("    -d, --debug                Enable debug logging");
    println!("        --campaign             Read <FILE> as Campaigns.ini");
    println!("    -h, --help                 Print this help message");
    println!("    -v, --version              Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    Configuration is looked up in the following order:");
    println!("    1. Path specified with --config or CNCCLIENT_CONFIG");
    println!("    2. $XDG_CONFIG_HOME/cncclient/config.toml");
    println!("    3. <platform config dir>/cncclient/config.toml");
    println!("    4. ~/.cncclient/config.toml");
    println!("    5. ./.cncclient/config.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    CNCCLIENT_CONFIG       Path to configuration file");
    println!("    CNCCLIENT_DEBUG        Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn init_logging(debug: bool) {
    let debug_env = env::var("CNCCLIENT_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if debug || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() {
    let args = match AppArgs::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            print_help();
            process::exit(2);
        }
    };

    init_logging(args.debug);
    debug!("Arguments: {:?}", args);

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: &AppArgs) -> anyhow::Result<i32> {
    match &args.command {
        CommandKind::Launch => launch(&load_configuration(args)?),
        CommandKind::Missions { file, campaign } => list_missions(file, *campaign),
        CommandKind::ShowConfig => {
            let config = load_configuration(args)?;
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?
            );
            Ok(0)
        }
    }
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> anyhow::Result<ClientConfig> {
    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("CNCCLIENT_CONFIG").ok().map(PathBuf::from));

    match config_path {
        Some(path) => cncclient::init_with_config(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(cncclient::init()?),
    }
}

fn launch(config: &ClientConfig) -> anyhow::Result<i32> {
    let launch_config = config.launch_configuration();

    let preprocessor: Arc<dyn PreprocessingTask> = if config.preprocessing.enabled {
        Arc::new(IniPreprocessor::new(&launch_config.game_directory).into_task())
    } else {
        Arc::new(BackgroundTask::new("no-preprocessing", || Ok(())))
    };

    let launcher = GameProcessLauncher::new(preprocessor).with_os(config.os());

    let (exit_tx, exit_rx) = mpsc::channel();
    let exit_tx = Mutex::new(exit_tx);
    launcher.events().register(move |event| {
        info!("{}", event);
        if event == LifecycleEvent::GameProcessExited {
            let _ = exit_tx.lock().send(());
        }
    });

    let session = Arc::new(LocalSession::new());
    let outcome = launcher.start_game_process(session, &launch_config);

    if outcome.preprocessing_failed {
        warn!("Game started before preprocessing finished");
    }

    if !outcome.started {
        error!(
            "Game did not start: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        return Ok(1);
    }

    exit_rx
        .recv()
        .context("Lifecycle events closed before the game exited")?;
    info!("Game exited");
    Ok(0)
}

fn list_missions(file: &Path, campaign: bool) -> anyhow::Result<i32> {
    let section = if campaign {
        CAMPAIGNS_SECTION
    } else {
        BATTLES_SECTION
    };

    let catalog = MissionCatalog::load(file, section, campaign)
        .with_context(|| format!("Failed to read missions from {}", file.display()))?;

    for mission in catalog.missions() {
        let mut flags = Vec::new();
        if !mission.enabled {
            flags.push("disabled");
        }
        if mission.requires_unlocking {
            flags.push("locked");
        }
        if mission.required_addon {
            flags.push("addon");
        }
        if mission.is_campaign_entry() {
            flags.push("campaign");
        }

        println!(
            "{:<16} side {:<2} {:<32} {}",
            mission.internal_name,
            mission.side,
            mission.gui_name,
            flags.join(",")
        );
    }

    println!("{} missions", catalog.len());
    Ok(0)
}
