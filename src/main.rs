//! digicam - command-line remote for digiCamControl
//!
//! Every subcommand is one or more calls through `CameraControlRemoteCmd.exe`.
//! Logging goes to stderr (`RUST_LOG` overrides the default `info` level);
//! results go to stdout as text or, with `--json`, as JSON.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added status and record subcommands
//! - 10/17/2026 - Initial CLI

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use digicam::commands;
use digicam::output::OutputControls;
use digicam::{Camera, Config, Setting, TransferMode};

/// Remote control for digiCamControl through its command-line relay.
#[derive(Parser, Debug)]
#[command(name = "digicam")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Config file (default: <config dir>/digicam/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// digiCamControl install directory
    #[arg(long, global = true)]
    install_dir: Option<String>,

    /// Do not start digiCamControl if it is not running
    #[arg(long, global = true)]
    no_launch: bool,

    /// Capture without autofocus
    #[arg(long, global = true)]
    no_af: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    // =========================================================================
    // SETTINGS
    // =========================================================================
    /// Read a setting (e.g. iso, shutterspeed, session.folder)
    Get {
        /// Setting name
        setting: Setting,
    },

    /// Write a setting (lastcaptured is read-only)
    Set {
        /// Setting name
        setting: Setting,

        /// New value; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },

    /// List the values a camera setting accepts
    List {
        /// Setting name (exposure and image settings only)
        setting: Setting,
    },

    /// Show or change where captures are stored
    Transfer {
        /// pc, camera or both (or the full protocol name)
        mode: Option<TransferMode>,
    },

    /// Path of the most recently captured file
    LastCaptured,

    /// Read every known setting
    Status,

    // =========================================================================
    // SHOOTING
    // =========================================================================
    /// Take a picture and print the resulting file path
    Capture {
        /// Location passed through to the capture command
        #[arg(short, long)]
        location: Option<String>,

        /// Focus and shoot through live view
        #[arg(long)]
        live_view: bool,
    },

    /// Record video for a number of seconds
    Record {
        /// Recording length
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,

        /// Record through live view
        #[arg(long)]
        live_view: bool,
    },

    /// Run a `do` action (e.g. LiveViewWnd_Show, All_Minimize)
    Do {
        /// Action name
        action: String,

        /// Action arguments
        args: Vec<String>,
    },

    /// Send a raw command line (get, set, list, capture or do)
    Raw {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Close all windows and quit digiCamControl
    Close,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.install_dir {
        config.install_dir = dir.clone();
    }
    if cli.no_launch || matches!(cli.command, Command::Close) {
        config.launch = false;
    }
    if cli.no_af {
        config.auto_focus = false;
    }
    Ok(config)
}

fn run(cli: Cli, output: &OutputControls) -> Result<()> {
    let config = load_config(&cli)?;
    let mut camera = Camera::open(&config).context("Failed to connect to digiCamControl")?;

    match cli.command {
        // Settings
        Command::Get { setting } => commands::settings::get(&camera, setting, output),
        Command::Set { setting, value } => {
            commands::settings::set(&camera, setting, &value, output)
        }
        Command::List { setting } => commands::settings::list(&camera, setting, output),
        Command::Transfer { mode } => commands::settings::transfer(&camera, mode, output),
        Command::LastCaptured => commands::settings::last_captured(&camera, output),
        Command::Status => commands::settings::status(&camera, output),
        Command::Raw { line } => commands::settings::raw(&camera, &line, output),

        // Shooting
        Command::Capture { location, live_view } => {
            commands::shooting::capture(&mut camera, location.as_deref(), live_view, output)
        }
        Command::Record { seconds, live_view } => {
            commands::shooting::record(&mut camera, seconds, live_view, output)
        }
        Command::Do { action, args } => commands::shooting::action(&camera, &action, &args, output),
        Command::Close => commands::shooting::close(&camera, output),
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build output controls from global flags
    let output = OutputControls {
        json: cli.json,
        compact: cli.compact,
    };

    match run(cli, &output) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            output.fail(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}
