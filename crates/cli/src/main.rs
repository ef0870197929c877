//! swishctl - SwishMini trackpad CLI
//!
//! Lists multitouch devices, streams raw contact frames and runs the
//! title-bar gesture recogniser against a simulated desktop.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::DryRunArgs;
use crate::config::SwishConfig;

#[derive(Parser)]
#[command(name = "swishctl")]
#[command(about = "SwishMini CLI - Inspect trackpads and try title-bar gestures")]
#[command(version)]
#[command(long_about = "
swishctl talks to the private MultitouchSupport framework on macOS.
It reports attached trackpads, streams raw contact frames and runs the
two-finger title-bar gesture recogniser in dry-run mode.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to <config dir>/swishmini/config.yaml)
    #[arg(long, global = true, env = "SWISHCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the default device and how many devices are attached
    Devices,

    /// Print contact frames as they arrive
    Monitor {
        /// Stop after this many frames
        #[arg(short = 'n', long)]
        frames: Option<u64>,
    },

    /// Recognise title-bar gestures and print the window actions they would run
    Gestures {
        #[command(flatten)]
        dry_run: DryRunArgs,
    },

    /// Show the effective configuration, or write the default one
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file
        #[arg(long, requires = "init")]
        force: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(cli.verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

/// Log directive for `-v` repetitions, covering this binary and its crates.
fn default_log_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    [
        "swishctl",
        "swishmini_multitouch",
        "swishmini_window",
        "swishmini_gesture",
    ]
    .map(|target| format!("{target}={level}"))
    .join(",")
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(SwishConfig::default_path);

    // These never need a valid config file.
    match &cli.command {
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            return Ok(());
        }
        Commands::Config { init: true, force } => {
            return commands::config::init(config_path.as_deref(), *force, cli.json);
        }
        _ => {}
    }

    let config = match &config_path {
        Some(path) => SwishConfig::load(path)?,
        None => SwishConfig::default(),
    };

    match &cli.command {
        Commands::Devices => commands::device::execute(&config, cli.json),
        Commands::Monitor { frames } => commands::monitor::execute(&config, *frames, cli.json).await,
        Commands::Gestures { dry_run } => {
            commands::gesture::execute(&config, dry_run, cli.json).await
        }
        Commands::Config { .. } => {
            commands::config::show(config_path.as_deref(), &config, cli.json)
        }
        Commands::Completion { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_devices_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["swishctl", "devices"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Devices));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "swishctl",
            "monitor",
            "--json",
            "-vv",
            "--config",
            "/tmp/swish.yaml",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/swish.yaml")));
        Ok(())
    }

    #[test]
    fn parse_monitor_frame_limit() -> TestResult {
        let cli = Cli::try_parse_from(["swishctl", "monitor", "-n", "25"])?;
        assert!(matches!(
            cli.command,
            Commands::Monitor { frames: Some(25) }
        ));

        let cli = Cli::try_parse_from(["swishctl", "monitor"])?;
        assert!(matches!(cli.command, Commands::Monitor { frames: None }));
        Ok(())
    }

    #[test]
    fn parse_gesture_dry_run_flags() -> TestResult {
        let cli = Cli::try_parse_from(["swishctl", "gestures", "--full-screen", "--chrome"])?;
        match &cli.command {
            Commands::Gestures { dry_run } => {
                assert!(dry_run.full_screen);
                assert!(dry_run.chrome);
            }
            _ => return Err("expected Gestures command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_config_force_requires_init() -> TestResult {
        assert!(Cli::try_parse_from(["swishctl", "config", "--force"]).is_err());

        let cli = Cli::try_parse_from(["swishctl", "config", "--init", "--force"])?;
        assert!(matches!(
            cli.command,
            Commands::Config {
                init: true,
                force: true
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_completion_shell() -> TestResult {
        let cli = Cli::try_parse_from(["swishctl", "completion", "zsh"])?;
        assert!(matches!(
            cli.command,
            Commands::Completion {
                shell: clap_complete::Shell::Zsh
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["swishctl", "calibrate"]).is_err());
    }

    #[test]
    fn log_filter_follows_verbosity() {
        assert_eq!(
            default_log_filter(0),
            "swishctl=warn,swishmini_multitouch=warn,swishmini_window=warn,swishmini_gesture=warn"
        );
        assert!(default_log_filter(1).starts_with("swishctl=info,"));
        assert!(default_log_filter(9).ends_with("swishmini_gesture=trace"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
