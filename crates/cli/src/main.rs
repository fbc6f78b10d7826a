//! roadfeelctl - force-feedback encoding and telemetry replay CLI
//!
//! Encodes individual wheel reports for inspection, describes known wheels,
//! checks session configs, and replays recorded telemetry through the full
//! force pipeline against a recording wheel.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roadfeel_hid_logitech_protocol::FfbProtocol;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "roadfeelctl")]
#[command(about = "roadfeel CLI - encode wheel reports and replay telemetry captures")]
#[command(version)]
#[command(long_about = "
roadfeelctl drives the roadfeel force-feedback pipeline without a live simulator.
It can print the exact bytes sent to a Logitech wheel for any command, and
replay a recorded telemetry capture through the simulator and session pacing.

Use --json for machine-readable output suitable for scripting.
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Known wheels and device probing
    #[command(subcommand)]
    Device(DeviceCommands),

    /// Print the reports for one command
    Encode {
        /// Protocol to encode for
        #[arg(long, default_value = "logitech_classic")]
        protocol: FfbProtocol,

        #[command(subcommand)]
        command: EncodeCommands,
    },

    /// Replay a telemetry capture through the force pipeline
    Replay(ReplayArgs),

    /// Session config commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "roadfeelctl={level},roadfeel_ffb={level},roadfeel_hid_logitech_protocol={level}",
                    level = log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Device(cmd) => commands::device::execute(cmd, cli.json),
        Commands::Encode { protocol, command } => {
            commands::encode::execute(command, *protocol, cli.json)
        }
        Commands::Replay(args) => commands::replay::execute(args, cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
