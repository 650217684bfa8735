//! ihparah - gamepad HID harness
//!
//! Checksums a message with CRC-32, watches for supported gamepads on a
//! background thread, pulses a raw output report at them, then shuts the
//! watcher down.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod hex;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ihparah")]
#[command(about = "Gamepad HID harness - CRC-32 self-check, gamepad observer and output-report pulse")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CRC-32 of a message or file
    Checksum {
        /// Text to checksum (defaults to the pangram self-test)
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File to checksum
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Initial accumulator (hex)
        #[arg(long, default_value = "0xFFFFFFFF", value_name = "HEX")]
        seed: String,

        /// Print the accumulator without the final complement
        #[arg(long)]
        raw: bool,
    },

    /// List attached supported gamepads
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Checksum, observe gamepads, pulse an output report, shut down
    Run {
        /// YAML or JSON config file
        #[arg(long, value_name = "FILE", env = "IHPARAH_CONFIG")]
        config: Option<PathBuf>,

        /// Message to checksum before observing
        #[arg(long)]
        message: Option<String>,

        /// Milliseconds to observe before the pulse
        #[arg(long, value_name = "MS")]
        settle_ms: Option<u64>,

        /// Milliseconds to keep observing after the pulse
        #[arg(long, value_name = "MS")]
        linger_ms: Option<u64>,

        /// Enumeration interval in milliseconds
        #[arg(long, value_name = "MS")]
        poll_ms: Option<u64>,

        /// Output report as hex bytes, report ID first (e.g. "05 ff 04 00")
        #[arg(long, value_name = "HEX")]
        report: Option<String>,
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
                format!("ihparah={log_level},ihparah_hid={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Checksum {
            text,
            file,
            seed,
            raw,
        } => commands::checksum(text.as_deref(), file.as_deref(), &seed, raw),
        Commands::List { json } => commands::list(json),
        Commands::Run {
            config,
            message,
            settle_ms,
            linger_ms,
            poll_ms,
            report,
        } => {
            let overrides = commands::RunOverrides {
                message,
                settle_ms,
                linger_ms,
                poll_interval_ms: poll_ms,
                output_report: report,
            };
            commands::run(config.as_deref(), overrides)
        }
    }
}
