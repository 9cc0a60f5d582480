// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! clipferry - a Telegram bot that relays TikTok media into chat.
//!
//! This is the binary entry point for the relay.

mod serve;

use clap::{Parser, Subcommand};

/// clipferry - a Telegram bot that relays TikTok media into chat.
#[derive(Parser, Debug)]
#[command(name = "clipferry", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the relay bot (the default when no subcommand is given).
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match clipferry_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            clipferry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("clipferry: {e}");
                std::process::exit(1);
            }
        }
    }
}
