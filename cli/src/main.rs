//! # cardchat Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the entry point for the cardchat CLI, the presentation layer
//! of a customer-support chat assistant. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - `cards`: Backend answer handling (dispatcher, card classification and rendering)
//! - `commands`: One module per top-level command (`chat`, `render`, `srv`)
//! - `common`: Chat transport and terminal display
//! - `core`: Configuration, errors and HTML templating
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! cardchat --help
//!
//! # Ask a question with debug logging
//! cardchat -vv chat "¿Cuál es el estado de mi factura?"
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cards;
mod commands;
mod common;
mod core;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "cardchat",
    about = "💬 cardchat: Customer-support chat client with rich answer cards",
    long_about = "Talk to the support assistant backend from the terminal or the browser.\n\
                  Tool results (subscribers, invoices, incidents, weather) are shown as cards.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "r")]
    Render(commands::render::RenderArgs),
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Render(args) => commands::render::handle_render(args).await,
        Commands::Srv(args) => commands::srv::handle_srv(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
