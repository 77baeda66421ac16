//! # cardchat Terminal Chat
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements `cardchat chat`, a terminal client for the support
//! chat backend. Answers are printed as text and cards on stdout; the typing
//! indicator is drawn on stderr while a request is in flight.
//!
//! ## Modes
//!
//! - One-shot: `cardchat chat "¿Qué facturas tengo?"` sends a single message
//! - Interactive: `cardchat chat` reads messages line by line until `/quit`
//!   or end of input. Session commands:
//!   - `/role <name>`: switch the role sent with each message
//!   - `/clear`: clear the screen
//!   - `/help`: list the session commands
//!   - `/quit`: leave the session
//!
//! ## Examples
//!
//! ```bash
//! # Ask once, as a support agent, against a remote backend
//! cardchat chat --role soporte --url https://support.example.com/api/chat "Estado de la incidencia 42"
//!
//! # Interactive session with the configured backend
//! cardchat chat
//! ```
//!
use crate::cards::turn::run_turn;
use crate::common::network::{ChatRequest, HttpChatClient};
use crate::common::ui::TerminalSink;
use crate::core::config::{self, Config};
use crate::core::error::{CardchatError, Result};
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Message to send. Without it, an interactive session starts.
    pub message: Option<String>,

    /// Role sent with each message (e.g. cliente, admin, soporte).
    #[arg(long, short)]
    pub role: Option<String>,

    /// Chat endpoint URL, overriding the configured `backend.chat_url`.
    #[arg(long, env = "CARDCHAT_URL")]
    pub url: Option<String>,
}

const HELP_TEXT: &str = "Commands: /role <name> switches role, /clear clears the screen, /quit leaves.";

/// A line typed during an interactive session.
#[derive(Debug, PartialEq, Eq)]
enum SessionInput {
    Message(String),
    SwitchRole(String),
    Clear,
    Help,
    Quit,
    Empty,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads the configuration, applies command-line overrides and runs either a
/// single turn or an interactive session.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let mut config = config::load_config()?;
    apply_overrides(&mut config, &args);
    config::validate_config(&config).context("Invalid chat settings")?;

    let client = HttpChatClient::new(&config.backend)?;
    let mut sink = TerminalSink::stdio();
    let role = config.backend.default_role.clone();

    match args.message {
        Some(message) => {
            if message.trim().is_empty() {
                return Err(CardchatError::Input("Message cannot be empty.".into()).into());
            }
            run_turn(&client, &ChatRequest::new(message.trim(), role), &mut sink).await
        }
        None => interactive_session(&client, role, &mut sink).await,
    }
}

fn apply_overrides(config: &mut Config, args: &ChatArgs) {
    if let Some(url) = &args.url {
        config.backend.chat_url = url.clone();
    }
    if let Some(role) = &args.role {
        config.backend.default_role = role.clone();
    }
}

async fn interactive_session(
    client: &HttpChatClient,
    mut role: String,
    sink: &mut TerminalSink<io::Stdout, io::Stderr>,
) -> Result<()> {
    info!("Starting interactive session against {}", client.chat_url());
    sink.notice(&welcome_text(&role))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            debug!("End of input, leaving session.");
            break;
        };

        match parse_input(&line) {
            SessionInput::Empty => continue,
            SessionInput::Quit => break,
            SessionInput::Help => sink.notice(HELP_TEXT)?,
            SessionInput::Clear => {
                sink.clear()?;
                sink.notice("🧹 Chat cleared")?;
            }
            SessionInput::SwitchRole(new_role) => {
                role = new_role;
                sink.notice(&format!("🔄 Role changed to: {}", role_label(&role)))?;
            }
            SessionInput::Message(message) => {
                run_turn(client, &ChatRequest::new(message, role.as_str()), sink).await?;
            }
        }
    }
    Ok(())
}

fn prompt() {
    let mut stderr = io::stderr();
    if let Err(e) = write!(stderr, "> ").and_then(|_| stderr.flush()) {
        debug!("Could not draw prompt: {}", e);
    }
}

fn parse_input(line: &str) -> SessionInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return SessionInput::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return SessionInput::Message(trimmed.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "exit"), _) => SessionInput::Quit,
        (Some("clear"), _) => SessionInput::Clear,
        (Some("role"), Some(role)) => SessionInput::SwitchRole(role.to_lowercase()),
        (Some("help" | "role"), _) => SessionInput::Help,
        // Unknown slash commands are sent as ordinary text.
        _ => SessionInput::Message(trimmed.to_string()),
    }
}

/// Role name with its first letter uppercased, as shown to the user.
fn role_label(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn welcome_text(role: &str) -> String {
    format!(
        "Welcome! I am your subscriber management assistant. You are connected as: {}. \
         Ask me about subscriber data, invoices, incidents or the weather.",
        role_label(role)
    )
}
