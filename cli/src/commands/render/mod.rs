//! # cardchat Offline Render
//!
//! File: cli/src/commands/render/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cardchat render` feeds a saved backend answer through the dispatcher
//! without contacting any server. Handy for checking how a payload will look
//! and for building fixtures.
//!
//! ## Examples
//!
//! ```bash
//! # Terminal layout of a saved answer
//! cardchat render answer.json
//!
//! # HTML fragment, reading the answer from stdin
//! curl -s -X POST localhost:8080/api/chat -d '{"message":"hola"}' | cardchat render --format html
//!
//! # Structured display items
//! cardchat render --format json answer.json
//! ```
//!
use crate::cards::{handle, DisplayItem, ResponseEnvelope};
use crate::common::ui::text::format_item;
use crate::core::error::Result;
use crate::core::templating::HtmlRenderer;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// # Render Command Arguments (`RenderArgs`)
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// File holding the backend's JSON answer. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Terminal layout.
    Text,
    /// HTML fragment as served by `cardchat srv`.
    Html,
    /// Display items as JSON.
    Json,
}

/// # Handle Render Command (`handle_render`)
pub async fn handle_render(args: RenderArgs) -> Result<()> {
    info!("Handling render command with args: {:?}", args);
    let body = read_input(args.input.as_deref())?;
    let items = handle(&ResponseEnvelope::parse(&body));
    println!("{}", format_items(&items, args.format)?);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file: {}", path.display())),
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read response from stdin")?;
            Ok(body)
        }
    }
}

fn format_items(items: &[DisplayItem], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(items
            .iter()
            .map(format_item)
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Html => HtmlRenderer::new()?.render_items(items),
        OutputFormat::Json => {
            serde_json::to_string_pretty(items).context("Failed to serialize display items")
        }
    }
}
