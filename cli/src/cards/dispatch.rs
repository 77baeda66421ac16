//! # Response Dispatcher
//!
//! File: cli/src/cards/dispatch.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Maps a `ResponseEnvelope` to the transcript entries to show for one turn.
//! Every envelope yields at least one `DisplayItem`; malformed answers show a
//! fallback text instead of failing.
//!
//! - `chat`: one text item (placeholder when the text is missing or empty)
//! - `error`: one error text carrying the server message
//! - `tool_calls`: one item per result, in order; failed tools become error
//!   texts naming the tool, the rest become cards
//! - anything else: the "unexpected response" text
//!
use super::envelope::{ResponseEnvelope, ToolOutcome, ToolResult};
use super::render::render;
use super::{DisplayItem, ToolCard};
use tracing::debug;

pub const NO_RESPONSE_TEXT: &str = "No response received";
pub const COMPLETED_TEXT: &str = "✅ Operation completed with no output";
pub const UNEXPECTED_TEXT: &str = "🤔 Unexpected response from server";
pub const CONNECTIVITY_TEXT: &str = "❌ Could not reach the server. Please try again.";

const DEFAULT_TOOL_ICON: &str = "🔧";
const TOOL_ICONS: [(&str, &str); 5] = [
    ("buscar_abonado", "👤"),
    ("obtener_facturas", "📄"),
    ("consultar_clima", "🌤️"),
    ("crear_incidencia", "🚨"),
    ("buscar_incidencia", "🔍"),
];

/// # Handle Envelope (`handle`)
///
/// Produces the display items for one backend answer, preserving the order of
/// tool results.
pub fn handle(envelope: &ResponseEnvelope) -> Vec<DisplayItem> {
    match envelope {
        ResponseEnvelope::Chat { response } => {
            let text = response
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(NO_RESPONSE_TEXT);
            vec![DisplayItem::text(text)]
        }
        ResponseEnvelope::Error { error } => {
            let message = error.as_deref().unwrap_or("unknown error");
            vec![DisplayItem::error(format!("❌ Error: {}", message))]
        }
        ResponseEnvelope::ToolCalls { results } => match results.as_deref() {
            Some(results) if !results.is_empty() => results.iter().map(tool_item).collect(),
            _ => vec![DisplayItem::text(COMPLETED_TEXT)],
        },
        ResponseEnvelope::Unexpected => vec![DisplayItem::text(UNEXPECTED_TEXT)],
    }
}

fn tool_item(result: &ToolResult) -> DisplayItem {
    match &result.outcome {
        ToolOutcome::Failed(error) => {
            debug!("Tool '{}' failed: {}", result.tool, error);
            DisplayItem::error(format!("❌ Error in {}: {}", result.tool, error))
        }
        ToolOutcome::Response(data) => {
            let card = render(data);
            debug!("Tool '{}' rendered as {:?}", result.tool, card.shape());
            DisplayItem::Card(ToolCard {
                tool: result.tool.clone(),
                icon: tool_icon(&result.tool),
                card,
            })
        }
    }
}

/// Header icon for a tool name.
pub fn tool_icon(tool: &str) -> &'static str {
    TOOL_ICONS
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_TOOL_ICON)
}
