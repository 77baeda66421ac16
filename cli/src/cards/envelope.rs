//! # Backend Response Envelope
//!
//! File: cli/src/cards/envelope.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Typed view of the JSON answer returned by the chat endpoint. The `type`
//! field selects the variant:
//!
//! ```json
//! { "type": "chat", "response": "Hola, ¿en qué puedo ayudarte?" }
//! { "type": "error", "error": "Agent timed out" }
//! { "type": "tool_calls", "results": [
//!     { "tool": "buscar_abonado", "response": { "nombre": "Ana" } },
//!     { "tool": "obtener_facturas", "error": "Subscriber not found" }
//! ] }
//! ```
//!
//! Parsing never fails. Unknown tags and bodies that do not fit any variant
//! become `ResponseEnvelope::Unexpected`, which the dispatcher turns into a
//! visible fallback message.
//!
use super::shape::{display_text, is_truthy};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseEnvelope {
    Chat {
        #[serde(default)]
        response: Option<String>,
    },
    ToolCalls {
        #[serde(default)]
        results: Option<Vec<ToolResult>>,
    },
    Error {
        #[serde(default)]
        error: Option<String>,
    },
    #[serde(other)]
    Unexpected,
}

impl ResponseEnvelope {
    /// Reads a raw response body, degrading to `Unexpected` on anything unreadable.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|e| {
            warn!("Unreadable chat response ({}): {:.200}", e, body);
            ResponseEnvelope::Unexpected
        })
    }

    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Chat response does not match any envelope: {}", e);
            ResponseEnvelope::Unexpected
        })
    }
}

/// Outcome of one capability the backend invoked during the turn.
///
/// Built from each `results` entry on its own, so one unreadable entry never
/// spoils the rest of the turn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ToolResult {
    pub tool: String,
    pub outcome: ToolOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Payload to classify and render as a card.
    Response(Value),
    /// Terminal failure; never reaches the renderer.
    Failed(String),
}

const UNNAMED_TOOL: &str = "unknown tool";
const MALFORMED_RESULT: &str = "malformed result";

impl From<Value> for ToolResult {
    fn from(entry: Value) -> Self {
        let mut fields = match entry {
            Value::Object(fields) => fields,
            other => {
                warn!("Tool result is not an object: {:.200}", other.to_string());
                return ToolResult {
                    tool: UNNAMED_TOOL.to_string(),
                    outcome: ToolOutcome::Failed(MALFORMED_RESULT.to_string()),
                };
            }
        };

        // Falsy names and errors count as absent, so `"error": ""` is no error.
        let tool = fields
            .get("tool")
            .filter(|name| is_truthy(name))
            .map(display_text)
            .unwrap_or_else(|| UNNAMED_TOOL.to_string());
        let outcome = match fields.get("error").filter(|error| is_truthy(error)) {
            Some(error) => ToolOutcome::Failed(display_text(error)),
            None => ToolOutcome::Response(fields.remove("response").unwrap_or(Value::Null)),
        };
        ToolResult { tool, outcome }
    }
}
