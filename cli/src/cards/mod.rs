//! # cardchat Card Pipeline
//!
//! File: cli/src/cards/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything between the backend's JSON answer and the transcript:
//!
//! - `envelope`: Typed, lenient parsing of the response envelope
//! - `dispatch`: `handle(envelope)`, which produces the display items for a turn
//! - `shape`: Shape classification of tool payloads (ordered predicate list)
//! - `render`: `render(data)`, which builds the card for one payload
//! - `weather`: Parsing of free-text weather answers
//! - `turn`: One request/response round trip against a display sink
//!
//! Nothing in here touches a terminal or a browser; surfaces consume
//! `DisplayItem` values through `common::ui::DisplaySink`.
//!
use serde::Serialize;

pub mod dispatch;
pub mod envelope;
pub mod render;
pub mod shape;
pub mod turn;
pub mod weather;

pub use dispatch::handle;
pub use envelope::ResponseEnvelope;
pub use render::Card;

/// Visual tone of a text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Plain,
    Error,
}

/// A rendered card plus the tool header it is shown under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCard {
    pub tool: String,
    pub icon: &'static str,
    pub card: Card,
}

/// One entry appended to the visible transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    Text { text: String, tone: Tone },
    Card(ToolCard),
}

impl DisplayItem {
    pub fn text(text: impl Into<String>) -> Self {
        DisplayItem::Text {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        DisplayItem::Text {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    /// Shown when the backend could not be reached or answered non-2xx.
    pub fn connectivity_failure() -> Self {
        DisplayItem::error(dispatch::CONNECTIVITY_TEXT)
    }
}
