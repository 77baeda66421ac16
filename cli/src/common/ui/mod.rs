//! # cardchat UI Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Display surfaces receive transcript entries through the `DisplaySink`
//! trait, so the dispatch and card logic can be exercised without a terminal
//! or a browser.
//!
//! - `DisplaySink`: Append an item, show or hide the typing indicator
//! - `TerminalSink`: Writes items to one stream and the typing indicator to
//!   another (stdout and stderr in the CLI). Escape sequences are only
//!   written to streams that are terminals.
//! - `text`: Plain-text layout of cards
//!
use crate::cards::DisplayItem;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{self, IsTerminal, Write};
use tracing::debug;

pub mod text;

/// Receives the output of a chat turn.
pub trait DisplaySink {
    /// Appends one entry to the transcript.
    fn display(&mut self, item: &DisplayItem) -> Result<()>;
    /// Shows the transient "typing" indicator.
    fn show_typing(&mut self);
    /// Removes the typing indicator. A no-op when it is not shown.
    fn hide_typing(&mut self);
}

const TYPING_TEXT: &str = "… typing";

/// Terminal surface: items go to `out`, the typing indicator to `status`.
pub struct TerminalSink<O: Write, S: Write> {
    out: O,
    status: S,
    typing: bool,
    ansi_out: bool,
    ansi_status: bool,
}

impl TerminalSink<io::Stdout, io::Stderr> {
    /// Sink over the process streams, using escape sequences only where the
    /// stream is attached to a terminal.
    pub fn stdio() -> Self {
        let (out, status) = (io::stdout(), io::stderr());
        let (ansi_out, ansi_status) = (out.is_terminal(), status.is_terminal());
        debug!("Terminal output: stdout={}, stderr={}", ansi_out, ansi_status);
        TerminalSink::new(out, status).with_ansi(ansi_out, ansi_status)
    }
}

impl<O: Write, S: Write> TerminalSink<O, S> {
    /// Plain sink: no escape sequences and no typing indicator.
    pub fn new(out: O, status: S) -> Self {
        Self {
            out,
            status,
            typing: false,
            ansi_out: false,
            ansi_status: false,
        }
    }

    /// Enables escape sequences on the item stream and the status stream.
    pub fn with_ansi(mut self, out: bool, status: bool) -> Self {
        self.ansi_out = out;
        self.ansi_status = status;
        self
    }

    /// Prints a local notice (welcome, role change) like a bot message.
    pub fn notice(&mut self, text: &str) -> Result<()> {
        self.display(&DisplayItem::text(text))
    }

    /// Clears the visible screen. Does nothing when `out` is not a terminal.
    pub fn clear(&mut self) -> Result<()> {
        if !self.ansi_out {
            return Ok(());
        }
        write!(self.out, "\x1B[2J\x1B[H").context("Failed to clear terminal")?;
        self.out.flush().context("Failed to flush terminal output")
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, S) {
        (self.out, self.status)
    }
}

impl<O: Write, S: Write> DisplaySink for TerminalSink<O, S> {
    fn display(&mut self, item: &DisplayItem) -> Result<()> {
        writeln!(self.out, "{}\n", text::format_item(item))
            .context("Failed to write chat output")?;
        self.out.flush().context("Failed to flush chat output")
    }

    fn show_typing(&mut self) {
        // Without erase-line the indicator could not be removed again.
        if self.typing || !self.ansi_status {
            return;
        }
        if let Err(e) = write!(self.status, "{}", TYPING_TEXT).and_then(|_| self.status.flush()) {
            debug!("Could not draw typing indicator: {}", e);
        }
        self.typing = true;
    }

    fn hide_typing(&mut self) {
        if !self.typing {
            return;
        }
        // Carriage return plus erase-line removes the indicator in place.
        if let Err(e) = write!(self.status, "\r\x1B[2K").and_then(|_| self.status.flush()) {
            debug!("Could not erase typing indicator: {}", e);
        }
        self.typing = false;
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_sink_separates_streams() -> Result<()> {
        let mut sink = TerminalSink::new(Vec::new(), Vec::new()).with_ansi(true, true);
        sink.show_typing();
        sink.show_typing();
        sink.hide_typing();
        sink.hide_typing();
        sink.display(&DisplayItem::text("Hola"))?;

        let (out, status) = sink.into_parts();
        assert_eq!(String::from_utf8(out)?, "Hola\n\n");
        let status = String::from_utf8(status)?;
        assert_eq!(status.matches(TYPING_TEXT).count(), 1);
        assert_eq!(status.matches("\x1B[2K").count(), 1);
        Ok(())
    }

    #[test]
    fn test_notice_uses_item_layout() -> Result<()> {
        let mut sink = TerminalSink::new(Vec::new(), std::io::sink());
        sink.notice("🧹 Chat cleared")?;
        let (out, _) = sink.into_parts();
        assert_eq!(String::from_utf8(out)?, "🧹 Chat cleared\n\n");
        Ok(())
    }

    #[test]
    fn test_plain_sink_writes_no_escapes() -> Result<()> {
        let mut sink = TerminalSink::new(Vec::new(), Vec::new());
        sink.show_typing();
        sink.hide_typing();
        sink.clear()?;
        sink.notice("🧹 Chat cleared")?;

        let (out, status) = sink.into_parts();
        let out = String::from_utf8(out)?;
        assert_eq!(out, "🧹 Chat cleared\n\n");
        assert!(status.is_empty());
        Ok(())
    }

    #[test]
    fn test_clear_on_terminal() -> Result<()> {
        let mut sink = TerminalSink::new(Vec::new(), std::io::sink()).with_ansi(true, false);
        sink.clear()?;
        let (out, _) = sink.into_parts();
        assert_eq!(String::from_utf8(out)?, "\x1B[2J\x1B[H");
        Ok(())
    }
}
