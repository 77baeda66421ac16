//! # cardchat Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used by the cardchat command handlers.
//! The card dispatcher itself never fails: malformed backend answers degrade to
//! a visible fallback message. Errors here cover the surrounding plumbing:
//! configuration, the HTTP round trip to the chat backend, template rendering
//! and user input.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CardchatError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```text
//! // Return a specific error type
//! if config.backend.timeout_secs == 0 {
//!     return Err(CardchatError::Config("timeout_secs must be positive".into()))?;
//! }
//!
//! // A chat turn that failed in transport is detected with a downcast
//! if e.downcast_ref::<CardchatError>().map_or(false, CardchatError::is_connectivity) {
//!     // show the generic connectivity message
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the cardchat application.
#[derive(Error, Debug)]
pub enum CardchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat backend answered with HTTP status {status}")]
    BackendStatus { status: u16 },

    #[error("Could not reach chat backend: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Invalid input: {0}")]
    Input(String),
}

impl CardchatError {
    /// Transport failures and non-2xx answers are reported to the user the same way.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::BackendStatus { .. } | Self::Transport { .. })
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
