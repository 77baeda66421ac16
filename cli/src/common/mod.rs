//! # cardchat Common Utilities Module (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by several commands:
//!
//! - **`network`**: The chat request body, the `ChatTransport` seam and the
//!   `reqwest` client that talks to the chat backend.
//! - **`ui`**: The `DisplaySink` trait, the terminal sink and the plain-text
//!   card layout.
//!
pub mod network;
pub mod ui;
