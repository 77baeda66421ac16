//! # cardchat Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the cardchat CLI. Each
//! command defines its own arguments structure and handler function.
//!
//! ## Commands
//!
//! - `chat`: Talk to the chat backend from the terminal
//! - `render`: Render a saved backend answer offline (text, HTML or JSON)
//! - `srv`: Serve the web chat page and proxy `/api/chat` to the backend
//!

/// Terminal chat client. One-shot or interactive.
pub mod chat;
/// Offline rendering of saved backend answers.
pub mod render;
/// Web front end: chat page, `/api/chat` proxy, health and branding routes.
pub mod srv;
