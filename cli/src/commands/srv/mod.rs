//! # cardchat Web Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cardchat srv` serves the browser chat page. The page posts each message to
//! this server, which forwards it to the chat backend and answers with the
//! rendered display items, so the browser never talks to the backend directly.
//!
//! ## Architecture
//!
//! - `config.rs`: Argument parsing and merging with `.cardchat.toml`
//! - `server_logic.rs`: Router, handlers and the server loop
//! - `utils.rs`: Local IP detection and the startup banner
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the default port, proxying to the configured backend
//! cardchat srv
//!
//! # Expose on the LAN with a custom backend and asset directory
//! cardchat srv --host 0.0.0.0 --port 9000 --backend http://10.0.0.5:8080/api/chat --static-dir ./assets
//! ```
//!
use crate::core::error::Result;
use tracing::info;

pub use config::SrvArgs;

/// Argument parsing and configuration merging.
pub mod config;

/// Axum router, handlers and server loop.
pub mod server_logic;

/// Startup output helpers.
pub mod utils;

/// # Handle Server Command (`handle_srv`)
///
/// Loads the effective configuration and runs the server until shutdown.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config).await?;
    Ok(())
}
