//! # cardchat Web Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module builds the effective settings for `cardchat srv`. It combines:
//! 1. Command-line arguments (highest priority)
//! 2. The `[backend]`, `[branding]` and `[server]` tables of the merged
//!    `.cardchat.toml` configuration
//! 3. Default values (lowest priority)
//!
//! ## Architecture
//!
//! 1. Parse command-line arguments
//! 2. Load the merged application configuration (`core::config`)
//! 3. Apply argument overrides (backend URL, static directory)
//! 4. Validate the result and resolve the static directory to an absolute path
//!
//! ## Examples
//!
//! ```toml
//! [backend]
//! chat_url = "http://localhost:8080/api/chat"
//!
//! [server]
//! static_dir = "~/support-assets"
//! ```
//!
use crate::core::config::{self, BackendConfig, BrandingConfig, Config};
use crate::core::error::{CardchatError, Result};
use anyhow::Context;
use clap::Parser;
use std::net::IpAddr;
use std::{env, path::PathBuf};
use tracing::{debug, info};

/// # Server Command Arguments (`SrvArgs`)
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Network port to listen on. The next free port is used when it is taken.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Network address to bind. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Disables CORS headers. CORS is permissive by default.
    #[arg(long)]
    pub no_cors: bool,

    /// Directory served under `/static` (logos, custom stylesheets).
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Chat backend URL, overriding the configured `backend.chat_url`.
    #[arg(long, env = "CARDCHAT_URL")]
    pub backend: Option<String>,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// Consolidated settings the server runs with, after merging arguments and
/// configuration files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    /// Absolute path of the directory mounted at `/static`, if any.
    pub static_dir: Option<PathBuf>,
    pub backend: BackendConfig,
    pub branding: BrandingConfig,
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Loads `.cardchat.toml` and the user configuration, then applies `args`.
///
/// ## Errors
///
/// Fails when the configuration files cannot be parsed, when the merged
/// settings are invalid, or when the static directory does not exist.
pub async fn load_and_merge_config(args: SrvArgs) -> Result<ServerConfig> {
    let app_config = config::load_config()?;
    merge_with_app_config(args, app_config).await
}

async fn merge_with_app_config(args: SrvArgs, mut app_config: Config) -> Result<ServerConfig> {
    if let Some(url) = &args.backend {
        debug!("Backend URL overridden from command line: {}", url);
        app_config.backend.chat_url = url.clone();
    }
    if let Some(dir) = &args.static_dir {
        app_config.server.static_dir = Some(dir.to_string_lossy().into_owned());
    }
    config::validate_config(&app_config).context("Invalid server settings")?;

    let static_dir = match app_config.server.static_dir.as_deref() {
        Some(dir) => Some(resolve_static_dir(dir).await?),
        None => None,
    };

    let server_config = ServerConfig {
        port: args.port,
        host: args.host,
        enable_cors: !args.no_cors,
        static_dir,
        backend: app_config.backend,
        branding: app_config.branding,
    };
    info!(
        "Server will proxy chat requests to {}",
        server_config.backend.chat_url
    );
    Ok(server_config)
}

/// Resolves `dir` against the current directory and checks that it is a directory.
async fn resolve_static_dir(dir: &str) -> Result<PathBuf> {
    let path = PathBuf::from(dir);
    let absolute = if path.is_absolute() {
        path
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(path)
    };

    let canonical = tokio::fs::canonicalize(&absolute).await.with_context(|| {
        format!(
            "Static directory not found or inaccessible: {}",
            absolute.display()
        )
    })?;

    let metadata = tokio::fs::metadata(&canonical)
        .await
        .with_context(|| format!("Failed to read metadata for {}", canonical.display()))?;
    if !metadata.is_dir() {
        return Err(CardchatError::Config(format!(
            "Static path is not a directory: {}",
            canonical.display()
        ))
        .into());
    }
    Ok(canonical)
}
