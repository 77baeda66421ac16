//! # cardchat Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for cardchat, handling loading,
//! merging, validation, and access to configuration data. It combines defaults,
//! user settings, and project-specific overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.cardchat.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/cardchat/config.toml`
//! 3. Default values defined in the code
//!
//! Command-line flags are applied on top of the loaded configuration by the
//! individual command handlers.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [backend]
//! chat_url = "http://localhost:8080/api/chat"
//! default_role = "cliente"
//! timeout_secs = 60
//!
//! [branding]
//! company_name = "Acme Telecom"
//! primary_color = "#2563eb"
//! secondary_color = "#64748b"
//!
//! [server]
//! static_dir = "~/cardchat/static"
//! ```
//!
use crate::core::error::{CardchatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Where and how to reach the chat backend.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Full URL of the chat endpoint receiving `{ message, user_role }`.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    /// Role sent with each message unless overridden.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Request timeout in seconds. Expiry counts as a connectivity failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Branding shown by the web front end (`GET /api/branding`, page header).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BrandingConfig {
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
}

/// Optional settings for `cardchat srv`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Extra directory served under `/static` (can use ~). Will be expanded.
    pub static_dir: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            chat_url: default_chat_url(),
            default_role: default_role(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
        }
    }
}

fn default_chat_url() -> String {
    "http://localhost:8080/api/chat".to_string()
}
fn default_role() -> String {
    "cliente".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_company_name() -> String {
    "Virtual Assistant".to_string()
}
fn default_primary_color() -> String {
    "#2563eb".to_string()
}
fn default_secondary_color() -> String {
    "#64748b".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".cardchat.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "cardchat", "cardchat") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.cardchat.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.cardchat.toml`, stopping at a repository root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let pick = |project: String, user: String, default: &str| {
        if project != default {
            project
        } else {
            user
        }
    };

    let mut merged = Config::default();
    merged.backend.chat_url = pick(
        project_cfg.backend.chat_url,
        user.backend.chat_url,
        defaults.backend.chat_url.as_str(),
    );
    merged.backend.default_role = pick(
        project_cfg.backend.default_role,
        user.backend.default_role,
        defaults.backend.default_role.as_str(),
    );
    merged.backend.timeout_secs = if project_cfg.backend.timeout_secs != default_timeout_secs() {
        project_cfg.backend.timeout_secs
    } else {
        user.backend.timeout_secs
    };
    merged.branding.company_name = pick(
        project_cfg.branding.company_name,
        user.branding.company_name,
        defaults.branding.company_name.as_str(),
    );
    merged.branding.primary_color = pick(
        project_cfg.branding.primary_color,
        user.branding.primary_color,
        defaults.branding.primary_color.as_str(),
    );
    merged.branding.secondary_color = pick(
        project_cfg.branding.secondary_color,
        user.branding.secondary_color,
        defaults.branding.secondary_color.as_str(),
    );
    merged.server.static_dir = project_cfg.server.static_dir.or(user.server.static_dir);
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.server.static_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded static directory: {}", dir);
    }
}

pub fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let url = &config.backend.chat_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!(CardchatError::Config(format!(
            "Invalid chat_url '{}'. Expected an http:// or https:// URL.",
            url
        ))));
    }
    if config.backend.timeout_secs == 0 {
        return Err(anyhow!(CardchatError::Config(
            "timeout_secs must be greater than zero.".to_string()
        )));
    }
    if config.backend.default_role.trim().is_empty() {
        return Err(anyhow!(CardchatError::Config(
            "default_role cannot be empty.".to_string()
        )));
    }
    for (name, color) in [
        ("primary_color", &config.branding.primary_color),
        ("secondary_color", &config.branding.secondary_color),
    ] {
        if !color.starts_with('#') {
            return Err(anyhow!(CardchatError::Config(format!(
                "Invalid {} '{}'. Expected a #rrggbb color.",
                name, color
            ))));
        }
    }
    if let Some(dir) = &config.server.static_dir {
        let path = Path::new(dir);
        if path.exists() && !path.is_dir() {
            return Err(anyhow!(CardchatError::Config(format!(
                "Configured static_dir '{}' exists but is not a directory.",
                path.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
