//! # cardchat Template System
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module renders the browser surface with the Tera templating engine:
//! - `items.html`: The transcript fragment for one chat turn (text bubbles and
//!   cards), returned by `POST /api/chat` and by `cardchat render --format html`
//! - `page.html`: The full chat page served at `/`, with branding applied
//!
//! ## Architecture
//!
//! Templates are compiled into the binary with `include_str!` and registered
//! once in `HtmlRenderer::new`. Autoescaping is on for `.html` templates, so
//! values coming from the backend are escaped before reaching the page.
//!
//! ## Examples
//!
//! ```text
//! let renderer = HtmlRenderer::new()?;
//! let items = cards::handle(&envelope);
//! let fragment = renderer.render_items(&items)?;
//! ```
//!
use crate::cards::DisplayItem;
use crate::core::config::BrandingConfig;
use crate::core::error::{CardchatError, Result};
use anyhow::{anyhow, Context};
use tera::Tera;
use tracing::debug;

const ITEMS_TEMPLATE: &str = "items.html";
const PAGE_TEMPLATE: &str = "page.html";

/// Roles offered by the page's role selector.
pub const USER_ROLES: [&str; 3] = ["cliente", "admin", "soporte"];

/// Holds the compiled Tera templates.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (ITEMS_TEMPLATE, include_str!("../../templates/items.html")),
            (PAGE_TEMPLATE, include_str!("../../templates/page.html")),
        ])
        .map_err(|e| {
            anyhow!(CardchatError::Template { source: e })
                .context("Failed to compile HTML templates")
        })?;
        debug!("Registered HTML templates: {}, {}", ITEMS_TEMPLATE, PAGE_TEMPLATE);
        Ok(Self { tera })
    }

    /// # Render Transcript Fragment (`render_items`)
    ///
    /// Renders the display items of one turn, in order, as HTML message bubbles.
    pub fn render_items(&self, items: &[DisplayItem]) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("items", items);
        self.render(ITEMS_TEMPLATE, &context)
    }

    /// # Render Chat Page (`render_page`)
    ///
    /// Renders the full page. `default_role` is preselected in the role selector.
    pub fn render_page(&self, branding: &BrandingConfig, default_role: &str) -> Result<String> {
        let mut roles: Vec<&str> = USER_ROLES.to_vec();
        if !roles.contains(&default_role) {
            roles.push(default_role);
        }
        let mut context = tera::Context::new();
        context.insert("branding", branding);
        context.insert("roles", &roles);
        context.insert("default_role", default_role);
        self.render(PAGE_TEMPLATE, &context)
    }

    fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| anyhow!(CardchatError::Template { source: e }))
            .with_context(|| format!("Tera rendering failed for template '{}'", template))
    }
}
