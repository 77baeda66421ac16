//! # cardchat HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the web surface of cardchat:
//! - `GET /`: The chat page, with branding applied
//! - `POST /api/chat`: Forwards `{message, user_role}` to the chat backend and
//!   answers with the display items and their HTML rendering
//! - `GET /api/health`: Liveness probe
//! - `GET /api/branding`: The active branding settings as JSON
//! - `/static/*`: Files from the configured static directory, when set
//!
//! ## Architecture
//!
//! 1. Find an available port if the requested one is in use
//! 2. Build the Axum router around a shared `AppState` holding the chat
//!    transport and the compiled templates
//! 3. Apply tracing and CORS middleware
//! 4. Serve until Ctrl+C or SIGTERM, then shut down gracefully
//!
//! The router is generic over `ChatTransport`, so tests drive it with a canned
//! backend and no network.
//!
use super::config::ServerConfig;
use super::utils;
use crate::cards::turn::exchange;
use crate::cards::DisplayItem;
use crate::common::network::{ChatRequest, ChatTransport, HttpChatClient};
use crate::core::config::BrandingConfig;
use crate::core::error::Result;
use crate::core::templating::HtmlRenderer;
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// Shared state behind every route.
pub struct AppState<T> {
    pub transport: T,
    pub renderer: HtmlRenderer,
    pub branding: BrandingConfig,
    pub default_role: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
struct ChatPayload {
    #[serde(default)]
    message: String,
    #[serde(default)]
    user_role: Option<String>,
}

/// Answer of `POST /api/chat`: the items of one turn and their HTML fragment.
#[derive(Debug, Serialize)]
struct ChatReply {
    items: Vec<DisplayItem>,
    html: String,
}

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port starting at `config.port`, prints the URLs and
/// serves until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let local_ip = utils::get_local_ip();

    let state = Arc::new(AppState {
        transport: HttpChatClient::new(&config.backend)?,
        renderer: HtmlRenderer::new()?,
        branding: config.branding.clone(),
        default_role: config.backend.default_role.clone(),
    });
    let app = create_app(state, config.enable_cors, config.static_dir.clone());

    utils::print_banner(&config, addr, &local_ip);
    info!(
        "Starting chat server on {} (backend {})",
        addr, config.backend.chat_url
    );
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and the following ports, up to `max_attempts` in total.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, using port {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = current_port.checked_add(1).with_context(|| {
                    format!("Ran out of port numbers after port {}", current_port)
                })?;
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with its routes, shared state and middleware.
pub fn create_app<T>(
    state: Arc<AppState<T>>,
    enable_cors: bool,
    static_dir: Option<PathBuf>,
) -> Router
where
    T: ChatTransport + Send + Sync + 'static,
{
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new()
        .route("/", get(index_handler::<T>))
        .route("/api/chat", post(chat_handler::<T>))
        .route("/api/health", get(health_handler))
        .route("/api/branding", get(branding_handler::<T>));

    if let Some(dir) = static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer)
            .layer(cors_layer),
    )
}

// --- Handlers ---

async fn index_handler<T>(State(state): State<Arc<AppState<T>>>) -> Response
where
    T: ChatTransport + Send + Sync + 'static,
{
    match state
        .renderer
        .render_page(&state.branding, &state.default_role)
    {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render chat page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render chat page").into_response()
        }
    }
}

async fn chat_handler<T>(
    State(state): State<Arc<AppState<T>>>,
    Json(payload): Json<ChatPayload>,
) -> Response
where
    T: ChatTransport + Send + Sync + 'static,
{
    let message = payload.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Message required" })),
        )
            .into_response();
    }

    let role = payload
        .user_role
        .filter(|role| !role.trim().is_empty())
        .unwrap_or_else(|| state.default_role.clone());
    let request = ChatRequest::new(message, role);
    let items = exchange(&state.transport, &request).await;

    match state.renderer.render_items(&items) {
        Ok(html) => Json(ChatReply { items, html }).into_response(),
        Err(e) => {
            error!("Failed to render chat items: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Failed to render response" })),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "cardchat" }))
}

async fn branding_handler<T>(State(state): State<Arc<AppState<T>>>) -> Json<BrandingConfig>
where
    T: ChatTransport + Send + Sync + 'static,
{
    Json(state.branding.clone())
}
