//! # cardchat Network Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! HTTP plumbing towards the chat backend:
//!
//! - `ChatRequest`: The JSON body `{ "message": ..., "user_role": ... }`
//! - `ChatTransport`: The seam used by the turn logic, so tests can replay
//!   canned answers without a server
//! - `HttpChatClient`: The `reqwest` implementation posting to the configured
//!   chat URL
//!
//! Non-2xx answers are errors regardless of their body; the caller reports
//! them exactly like a transport failure.
//!
use crate::core::config::BackendConfig;
use crate::core::error::{CardchatError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_role: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, user_role: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_role: user_role.into(),
        }
    }
}

/// Sends one chat request and yields the raw response body of a 2xx answer.
pub trait ChatTransport {
    fn post_chat(&self, request: &ChatRequest) -> impl Future<Output = Result<String>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: reqwest::Client,
    chat_url: String,
}

impl HttpChatClient {
    pub fn new(backend: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.timeout_secs))
            .build()
            .map_err(CardchatError::from)
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            chat_url: backend.chat_url.clone(),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

impl ChatTransport for HttpChatClient {
    async fn post_chat(&self, request: &ChatRequest) -> Result<String> {
        debug!("POST {}", self.chat_url);
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(CardchatError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardchatError::BackendStatus {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(CardchatError::from)?;
        debug!("Received {} bytes from chat backend", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use tokio::net::TcpListener;

    /// Starts a throwaway backend on an ephemeral port and returns its chat URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/chat", addr)
    }

    fn backend_config(chat_url: String) -> BackendConfig {
        BackendConfig {
            chat_url,
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_chat_request_serialization() {
        let body = serde_json::to_value(ChatRequest::new("hola", "admin")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hola", "user_role": "admin" }));
    }

    #[tokio::test]
    async fn test_post_chat_returns_body() -> Result<()> {
        let router = Router::new().route(
            "/api/chat",
            post(|Json(request): Json<ChatRequest>| async move {
                format!(r#"{{"type":"chat","response":"echo {}"}}"#, request.user_role)
            }),
        );
        let client = HttpChatClient::new(&backend_config(spawn_backend(router).await))?;

        let body = client.post_chat(&ChatRequest::new("hola", "soporte")).await?;
        assert_eq!(body, r#"{"type":"chat","response":"echo soporte"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() -> Result<()> {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"type":"chat","response":"ignored"}"#,
                )
            }),
        );
        let client = HttpChatClient::new(&backend_config(spawn_backend(router).await))?;

        let err = client
            .post_chat(&ChatRequest::new("hola", "cliente"))
            .await
            .unwrap_err();
        let typed = err.downcast_ref::<CardchatError>().unwrap();
        assert!(matches!(typed, CardchatError::BackendStatus { status: 500 }));
        assert!(typed.is_connectivity());
        Ok(())
    }
}
