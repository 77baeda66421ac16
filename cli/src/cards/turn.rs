//! # Chat Turn
//!
//! File: cli/src/cards/turn.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! One user message, one backend round trip, one batch of display items.
//!
//! `exchange` is the surface-independent part: it sends the request and turns
//! whatever comes back (answer, HTTP error, transport error) into display
//! items. `run_turn` wraps it for interactive surfaces: the typing indicator
//! is shown before the request and hidden exactly once afterwards, on the
//! success and the failure path alike, before the items are displayed.
//!
use super::{handle, DisplayItem, ResponseEnvelope};
use crate::common::network::{ChatRequest, ChatTransport};
use crate::common::ui::DisplaySink;
use crate::core::error::{CardchatError, Result};
use tracing::{error, info, warn};

/// # Exchange Message (`exchange`)
///
/// Never fails: connectivity problems become the generic connectivity item.
pub async fn exchange<T: ChatTransport>(transport: &T, request: &ChatRequest) -> Vec<DisplayItem> {
    info!(
        "Sending message as role '{}' ({} chars)",
        request.user_role,
        request.message.chars().count()
    );
    match transport.post_chat(request).await {
        Ok(body) => handle(&ResponseEnvelope::parse(&body)),
        Err(e) => {
            let connectivity = e
                .downcast_ref::<CardchatError>()
                .is_some_and(CardchatError::is_connectivity);
            if connectivity {
                warn!("Chat backend unreachable: {:#}", e);
            } else {
                error!("Chat request failed: {:#}", e);
            }
            vec![DisplayItem::connectivity_failure()]
        }
    }
}

/// # Run Turn (`run_turn`)
///
/// Shows the typing indicator, performs the exchange, hides the indicator and
/// then hands every item to the sink in order. Only sink write failures are
/// returned as errors.
pub async fn run_turn<T, S>(transport: &T, request: &ChatRequest, sink: &mut S) -> Result<()>
where
    T: ChatTransport,
    S: DisplaySink,
{
    sink.show_typing();
    let items = exchange(transport, request).await;
    sink.hide_typing();

    for item in &items {
        sink.display(item)?;
    }
    Ok(())
}
