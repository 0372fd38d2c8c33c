//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection: applies
//! subscription commands and forwards matching change events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType, WsRequest};
use super::subscription::{SubscriptionManager, parse_targets};
use crate::domain::InventoryEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and updates its subscriptions.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<InventoryEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if !subs.matches(event.product_id()) {
                            continue;
                        }
                        let payload = serde_json::to_value(&event).unwrap_or_default();
                        let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
                        if let Some(json) = msg.to_json()
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Missed events: the client should refetch everything.
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                        let msg = WsMessage::new(
                            String::new(),
                            WsMessageType::Event,
                            serde_json::json!({ "event_type": "resync", "missed": n }),
                        );
                        if let Some(json) = msg.to_json()
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let request = match serde_json::from_str::<WsRequest>(text) {
        Ok(request) => request,
        Err(e) if e.is_data() => {
            return WsMessage::error(String::new(), 404, "unknown command").to_json();
        }
        Err(_) => return WsMessage::error(String::new(), 400, "malformed JSON").to_json(),
    };

    let payload = match request.command {
        WsCommand::Subscribe { product_ids } => {
            let (ids, wildcard, rejected) = parse_targets(&product_ids);
            subs.subscribe(&ids, wildcard);
            serde_json::json!({
                "subscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "rejected": rejected,
                "count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::Unsubscribe { product_ids } => {
            let (ids, wildcard, rejected) = parse_targets(&product_ids);
            subs.unsubscribe(&ids, wildcard);
            serde_json::json!({
                "unsubscribed": ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "rejected": rejected,
                "remaining_count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
    };

    WsMessage::new(request.id, WsMessageType::Response, payload).to_json()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ProductId;

    fn reply(text: &str, subs: &mut SubscriptionManager) -> serde_json::Value {
        let Some(json) = handle_text_message(text, subs) else {
            panic!("expected a reply");
        };
        let Ok(value) = serde_json::from_str(&json) else {
            panic!("reply is not JSON");
        };
        value
    }

    #[test]
    fn subscribe_command_updates_filter() {
        let mut subs = SubscriptionManager::new();
        let id = ProductId::new();
        let text = format!(r#"{{"id":"1","command":"subscribe","product_ids":["{id}"]}}"#);
        let value = reply(&text, &mut subs);
        assert_eq!(value["type"], "response");
        assert_eq!(value["id"], "1");
        assert_eq!(value["payload"]["count"], 1);
        assert!(subs.matches(id));
    }

    #[test]
    fn malformed_json_is_reported() {
        let mut subs = SubscriptionManager::new();
        let value = reply("{not json", &mut subs);
        assert_eq!(value["type"], "error");
        assert_eq!(value["payload"]["code"], 400);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut subs = SubscriptionManager::new();
        let value = reply(r#"{"command":"get_state"}"#, &mut subs);
        assert_eq!(value["payload"]["code"], 404);
    }
}
