//! Integration tests for the connector webhook.
//!
//! These tests verify the full inbound path:
//! 1. The router acknowledges decodable payloads and rejects the rest
//! 2. The registered handler receives the message
//! 3. Replies written by the handler reach the connector conversation

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tokio::sync::mpsc;
use tower::ServiceExt;

use recast_sdk::adapters::{webhook_router, MockHttpRequester};
use recast_sdk::application::{ClientDefaults, ConnectClient, Endpoints};
use recast_sdk::domain::messaging::{Attachment, InboundMessage, QuickReplies};
use recast_sdk::ports::{handler_fn, MessageWriter};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn inbound(conversation: &str, text: &str) -> String {
    json!({
        "message": {
            "participant": "participant-1",
            "conversation": conversation,
            "attachment": {"type": "text", "content": text}
        },
        "senderId": "sender-1",
        "chatId": "chat-1"
    })
    .to_string()
}

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Builds a connect client whose handler echoes text with a quick reply,
/// reporting each send outcome on the returned channel.
fn echo_client(requester: &MockHttpRequester) -> (Arc<ConnectClient>, mpsc::UnboundedReceiver<bool>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let client = ConnectClient::new(
        Arc::new(requester.clone()),
        ClientDefaults::new("bot-token"),
        Endpoints::default(),
    )
    .with_handler(handler_fn(
        move |writer: Arc<dyn MessageWriter>, message: InboundMessage| {
            let tx = tx.clone();
            async move {
                let text = message.text().unwrap_or_default().to_string();
                let result = writer
                    .reply(vec![
                        Attachment::text(format!("You said: {}", text)).into(),
                        QuickReplies::new("Again?").add_button("Yes", "yes").into(),
                    ])
                    .await;
                let _ = tx.send(result.is_ok());
            }
        },
    ));
    (Arc::new(client), rx)
}

async fn error_code(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    error["error_code"].as_str().unwrap_or_default().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn inbound_message_is_acknowledged_and_answered() {
    let requester = MockHttpRequester::new().with_reply(201, "");
    let (client, mut rx) = echo_client(&requester);

    let response = webhook_router(client)
        .oneshot(post(inbound("conv-1", "hello")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(rx.recv().await, Some(true));

    let call = requester.last_call().unwrap();
    assert_eq!(
        call.url,
        "https://api.recast.ai/connect/v1/conversations/conv-1/messages"
    );
    assert_eq!(call.header("Authorization"), Some("Token bot-token"));
    assert_eq!(
        call.json().unwrap(),
        &json!({"messages": [
            {"type": "text", "content": "You said: hello"},
            {"type": "quickReplies", "content": {
                "title": "Again?",
                "buttons": [{"title": "Yes", "value": "yes"}]
            }}
        ]})
    );
}

#[tokio::test]
async fn handler_failure_does_not_change_acknowledgment() {
    let requester = MockHttpRequester::new().with_reply(500, r#"{"message": "Connector down"}"#);
    let (client, mut rx) = echo_client(&requester);

    let response = webhook_router(client)
        .oneshot(post(inbound("conv-2", "hi")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(rx.recv().await, Some(false));
}

#[tokio::test]
async fn payload_without_conversation_is_rejected() {
    let requester = MockHttpRequester::new();
    let (client, _rx) = echo_client(&requester);

    let body = json!({"message": {"attachment": {"type": "text", "content": "hi"}}}).to_string();
    let response = webhook_router(client).oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "MISSING_FIELD");
    assert_eq!(requester.call_count(), 0);
}

#[tokio::test]
async fn non_json_payload_is_rejected() {
    let requester = MockHttpRequester::new();
    let (client, _rx) = echo_client(&requester);

    let response = webhook_router(client)
        .oneshot(post("not json".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "INVALID_JSON");
}

#[tokio::test]
async fn mistyped_payload_is_invalid_payload() {
    let requester = MockHttpRequester::new();
    let (client, _rx) = echo_client(&requester);

    let body = json!({"message": {"conversation": 42, "attachment": {"type": "text", "content": "hi"}}})
        .to_string();
    let response = webhook_router(client).oneshot(post(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "INVALID_PAYLOAD");
    assert_eq!(requester.call_count(), 0);
}
