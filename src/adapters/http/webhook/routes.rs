//! Axum router for the connector webhook.

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use super::handlers::receive_message;
use crate::application::ConnectClient;

/// Create the webhook router.
///
/// # Routes
/// - `POST /` - Receive a message pushed by the connector
///
/// # Example
///
/// ```ignore
/// let app = Router::new().nest("/webhook", webhook_router(Arc::new(client)));
/// ```
pub fn webhook_router(client: Arc<ConnectClient>) -> Router {
    Router::new()
        .route("/", post(receive_message))
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http_client::MockHttpRequester;
    use crate::application::{ClientDefaults, Endpoints};
    use crate::domain::messaging::InboundMessage;
    use crate::ports::{handler_fn, MessageWriter};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    const INBOUND: &str = r#"{
        "message": {
            "participant": "p-1",
            "conversation": "conv-42",
            "attachment": {"type": "text", "content": "Hello bot"}
        },
        "senderId": "s-1",
        "chatId": "c-1"
    }"#;

    fn post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_message_is_acknowledged_and_handled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let client = ConnectClient::new(
            Arc::new(MockHttpRequester::new()),
            ClientDefaults::new("tok"),
            Endpoints::default(),
        )
        .with_handler(handler_fn(
            move |_writer: Arc<dyn MessageWriter>, message: InboundMessage| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(message.conversation_id().to_string());
                }
            },
        ));

        let response = webhook_router(Arc::new(client))
            .oneshot(post(INBOUND))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.recv().await.as_deref(), Some("conv-42"));
    }

    #[tokio::test]
    async fn undecodable_body_is_bad_request() {
        let client = ConnectClient::new(
            Arc::new(MockHttpRequester::new()),
            ClientDefaults::new("tok"),
            Endpoints::default(),
        );

        let response = webhook_router(Arc::new(client))
            .oneshot(post(""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error_code"], "EMPTY_BODY");
    }
}
