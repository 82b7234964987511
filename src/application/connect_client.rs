//! Client of the bot connector.
//!
//! Sends structured messages to connector conversations and dispatches
//! inbound webhook payloads to the registered [`MessageHandler`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::task::JoinHandle;

use super::endpoints::Endpoints;
use super::error::RecastError;
use super::options::{ClientDefaults, RequestOptions};
use super::request_client::send_authorized;
use crate::domain::errors::DecodeError;
use crate::domain::messaging::{parse_inbound_message, Component};
use crate::ports::{
    HttpRequest, HttpRequester, MessageHandler, MessageWriter, RequestBody, WriteError,
};

/// Sends messages through the connector and dispatches webhook calls.
pub struct ConnectClient {
    requester: Arc<dyn HttpRequester>,
    defaults: ClientDefaults,
    endpoints: Endpoints,
    handler: Option<Arc<dyn MessageHandler>>,
}

impl ConnectClient {
    pub fn new(
        requester: Arc<dyn HttpRequester>,
        defaults: ClientDefaults,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            requester,
            defaults,
            endpoints,
            handler: None,
        }
    }

    /// Registers the handler run for every inbound message, replacing any previous one.
    pub fn use_handler<H: MessageHandler + 'static>(&mut self, handler: H) {
        self.handler = Some(Arc::new(handler));
    }

    /// Builder form of [`use_handler`](Self::use_handler).
    pub fn with_handler<H: MessageHandler + 'static>(mut self, handler: H) -> Self {
        self.use_handler(handler);
        self
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Sends messages to one connector conversation.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        messages: &[Component],
    ) -> Result<(), RecastError> {
        let url = self.endpoints.conversation_messages(conversation_id);
        self.post_messages(url, messages).await
    }

    /// Sends messages to every conversation of the bot.
    pub async fn broadcast_message(&self, messages: &[Component]) -> Result<(), RecastError> {
        let url = self.endpoints.broadcast_messages();
        self.post_messages(url, messages).await
    }

    async fn post_messages(&self, url: String, messages: &[Component]) -> Result<(), RecastError> {
        if messages.is_empty() {
            return Err(RecastError::NoMessages);
        }
        let options = self.defaults.resolve(&RequestOptions::default())?;

        let request = HttpRequest::post(url, RequestBody::Json(json!({ "messages": messages })));
        send_authorized(self.requester.as_ref(), request, options.token()).await?;
        Ok(())
    }

    /// Decodes a webhook body and runs the handler on it in a new task.
    ///
    /// Returns as soon as the task is spawned, with its handle. Returns
    /// `Ok(None)` when no handler is registered; the message is dropped.
    pub fn dispatch(self: &Arc<Self>, body: &[u8]) -> Result<Option<JoinHandle<()>>, DecodeError> {
        let message = parse_inbound_message(body)?;

        let Some(handler) = self.handler.clone() else {
            tracing::warn!(
                conversation_id = %message.conversation_id(),
                "No message handler registered, dropping inbound message"
            );
            return Ok(None);
        };

        let writer: Arc<dyn MessageWriter> = Arc::new(ConnectWriter::new(
            Arc::clone(self),
            message.conversation_id(),
        ));

        Ok(Some(tokio::spawn(async move {
            handler.handle(writer, message).await;
        })))
    }
}

/// [`MessageWriter`] bound to the conversation of one inbound message.
pub struct ConnectWriter {
    client: Arc<ConnectClient>,
    conversation_id: String,
}

impl ConnectWriter {
    pub fn new(client: Arc<ConnectClient>, conversation_id: impl Into<String>) -> Self {
        Self {
            client,
            conversation_id: conversation_id.into(),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }
}

#[async_trait]
impl MessageWriter for ConnectWriter {
    async fn reply(&self, messages: Vec<Component>) -> Result<(), WriteError> {
        self.client
            .send_message(&self.conversation_id, &messages)
            .await
            .map_err(WriteError::from)
    }

    async fn broadcast(&self, messages: Vec<Component>) -> Result<(), WriteError> {
        self.client
            .broadcast_message(&messages)
            .await
            .map_err(WriteError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http_client::MockHttpRequester;
    use crate::domain::messaging::{Attachment, Card, InboundMessage};
    use crate::ports::handler_fn;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    const INBOUND: &str = r#"{
        "message": {
            "participant": "p-1",
            "conversation": "conv-42",
            "attachment": {"type": "text", "content": "Hello bot"}
        },
        "senderId": "s-1",
        "chatId": "c-1"
    }"#;

    fn client(requester: &MockHttpRequester) -> ConnectClient {
        ConnectClient::new(
            Arc::new(requester.clone()),
            ClientDefaults::new("tok"),
            Endpoints::default(),
        )
    }

    #[tokio::test]
    async fn send_message_posts_components_to_conversation() {
        let requester = MockHttpRequester::new().with_reply(201, "");
        let client = client(&requester);

        client
            .send_message(
                "conv-42",
                &[
                    Component::from(Attachment::text("Hello")),
                    Component::from(Card::new("t", "s").add_button("b", "postback", "v")),
                ],
            )
            .await
            .unwrap();

        let call = requester.last_call().unwrap();
        assert_eq!(
            call.url,
            "https://api.recast.ai/connect/v1/conversations/conv-42/messages"
        );
        assert_eq!(call.header("Authorization"), Some("Token tok"));
        let body = call.json().unwrap();
        assert_eq!(body["messages"][0], json!({"type": "text", "content": "Hello"}));
        assert_eq!(body["messages"][1]["type"], "card");
        assert_eq!(body["messages"][1]["content"]["buttons"][0]["value"], "v");
    }

    #[tokio::test]
    async fn broadcast_posts_to_messages_endpoint() {
        let requester = MockHttpRequester::new().with_reply(201, "");
        let client = client(&requester);

        client
            .broadcast_message(&[Component::from(Attachment::text("Maintenance tonight"))])
            .await
            .unwrap();

        assert_eq!(
            requester.last_call().unwrap().url,
            "https://api.recast.ai/connect/v1/messages"
        );
    }

    #[tokio::test]
    async fn empty_message_list_is_rejected_locally() {
        let requester = MockHttpRequester::new();
        let client = client(&requester);

        assert!(matches!(
            client.send_message("conv-42", &[]).await,
            Err(RecastError::NoMessages)
        ));
        assert!(matches!(
            client.broadcast_message(&[]).await,
            Err(RecastError::NoMessages)
        ));
        assert_eq!(requester.call_count(), 0);
    }

    #[tokio::test]
    async fn connector_rejection_is_surfaced() {
        let requester = MockHttpRequester::new()
            .with_reply(404, r#"{"message": "Conversation not found"}"#);
        let client = client(&requester);

        let err = client
            .send_message("missing", &[Component::from(Attachment::text("hi"))])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecastError::Rejected { status: 404, message: Some(ref m) } if m == "Conversation not found"
        ));
    }

    #[tokio::test]
    async fn dispatch_runs_handler_with_bound_writer() {
        let requester = MockHttpRequester::new().with_reply(201, "");
        let (tx, mut rx) = mpsc::unbounded_channel();

        let client = Arc::new(client(&requester).with_handler(handler_fn(
            move |writer: Arc<dyn MessageWriter>, message: InboundMessage| {
                let tx = tx.clone();
                async move {
                    let echo = message.text().unwrap_or_default().to_string();
                    let result = writer.reply(vec![Attachment::text(echo).into()]).await;
                    let _ = tx.send(result.is_ok());
                }
            },
        )));

        let handle = client.dispatch(INBOUND.as_bytes()).unwrap().unwrap();
        handle.await.unwrap();

        assert_eq!(rx.recv().await, Some(true));
        let call = requester.last_call().unwrap();
        assert_eq!(
            call.url,
            "https://api.recast.ai/connect/v1/conversations/conv-42/messages"
        );
        assert_eq!(
            call.json().unwrap()["messages"][0],
            json!({"type": "text", "content": "Hello bot"})
        );
    }

    #[tokio::test]
    async fn writer_reports_connector_failures() {
        let requester = MockHttpRequester::new()
            .with_reply(404, r#"{"message": "Conversation not found"}"#);
        let writer = ConnectWriter::new(Arc::new(client(&requester)), "conv-42");

        assert_eq!(writer.reply(vec![]).await, Err(WriteError::NoMessages));
        assert_eq!(
            writer
                .reply(vec![Component::from(Attachment::text("hi"))])
                .await,
            Err(WriteError::Rejected {
                status: 404,
                message: Some("Conversation not found".to_string())
            })
        );
    }

    #[tokio::test]
    async fn dispatch_does_not_wait_for_handler() {
        let requester = MockHttpRequester::new();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let release_rx = Arc::new(Mutex::new(Some(release_rx)));

        let client = Arc::new(client(&requester).with_handler(handler_fn(
            move |_writer: Arc<dyn MessageWriter>, _message: InboundMessage| {
                let release_rx = release_rx.lock().unwrap().take();
                async move {
                    if let Some(rx) = release_rx {
                        let _ = rx.await;
                    }
                }
            },
        )));

        let handle = client.dispatch(INBOUND.as_bytes()).unwrap().unwrap();
        assert!(!handle.is_finished());

        release_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn dispatch_without_handler_drops_message() {
        let requester = MockHttpRequester::new();
        let client = Arc::new(client(&requester));

        assert!(client.dispatch(INBOUND.as_bytes()).unwrap().is_none());
        assert_eq!(requester.call_count(), 0);
    }

    #[tokio::test]
    async fn dispatch_rejects_malformed_body() {
        let requester = MockHttpRequester::new();
        let client = Arc::new(client(&requester));

        assert!(matches!(client.dispatch(b""), Err(DecodeError::EmptyBody)));
        assert!(matches!(
            client.dispatch(br#"{"message": {"attachment": {"type": "text", "content": "x"}}}"#),
            Err(DecodeError::MissingField("conversation"))
        ));
    }
}
