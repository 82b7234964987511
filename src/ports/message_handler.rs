//! Message Handler Port - Contract between the webhook and the bot's logic.
//!
//! The connector pushes each user message to the webhook. The message is
//! handed to a [`MessageHandler`] together with a [`MessageWriter`] bound to
//! the message's conversation, so the handler can answer without knowing any
//! endpoint or token.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::http_requester::TransportError;
use crate::domain::messaging::{Component, InboundMessage};

/// Sends messages back through the connector.
#[async_trait]
pub trait MessageWriter: Send + Sync {
    /// Sends `messages` to the conversation the inbound message came from.
    async fn reply(&self, messages: Vec<Component>) -> Result<(), WriteError>;

    /// Sends `messages` to every conversation of the bot.
    async fn broadcast(&self, messages: Vec<Component>) -> Result<(), WriteError>;
}

/// Errors from message writer operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    #[error("no messages to send")]
    NoMessages,

    #[error("connector token is not set")]
    NotAuthorized,

    #[error(
        "connector rejected the messages with status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Rejected { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("write failed: {0}")]
    Other(String),
}

/// Bot logic run for every inbound message.
///
/// Runs detached from the webhook call; its outcome is never reported to the
/// connector.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, writer: Arc<dyn MessageWriter>, message: InboundMessage);
}

/// A [`MessageHandler`] backed by an async closure.
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps an async closure as a [`MessageHandler`].
///
/// ```ignore
/// client.use_handler(handler_fn(|writer, message| async move {
///     let _ = writer.reply(vec![Attachment::text("Hi!").into()]).await;
/// }));
/// ```
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Arc<dyn MessageWriter>, InboundMessage) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> MessageHandler for HandlerFn<F>
where
    F: Fn(Arc<dyn MessageWriter>, InboundMessage) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    async fn handle(&self, writer: Arc<dyn MessageWriter>, message: InboundMessage) {
        (self.f)(writer, message).await
    }
}
