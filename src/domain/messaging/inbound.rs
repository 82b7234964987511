//! Messages pushed by the bot connector to a webhook.

use serde::{Deserialize, Serialize};

use super::component::{Component, RawMessage};
use crate::domain::errors::DecodeError;

/// The user message inside an inbound payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub participant: String,
    /// Identifier of the connector conversation to reply to.
    #[serde(rename = "conversation", default)]
    pub conversation_id: String,
    pub attachment: RawMessage,
}

/// A payload received on the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    pub message: Message,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub chat_id: String,
}

impl InboundMessage {
    pub fn conversation_id(&self) -> &str {
        &self.message.conversation_id
    }

    /// The attachment decoded into a component.
    pub fn component(&self) -> Result<Component, DecodeError> {
        Component::try_from(self.message.attachment.clone())
    }

    /// The text of a text attachment.
    pub fn text(&self) -> Option<&str> {
        let attachment = &self.message.attachment;
        if attachment.message_type == "text" {
            attachment.content.as_str()
        } else {
            None
        }
    }
}

/// Decodes a webhook body.
pub fn parse_inbound_message(body: &[u8]) -> Result<InboundMessage, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    let inbound: InboundMessage = serde_json::from_slice(body)?;
    if inbound.message.conversation_id.is_empty() {
        return Err(DecodeError::MissingField("conversation"));
    }
    Ok(inbound)
}
