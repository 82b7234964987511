//! Dialog - the bot builder's reply to one user turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::component::{parse_raw_messages, Component, RawMessage};
use crate::domain::errors::DecodeError;
use crate::domain::nlp::{decode_response_value, parse_root, results_of, Response};
use crate::domain::wire::nullable;

/// Conversation state as tracked by the dialog endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConversation {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    pub skill: String,
    /// Number of turns spent in the current skill.
    #[serde(deserialize_with = "nullable")]
    pub skill_occurences: u32,
    #[serde(deserialize_with = "nullable")]
    pub skill_stack: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub memory: Map<String, Value>,
}

/// Decoded result of a dialog call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dialog {
    /// Messages the bot wants to send back, in order.
    pub messages: Vec<Component>,
    pub conversation: DialogConversation,
    /// Analysis of the user's input.
    pub nlp: Response,
}

impl Dialog {
    /// Text of every text message, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|message| match message {
            Component::Attachment(attachment) if attachment.kind.as_str() == "text" => {
                Some(attachment.content.as_str())
            }
            _ => None,
        })
    }
}

#[derive(Deserialize)]
struct DialogFields {
    #[serde(default, deserialize_with = "nullable")]
    messages: Vec<RawMessage>,
    #[serde(default, deserialize_with = "nullable")]
    conversation: DialogConversation,
}

/// Decodes the body of a dialog call.
///
/// The `nlp` part goes through the same two entity projections as an
/// analysis response.
pub fn decode_dialog(body: &[u8]) -> Result<Dialog, DecodeError> {
    let root = parse_root(body)?;
    let results = results_of(&root)?;

    let fields = DialogFields::deserialize(results)?;
    let messages = parse_raw_messages(&fields.messages)?;
    let nlp = match results.get("nlp") {
        None | Some(Value::Null) => Response::default(),
        Some(nlp) => decode_response_value(nlp)?,
    };

    Ok(Dialog {
        messages,
        conversation: fields.conversation,
        nlp,
    })
}
