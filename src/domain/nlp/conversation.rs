//! Conversation - multi-turn state returned by the converse endpoint.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::analysis::{Analysis, CustomEntities, Entities};
use super::intent::Intent;
use crate::domain::wire::nullable;

/// An action of the bot's conversation flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    #[serde(deserialize_with = "nullable")]
    pub done: bool,
    #[serde(deserialize_with = "nullable")]
    pub reply: String,
}

/// Decoded result of a converse call.
///
/// The memory is only ever replaced or cleared through the session calls of
/// the request client, which authenticate with `authorization_token`.
#[derive(Debug, Default, Serialize)]
pub struct Conversation {
    /// Session handle required for follow-up turns.
    pub conversation_token: String,
    pub uuid: String,
    pub source: String,
    pub replies: Vec<String>,
    pub action: Option<Action>,
    pub next_actions: Vec<Action>,
    pub memory: Map<String, Value>,
    pub intents: Vec<Intent>,
    pub act: String,
    #[serde(rename = "type")]
    pub sentence_type: String,
    pub sentiment: String,
    pub entities: Entities,
    pub custom_entities: CustomEntities,
    pub language: String,
    pub version: String,
    pub timestamp: String,
    pub status: u16,
    /// Token of the converse call that produced this conversation.
    #[serde(skip)]
    pub authorization_token: Option<SecretString>,
}

impl Conversation {
    /// The first reply, if the bot produced any.
    pub fn reply(&self) -> Option<&str> {
        self.replies.first().map(String::as_str)
    }

    /// All replies joined with `separator`.
    pub fn joined_replies(&self, separator: &str) -> String {
        self.replies.join(separator)
    }

    /// A memory variable by alias.
    pub fn memory_value(&self, alias: &str) -> Option<&Value> {
        self.memory.get(alias).filter(|value| !value.is_null())
    }

    /// The next pending action, if any.
    pub fn next_action(&self) -> Option<&Action> {
        self.next_actions.first()
    }
}

impl Analysis for Conversation {
    fn act(&self) -> &str {
        &self.act
    }

    fn sentence_type(&self) -> &str {
        &self.sentence_type
    }

    fn sentiment(&self) -> &str {
        &self.sentiment
    }

    fn intents(&self) -> &[Intent] {
        &self.intents
    }

    fn entities(&self) -> &Entities {
        &self.entities
    }

    fn custom_entities(&self) -> &CustomEntities {
        &self.custom_entities
    }
}
