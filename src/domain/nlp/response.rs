//! Response - the result of analysing a single text or audio input.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::analysis::{Analysis, CustomEntities, Entities};
use super::intent::Intent;

/// Decoded result of a text or file analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub uuid: String,
    pub source: String,
    pub intents: Vec<Intent>,
    pub act: String,
    #[serde(rename = "type")]
    pub sentence_type: String,
    pub sentiment: String,
    pub entities: Entities,
    pub custom_entities: CustomEntities,
    pub language: String,
    pub version: String,
    /// Processing time as sent by the service.
    pub timestamp: String,
    pub status: u16,
}

impl Response {
    /// The timestamp as a date, when it is valid RFC 3339.
    pub fn timestamp_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

impl Analysis for Response {
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
