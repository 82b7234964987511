//! Classification predicates shared by every analysed sentence.
//!
//! [`Response`](super::Response) and [`Conversation`](super::Conversation) both
//! expose the same act/type/sentiment tags and entity maps. The [`Analysis`]
//! trait derives the boolean helpers from those raw strings once, for both.

use std::collections::HashMap;

use super::entity::{CustomEntity, Entity};
use super::intent::Intent;
use crate::domain::errors::LookupError;

pub const ACT_ASSERT: &str = "assert";
pub const ACT_COMMAND: &str = "command";
pub const ACT_WH_QUERY: &str = "wh-query";
pub const ACT_YN_QUERY: &str = "yn-query";

pub const TYPE_ABBREVIATION: &str = "abbr:";
pub const TYPE_ENTITY: &str = "enty:";
pub const TYPE_DESCRIPTION: &str = "desc:";
pub const TYPE_HUMAN: &str = "hum:";
pub const TYPE_LOCATION: &str = "loc:";
pub const TYPE_NUMBER: &str = "num:";

pub const SENTIMENT_POSITIVE: &str = "positive";
pub const SENTIMENT_VERY_POSITIVE: &str = "vpositive";
pub const SENTIMENT_NEUTRAL: &str = "neutral";
pub const SENTIMENT_NEGATIVE: &str = "negative";
pub const SENTIMENT_VERY_NEGATIVE: &str = "vnegative";

/// Entity occurrences keyed by kind name, in payload order within a kind.
pub type Entities = HashMap<String, Vec<Entity>>;

/// Custom entity occurrences keyed by kind name, in payload order within a kind.
pub type CustomEntities = HashMap<String, Vec<CustomEntity>>;

/// Prefix match on a sentence type.
///
/// The service documents types as `prefix` followed by word characters; the
/// match is not anchored at the end, so this is a plain prefix test.
fn type_matches(kind: &str, prefix: &str) -> bool {
    kind.starts_with(prefix)
}

/// Read access to an analysed sentence plus the helpers derived from it.
pub trait Analysis {
    /// Speech-act tag (`assert`, `command`, `wh-query`, `yn-query`).
    fn act(&self) -> &str;

    /// Hierarchical sentence type, e.g. `desc:desc`.
    fn sentence_type(&self) -> &str;

    /// One of the five sentiment values.
    fn sentiment(&self) -> &str;

    /// Intents ranked by the service.
    fn intents(&self) -> &[Intent];

    /// Every detected entity, gold and custom alike.
    fn entities(&self) -> &Entities;

    /// Occurrences of non-gold kinds only.
    fn custom_entities(&self) -> &CustomEntities;

    /// The top-ranked intent.
    fn intent(&self) -> Result<&Intent, LookupError> {
        self.intents().first().ok_or(LookupError::NoIntent)
    }

    /// All occurrences of `kind`, empty if none were detected.
    fn all(&self, kind: &str) -> &[Entity] {
        self.entities().get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first occurrence of `kind`.
    fn get(&self, kind: &str) -> Result<&Entity, LookupError> {
        self.all(kind)
            .first()
            .ok_or_else(|| LookupError::NoEntity(kind.to_string()))
    }

    /// All custom occurrences of `kind`, empty if none were detected.
    fn custom(&self, kind: &str) -> &[CustomEntity] {
        self.custom_entities()
            .get(kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn is_assert(&self) -> bool {
        self.act() == ACT_ASSERT
    }

    fn is_command(&self) -> bool {
        self.act() == ACT_COMMAND
    }

    fn is_wh_query(&self) -> bool {
        self.act() == ACT_WH_QUERY
    }

    fn is_yn_query(&self) -> bool {
        self.act() == ACT_YN_QUERY
    }

    fn is_abbreviation(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_ABBREVIATION)
    }

    fn is_entity(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_ENTITY)
    }

    fn is_description(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_DESCRIPTION)
    }

    fn is_human(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_HUMAN)
    }

    fn is_location(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_LOCATION)
    }

    fn is_number(&self) -> bool {
        type_matches(self.sentence_type(), TYPE_NUMBER)
    }

    fn is_positive(&self) -> bool {
        self.sentiment() == SENTIMENT_POSITIVE
    }

    fn is_very_positive(&self) -> bool {
        self.sentiment() == SENTIMENT_VERY_POSITIVE
    }

    fn is_neutral(&self) -> bool {
        self.sentiment() == SENTIMENT_NEUTRAL
    }

    fn is_negative(&self) -> bool {
        self.sentiment() == SENTIMENT_NEGATIVE
    }

    fn is_very_negative(&self) -> bool {
        self.sentiment() == SENTIMENT_VERY_NEGATIVE
    }
}
