//! Decoding of analysis payloads.
//!
//! A body is parsed once into a generic JSON tree. The tree is then projected
//! twice over its `entities` object:
//!
//! 1. every kind into generic [`Entity`] values (strict: a malformed entities
//!    object fails the whole decode);
//! 2. non-gold kinds only into [`CustomEntity`] values (advisory: a failure is
//!    logged and leaves the custom map empty).

use serde::Deserialize;
use serde_json::{Map, Value};

use super::analysis::{CustomEntities, Entities};
use super::conversation::{Action, Conversation};
use super::entity::{CustomEntity, Entity};
use super::gold::is_gold;
use super::intent::Intent;
use super::response::Response;
use crate::domain::errors::DecodeError;
use crate::domain::wire::nullable;

/// Parses a raw body into a JSON tree.
pub(crate) fn parse_root(body: &[u8]) -> Result<Value, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::EmptyBody);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Returns the `results` object of a parsed body.
pub(crate) fn results_of(root: &Value) -> Result<&Value, DecodeError> {
    match root.get("results") {
        None | Some(Value::Null) => Err(DecodeError::MissingResults),
        Some(results @ Value::Object(_)) => Ok(results),
        Some(_) => Err(DecodeError::invalid_shape("results", "an object")),
    }
}

/// Extracts the top-level `message` the API attaches to its replies, if any.
pub fn remote_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Decodes the body of a text or file analysis call.
pub fn decode_response(body: &[u8]) -> Result<Response, DecodeError> {
    let root = parse_root(body)?;
    decode_response_value(results_of(&root)?)
}

/// Decodes the body of a converse call.
pub fn decode_conversation(body: &[u8]) -> Result<Conversation, DecodeError> {
    let root = parse_root(body)?;
    let results = results_of(&root)?;

    let fields = ConversationFields::deserialize(results)?;
    let (entities, custom_entities) = project_entities(results)?;
    let analysis = fields.analysis;

    Ok(Conversation {
        conversation_token: fields.conversation_token,
        uuid: analysis.uuid,
        source: analysis.source,
        replies: fields.replies,
        action: fields.action,
        next_actions: fields.next_actions,
        memory: fields.memory,
        intents: analysis.intents,
        act: analysis.act,
        sentence_type: analysis.sentence_type,
        sentiment: analysis.sentiment,
        entities,
        custom_entities,
        language: analysis.language,
        version: analysis.version,
        timestamp: analysis.timestamp,
        status: analysis.status,
        authorization_token: None,
    })
}

/// Decodes an analysis result object that has already been extracted.
pub(crate) fn decode_response_value(results: &Value) -> Result<Response, DecodeError> {
    if !results.is_object() {
        return Err(DecodeError::invalid_shape("results", "an object"));
    }
    let fields = AnalysisFields::deserialize(results)?;
    let (entities, custom_entities) = project_entities(results)?;

    Ok(Response {
        uuid: fields.uuid,
        source: fields.source,
        intents: fields.intents,
        act: fields.act,
        sentence_type: fields.sentence_type,
        sentiment: fields.sentiment,
        entities,
        custom_entities,
        language: fields.language,
        version: fields.version,
        timestamp: fields.timestamp,
        status: fields.status,
    })
}

/// Runs both entity projections over one results object.
fn project_entities(results: &Value) -> Result<(Entities, CustomEntities), DecodeError> {
    let raw = results.get("entities");
    let entities = project_all(raw)?;
    let custom_entities = project_custom(raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Discarding custom entities that failed to decode");
        CustomEntities::new()
    });
    Ok((entities, custom_entities))
}

/// Walks the `entities` object, yielding each kind with its occurrence objects.
fn occurrences(
    raw: Option<&Value>,
) -> Result<Vec<(&String, Vec<&Map<String, Value>>)>, DecodeError> {
    let kinds = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(kinds)) => kinds,
        Some(_) => return Err(DecodeError::invalid_shape("entities", "an object")),
    };

    kinds
        .iter()
        .map(|(kind, list)| {
            let items = match list {
                Value::Null => return Ok((kind, Vec::new())),
                Value::Array(items) => items,
                _ => {
                    return Err(DecodeError::invalid_shape(
                        format!("entities.{}", kind),
                        "an array",
                    ))
                }
            };
            let objects = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_object().ok_or_else(|| {
                        DecodeError::invalid_shape(
                            format!("entities.{}[{}]", kind, index),
                            "an object",
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((kind, objects))
        })
        .collect()
}

fn project_all(raw: Option<&Value>) -> Result<Entities, DecodeError> {
    Ok(occurrences(raw)?
        .into_iter()
        .map(|(kind, objects)| {
            let list = objects
                .into_iter()
                .map(|fields| Entity::from_occurrence(kind.as_str(), fields))
                .collect();
            (kind.clone(), list)
        })
        .collect())
}

fn project_custom(raw: Option<&Value>) -> Result<CustomEntities, DecodeError> {
    occurrences(raw)?
        .into_iter()
        .filter(|(kind, _)| !is_gold(kind))
        .map(|(kind, objects)| {
            let list = objects
                .into_iter()
                .map(|fields| CustomEntity::from_occurrence(kind.as_str(), fields))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((kind.clone(), list))
        })
        .collect()
}

// ----- Wire shapes -----

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalysisFields {
    #[serde(deserialize_with = "nullable")]
    uuid: String,
    #[serde(deserialize_with = "nullable")]
    source: String,
    #[serde(deserialize_with = "nullable")]
    intents: Vec<Intent>,
    #[serde(deserialize_with = "nullable")]
    act: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    sentence_type: String,
    #[serde(deserialize_with = "nullable")]
    sentiment: String,
    #[serde(deserialize_with = "nullable")]
    language: String,
    #[serde(deserialize_with = "nullable")]
    version: String,
    #[serde(deserialize_with = "nullable")]
    timestamp: String,
    #[serde(deserialize_with = "nullable")]
    status: u16,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConversationFields {
    #[serde(flatten)]
    analysis: AnalysisFields,
    #[serde(deserialize_with = "nullable")]
    conversation_token: String,
    #[serde(deserialize_with = "nullable")]
    replies: Vec<String>,
    action: Option<Action>,
    #[serde(deserialize_with = "nullable")]
    next_actions: Vec<Action>,
    #[serde(deserialize_with = "nullable")]
    memory: Map<String, Value>,
}
