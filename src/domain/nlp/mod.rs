//! NLP analysis model: intents, entities, responses and conversations.
//!
//! Everything here is pure: payloads come in as bytes, typed values come out.

mod analysis;
mod conversation;
mod decoder;
mod entity;
pub mod gold;
mod intent;
mod response;

pub use analysis::{
    Analysis, CustomEntities, Entities, ACT_ASSERT, ACT_COMMAND, ACT_WH_QUERY, ACT_YN_QUERY,
    SENTIMENT_NEGATIVE, SENTIMENT_NEUTRAL, SENTIMENT_POSITIVE, SENTIMENT_VERY_NEGATIVE,
    SENTIMENT_VERY_POSITIVE, TYPE_ABBREVIATION, TYPE_DESCRIPTION, TYPE_ENTITY, TYPE_HUMAN,
    TYPE_LOCATION, TYPE_NUMBER,
};
pub use conversation::{Action, Conversation};
pub use decoder::{decode_conversation, decode_response, remote_message};
pub(crate) use decoder::{decode_response_value, parse_root, results_of};
pub use entity::{CustomEntity, Entity};
pub use gold::{is_gold, GoldEntity, GoldKind};
pub use intent::Intent;
pub use response::Response;
