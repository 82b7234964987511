//! Domain layer: the pure model of analysis results and bot messages.
//!
//! # Module Organization
//!
//! - `errors` - Decode and lookup failures
//! - `nlp` - Intents, entities, responses, conversations and their predicates
//! - `messaging` - Message components, dialog turns and webhook payloads

pub mod errors;
pub mod messaging;
pub mod nlp;
mod wire;

pub use errors::{DecodeError, LookupError};
