//! Recast SDK - client for the Recast.AI language understanding API.
//!
//! The core of the crate decodes API replies into typed results (intents,
//! entities, conversations, dialog turns) and answers classification
//! questions about them. Around it sit the API clients, the bot connector
//! webhook and environment-driven configuration.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
