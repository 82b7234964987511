//! HTTP adapter for the connector webhook.
//!
//! - `POST /` - Receive an inbound message and dispatch it to the bot's handler

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use routes::webhook_router;
