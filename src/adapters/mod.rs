//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the clients to external systems:
//! - `http_client` - Outbound HTTP (reqwest, mock)
//! - `http` - Inbound webhook endpoint (axum)

pub mod http;
pub mod http_client;

pub use http::webhook_router;
pub use http_client::{MockHttpRequester, ReqwestRequester};
