//! Application layer - API clients.
//!
//! Clients resolve per-call options, talk to the API through the
//! `HttpRequester` port and hand reply bodies to the domain decoders.
//!
//! - `RequestClient` - analysis, converse, dialog and memory calls
//! - `ConnectClient` - connector messages and webhook dispatch

mod connect_client;
mod endpoints;
mod error;
mod options;
mod request_client;

pub use connect_client::{ConnectClient, ConnectWriter};
pub use endpoints::Endpoints;
pub use error::RecastError;
pub use options::{ClientDefaults, ConverseOptions, EffectiveOptions, RequestOptions};
pub use request_client::RequestClient;
