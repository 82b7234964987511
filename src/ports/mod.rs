//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the clients and the outside world. Adapters implement these ports.
//!
//! - `HttpRequester` - Transport used by the API clients
//! - `MessageHandler` / `MessageWriter` - Webhook dispatch contract

mod http_requester;
mod message_handler;

pub use http_requester::{
    FilePart, HttpMethod, HttpReply, HttpRequest, HttpRequester, MultipartForm, RequestBody,
    TransportError,
};
pub use message_handler::{handler_fn, HandlerFn, MessageHandler, MessageWriter, WriteError};
