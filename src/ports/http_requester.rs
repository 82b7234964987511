//! HTTP Requester Port - Interface for the transport used by the API clients.
//!
//! The clients build a transport-neutral [`HttpRequest`], hand it to an
//! [`HttpRequester`] and decode the returned [`HttpReply`] themselves. This keeps
//! every decode path testable with canned bytes.
//!
//! # Example
//!
//! ```ignore
//! let request = HttpRequest::post(url, RequestBody::Json(json!({"text": "Hello"})))
//!     .with_token("abc123");
//! let reply = requester.send(request).await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;

/// Port for issuing HTTP requests.
///
/// Implementations must be shareable across tasks; clients hold them behind `Arc`.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    /// Sends a request and returns the status and raw body of the reply.
    ///
    /// A non-2xx status is not an error at this level.
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError>;
}

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        Self::new(HttpMethod::Post, url, body)
    }

    pub fn put(url: impl Into<String>, body: RequestBody) -> Self {
        Self::new(HttpMethod::Put, url, body)
    }

    pub fn delete(url: impl Into<String>, body: RequestBody) -> Self {
        Self::new(HttpMethod::Delete, url, body)
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds the `Authorization: Token <token>` header expected by the API.
    pub fn with_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Token {}", token))
    }

    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The JSON body, if this is a JSON request.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartForm),
}

/// A multipart form with text fields and at most one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, file: FilePart) -> Self {
        self.file = Some(file);
        self
    }
}

/// File content uploaded in a multipart form.
#[derive(Clone, PartialEq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Status and raw body of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP level. No reply was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Could not reach the server.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request failed in flight.
    #[error("request failed: {0}")]
    Request(String),

    /// The HTTP client could not be built or the request could not be assembled.
    #[error("client error: {0}")]
    Client(String),
}
