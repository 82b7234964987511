//! Mock HTTP requester for testing.
//!
//! Replays queued replies in order and records every request it receives,
//! so client tests can assert on both the decoded result and the exact
//! request that was sent.
//!
//! # Example
//!
//! ```ignore
//! let requester = MockHttpRequester::new()
//!     .with_reply(200, r#"{"results": {...}}"#);
//!
//! let client = RequestClient::new(Arc::new(requester.clone()), defaults, endpoints);
//! client.analyse_text("Hello", RequestOptions::default()).await?;
//! assert_eq!(requester.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{HttpReply, HttpRequest, HttpRequester, TransportError};

/// Mock requester returning pre-configured replies.
#[derive(Debug, Clone, Default)]
pub struct MockHttpRequester {
    /// Pre-configured outcomes (consumed in order).
    replies: Arc<Mutex<VecDeque<Result<HttpReply, TransportError>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reply to the queue.
    pub fn with_reply(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    /// Adds a JSON reply to the queue.
    pub fn with_json(self, status: u16, body: &serde_json::Value) -> Self {
        self.with_reply(status, body.to_string())
    }

    /// Adds a transport failure to the queue.
    pub fn with_error(self, error: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the number of requests sent.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn get_calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the most recent request.
    pub fn last_call(&self) -> Option<HttpRequest> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Gets the next reply, or an empty 200 when the queue is drained.
    fn next_reply(&self) -> Result<HttpReply, TransportError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpReply::new(200, Vec::new())))
    }
}

#[async_trait]
impl HttpRequester for MockHttpRequester {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        self.calls.lock().unwrap().push(request);
        self.next_reply()
    }
}
