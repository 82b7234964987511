//! reqwest-backed implementation of the HttpRequester port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};

use crate::ports::{
    HttpMethod, HttpReply, HttpRequest, HttpRequester, MultipartForm, RequestBody, TransportError,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends requests with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestRequester {
    client: Client,
    timeout: Duration,
}

impl ReqwestRequester {
    /// Creates a requester whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::Client(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn form_of(multipart: MultipartForm) -> Form {
    let form = multipart
        .fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    match multipart.file {
        Some(file) => form.part(file.field, Part::bytes(file.bytes).file_name(file.file_name)),
        None => form,
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, TransportError> {
        let mut builder = self
            .client
            .request(method_of(request.method), request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(multipart) => builder.multipart(form_of(multipart)),
        };

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(HttpReply::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_custom_timeout() {
        let requester = ReqwestRequester::new(Duration::from_secs(5)).unwrap();
        assert_eq!(requester.timeout, Duration::from_secs(5));
    }

    #[test]
    fn maps_verbs() {
        assert_eq!(method_of(HttpMethod::Post), Method::POST);
        assert_eq!(method_of(HttpMethod::Put), Method::PUT);
        assert_eq!(method_of(HttpMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let requester = ReqwestRequester::new(Duration::from_secs(2)).unwrap();
        let request = HttpRequest::post(
            "http://127.0.0.1:9/v2/request/",
            RequestBody::Json(serde_json::json!({"text": "hi"})),
        );

        let err = requester.send(request).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connect(_) | TransportError::Request(_) | TransportError::Timeout { .. }
        ));
    }
}
