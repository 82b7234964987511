//! API client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::http_client::ReqwestRequester;
use crate::application::{ClientDefaults, Endpoints};
use crate::ports::TransportError;

/// API client configuration
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Bot token sent with every request
    pub token: Option<SecretString>,

    /// Default language of analysed texts (detected when unset)
    pub language: Option<String>,

    /// Text and file analysis endpoint
    #[serde(default = "default_request_url")]
    pub request_url: String,

    /// Converse endpoint
    #[serde(default = "default_converse_url")]
    pub converse_url: String,

    /// Bot builder dialog endpoint
    #[serde(default = "default_dialog_url")]
    pub dialog_url: String,

    /// Bot connector base URL
    #[serde(default = "default_connect_url")]
    pub connect_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a token is configured
    pub fn has_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }

    /// Client-scoped defaults for the API clients
    pub fn client_defaults(&self) -> ClientDefaults {
        ClientDefaults {
            token: self
                .token
                .as_ref()
                .map(|t| SecretString::new(t.expose_secret().clone())),
            language: self.language.clone().filter(|l| !l.is_empty()),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            request: self.request_url.clone(),
            converse: self.converse_url.clone(),
            dialog: self.dialog_url.clone(),
            connect: self.connect_url.clone(),
        }
    }

    /// Build the HTTP transport with the configured timeout
    pub fn requester(&self) -> Result<ReqwestRequester, TransportError> {
        ReqwestRequester::new(self.timeout())
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_token() {
            return Err(ValidationError::MissingRequired("RECAST__API__TOKEN"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        let urls = [
            ("request_url", &self.request_url),
            ("converse_url", &self.converse_url),
            ("dialog_url", &self.dialog_url),
            ("connect_url", &self.connect_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl(name));
            }
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            language: None,
            request_url: default_request_url(),
            converse_url: default_converse_url(),
            dialog_url: default_dialog_url(),
            connect_url: default_connect_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_request_url() -> String {
    Endpoints::default().request
}

fn default_converse_url() -> String {
    Endpoints::default().converse
}

fn default_dialog_url() -> String {
    Endpoints::default().dialog
}

fn default_connect_url() -> String {
    Endpoints::default().connect
}

fn default_timeout() -> u64 {
    30
}
