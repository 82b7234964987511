//! Per-call options layered over client defaults.
//!
//! A client carries [`ClientDefaults`]; each call may override them with
//! [`RequestOptions`]. The two are resolved once per call into an immutable
//! [`EffectiveOptions`]. Empty strings count as unset at both levels.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use super::error::RecastError;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Client-scoped defaults.
#[derive(Debug, Default)]
pub struct ClientDefaults {
    pub token: Option<SecretString>,
    pub language: Option<String>,
}

impl ClientDefaults {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into())),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Resolves the options of one call against these defaults.
    ///
    /// Fails with [`RecastError::TokenNotSet`] when no token is available.
    pub fn resolve(&self, options: &RequestOptions) -> Result<EffectiveOptions, RecastError> {
        let token = non_empty(options.token.as_deref())
            .or_else(|| non_empty(self.token.as_ref().map(|t| t.expose_secret().as_str())))
            .ok_or(RecastError::TokenNotSet)?;

        let language = non_empty(options.language.as_deref())
            .or_else(|| non_empty(self.language.as_deref()))
            .map(str::to_string);

        Ok(EffectiveOptions {
            token: SecretString::new(token.to_string()),
            language,
        })
    }
}

/// Request-scoped overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub token: Option<String>,
    pub language: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Options of a converse call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConverseOptions {
    pub request: RequestOptions,
    /// Continues an existing conversation.
    pub conversation_token: Option<String>,
    /// Memory to set before the turn is processed.
    pub memory: Option<Map<String, Value>>,
}

impl ConverseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.request.token = Some(token.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.request.language = Some(language.into());
        self
    }

    pub fn conversation_token(mut self, conversation_token: impl Into<String>) -> Self {
        self.conversation_token = Some(conversation_token.into());
        self
    }

    pub fn memory(mut self, memory: Map<String, Value>) -> Self {
        self.memory = Some(memory);
        self
    }
}

impl From<RequestOptions> for ConverseOptions {
    fn from(request: RequestOptions) -> Self {
        Self {
            request,
            ..Default::default()
        }
    }
}

/// Options in force for a single call.
#[derive(Debug)]
pub struct EffectiveOptions {
    pub token: SecretString,
    pub language: Option<String>,
}

impl EffectiveOptions {
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}
