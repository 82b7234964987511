//! Client of the language understanding API.
//!
//! Each operation resolves its options, sends one request through the
//! [`HttpRequester`] port and decodes the reply body. A non-2xx reply becomes
//! [`RecastError::Rejected`] and its body is not decoded.

use std::path::Path;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};

use super::endpoints::Endpoints;
use super::error::RecastError;
use super::options::{ClientDefaults, ConverseOptions, RequestOptions};
use crate::domain::messaging::{decode_dialog, Dialog};
use crate::domain::nlp::{
    decode_conversation, decode_response, remote_message, Conversation, Response,
};
use crate::ports::{FilePart, HttpReply, HttpRequest, HttpRequester, MultipartForm, RequestBody};

/// Multipart field carrying an audio file.
const FILE_FIELD: &str = "voice";

/// Sends analysis, converse and dialog requests.
pub struct RequestClient {
    requester: Arc<dyn HttpRequester>,
    defaults: ClientDefaults,
    endpoints: Endpoints,
}

impl RequestClient {
    pub fn new(
        requester: Arc<dyn HttpRequester>,
        defaults: ClientDefaults,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            requester,
            defaults,
            endpoints,
        }
    }

    pub fn defaults(&self) -> &ClientDefaults {
        &self.defaults
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Analysis
    // ════════════════════════════════════════════════════════════════════════════════

    /// Analyses a text.
    pub async fn analyse_text(
        &self,
        text: &str,
        options: RequestOptions,
    ) -> Result<Response, RecastError> {
        let options = self.defaults.resolve(&options)?;

        let mut body = json!({ "text": text });
        if let Some(language) = &options.language {
            body["language"] = json!(language);
        }

        let request = HttpRequest::post(&self.endpoints.request, RequestBody::Json(body));
        let reply = self.execute(request, options.token()).await?;
        Ok(decode_response(&reply.body)?)
    }

    /// Analyses an audio file.
    pub async fn analyse_file(
        &self,
        path: impl AsRef<Path>,
        options: RequestOptions,
    ) -> Result<Response, RecastError> {
        let options = self.defaults.resolve(&options)?;
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_string());

        let mut form = MultipartForm::new().file(FilePart {
            field: FILE_FIELD.to_string(),
            file_name,
            bytes,
        });
        if let Some(language) = &options.language {
            form = form.text("language", language.as_str());
        }

        let request = HttpRequest::post(&self.endpoints.request, RequestBody::Multipart(form));
        let reply = self.execute(request, options.token()).await?;
        Ok(decode_response(&reply.body)?)
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Conversations
    // ════════════════════════════════════════════════════════════════════════════════

    /// Sends one turn of a conversation.
    ///
    /// The returned conversation keeps the token used for this call so its
    /// memory can be managed with [`set_memory`](Self::set_memory) and
    /// [`reset`](Self::reset).
    pub async fn converse_text(
        &self,
        text: &str,
        options: ConverseOptions,
    ) -> Result<Conversation, RecastError> {
        let effective = self.defaults.resolve(&options.request)?;

        let mut body = json!({ "text": text });
        if let Some(language) = &effective.language {
            body["language"] = json!(language);
        }
        if let Some(conversation_token) = options.conversation_token.filter(|t| !t.is_empty()) {
            body["conversation_token"] = json!(conversation_token);
        }
        if let Some(memory) = options.memory {
            body["memory"] = Value::Object(memory);
        }

        let request = HttpRequest::post(&self.endpoints.converse, RequestBody::Json(body));
        let reply = self.execute(request, effective.token()).await?;

        let mut conversation = decode_conversation(&reply.body)?;
        conversation.authorization_token = Some(effective.token);
        Ok(conversation)
    }

    /// Sends one user message to the bot builder.
    pub async fn dialog_text(
        &self,
        text: &str,
        conversation_id: &str,
        options: RequestOptions,
    ) -> Result<Dialog, RecastError> {
        let options = self.defaults.resolve(&options)?;

        let mut body = json!({
            "message": { "type": "text", "content": text },
            "conversation_id": conversation_id,
        });
        if let Some(language) = &options.language {
            body["language"] = json!(language);
        }

        let request = HttpRequest::post(&self.endpoints.dialog, RequestBody::Json(body));
        let reply = self.execute(request, options.token()).await?;
        Ok(decode_dialog(&reply.body)?)
    }

    /// Replaces the memory of a conversation.
    ///
    /// The local memory is only replaced once the API accepted the change.
    pub async fn set_memory(
        &self,
        conversation: &mut Conversation,
        memory: Map<String, Value>,
    ) -> Result<(), RecastError> {
        let token = self.session_token(conversation)?;
        let body = json!({
            "conversation_token": conversation.conversation_token,
            "memory": memory,
        });

        let request = HttpRequest::put(&self.endpoints.converse, RequestBody::Json(body));
        self.execute(request, token.expose_secret()).await?;

        conversation.memory = memory;
        Ok(())
    }

    /// Resets the memory of a conversation.
    pub async fn reset(&self, conversation: &mut Conversation) -> Result<(), RecastError> {
        let token = self.session_token(conversation)?;
        let body = json!({ "conversation_token": conversation.conversation_token });

        let request = HttpRequest::delete(&self.endpoints.converse, RequestBody::Json(body));
        self.execute(request, token.expose_secret()).await?;

        conversation.memory.clear();
        Ok(())
    }

    /// The token a conversation was obtained with, or the client token.
    fn session_token(&self, conversation: &Conversation) -> Result<SecretString, RecastError> {
        let token = match &conversation.authorization_token {
            Some(token) if !token.expose_secret().is_empty() => token.expose_secret().clone(),
            _ => self.defaults.resolve(&RequestOptions::default())?.token().to_string(),
        };
        Ok(SecretString::new(token))
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Transport
    // ════════════════════════════════════════════════════════════════════════════════

    async fn execute(&self, request: HttpRequest, token: &str) -> Result<HttpReply, RecastError> {
        send_authorized(self.requester.as_ref(), request, token).await
    }
}

/// Sends a request with the API token and rejects non-2xx replies.
pub(crate) async fn send_authorized(
    requester: &dyn HttpRequester,
    request: HttpRequest,
    token: &str,
) -> Result<HttpReply, RecastError> {
    let method = request.method.as_str();
    let url = request.url.clone();
    let request = request.with_token(token);

    let reply = requester.send(request).await?;
    tracing::debug!(method, url = %url, status = reply.status, "API call completed");

    if !reply.is_success() {
        return Err(RecastError::rejected(
            reply.status,
            remote_message(&reply.body),
        ));
    }
    Ok(reply)
}
