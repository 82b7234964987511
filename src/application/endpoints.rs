//! API endpoint locations.

/// Base URLs of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub request: String,
    pub converse: String,
    pub dialog: String,
    /// Base of the bot connector API.
    pub connect: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            request: "https://api.recast.ai/v2/request/".to_string(),
            converse: "https://api.recast.ai/v2/converse/".to_string(),
            dialog: "https://api.recast.ai/build/v1/dialog".to_string(),
            connect: "https://api.recast.ai/connect/v1".to_string(),
        }
    }
}

impl Endpoints {
    /// Messages endpoint of one connector conversation.
    pub fn conversation_messages(&self, conversation_id: &str) -> String {
        format!(
            "{}/conversations/{}/messages",
            self.connect.trim_end_matches('/'),
            conversation_id
        )
    }

    /// Endpoint broadcasting to every conversation of the bot.
    pub fn broadcast_messages(&self) -> String {
        format!("{}/messages", self.connect.trim_end_matches('/'))
    }
}
