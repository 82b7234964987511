//! Intents ranked by the remote service.

use serde::{Deserialize, Serialize};

/// A matched intent.
///
/// `confidence` is required on the wire; an intent without it fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(alias = "name")]
    pub slug: String,
    pub confidence: f64,
}

impl Intent {
    pub fn new(slug: impl Into<String>, confidence: f64) -> Self {
        Self {
            slug: slug.into(),
            confidence,
        }
    }
}
