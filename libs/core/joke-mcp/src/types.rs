//! Joke API payloads

use serde::{Deserialize, Serialize};

/// Body of `GET /jokes/random`.
///
/// Every field is optional: error bodies (e.g. an unknown category) come back
/// as JSON without a `value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Joke {
    /// Joke text, if the body carried a non-empty one
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}
