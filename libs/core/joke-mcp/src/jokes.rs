//! Joke tools

use crate::client::{JokeClient, Ready};
use crate::error::{Error, Result};
use crate::mcp::{Tool, sealed};
use async_trait::async_trait;
use std::sync::Arc;

/// Tool text when the API answered without a joke
pub const NO_JOKE_FOUND: &str = "No joke found.";

const DEFAULT_CATEGORY: &str = "sport";

/// Tool returning a random joke
pub struct JokeTool {
    client: Arc<JokeClient<Ready>>,
}

impl JokeTool {
    pub fn new(client: Arc<JokeClient<Ready>>) -> Self {
        Self { client }
    }
}

impl sealed::Sealed for JokeTool {}

#[async_trait]
impl Tool for JokeTool {
    fn name(&self) -> &'static str {
        "joke"
    }

    fn description(&self) -> &'static str {
        "Get a random Chuck Norris joke."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<serde_json::Value> {
        let joke = self.client.random_joke(None).await?;
        Ok(serde_json::Value::String(
            joke.text().unwrap_or(NO_JOKE_FOUND).to_string(),
        ))
    }
}

/// Tool returning a random joke from one category
pub struct JokeParamTool {
    client: Arc<JokeClient<Ready>>,
}

impl JokeParamTool {
    pub fn new(client: Arc<JokeClient<Ready>>) -> Self {
        Self { client }
    }
}

impl sealed::Sealed for JokeParamTool {}

#[async_trait]
impl Tool for JokeParamTool {
    fn name(&self) -> &'static str {
        "joke_param"
    }

    fn description(&self) -> &'static str {
        "Get a random Chuck Norris joke from a category (e.g. sport, dev, food)."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Joke category (default: sport)",
                    "default": DEFAULT_CATEGORY
                }
            }
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value> {
        let category = match params.get("category") {
            None | Some(serde_json::Value::Null) => DEFAULT_CATEGORY,
            Some(serde_json::Value::String(category)) => category.as_str(),
            Some(_) => return Err(Error::invalid_params("'category' must be a string")),
        };

        let joke = self.client.random_joke(Some(category)).await?;
        Ok(serde_json::Value::String(
            joke.text().unwrap_or(NO_JOKE_FOUND).to_string(),
        ))
    }
}
