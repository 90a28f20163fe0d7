//! Chuck Norris API client using the Typestate pattern
//!
//! The client must be initialized before making requests.
//! Invalid states (like fetching without initialization) are compile-time errors.

use crate::error::{Error, ErrorContext, Result};
use crate::types::Joke;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_JOKE_API_URL: &str = "https://api.chucknorris.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the joke API lives and how long to wait for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JokeClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl JokeClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for JokeClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_JOKE_API_URL)
    }
}

impl FromEnv for JokeClientConfig {
    /// Reads from environment variables with sensible defaults:
    /// - JOKE_API_URL: defaults to https://api.chucknorris.io
    /// - JOKE_API_TIMEOUT_SECS: defaults to 10
    fn from_env() -> std::result::Result<Self, ConfigError> {
        let base_url = env_or_default("JOKE_API_URL", DEFAULT_JOKE_API_URL);
        let timeout_secs: u64 = env_parse("JOKE_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "JOKE_API_TIMEOUT_SECS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs)))
    }
}

/// Marker type: Client is not yet initialized
pub struct Uninitialized;

/// Marker type: Client is ready to make requests
#[derive(Clone)]
pub struct Ready {
    http: reqwest::Client,
}

/// Joke API client with typestate pattern
///
/// The client transitions from `Uninitialized` to `Ready` after calling `init()`.
/// You cannot call `random_joke` on an uninitialized client - it won't compile.
pub struct JokeClient<State> {
    config: JokeClientConfig,
    user_agent: String,
    state: State,
}

impl JokeClient<Uninitialized> {
    /// Create a new uninitialized client
    pub fn new(config: JokeClientConfig) -> Self {
        Self {
            config,
            user_agent: format!("joke-mcp/{}", env!("CARGO_PKG_VERSION")),
            state: Uninitialized,
        }
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Initialize the client, transitioning to Ready state
    ///
    /// This consumes the Uninitialized client and returns a Ready client.
    /// After this, you can make HTTP requests.
    pub fn init(self) -> Result<JokeClient<Ready>> {
        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.config.timeout)
            .build()
            .with_context("client initialization")?;

        Ok(JokeClient {
            config: self.config,
            user_agent: self.user_agent,
            state: Ready { http },
        })
    }
}

impl Default for JokeClient<Uninitialized> {
    fn default() -> Self {
        Self::new(JokeClientConfig::default())
    }
}

impl<State> JokeClient<State> {
    pub fn config(&self) -> &JokeClientConfig {
        &self.config
    }

    /// URL of the random joke endpoint, optionally restricted to a category
    pub fn random_joke_url(&self, category: Option<&str>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match category {
            Some(category) => format!(
                "{}/jokes/random?category={}",
                base,
                urlencoding::encode(category)
            ),
            None => format!("{}/jokes/random", base),
        }
    }
}

impl JokeClient<Ready> {
    /// Fetch a random joke.
    ///
    /// A 404 (the API's answer to an unknown category) yields an empty
    /// [`Joke`]; any other non-success status is an error.
    pub async fn random_joke(&self, category: Option<&str>) -> Result<Joke> {
        let url = self.random_joke_url(category);
        debug!(%url, "Fetching joke");

        let response = self.state.http.get(&url).send().await.with_context(&url)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Joke::default());
        }

        if !response.status().is_success() {
            return Err(Error::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.with_context(&url)?;
        serde_json::from_str(&body).with_context("joke body")
    }
}

impl Clone for JokeClient<Ready> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            user_agent: self.user_agent.clone(),
            state: self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typestate_prevents_invalid_usage() {
        // This compiles
        let client = JokeClient::default();
        let _ready = client.init();

        // This would NOT compile (random_joke not available on Uninitialized):
        // let client = JokeClient::default();
        // client.random_joke(None); // Error: method not found
    }

    #[test]
    fn test_custom_user_agent() {
        let client = JokeClient::default()
            .with_user_agent("CustomAgent/1.0")
            .init();
        assert!(client.is_ok());
    }

    #[test]
    fn test_random_joke_url() {
        let client = JokeClient::new(JokeClientConfig::new("http://localhost:9000/"));
        assert_eq!(
            client.random_joke_url(None),
            "http://localhost:9000/jokes/random"
        );
        assert_eq!(
            client.random_joke_url(Some("sport")),
            "http://localhost:9000/jokes/random?category=sport"
        );
        assert_eq!(
            client.random_joke_url(Some("a b&c")),
            "http://localhost:9000/jokes/random?category=a%20b%26c"
        );
    }

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("JOKE_API_URL", None::<&str>),
                ("JOKE_API_TIMEOUT_SECS", None::<&str>),
            ],
            || {
                let config = JokeClientConfig::from_env().unwrap();
                assert_eq!(config, JokeClientConfig::default());
                assert_eq!(config.timeout, Duration::from_secs(10));
            },
        );
    }

    #[test]
    fn test_config_from_env_overrides() {
        temp_env::with_vars(
            [
                ("JOKE_API_URL", Some("http://127.0.0.1:8080")),
                ("JOKE_API_TIMEOUT_SECS", Some("3")),
            ],
            || {
                let config = JokeClientConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://127.0.0.1:8080");
                assert_eq!(config.timeout, Duration::from_secs(3));
            },
        );

        temp_env::with_var("JOKE_API_TIMEOUT_SECS", Some("0"), || {
            assert!(JokeClientConfig::from_env().is_err());
        });
    }
}
