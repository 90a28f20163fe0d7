//! Error handling with context pattern
//!
//! Each layer adds context to errors as they bubble up, and every error knows
//! which JSON-RPC error code it is reported with.

use crate::mcp::codes;
use thiserror::Error;

/// Result type alias for joke MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for joke MCP operations
#[derive(Debug, Error)]
pub enum Error {
    /// Request to the joke API failed before a response arrived
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Joke API answered with an unexpected status
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    /// Tool arguments are missing or malformed
    #[error("Invalid params: {message}")]
    InvalidParams { message: String },
    /// Unknown tool requested
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
    /// Serialization/deserialization error
    #[error("Serialization error in {context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// Reading or writing the stdio transport failed
    #[error("Transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Error::InvalidParams {
            message: message.into(),
        }
    }

    /// JSON-RPC error code used when this error ends a `tools/call`
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidParams { .. } | Error::UnknownTool { .. } => codes::INVALID_PARAMS,
            _ => codes::TOOL_ERROR,
        }
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ErrorContext<T> for std::result::Result<T, reqwest::Error> {
    fn with_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Fetch {
            url: context.into(),
            source: e,
        })
    }
}

impl<T> ErrorContext<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Serialization {
            context: context.into(),
            source: e,
        })
    }
}
