//! Joke MCP Server
//!
//! An MCP (Model Context Protocol) server speaking JSON-RPC 2.0 over stdio.
//! Tools:
//! - `joke` / `joke_param`: random jokes from the Chuck Norris API
//! - catalog tools (`list_products`, `create_product`, ...) backed by a
//!   [`domain_products::ProductService`], answering with the same envelopes
//!   as the HTTP API
//!
//! Patterns used:
//! - Typestate pattern for the HTTP client lifecycle
//! - Sealed traits so only this crate can define tools
//! - Error context pattern for rich error information

mod catalog;
mod client;
mod error;
mod jokes;
mod mcp;
mod serve;
mod types;

pub use catalog::CatalogTool;
pub use client::{JokeClient, JokeClientConfig, Ready, Uninitialized, DEFAULT_JOKE_API_URL};
pub use error::{Error, Result};
pub use jokes::{JokeParamTool, JokeTool, NO_JOKE_FOUND};
pub use mcp::{McpError, McpHandler, McpRequest, McpResponse, Tool, codes};
pub use serve::{serve, serve_stdio};
pub use types::Joke;
