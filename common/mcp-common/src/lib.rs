//! MCP Common - Shared utilities for MCP servers
//!
//! This crate provides common functionality used across MCP servers:
//!
//! - **Initialization**: [`init_tracing`] and [`serve_stdio`] for standardized startup
//! - **Contracts**: [`ArgumentContract`] for schema-derived argument validation
//! - **Results**: Helpers for building and reading `CallToolResult` envelopes
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{init_tracing, serve_stdio, LogFormat};
//!
//! init_tracing("my_mcp", LogFormat::Text)?;
//! serve_stdio(MyServer::new(), "my-mcp").await?;
//! ```

pub mod contract;
pub mod embeddable;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use contract::{ArgumentContract, ContractError, FieldKind, FieldSpec, JsonObject, Presence};
pub use embeddable::{params_to_arguments, EmbeddableMcp};
pub use init::{init_tracing, serve_stdio, LogFormat};
pub use result::{first_text, is_error, json_text, text_error, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
