//! Embeddable MCP trait for in-process execution
//!
//! This module provides the [`EmbeddableMcp`] trait that allows MCP servers
//! to be executed directly in-process without subprocess spawning or IPC.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use git_workflow_mcp::{Config, GitWorkflowServer};
//!
//! let server = GitWorkflowServer::new(&Config::for_repo("."))?;
//!
//! // List available tools
//! let tools = server.list_tools();
//! println!("Available: {:?}", tools.iter().map(|t| &t.name).collect::<Vec<_>>());
//!
//! // Call a tool directly; failures come back as error-flagged results
//! let result = server.call_tool("git_status", serde_json::json!({})).await;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

use crate::contract::JsonObject;
use crate::result::text_error;

/// Trait for MCP servers that can be executed in-process
///
/// Unlike the protocol path, there is no transport to report faults on, so
/// `call_tool` always answers with a result envelope. Tool failures, unknown
/// tools, and malformed parameters all come back with `is_error` set.
///
/// Implementations must be `Send + Sync` so a host can share one server
/// between async tasks.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name for identification
    ///
    /// This should match the server name used in MCP configuration files.
    fn server_name(&self) -> &str;

    /// Returns a list of all available tools, in a stable order
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with the given parameters
    ///
    /// `params` must be a JSON object or `null`.
    async fn call_tool(&self, name: &str, params: Value) -> CallToolResult;

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Returns the server version, if available
    fn server_version(&self) -> Option<&str> {
        None
    }
}

/// Convert loose JSON parameters into tool arguments
///
/// `null` means "no arguments". Anything other than an object is rejected
/// with an error envelope the caller can return directly.
pub fn params_to_arguments(params: Value) -> Result<Option<JsonObject>, CallToolResult> {
    match params {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(text_error(format!(
            "Tool parameters must be a JSON object, got: {}",
            other
        ))),
    }
}
