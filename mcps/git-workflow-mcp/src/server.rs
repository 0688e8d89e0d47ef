//! MCP Server implementation for Git workflow operations
//!
//! Binds the two protocol operations to the registry: `tools/list` to
//! discovery and `tools/call` to the dispatcher. Every call answers with a
//! result envelope, so the handler never reports a protocol-level fault for
//! a tool failure.

use std::sync::Arc;

use mcp_common::{async_trait, params_to_arguments, EmbeddableMcp, McpError};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer,
};
use serde_json::Value;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::git::{GitRepository, VersionControl};
use crate::registry::{RegistryError, ToolRegistry};

const INSTRUCTIONS: &str = "Git workflow MCP server for the configured repository. \
     Inspect state with git_status, git_log and git_diff; record and publish work \
     with git_commit and git_push.";

/// The Git Workflow MCP Server
#[derive(Clone)]
pub struct GitWorkflowServer {
    registry: Arc<ToolRegistry>,
    dispatcher: Dispatcher,
}

impl GitWorkflowServer {
    /// Server for the repository named in the configuration
    pub fn new(config: &Config) -> Result<Self, RegistryError> {
        Self::with_backend(Arc::new(GitRepository::from_config(config)))
    }

    /// Server over any version-control backend
    pub fn with_backend(vcs: Arc<dyn VersionControl>) -> Result<Self, RegistryError> {
        let registry = Arc::new(ToolRegistry::git_tools(vcs)?);
        Ok(Self {
            dispatcher: Dispatcher::new(Arc::clone(&registry)),
            registry,
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a tool call; failures come back as error-flagged results
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> CallToolResult {
        self.dispatcher.dispatch(name, arguments).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl rmcp::ServerHandler for GitWorkflowServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(&request.name, request.arguments).await)
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for GitWorkflowServer {
    fn server_name(&self) -> &str {
        "git-workflow"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.registry.list_tools()
    }

    async fn call_tool(&self, name: &str, params: Value) -> CallToolResult {
        match params_to_arguments(params) {
            Ok(arguments) => self.dispatch(name, arguments).await,
            Err(envelope) => envelope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeVcs;
    use mcp_common::{first_text, is_error};
    use rmcp::ServerHandler;

    fn server() -> GitWorkflowServer {
        GitWorkflowServer::with_backend(Arc::new(FakeVcs::new())).unwrap()
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_embeddable_server_name() {
        assert_eq!(server().server_name(), "git-workflow");
    }

    #[test]
    fn test_embeddable_list_tools() {
        let tools = EmbeddableMcp::list_tools(&server());
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec!["git_status", "git_log", "git_diff", "git_commit", "git_push"]
        );
    }

    #[tokio::test]
    async fn test_embeddable_call_tool() {
        let server = server();
        let result = EmbeddableMcp::call_tool(&server, "git_diff", serde_json::json!(null)).await;
        assert!(!is_error(&result));
        assert_eq!(first_text(&result), Some("(no diff)"));
    }

    #[tokio::test]
    async fn test_embeddable_rejects_non_object_params() {
        let server = server();
        let result =
            EmbeddableMcp::call_tool(&server, "git_log", serde_json::json!("max=3")).await;
        assert!(is_error(&result));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let server = server();
        let result = EmbeddableMcp::call_tool(&server, "git_blame", serde_json::json!({})).await;
        assert!(is_error(&result));
        assert_eq!(first_text(&result), Some("Unknown tool: git_blame"));
    }
}
