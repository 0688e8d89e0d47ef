//! Dispatch engine
//!
//! Resolves a tool by name, invokes it, and turns the outcome into a result
//! envelope. Failures of every kind come back as error-flagged results;
//! `dispatch` itself cannot fail.

use std::sync::Arc;

use mcp_common::{text_error, text_success, CallToolResult, JsonObject};
use tracing::{debug, instrument, warn};

use crate::error::{ToolError, ToolOutcome};
use crate::registry::ToolRegistry;

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    #[instrument(skip_all, fields(tool = %name))]
    pub async fn dispatch(&self, name: &str, args: Option<JsonObject>) -> CallToolResult {
        let outcome = match self.registry.get(name) {
            Some(tool) => tool.invoke(args).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        match &outcome {
            Ok(_) => debug!("tool call succeeded"),
            Err(e) => warn!(error = %e, "tool call failed"),
        }

        envelope(outcome)
    }
}

/// Map a handler outcome onto the uniform result envelope
pub fn envelope(outcome: ToolOutcome) -> CallToolResult {
    match outcome {
        Ok(text) => text_success(text),
        Err(e) => text_error(e.to_string()),
    }
}
