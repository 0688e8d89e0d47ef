//! Git tool handlers
//!
//! Each tool is a small type implementing [`ToolSpec`], with its arguments
//! declared as a typed struct in [`crate::params`]. [`Registered`] wraps a
//! spec into the object-safe [`Tool`] the registry stores: it runs the
//! readiness guard, resolves arguments against the contract, deserializes
//! them, and then calls the handler.

mod inspect;
mod write;

pub use inspect::{diff_args, DiffTool, LogTool, StatusTool, NO_DIFF};
pub use write::{CommitTool, PushTool};

use std::sync::Arc;

use async_trait::async_trait;
use mcp_common::{ArgumentContract, ContractError, JsonObject};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ToolError, ToolOutcome};
use crate::git::VersionControl;
use crate::readiness::ReadinessGuard;

/// A statically typed tool
#[async_trait]
pub trait ToolSpec: Send + Sync + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const REQUIRES_REPOSITORY: bool = true;

    type Args: DeserializeOwned + JsonSchema + Send;

    /// Run the tool with validated arguments, returning the result text
    async fn run(&self, vcs: &dyn VersionControl, args: Self::Args) -> ToolOutcome;
}

/// A tool as seen by the registry and dispatcher
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn contract(&self) -> &ArgumentContract;

    /// Validate raw arguments and run the tool
    async fn invoke(&self, args: Option<JsonObject>) -> ToolOutcome;
}

/// Adapter from a [`ToolSpec`] to a [`Tool`]
pub struct Registered<T: ToolSpec> {
    spec: T,
    contract: ArgumentContract,
    vcs: Arc<dyn VersionControl>,
    guard: ReadinessGuard,
}

impl<T: ToolSpec> Registered<T> {
    pub fn new(spec: T, vcs: Arc<dyn VersionControl>) -> Result<Self, ContractError> {
        Ok(Self {
            spec,
            contract: ArgumentContract::of::<T::Args>()?,
            guard: ReadinessGuard::new(Arc::clone(&vcs)),
            vcs,
        })
    }
}

#[async_trait]
impl<T: ToolSpec> Tool for Registered<T> {
    fn name(&self) -> &str {
        T::NAME
    }

    fn description(&self) -> &str {
        T::DESCRIPTION
    }

    fn contract(&self) -> &ArgumentContract {
        &self.contract
    }

    async fn invoke(&self, args: Option<JsonObject>) -> ToolOutcome {
        // Readiness comes first so a missing repository wins over bad arguments
        if T::REQUIRES_REPOSITORY {
            self.guard.ensure_ready().await?;
        }

        let resolved = self.contract.resolve(args)?;
        let args: T::Args =
            serde_json::from_value(Value::Object(resolved)).map_err(ToolError::Deserialize)?;

        self.spec.run(self.vcs.as_ref(), args).await
    }
}

/// Pretty JSON text for a handler result
fn to_json<T: serde::Serialize>(data: &T) -> ToolOutcome {
    mcp_common::json_text(data).map_err(ToolError::Serialize)
}
