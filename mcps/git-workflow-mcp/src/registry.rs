//! Tool registry and discovery
//!
//! The registry is built once and never mutated. Registration order is the
//! order `tools/list` reports.

use std::collections::HashMap;
use std::sync::Arc;

use mcp_common::ContractError;
use thiserror::Error;

use crate::git::VersionControl;
use crate::handlers::{
    CommitTool, DiffTool, LogTool, PushTool, Registered, StatusTool, Tool, ToolSpec,
};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool registered twice: {0}")]
    Duplicate(String),

    #[error("Invalid argument contract for {tool}: {source}")]
    Contract {
        tool: &'static str,
        #[source]
        source: ContractError,
    },
}

/// Immutable, ordered set of tools
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder(vcs: Arc<dyn VersionControl>) -> RegistryBuilder {
        RegistryBuilder {
            vcs,
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The five git workflow tools
    pub fn git_tools(vcs: Arc<dyn VersionControl>) -> Result<Self, RegistryError> {
        Ok(Self::builder(vcs)
            .register(StatusTool)?
            .register(LogTool)?
            .register(DiffTool)?
            .register(CommitTool)?
            .register(PushTool)?
            .build())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Discovery view: name, description and input schema of every tool
    pub fn list_tools(&self) -> Vec<rmcp::model::Tool> {
        self.tools
            .iter()
            .map(|tool| {
                rmcp::model::Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    tool.contract().input_schema(),
                )
            })
            .collect()
    }
}

pub struct RegistryBuilder {
    vcs: Arc<dyn VersionControl>,
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn register<T: ToolSpec>(mut self, spec: T) -> Result<Self, RegistryError> {
        if self.index.contains_key(T::NAME) {
            return Err(RegistryError::Duplicate(T::NAME.to_string()));
        }

        let tool = Registered::new(spec, Arc::clone(&self.vcs)).map_err(|source| {
            RegistryError::Contract {
                tool: T::NAME,
                source,
            }
        })?;

        self.index.insert(T::NAME.to_string(), self.tools.len());
        self.tools.push(Box::new(tool));
        Ok(self)
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}
