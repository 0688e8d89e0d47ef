//! Git Workflow MCP Library
//!
//! Exposes git status, log, diff, commit and push as MCP tools for a single
//! configured repository.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use git_workflow_mcp::{Config, GitWorkflowServer};
//!
//! let server = GitWorkflowServer::new(&Config::for_repo("."))?;
//! let result = server.dispatch("git_log", None).await;
//! ```
//!
//! Tool failures never escape as errors: every call returns a
//! `CallToolResult`, with `is_error` set when the call failed.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod handlers;
pub mod params;
pub mod readiness;
pub mod registry;
pub mod server;
pub mod types;

pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{ToolError, NOT_A_REPOSITORY};
pub use git::{GitRepository, VersionControl};
pub use registry::ToolRegistry;
pub use server::GitWorkflowServer;

// Re-export parameter types for direct API usage
pub use params::*;
