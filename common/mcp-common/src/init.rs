//! Server initialization utilities
//!
//! Provides standardized tracing setup and [`serve_stdio`] for consistent
//! MCP server startup across servers.

use std::fmt;
use std::str::FromStr;

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines without ANSI colors
    #[default]
    Text,
    /// One JSON object per event, for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(format!("unknown log format '{}', expected 'text' or 'json'", s))
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Initialize tracing/logging for MCP servers
///
/// Logs go to stderr (stdout is reserved for MCP protocol). Filtering comes
/// from `RUST_LOG`, with `info` as the default level for `crate_name` and for
/// this crate.
///
/// # Example
///
/// ```rust,ignore
/// mcp_common::init_tracing("my_mcp", LogFormat::Text)?;
/// ```
pub fn init_tracing(crate_name: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}=info", crate_name).parse()?)
        .add_directive("mcp_common=info".parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}

/// Serve an MCP handler over stdio until the transport closes
///
/// Binds the handler to the stdio transport, logs a ready notice on stderr,
/// and blocks until the peer disconnects. There is no in-band shutdown.
pub async fn serve_stdio<S>(server: S, server_name: &str) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    tracing::info!(server = server_name, "Starting MCP server");

    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!(server = server_name, "Server running, waiting for requests...");

    let reason = service.waiting().await?;

    tracing::info!(server = server_name, ?reason, "Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tracing initialization is global per process, so only the format
    // parsing is covered here.

    #[test]
    fn test_log_format_parse() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_format_display_round_trip() {
        for format in [LogFormat::Text, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }
}
