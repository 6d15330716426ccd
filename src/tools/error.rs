//! Error types for tool registration and invocation.

use std::fmt;

use crate::types::ToolName;

/// Errors raised by the `ToolRegistry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    ///
    /// This is a startup configuration error and should halt the process.
    DuplicateTool(ToolName),

    /// Descriptors must carry a non-empty name.
    EmptyName,

    /// No tool is registered under the requested name.
    UnknownTool(ToolName),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTool(name) => write!(f, "tool '{}' is already registered", name),
            Self::EmptyName => write!(f, "tool name must not be empty"),
            Self::UnknownTool(name) => write!(f, "unknown tool: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors a tool handler reports back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The request context was cancelled before the handler finished.
    Cancelled,

    /// The handler rejected the call. The message is forwarded verbatim.
    Failed(String),

    /// The handler panicked while running.
    Panicked(ToolName),
}

impl ToolError {
    /// Create a handler failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "request cancelled"),
            Self::Failed(msg) => write!(f, "{}", msg),
            Self::Panicked(name) => write!(f, "tool '{}' panicked", name),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        Self::Failed(err.to_string())
    }
}
