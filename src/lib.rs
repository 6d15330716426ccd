// Core modules
mod config;
mod types;
pub mod server;
pub mod tools;


// Re-export key types and functions
pub use config::{DEFAULT_BIND, DEFAULT_PATH, ServerConfig};
pub use server::McpServer;
pub use tools::{
    Arguments, Dispatcher, InvocationRequest, InvocationResult, ParameterSpec, RegistryError,
    ToolContext, ToolDescriptor, ToolError, ToolHandler, ToolRegistry,
};
pub use types::ToolName;

use std::sync::Arc;

/// Build the registry with the built-in `hello`, `ping` and `now` tools.
///
/// A registration error here means two tools share a name; callers should
/// treat it as fatal.
pub fn create_registry() -> Result<Arc<ToolRegistry>, RegistryError> {
    let mut tool_registry = ToolRegistry::new();
    tools::register_builtin_tools(&mut tool_registry)?;
    Ok(Arc::new(tool_registry))
}

/// Convenience function to create a fully configured MCP server.
pub fn create_server() -> Result<McpServer, RegistryError> {
    Ok(McpServer::new(create_registry()?))
}
