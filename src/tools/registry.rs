//! Tool registry for managing MCP tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! mapping each tool name to its descriptor and handler.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::RoleServer;
use rmcp::model::Tool as McpTool;
use rmcp::service::RequestContext;
use tokio_util::sync::CancellationToken;

use super::args::InvocationRequest;
use super::descriptor::ToolDescriptor;
use super::error::{RegistryError, ToolError};
use crate::types::ToolName;

/// Boxed future returned by `ToolHandler::invoke`.
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;

/// Context passed to tool handlers during execution.
#[derive(Clone, Debug, Default)]
pub struct ToolContext {
    /// Cancellation signal from the transport for this request.
    pub ct: CancellationToken,
}

impl ToolContext {
    pub fn new(ct: CancellationToken) -> Self {
        Self { ct }
    }

    /// Build a context from rmcp's per-request context.
    pub fn from_request(context: &RequestContext<RoleServer>) -> Self {
        Self::new(context.ct.clone())
    }

    pub fn is_cancelled(&self) -> bool {
        self.ct.is_cancelled()
    }
}

/// Trait for handling MCP tool invocations.
///
/// Handlers produce the text of a successful result or a `ToolError`.
pub trait ToolHandler: Send + Sync {
    fn invoke(&self, ctx: &ToolContext, request: InvocationRequest) -> ToolFuture<'_>;
}

/// Adapts a closure into a `ToolHandler`. See `handler_fn`.
pub struct FnHandler<F>(F);

/// Wrap an async closure as a tool handler.
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(ToolContext, InvocationRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    FnHandler(f)
}

impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(ToolContext, InvocationRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    fn invoke(&self, ctx: &ToolContext, request: InvocationRequest) -> ToolFuture<'_> {
        Box::pin((self.0)(ctx.clone(), request))
    }
}

/// A descriptor paired with the handler that implements it.
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

/// Registry for managing tool handlers.
///
/// Built once at startup, then shared read-only behind an `Arc`.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<ToolName, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails without modifying the registry if the name is
    /// empty or already taken.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        let name = descriptor.name().clone();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }

        tracing::debug!(tool = %name, "Registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(
        &mut self,
        descriptor: ToolDescriptor,
        handler: T,
    ) -> Result<(), RegistryError> {
        self.register(descriptor, Arc::new(handler))
    }

    /// Get a registered tool by name.
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RegistryError::UnknownTool(ToolName::new(name)))
    }

    /// All descriptors in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// List all registered tool names in registration order.
    pub fn names(&self) -> Vec<&ToolName> {
        self.tools.iter().map(|t| t.descriptor.name()).collect()
    }

    /// Get all registered tools as `McpTool` instances for `list_tools`.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.tools
            .iter()
            .map(|t| t.descriptor.to_mcp_tool())
            .collect()
    }

    /// Check if a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
