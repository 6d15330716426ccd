//! MCP server implementation using rmcp.
//!
//! Adapts the tool registry and dispatcher to rmcp's `ServerHandler` and
//! serves it over streamable HTTP or stdio.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{
    ErrorData as McpError, ServiceExt,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::tools::{Dispatcher, InvocationRequest, ToolContext, ToolRegistry};

/// MCP server that answers `tools/list` from the registry and routes
/// `tools/call` through the dispatcher.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server over the given tool registry.
    pub fn new(tool_registry: Arc<ToolRegistry>) -> Self {
        let dispatcher = Dispatcher::new(tool_registry.clone());
        Self {
            tool_registry,
            dispatcher,
        }
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Server identity: this crate's name and version, rmcp defaults otherwise.
    fn implementation() -> Implementation {
        Implementation {
            name: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
            ..Implementation::from_build_env()
        }
    }
}

impl ServerHandler for McpServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let ctx = ToolContext::from_request(&context);
        let invocation = InvocationRequest::from(request);
        let dispatcher = self.dispatcher.clone();

        // Per-call failures travel as `isError` results, never as protocol errors.
        async move {
            let result = dispatcher.dispatch(&ctx, invocation).await;
            Ok(result.into_call_tool_result())
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Self::implementation(),
            instructions: Some(
                "Trial MCP server exposing `hello`, `ping` and `now` tools.".to_string(),
            ),
        }
    }
}

/// Build the axum router with the MCP endpoint mounted at `config.path`.
pub fn router(tool_registry: Arc<ToolRegistry>, config: &ServerConfig) -> Router {
    let mut http_config = StreamableHttpServerConfig::default();
    http_config.stateful_mode = config.stateful;

    let service = StreamableHttpService::new(
        move || Ok(McpServer::new(tool_registry.clone())),
        LocalSessionManager::default().into(),
        http_config,
    );

    Router::new()
        .nest_service(&config.path, service)
        .layer(TraceLayer::new_for_http())
}

/// Start the server as an MCP Streamable HTTP endpoint.
///
/// Runs until the listener fails or the process receives Ctrl-C.
pub async fn start_mcp_http(tool_registry: Arc<ToolRegistry>, config: &ServerConfig) -> Result<()> {
    let router = router(tool_registry, config);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;

    tracing::info!(
        "MCP HTTP server listening on http://{}{} ({})",
        config.bind,
        config.path,
        if config.stateful { "stateful" } else { "stateless" }
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("MCP HTTP server stopped");
    Ok(())
}

/// Serve a single MCP session over stdin/stdout.
pub async fn start_mcp_stdio(tool_registry: Arc<ToolRegistry>) -> Result<()> {
    let service = McpServer::new(tool_registry)
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

    // Block until the MCP session ends.
    service.waiting().await?;
    tracing::info!("MCP stdio server session ended");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
