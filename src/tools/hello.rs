//! Handler for the `hello` tool.

use crate::tools::{
    InvocationRequest, ParameterSpec, ToolContext, ToolDescriptor, ToolFuture, ToolHandler,
};

const DEFAULT_NAME: &str = "world";

/// Greets the caller by name, or the whole world when no name is given.
pub struct HelloTool;

impl HelloTool {
    pub const NAME: &'static str = "hello";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, "Test tool: greets the given name").with_parameter(
            ParameterSpec::optional("name", "Name of the person to greet (optional)"),
        )
    }

    pub fn greet(name: &str) -> String {
        format!("hello from MCP, {}!", name)
    }
}

impl ToolHandler for HelloTool {
    fn invoke(&self, _ctx: &ToolContext, request: InvocationRequest) -> ToolFuture<'_> {
        Box::pin(async move {
            // An empty name counts as no name.
            let name = request.arguments.get_string("name", DEFAULT_NAME);
            let name = if name.is_empty() { DEFAULT_NAME } else { &name };
            Ok(Self::greet(name))
        })
    }
}
