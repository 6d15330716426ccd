//! Handler for the `ping` liveness tool.

use crate::tools::{InvocationRequest, ToolContext, ToolDescriptor, ToolFuture, ToolHandler};

pub struct PingTool;

impl PingTool {
    pub const NAME: &'static str = "ping";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, "Connectivity check. Always returns 'pong'")
    }
}

impl ToolHandler for PingTool {
    fn invoke(&self, _ctx: &ToolContext, _request: InvocationRequest) -> ToolFuture<'_> {
        Box::pin(async { Ok("pong".to_string()) })
    }
}
