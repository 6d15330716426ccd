//! Handler for the `now` clock tool.

use chrono::{Local, SecondsFormat};

use crate::tools::{InvocationRequest, ToolContext, ToolDescriptor, ToolFuture, ToolHandler};

/// Reports the server's current local time as an RFC 3339 timestamp.
pub struct NowTool;

impl NowTool {
    pub const NAME: &'static str = "now";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, "Returns the server's current time (RFC3339)")
    }

    /// Second precision, `Z` for a zero offset.
    pub fn timestamp() -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl ToolHandler for NowTool {
    fn invoke(&self, _ctx: &ToolContext, _request: InvocationRequest) -> ToolFuture<'_> {
        Box::pin(async { Ok(Self::timestamp()) })
    }
}
