//! Tool registry, dispatch, and the built-in tools.
//!
//! Tools are registered once at startup into a `ToolRegistry`; a `Dispatcher`
//! then resolves each incoming call to its handler and turns the outcome
//! into an `InvocationResult` for the transport.

mod args;
mod descriptor;
mod dispatch;
mod error;
mod registry;

pub use args::{Arguments, InvocationRequest};
pub use descriptor::{ParameterSpec, ToolDescriptor};
pub use dispatch::{Dispatcher, InvocationResult};
pub use error::{RegistryError, ToolError};
pub use registry::{
    FnHandler, RegisteredTool, ToolContext, ToolFuture, ToolHandler, ToolRegistry, handler_fn,
};

// Tool handler implementations
mod hello;
mod now;
mod ping;

pub use hello::HelloTool;
pub use now::NowTool;
pub use ping::PingTool;

/// Register `hello`, `ping` and `now`.
pub fn register_builtin_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register_handler(HelloTool::descriptor(), HelloTool)?;
    registry.register_handler(PingTool::descriptor(), PingTool)?;
    registry.register_handler(NowTool::descriptor(), NowTool)?;
    Ok(())
}
