//! Resolves invocations to handlers and normalizes their outcome.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::args::InvocationRequest;
use super::error::ToolError;
use super::registry::{ToolContext, ToolRegistry};

/// Outcome of a single tool call as seen by the transport.
///
/// Serializes to `{"text": ...}` on success and `{"error": ...}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvocationResult {
    Success { text: String },
    Failure { error: String },
}

impl InvocationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Convert into the MCP `tools/call` result: one text item, flagged as an
    /// error for failures.
    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            Self::Success { text } => CallToolResult::success(vec![Content::text(text)]),
            Self::Failure { error } => CallToolResult::error(vec![Content::text(error)]),
        }
    }
}

impl From<Result<String, ToolError>> for InvocationResult {
    fn from(outcome: Result<String, ToolError>) -> Self {
        match outcome {
            Ok(text) => Self::success(text),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

/// Routes each invocation to exactly one registered handler.
///
/// Cheap to clone; every clone shares the same read-only registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Run the requested tool and convert its outcome into an
    /// `InvocationResult`. Never panics and never returns early with an
    /// error: unknown tools, handler failures, panics and cancellation all
    /// come back as `Failure`.
    ///
    /// The handler runs on its own task so a panic stays contained. `ctx` is
    /// handed to it unchanged; once the call has started, reacting to
    /// cancellation is up to the handler and whatever it returns is forwarded.
    pub async fn dispatch(&self, ctx: &ToolContext, request: InvocationRequest) -> InvocationResult {
        let tool_name = request.tool_name.clone();

        let handler = match self.registry.lookup(tool_name.as_str()) {
            Ok(tool) => tool.handler().clone(),
            Err(e) => {
                warn!(tool = %tool_name, "Rejected call: {}", e);
                return InvocationResult::failure(e.to_string());
            }
        };

        if ctx.is_cancelled() {
            debug!(tool = %tool_name, "Request cancelled before dispatch");
            return InvocationResult::failure(ToolError::Cancelled.to_string());
        }

        let task_ctx = ctx.clone();
        let task = tokio::spawn(async move { handler.invoke(&task_ctx, request).await });

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => Err(ToolError::Panicked(tool_name.clone())),
            Err(_) => Err(ToolError::Cancelled),
        };

        match &outcome {
            Ok(_) => debug!(tool = %tool_name, "Tool call succeeded"),
            Err(e) => warn!(tool = %tool_name, "Tool call failed: {}", e),
        }

        outcome.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Arguments, ToolDescriptor, handler_fn};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();
        registry
            .register_handler(
                ToolDescriptor::new("echo", "Echoes `msg`"),
                handler_fn(|_ctx, request: InvocationRequest| async move {
                    Ok::<_, ToolError>(request.arguments.get_string("msg", ""))
                }),
            )
            .unwrap();
        registry
            .register_handler(
                ToolDescriptor::new("reject", "Always fails"),
                handler_fn(|_ctx, _request| async move {
                    Err::<String, _>(ToolError::failed("value out of range: 7"))
                }),
            )
            .unwrap();
        registry
            .register_handler(
                ToolDescriptor::new("slow", "Waits for cancellation"),
                handler_fn(|ctx: ToolContext, _request| async move {
                    tokio::select! {
                        _ = ctx.ct.cancelled() => Err(ToolError::Cancelled),
                        _ = tokio::time::sleep(Duration::from_secs(60)) => Ok("done".to_string()),
                    }
                }),
            )
            .unwrap();
        registry
            .register_handler(
                ToolDescriptor::new("explode", "Panics"),
                handler_fn(|_ctx, request: InvocationRequest| async move {
                    if request.arguments.is_empty() {
                        panic!("boom");
                    }
                    Ok::<_, ToolError>("survived".to_string())
                }),
            )
            .unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let result = dispatcher()
            .dispatch(
                &ToolContext::default(),
                InvocationRequest::new("echo", Arguments::new().with("msg", "hi")),
            )
            .await;
        assert_eq!(result, InvocationResult::success("hi"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let result = dispatcher()
            .dispatch(
                &ToolContext::default(),
                InvocationRequest::new("missing", Arguments::new()),
            )
            .await;
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("unknown tool: missing"));
    }

    #[tokio::test]
    async fn test_handler_error_forwarded_verbatim() {
        let result = dispatcher()
            .dispatch(
                &ToolContext::default(),
                InvocationRequest::new("reject", Arguments::new()),
            )
            .await;
        assert_eq!(result, InvocationResult::failure("value out of range: 7"));
    }

    #[tokio::test]
    async fn test_cancelled_before_dispatch() {
        let ctx = ToolContext::new(CancellationToken::new());
        ctx.ct.cancel();

        let result = dispatcher()
            .dispatch(&ctx, InvocationRequest::new("echo", Arguments::new()))
            .await;
        assert_eq!(result, InvocationResult::failure("request cancelled"));
    }

    #[tokio::test]
    async fn test_cancelled_during_handler() {
        let ctx = ToolContext::default();
        let ct = ctx.ct.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            ct.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher().dispatch(&ctx, InvocationRequest::new("slow", Arguments::new())),
        )
        .await
        .expect("dispatch did not honor cancellation");

        assert_eq!(result, InvocationResult::failure("request cancelled"));
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let dispatcher = dispatcher();
        let ctx = ToolContext::default();

        let result = dispatcher
            .dispatch(&ctx, InvocationRequest::new("explode", Arguments::new()))
            .await;
        assert_eq!(result, InvocationResult::failure("tool 'explode' panicked"));

        // The dispatcher stays usable after a handler panic.
        let result = dispatcher
            .dispatch(
                &ctx,
                InvocationRequest::new("echo", Arguments::new().with("msg", "still here")),
            )
            .await;
        assert_eq!(result.text(), Some("still here"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dispatch_no_cross_talk() {
        let dispatcher = dispatcher();

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    let request = match i % 3 {
                        0 => InvocationRequest::new(
                            "echo",
                            Arguments::new().with("msg", format!("m{i}")),
                        ),
                        1 => InvocationRequest::new("reject", Arguments::new()),
                        _ => InvocationRequest::new("explode", Arguments::new()),
                    };
                    (i, dispatcher.dispatch(&ToolContext::default(), request).await)
                })
            })
            .collect();

        let mut seen = 0;
        for handle in handles {
            let (i, result) = handle.await.unwrap();
            match i % 3 {
                0 => assert_eq!(result, InvocationResult::success(format!("m{i}"))),
                1 => assert_eq!(result, InvocationResult::failure("value out of range: 7")),
                _ => assert_eq!(result, InvocationResult::failure("tool 'explode' panicked")),
            }
            seen += 1;
        }
        assert_eq!(seen, 64);
    }

    #[tokio::test]
    async fn test_handler_cancellation_message_forwarded() {
        let cleaned_up = Arc::new(AtomicBool::new(false));
        let flag = cleaned_up.clone();

        let mut registry = ToolRegistry::new();
        registry
            .register_handler(
                ToolDescriptor::new("rollback", "Rolls back on cancellation"),
                handler_fn(move |ctx: ToolContext, _request| {
                    let flag = flag.clone();
                    async move {
                        ctx.ct.cancelled().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        flag.store(true, Ordering::SeqCst);
                        Err::<String, _>(ToolError::failed("cancelled after rolling back row 3"))
                    }
                }),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let ctx = ToolContext::default();
        let ct = ctx.ct.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            ct.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher.dispatch(&ctx, InvocationRequest::new("rollback", Arguments::new())),
        )
        .await
        .expect("handler never returned after cancellation");

        assert_eq!(
            result,
            InvocationResult::failure("cancelled after rolling back row 3")
        );
        assert!(cleaned_up.load(Ordering::SeqCst));
    }

    #[test]
    fn test_result_wire_shape() {
        let ok = serde_json::to_value(InvocationResult::success("pong")).unwrap();
        assert_eq!(ok, serde_json::json!({ "text": "pong" }));

        let err = serde_json::to_value(InvocationResult::failure("unknown tool: x")).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "unknown tool: x" }));
    }

    #[test]
    fn test_into_call_tool_result() {
        let result = InvocationResult::failure("nope").into_call_tool_result();
        assert_eq!(result.is_error, Some(true));
        let content = serde_json::to_value(&result.content[0]).unwrap();
        assert_eq!(content["text"], "nope");

        let result = InvocationResult::success("pong").into_call_tool_result();
        assert_eq!(result.is_error, Some(false));
    }
}
