//! Invocation requests and the argument accessor handlers read from.

use rmcp::model::{CallToolRequestParams, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ToolName;

/// Untyped argument bag attached to a tool call.
///
/// Handlers read it through the lenient accessors below, so a missing or
/// mistyped field never panics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(JsonObject);

impl Arguments {
    /// Create an empty argument bag.
    pub fn new() -> Self {
        Self(JsonObject::new())
    }

    /// Add an argument, replacing any previous value under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the string under `key`, or `default` if the key is absent or
    /// the value is not a JSON string.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_str(key).unwrap_or(default).to_string()
    }

    /// Borrow the string under `key`, if there is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<JsonObject> for Arguments {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

impl From<Option<JsonObject>> for Arguments {
    fn from(map: Option<JsonObject>) -> Self {
        Self(map.unwrap_or_default())
    }
}

/// A single decoded tool call: the tool to run and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub tool_name: ToolName,
    #[serde(default)]
    pub arguments: Arguments,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<ToolName>, arguments: impl Into<Arguments>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: arguments.into(),
        }
    }
}

impl From<CallToolRequestParams> for InvocationRequest {
    fn from(params: CallToolRequestParams) -> Self {
        Self::new(params.name.to_string(), params.arguments)
    }
}
