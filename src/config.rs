/// Default bind address for the HTTP transport.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default path the MCP endpoint is mounted at.
pub const DEFAULT_PATH: &str = "/mcp";

/// Settings for the streamable HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on, e.g. `0.0.0.0:8080`.
    pub bind: String,
    /// Path of the MCP endpoint; must start with `/`.
    pub path: String,
    /// Keep server-side sessions between calls. Off by default: every request
    /// is handled without a session id.
    pub stateful: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            path: DEFAULT_PATH.to_string(),
            stateful: false,
        }
    }
}

impl ServerConfig {
    pub fn new(bind: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bind: bind.into(),
            path: normalize_path(&path.into()),
            ..Default::default()
        }
    }

    pub fn with_stateful(mut self, stateful: bool) -> Self {
        self.stateful = stateful;
        self
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
