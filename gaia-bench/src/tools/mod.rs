//! Tools the agent can call
//!
//! A [`ToolRegistry`] is an ordinary value owned by whoever builds the agent;
//! there is no global tool table. The registry turns its tools into
//! [`ToolSpec`]s for the provider and dispatches the calls the model makes.

mod calculator;
mod read_file;

pub use calculator::Calculator;
pub use read_file::ReadFile;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::providers::ToolSpec;

/// Error types for tool execution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// A capability exposed to the model through function calling
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, input: Value) -> Result<String, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Registry of available tools, in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from tool names; attachment access is confined to `attachments_dir`
    pub fn from_names(names: &[String], attachments_dir: &Path) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        for name in names {
            match name.as_str() {
                "calculator" => registry.register(Calculator),
                "read_file" => registry.register(ReadFile::new(attachments_dir)),
                other => return Err(ToolError::UnknownTool(other.to_string())),
            };
        }
        Ok(registry)
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> &mut Self {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function specs for every registered tool
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.spec()).collect()
    }

    /// Run the named tool
    pub async fn call(&self, name: &str, input: Value) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.execute(input).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        async fn execute(&self, input: Value) -> Result<String, ToolError> {
            Ok(input["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo).register(Calculator);
        assert_eq!(registry.names(), vec!["echo", "calculator"]);
        assert_eq!(registry.specs()[1].name, "calculator");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_from_names() {
        let registry =
            ToolRegistry::from_names(&["read_file".to_string(), "calculator".to_string()], Path::new("."))
                .unwrap();
        assert_eq!(registry.names(), vec!["read_file", "calculator"]);

        let err = ToolRegistry::from_names(&["browser".to_string()], Path::new(".")).unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("browser".to_string()));
    }

    #[tokio::test]
    async fn test_call_dispatches() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo);
        let out = registry.call("echo", json!({"text": "hi"})).await.unwrap();
        assert_eq!(out, "hi");
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        let err = registry.call("nope", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }
}
