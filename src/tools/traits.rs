use crate::models::ToolOutput;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for tools. Never leaves a tool call; it is rendered as a message.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Failed to fetch properties: {0}")]
    Fetch(String),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool already registered: {0}")]
    DuplicateTool(&'static str),
}

/// A callable capability exposed to the host
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments mapping
    fn input_schema(&self) -> Value;

    /// Run the tool. Failures come back as a single content message.
    async fn call(&self, arguments: Value) -> ToolOutput;
}
