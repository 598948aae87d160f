use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::ToolOutput;
use crate::tools::traits::{Tool, ToolError};

/// What the host needs to advertise a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Capability table: tool name -> handler
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name();
        if self.tools.contains_key(name) {
            return Err(ToolError::DuplicateTool(name));
        }
        debug!("Registered tool {}", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Dispatch a call by name; an unknown name is reported as content
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolOutput {
        match self.get(name) {
            Some(tool) => tool.call(arguments).await,
            None => {
                warn!("Call to unregistered tool {}", name);
                ToolOutput::message(ToolError::UnknownTool(name.to_string()).to_string())
            }
        }
    }
}
