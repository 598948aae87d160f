use crate::agent::AgentReport;
use anyhow::Result;
use async_trait::async_trait;

/// Writes a conversational recommendation for a gathered report.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize listings that have already been fetched and sorted
    async fn summarize(&self, report: &AgentReport) -> Result<String>;

    /// Get the name of the model doing the writing
    fn model_name(&self) -> &str;
}
