use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{PropertyRecord, SearchRequest, ToolOutput};
use crate::normalizer;
use crate::search::{ListingSource, SearchQuery};
use crate::tools::traits::{Tool, ToolError};

/// Records kept for one request, plus how many the provider returned
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub fetched: usize,
    pub records: Vec<PropertyRecord>,
}

/// Tool for searching Dubai apartments and filtering them by budget.
pub struct FetchPropertiesTool {
    source: Arc<dyn ListingSource>,
}

impl FetchPropertiesTool {
    pub const NAME: &'static str = "fetch_properties";

    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    pub fn parse_arguments(arguments: Value) -> Result<SearchRequest, ToolError> {
        let request: SearchRequest = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        request.validate().map_err(ToolError::InvalidArguments)?;
        Ok(request)
    }

    /// Fetch once from the source and normalize the listings
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, ToolError> {
        let query = SearchQuery::for_request(request);
        let listings = self
            .source
            .fetch_listings(&query)
            .await
            .map_err(|e| ToolError::Fetch(describe_failure(&e)))?;

        let records = normalizer::normalize(&listings, request);
        info!(
            "{}: {} listings fetched, {} within budget",
            self.source.source_name(),
            listings.len(),
            records.len()
        );

        Ok(SearchOutcome {
            fetched: listings.len(),
            records,
        })
    }

    async fn run(&self, arguments: Value) -> Result<ToolOutput, ToolError> {
        let request = Self::parse_arguments(arguments)?;
        let outcome = self.search(&request).await?;
        render(&request, outcome)
    }
}

/// Outermost context plus the root cause; the middle of the chain repeats itself
fn describe_failure(err: &anyhow::Error) -> String {
    let root = err.root_cause().to_string();
    let top = err.to_string();
    if top == root {
        top
    } else {
        format!("{}: {}", top, root)
    }
}

fn render(request: &SearchRequest, outcome: SearchOutcome) -> Result<ToolOutput, ToolError> {
    if outcome.records.is_empty() {
        let location = request.location.trim();
        let text = match request.budget {
            Some(budget) if outcome.fetched > 0 => format!(
                "No matching properties found in {} within a budget of AED {}.",
                location,
                normalizer::format_amount(budget)
            ),
            _ => format!("No matching properties found in {}.", location),
        };
        return Ok(ToolOutput::message(text));
    }

    let content = outcome
        .records
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ToolOutput { content })
}

#[async_trait]
impl Tool for FetchPropertiesTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search for apartments in Dubai for rent or sale, optionally limited to a budget in AED."
    }

    fn input_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(SearchRequest)).unwrap_or_default()
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        match self.run(arguments).await {
            Ok(output) => output,
            Err(err) => {
                warn!("{} failed: {}", Self::NAME, err);
                ToolOutput::message(err.to_string())
            }
        }
    }
}
