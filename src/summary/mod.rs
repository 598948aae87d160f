//! Optional LLM summary of an agent report.
//!
//! The prompt carries the user's question as the system instruction and the
//! gathered listings plus nearby schools as a JSON user message.

pub mod openai;
pub mod traits;

pub use openai::OpenAiSummarizer;
pub use traits::Summarizer;

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::agent::AgentReport;

pub fn system_prompt(query: &str) -> String {
    format!(
        "You are a real estate assistant for Dubai. A user asked:\n\"\"\"{}\"\"\"\n\
         You will receive a JSON object with the matching property listings (each tagged with its \
         neighborhood) and the top schools near each neighborhood.\n\
         - Summarize the key insights, such as the price range and the best deals.\n\
         - Mention the neighborhood context and nearby schools.\n\
         - If there are no listings, suggest adjusting the budget or the neighborhood.\n\
         Respond in a friendly, conversational style.",
        query
    )
}

#[derive(Serialize)]
struct ListingSummaryInput<'a> {
    neighborhood: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    location: &'a str,
    price: &'a str,
    size: &'a str,
}

#[derive(Serialize)]
struct SummaryInput<'a> {
    listings: Vec<ListingSummaryInput<'a>>,
    schools: &'a BTreeMap<&'static str, &'static [&'static str]>,
}

/// The user message: the report's listings and schools as pretty JSON
pub fn listings_message(report: &AgentReport) -> Result<String> {
    let input = SummaryInput {
        listings: report
            .listings
            .iter()
            .map(|listing| ListingSummaryInput {
                neighborhood: listing.neighborhood,
                kind: listing.record.kind.as_str(),
                location: &listing.record.location,
                price: &listing.record.price,
                size: &listing.record.size,
            })
            .collect(),
        schools: &report.schools,
    };

    Ok(format!(
        "Here are the listings data:\n{}",
        serde_json::to_string_pretty(&input)?
    ))
}
