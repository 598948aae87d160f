//! Free-text property search over the family-friendly neighborhoods.
//!
//! A query such as "3 bed for rent in Mirdif under 150,000 AED" is reduced to
//! a neighborhood, a purpose and a budget, then answered with the
//! `fetch_properties` tool. Without a named neighborhood every known one is
//! searched, one after another. When a summarizer is configured, the sorted
//! listings are also handed to it for a written recommendation.

pub mod intent;
pub mod neighborhoods;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{PropertyRecord, Purpose, SearchRequest};
use crate::normalizer::{extract_numeric_price, format_amount};
use crate::summary::Summarizer;
use crate::tools::FetchPropertiesTool;

/// Most listings kept in a report
pub const MAX_LISTINGS: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct NeighborhoodListing {
    pub neighborhood: &'static str,
    #[serde(flatten)]
    pub record: PropertyRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub query: String,
    pub purpose: Purpose,
    pub budget: Option<f64>,
    pub searched: Vec<&'static str>,
    pub listings: Vec<NeighborhoodListing>,
    pub schools: BTreeMap<&'static str, &'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl AgentReport {
    /// Human-readable summary, one line per listing
    pub fn render(&self) -> Vec<String> {
        if self.listings.is_empty() {
            return vec![
                "No properties found in any family-friendly area under those criteria.".to_string(),
                "You may try increasing budget or specifying a different neighborhood.".to_string(),
            ];
        }

        let mut lines: Vec<String> = self
            .listings
            .iter()
            .map(|listing| {
                format!(
                    "- {} in {}: {}, Size: {}",
                    listing.record.kind.as_str(),
                    listing.record.location,
                    listing.record.price,
                    listing.record.size
                )
            })
            .collect();

        for (neighborhood, schools) in &self.schools {
            if !schools.is_empty() {
                lines.push(format!(
                    "Schools near {}: {}",
                    neighborhoods::title_case(neighborhood),
                    schools.join(", ")
                ));
            }
        }

        if let Some(summary) = &self.summary {
            lines.push(String::new());
            lines.extend(summary.lines().map(str::to_string));
        }

        lines
    }
}

pub struct PropertyAgent {
    tool: Arc<FetchPropertiesTool>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl PropertyAgent {
    pub fn new(tool: Arc<FetchPropertiesTool>) -> Self {
        Self {
            tool,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub async fn run(&self, query: &str) -> AgentReport {
        let purpose = intent::extract_purpose(query);
        let budget = intent::extract_budget(query);

        let searched: Vec<&'static str> = match intent::extract_neighborhood(query) {
            Some(neighborhood) => {
                info!("Searching in specified neighborhood: {}", neighborhoods::title_case(neighborhood));
                vec![neighborhood]
            }
            None => {
                info!("No specific neighborhood mentioned; searching all family-friendly neighborhoods");
                neighborhoods::all().collect()
            }
        };

        match budget {
            Some(budget) => info!("Budget: under {} AED", format_amount(budget)),
            None => info!("Budget: none"),
        }
        info!("Purpose: {}", purpose);

        let mut listings = Vec::new();
        for &neighborhood in &searched {
            let request = SearchRequest::new(neighborhoods::title_case(neighborhood), purpose, budget);
            match self.tool.search(&request).await {
                Ok(outcome) => listings.extend(outcome.records.into_iter().map(|record| {
                    NeighborhoodListing {
                        neighborhood,
                        record,
                    }
                })),
                Err(err) => warn!("Skipping {}: {}", neighborhood, err),
            }
        }

        listings.sort_by_key(|listing| {
            let price = extract_numeric_price(&listing.record.price);
            (price.is_none(), price.unwrap_or(0))
        });
        listings.truncate(MAX_LISTINGS);

        let schools = listings
            .iter()
            .map(|listing| (listing.neighborhood, neighborhoods::schools(listing.neighborhood)))
            .collect();

        let mut report = AgentReport {
            query: query.to_string(),
            purpose,
            budget,
            searched,
            listings,
            schools,
            summary: None,
            generated_at: Utc::now(),
        };

        if let Some(summarizer) = &self.summarizer {
            if !report.listings.is_empty() {
                report.summary = self.summarize(summarizer.as_ref(), &report).await;
            }
        }

        report
    }

    /// A failed summary only costs the written recommendation
    async fn summarize(&self, summarizer: &dyn Summarizer, report: &AgentReport) -> Option<String> {
        info!("Asking {} to summarize {} listings", summarizer.model_name(), report.listings.len());
        match summarizer.summarize(report).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!("Summary unavailable, showing listings only: {:#}", err);
                None
            }
        }
    }
}
