use crate::models::RawListing;
use crate::search::traits::ListingSource;
use crate::search::types::SearchQuery;
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Stands in for SerpAPI when no API key is configured, e.g. to list tool schemas
pub struct NoopListingSource;

#[async_trait]
impl ListingSource for NoopListingSource {
    async fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<RawListing>> {
        warn!("NoopListingSource: search for '{}' called but no SerpAPI key configured", query.q);
        anyhow::bail!("SERPAPI_API_KEY is not configured")
    }

    fn source_name(&self) -> &'static str {
        "Noop"
    }
}
