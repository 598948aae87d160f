use crate::models::RawListing;
use crate::search::types::SearchQuery;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for every provider that can return raw listings.
/// The tool only depends on this, so tests swap in an in-memory source.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Run a single search against the provider
    async fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<RawListing>>;

    /// Get the name of the provider
    fn source_name(&self) -> &'static str;
}
