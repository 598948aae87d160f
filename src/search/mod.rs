pub mod noop;
pub mod serpapi;
pub mod traits;
pub mod types;

pub use noop::NoopListingSource;
pub use serpapi::SerpApiClient;
pub use traits::ListingSource;
pub use types::SearchQuery;
