use crate::models::SearchRequest;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENGINE: &str = "google";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "ae";

/// Query parameters sent to the search provider (the API key is added by the client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// Free-text query, e.g. "rent apartment in Marina Dubai"
    pub q: String,
    /// Provider engine identifier
    pub engine: String,
    /// Interface language
    pub hl: String,
    /// Country the results are localized to
    pub gl: String,
}

impl SearchQuery {
    pub fn for_request(request: &SearchRequest) -> Self {
        Self {
            q: format!("{} apartment in {} Dubai", request.purpose, request.location.trim()),
            ..Self::default()
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            engine: DEFAULT_ENGINE.to_string(),
            hl: DEFAULT_LANGUAGE.to_string(),
            gl: DEFAULT_COUNTRY.to_string(),
        }
    }
}
