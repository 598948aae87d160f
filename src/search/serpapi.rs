use crate::config::Config;
use crate::models::RawListing;
use crate::search::traits::ListingSource;
use crate::search::types::SearchQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body returned by the search endpoint; only the fields we read
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    real_estate_results: Vec<RawListing>,
    #[serde(default)]
    error: Option<String>,
}

/// SerpAPI client
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

/// Turn a response body into listings, surfacing provider-reported errors
fn parse_response(body: &str) -> Result<Vec<RawListing>> {
    let response: SerpApiResponse =
        serde_json::from_str(body).context("Failed to parse SerpAPI response")?;

    if let Some(error) = response.error {
        anyhow::bail!("SerpAPI error: {}", error);
    }

    Ok(response.real_estate_results)
}

#[async_trait]
impl ListingSource for SerpApiClient {
    async fn fetch_listings(&self, query: &SearchQuery) -> Result<Vec<RawListing>> {
        info!("Searching SerpAPI: {}", query.q);

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send SerpAPI request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response body")?;

        debug!("Downloaded {} bytes from SerpAPI", body.len());

        if !status.is_success() {
            warn!("SerpAPI returned status: {}", status);
            return match parse_response(&body) {
                Err(err) => Err(err.context(format!("SerpAPI returned status {}", status))),
                Ok(_) => anyhow::bail!("SerpAPI returned status {}", status),
            };
        }

        let listings = parse_response(&body)?;
        info!("SerpAPI returned {} listings", listings.len());

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "SerpAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Purpose, SearchRequest};
    use crate::test_support::{closed_port_url, serve_once};
    use crate::tools::traits::Tool;
    use crate::tools::FetchPropertiesTool;
    use std::sync::Arc;

    #[test]
    fn test_parse_real_estate_results() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "real_estate_results": [
                {"price": "AED 1,200,000", "address": "Dubai Hills", "size": "1,250 sqft"},
                {"price": "AED 95,000"}
            ]
        }"#;

        let listings = parse_response(body).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].address.as_deref(), Some("Dubai Hills"));
        assert!(listings[1].size.is_none());
    }

    #[test]
    fn test_missing_results_field_is_empty() {
        let listings = parse_response(r#"{"organic_results": []}"#).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_provider_error_is_reported() {
        let err = parse_response(r#"{"error": "Invalid API key."}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid API key."));
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_response("<html>Bad Gateway</html>").is_err());
    }

    fn client(base_url: &str) -> SerpApiClient {
        // no_proxy keeps requests on the local stub even when a proxy is configured
        SerpApiClient {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .no_proxy()
                .build()
                .unwrap(),
            api_key: "test-serpapi-key".to_string(),
            base_url: format!("{}/search.json", base_url),
        }
    }

    #[test]
    fn test_client_uses_config() {
        let config = Config {
            api_key: "secret".to_string(),
            base_url: "http://localhost:9/search.json".to_string(),
            timeout_secs: 5,
        };

        let client = SerpApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9/search.json");
        assert_eq!(client.api_key, "secret");
    }

    fn marina_query() -> SearchQuery {
        SearchQuery::for_request(&SearchRequest::new("Marina", Purpose::Rent, None))
    }

    #[tokio::test]
    async fn test_fetch_sends_query_parameters() {
        let (base_url, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"real_estate_results": [{"price": "AED 110,000", "address": "Marina Gate"}]}"#,
        )
        .await;

        let listings = client(&base_url).fetch_listings(&marina_query()).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].address.as_deref(), Some("Marina Gate"));

        let request = server.await.unwrap();
        assert_eq!(
            request.request_line,
            "GET /search.json?q=rent+apartment+in+Marina+Dubai&engine=google&hl=en&gl=ae&api_key=test-serpapi-key HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_fetch_server_error_with_provider_message() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"error": "Invalid API key. Your API key should be here: https://serpapi.com/manage-api-key"}"#,
        )
        .await;

        let err = client(&base_url).fetch_listings(&marina_query()).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("500"));
        assert!(message.contains("Invalid API key."));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_bad_gateway_html() {
        let (base_url, server) =
            serve_once("502 Bad Gateway", "text/html", "<html><body>Bad Gateway</body></html>").await;

        let err = client(&base_url).fetch_listings(&marina_query()).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("502"));
        assert!(message.contains("Failed to parse SerpAPI response"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_hides_api_key() {
        let base_url = closed_port_url().await;

        let err = client(&base_url).fetch_listings(&marina_query()).await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to send SerpAPI request"));
        assert!(!message.contains("test-serpapi-key"));
        assert!(!message.contains("api_key="));
    }

    #[tokio::test]
    async fn test_tool_output_never_contains_api_key() {
        let base_url = closed_port_url().await;
        let tool = FetchPropertiesTool::new(Arc::new(client(&base_url)));

        let output = tool
            .call(serde_json::json!({"location": "Marina", "purpose": "rent"}))
            .await;

        assert_eq!(output.content.len(), 1);
        assert!(output.content[0].starts_with("Failed to fetch properties"));
        assert!(!output.content[0].contains("test-serpapi-key"));
        assert_eq!(client(&base_url).source_name(), "SerpAPI");
    }
}
