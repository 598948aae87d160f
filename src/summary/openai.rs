use crate::agent::AgentReport;
use crate::config::SummaryConfig;
use crate::summary::traits::Summarizer;
use crate::summary::{listings_message, system_prompt};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const SUMMARY_TEMPERATURE: f32 = 0.4;

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizer backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiSummarizer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiSummarizer {
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn build_request(&self, report: &AgentReport) -> Result<ChatRequest> {
        Ok(ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(system_prompt(&report.query)),
                Message::user(listings_message(report)?),
            ],
            temperature: Some(SUMMARY_TEMPERATURE),
        })
    }
}

fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponseRaw =
        serde_json::from_str(body).context("Failed to parse chat completion response")?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .context("Chat completion returned no content")
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, report: &AgentReport) -> Result<String> {
        let start = Instant::now();
        let request = self.build_request(report)?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send chat completion request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read chat completion response")?;

        if !status.is_success() {
            warn!("Chat completion returned status: {}", status);
            anyhow::bail!("Chat completion API error {}: {}", status, body);
        }

        let summary = parse_completion(&body)?;
        debug!(
            "Summary from {} in {} ms",
            self.model,
            start.elapsed().as_millis()
        );

        Ok(summary)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
