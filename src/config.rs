use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("SERPAPI_API_KEY").context("Missing SERPAPI_API_KEY")?;
        let base_url = non_empty("SERPAPI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_timeout(non_empty("SERPAPI_TIMEOUT_SECS"), "SERPAPI_TIMEOUT_SECS")?;

        Ok(Self {
            api_key,
            base_url,
            timeout_secs,
        })
    }
}

/// Chat completion settings for the optional report summary
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl SummaryConfig {
    /// `None` when OPENAI_API_KEY is unset, which turns summaries off
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let Some(api_key) = non_empty("OPENAI_API_KEY") else {
            return Ok(None);
        };

        Ok(Some(Self {
            api_key,
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            timeout_secs: parse_timeout(non_empty("OPENAI_TIMEOUT_SECS"), "OPENAI_TIMEOUT_SECS")?,
        }))
    }
}

fn parse_timeout(raw: Option<String>, name: &str) -> Result<u64> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", name, raw)),
        None => Ok(DEFAULT_TIMEOUT_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("SERPAPI_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_key() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("SERPAPI_API_KEY", " ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "abc"),
            ("SERPAPI_BASE_URL", "http://127.0.0.1:8080/search"),
            ("SERPAPI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/search");
        assert_eq!(config.timeout_secs, 5);

        let bad = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "abc"),
            ("SERPAPI_TIMEOUT_SECS", "soon"),
        ]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_summary_disabled_without_key() {
        assert!(SummaryConfig::from_lookup(lookup(&[("SERPAPI_API_KEY", "abc")]))
            .unwrap()
            .is_none());
        assert!(SummaryConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")]))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_summary_config() {
        let config = SummaryConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")]))
            .unwrap()
            .unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let config = SummaryConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:11434/v1"),
            ("OPENAI_MODEL", "llama3"),
            ("OPENAI_TIMEOUT_SECS", "90"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:11434/v1");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout_secs, 90);

        assert!(SummaryConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TIMEOUT_SECS", "-1"),
        ]))
        .is_err());
    }
}
