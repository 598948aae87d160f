mod agent;
mod config;
mod models;
mod normalizer;
mod search;
mod summary;
#[cfg(test)]
mod test_support;
mod tools;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agent::PropertyAgent;
use config::{Config, SummaryConfig};
use search::{ListingSource, NoopListingSource, SerpApiClient};
use summary::OpenAiSummarizer;
use tools::{FetchPropertiesTool, ToolRegistry};

#[derive(Parser)]
#[command(name = "dubai-property-search", about = "Search Dubai apartments through SerpAPI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Call a registered tool with a JSON arguments object
    Call {
        /// Tool name, e.g. fetch_properties
        tool: String,
        /// Arguments, e.g. '{"location":"Marina","purpose":"rent","budget":120000}'
        #[arg(long)]
        args: String,
    },
    /// Print the registered tools and their input schemas
    Schema,
    /// Answer a free-text question such as "rent in Mirdif under 150,000 AED"
    Ask {
        query: String,
        /// Also save the report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging; stdout is reserved for tool output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Call { tool, args } => {
            let arguments = serde_json::from_str(&args).context("--args must be a JSON object")?;
            let (registry, _) = build_registry(serpapi_source()?)?;
            let output = registry.invoke(&tool, arguments).await;
            for entry in &output.content {
                println!("{}", entry);
            }
        }
        Command::Schema => {
            // Schemas never reach the provider, so no key is needed
            let (registry, _) = build_registry(Arc::new(NoopListingSource))?;
            let json = serde_json::to_string_pretty(&registry.descriptors())?;
            println!("{}", json);
        }
        Command::Ask { query, output } => {
            let (_, fetch_properties) = build_registry(serpapi_source()?)?;
            let mut agent = PropertyAgent::new(fetch_properties);
            match SummaryConfig::from_env()? {
                Some(summary_config) => {
                    let summarizer = OpenAiSummarizer::new(&summary_config)?;
                    info!("Summaries enabled with {}", summary_config.model);
                    agent = agent.with_summarizer(Arc::new(summarizer));
                }
                None => info!("OPENAI_API_KEY not set; listing results without a summary"),
            }

            let report = agent.run(&query).await;

            for line in report.render() {
                println!("{}", line);
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&report)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("💾 Saved report to {}", path.display());
            }
        }
    }

    Ok(())
}

fn serpapi_source() -> Result<Arc<dyn ListingSource>> {
    let config = Config::from_env()?;
    Ok(Arc::new(SerpApiClient::new(&config)?))
}

fn build_registry(source: Arc<dyn ListingSource>) -> Result<(ToolRegistry, Arc<FetchPropertiesTool>)> {
    let fetch_properties = Arc::new(FetchPropertiesTool::new(source));

    let mut registry = ToolRegistry::new();
    registry.register(fetch_properties.clone())?;

    Ok((registry, fetch_properties))
}
