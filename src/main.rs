mod api;
mod classify;
mod config;
mod lexicon;
mod logging;
mod models;
mod normalize;
mod report;
mod sentiment;
mod tui;
mod words;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use api::ReviewsClient;
use classify::{Classification, classify, label_for};
use config::ApiConfig;
use models::{CompanyDetails, RawReview};
use normalize::normalize_reviews;
use report::ReviewOverview;
use sentiment::SentimentAnalyzer;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Employer review sentiment - fetch reviews, score them, summarize the mood")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a company and analyze its latest reviews
    Search {
        /// Company name
        company: String,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Open the interactive dashboard after the report
        #[arg(short, long)]
        browse: bool,
    },

    /// Analyze reviews from a saved JSON file
    Analyze {
        /// A JSON array of reviews, or a saved reviews API response
        file: PathBuf,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Open the interactive dashboard after the report
        #[arg(short, long)]
        browse: bool,
    },

    /// Score a piece of text
    Score {
        /// Text to score
        #[arg(required = true)]
        text: Vec<String>,
    },
}

/// Normalize, classify and summarize one page of reviews.
fn run_pipeline(raw: Vec<RawReview>) -> (ReviewOverview, Classification) {
    let overview = ReviewOverview::from_raw(&raw);
    let normalized = normalize_reviews(raw);
    let classification = classify(&SentimentAnalyzer::new(), normalized);
    info!(
        fetched = overview.review_count,
        scored = classification.reviews.len(),
        "sentiment analysis complete"
    );
    (overview, classification)
}

fn present(
    title: &str,
    details: Option<&CompanyDetails>,
    overview: &ReviewOverview,
    classification: &Classification,
    json: bool,
    browse: bool,
) -> Result<()> {
    if json {
        println!("{}", report::export_json(details, overview, classification)?);
    } else {
        print!("{}", report::render_report(details, overview, classification));
    }
    if browse {
        tui::run_dashboard(title, classification)?;
    }
    Ok(())
}

fn load_reviews_file(path: &Path) -> Result<Vec<RawReview>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reviews file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    match value {
        Value::Array(items) => Ok(api::parse_reviews(&items)),
        other => Ok(api::extract_reviews(&other)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Search { company, json, browse } => {
            let company = company.trim();
            if company.is_empty() {
                println!("Please enter a company name.");
                return Ok(());
            }

            let config = ApiConfig::from_env()?;
            let client = ReviewsClient::new(config);

            println!("Searching for {}...", company);
            let Some(company_id) = client.search_company_id(company)? else {
                println!("Company not found.");
                return Ok(());
            };
            println!("Company found (ID: {})", company_id);

            let details = client.company_details(&company_id)?;
            if details.is_none() {
                warn!(company_id = %company_id, "no company details returned");
            }
            let raw = client.reviews(&company_id)?;
            let (overview, classification) = run_pipeline(raw);

            let title = details
                .as_ref()
                .and_then(|d| d.name.clone())
                .unwrap_or_else(|| company.to_string());
            present(&title, details.as_ref(), &overview, &classification, json, browse)?;
        }

        Commands::Analyze { file, json, browse } => {
            let raw = load_reviews_file(&file)?;
            let (overview, classification) = run_pipeline(raw);
            let title = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "reviews".to_string());
            present(&title, None, &overview, &classification, json, browse)?;
        }

        Commands::Score { text } => {
            let text = text.join(" ");
            let scores = SentimentAnalyzer::new().polarity_scores(&text);
            println!("Text:     {}", text);
            println!("Compound: {:.4}", scores.compound);
            println!("Positive: {:.3}", scores.pos);
            println!("Neutral:  {:.3}", scores.neu);
            println!("Negative: {:.3}", scores.neg);
            println!("Label:    {}", label_for(scores.compound));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::SentimentLabel;
    use serde_json::json;

    #[test]
    fn test_run_pipeline() {
        let raw: Vec<RawReview> = serde_json::from_value(json!([
            {"summary": null, "careerOpportunitiesRating": 2},
            {"summary": "It was fine", "careerOpportunitiesRating": 4}
        ]))
        .unwrap();
        let (overview, classification) = run_pipeline(raw);
        assert_eq!(overview.review_count, 2);
        assert_eq!(overview.career_opportunities, Some(3.0));
        assert_eq!(classification.reviews.len(), 1);
        assert_eq!(classification.reviews[0].sentiment_label, SentimentLabel::Neutral);
        assert_eq!(classification.summary.count(SentimentLabel::Neutral), 1);
    }

    #[test]
    fn test_run_pipeline_empty() {
        let (overview, classification) = run_pipeline(Vec::new());
        assert_eq!(overview.review_count, 0);
        assert!(classification.is_empty());
        assert!(classification.summary.is_empty());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["pulse", "-v", "search", "Acme Corp", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Search { ref company, json: true, browse: false } if company == "Acme Corp"
        ));

        let cli = Cli::try_parse_from(["pulse", "score", "great", "team"]).unwrap();
        assert!(matches!(cli.command, Commands::Score { ref text } if text.len() == 2));

        assert!(Cli::try_parse_from(["pulse", "score"]).is_err());
    }
}
