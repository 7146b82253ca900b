use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::classify::Classification;
use crate::models::{CompanyDetails, RawReview, ScoredReview, SentimentLabel, SentimentSummary};
use crate::words::{self, MAX_WORDS};

const BAR_WIDTH: usize = 30;
const WRAP_WIDTH: usize = 76;

/// Figures taken from the unfiltered review page, before reviews without a
/// summary are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewOverview {
    pub review_count: usize,
    pub career_opportunities: Option<f64>,
    pub work_life_balance: Option<f64>,
    pub positions: Vec<(String, usize)>,
}

impl ReviewOverview {
    pub fn from_raw(reviews: &[RawReview]) -> Self {
        let positions = tally(
            reviews
                .iter()
                .filter_map(|r| r.job_title.clone().and_then(|t| t.into_text())),
        );
        Self {
            review_count: reviews.len(),
            career_opportunities: mean(reviews.iter().filter_map(|r| r.career_opportunities_rating)),
            work_life_balance: mean(reviews.iter().filter_map(|r| r.work_life_balance_rating)),
            positions,
        }
    }
}

/// Mean of the values present, `None` when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Counts occurrences, most common first, ties alphabetical.
pub fn tally<I: IntoIterator<Item = String>>(values: I) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Five slots, one full star per whole point of the average.
pub fn star_bar(average: f64) -> String {
    let full = (average.max(0.0) as usize).min(5);
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

pub fn sentiment_distribution(summary: &SentimentSummary) -> Vec<(String, usize)> {
    summary
        .iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

pub fn outlook_distribution(reviews: &[ScoredReview]) -> Vec<(String, usize)> {
    tally(reviews.iter().filter_map(|r| r.review.rating_business_outlook.clone()))
}

fn render_bars(out: &mut String, rows: &[(String, usize)]) {
    let total: usize = rows.iter().map(|(_, c)| c).sum();
    if total == 0 {
        let _ = writeln!(out, "  (no data)");
        return;
    }
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0).min(28);
    for (label, count) in rows {
        let share = *count as f64 / total as f64;
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<width$} {:<bar$} {:>4} ({:>5.1}%)",
            truncate(label, label_width),
            "█".repeat(filled),
            count,
            share * 100.0,
            width = label_width,
            bar = BAR_WIDTH,
        );
    }
}

fn render_rating(out: &mut String, name: &str, average: Option<f64>) {
    match average {
        Some(avg) => {
            let _ = writeln!(out, "Average {} Rating: {:.2}  {}", name, avg, star_bar(avg));
        }
        None => {
            let _ = writeln!(out, "Average {} Rating: n/a", name);
        }
    }
}

fn render_paragraph(out: &mut String, heading: &str, text: &str) {
    let _ = writeln!(out, "{}:", heading);
    let _ = writeln!(out, "{}", textwrap::indent(&textwrap::fill(text, WRAP_WIDTH), "  "));
}

pub fn render_company(details: &CompanyDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Company Details:");
    let _ = writeln!(out, "{}", "-".repeat(80));
    let field = |v: Option<&str>| v.unwrap_or("-").to_string();
    let year = details
        .year_founded
        .as_ref()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "-".to_string());

    let _ = writeln!(out, "Company Name:         {}", field(details.name.as_deref()));
    let _ = writeln!(out, "Year Founded:         {}", year);
    let _ = writeln!(out, "Industry:             {}", details.industry());
    let _ = writeln!(out, "Company Headquarters: {}", field(details.headquarters.as_deref()));
    let _ = writeln!(out, "Company Size:         {}", field(details.size.as_deref()));
    let _ = writeln!(out, "Website:              {}", field(details.website.as_deref()));
    if let Some(logo) = &details.square_logo_url {
        let _ = writeln!(out, "Logo:                 {}", logo);
    }
    let _ = writeln!(out);
    render_paragraph(&mut out, "Company Description", details.description());
    render_paragraph(&mut out, "Company Mission", details.mission());
    out
}

pub fn render_review_table(reviews: &[ScoredReview]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<8} {:<9} {:>7} {:<24} {:<40}",
        "#", "RATING", "LABEL", "SCORE", "POSITION", "SUMMARY"
    );
    let _ = writeln!(out, "{}", "-".repeat(97));
    for (i, scored) in reviews.iter().enumerate() {
        let review = &scored.review;
        let rating = review
            .rating_overall
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<4} {:<8} {:<9} {:>7.3} {:<24} {:<40}",
            i + 1,
            rating,
            scored.sentiment_label,
            scored.sentiment_score,
            truncate(review.job_title.as_deref().unwrap_or("-"), 22),
            truncate(&review.summary, 40),
        );
    }
    out
}

pub fn render_cloud(out: &mut String, label: SentimentLabel, reviews: &Classification) {
    let terms = words::top_terms(
        reviews.with_label(label).map(|r| r.review.summary.as_str()),
        MAX_WORDS,
    );
    let _ = writeln!(out, "{} Word Cloud:", label);
    if terms.is_empty() {
        let _ = writeln!(out, "  (no terms)");
        return;
    }
    let line = terms
        .iter()
        .map(|(term, count)| format!("{}({})", term, count))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{}", textwrap::indent(&textwrap::fill(&line, WRAP_WIDTH), "  "));
}

/// Full text report for one search.
pub fn render_report(
    details: Option<&CompanyDetails>,
    overview: &ReviewOverview,
    classification: &Classification,
) -> String {
    let mut out = String::new();

    match details {
        Some(details) => out.push_str(&render_company(details)),
        None => {
            let _ = writeln!(out, "No details found.");
        }
    }
    let _ = writeln!(out);

    if overview.review_count == 0 {
        let _ = writeln!(out, "No reviews found.");
    } else {
        let _ = writeln!(out, "Reviews: {} on this page", overview.review_count);
        render_rating(&mut out, "Career Opportunities", overview.career_opportunities);
        render_rating(&mut out, "Work Life Balance", overview.work_life_balance);
    }
    let _ = writeln!(out);

    if classification.is_empty() {
        let _ = writeln!(out, "No sentiment analysis found.");
        return out;
    }

    let _ = writeln!(out, "Sentiment Analysis:");
    out.push_str(&render_review_table(&classification.reviews));
    let _ = writeln!(out);

    let _ = writeln!(out, "Sentiment Label Distribution:");
    render_bars(&mut out, &sentiment_distribution(&classification.summary));
    let _ = writeln!(out);

    let _ = writeln!(out, "Business Outlook Distribution:");
    render_bars(&mut out, &outlook_distribution(&classification.reviews));
    let _ = writeln!(out);

    let _ = writeln!(out, "Position Distribution:");
    render_bars(&mut out, &overview.positions);
    let _ = writeln!(out);

    if classification.summary.count(SentimentLabel::Positive) > 0 {
        render_cloud(&mut out, SentimentLabel::Positive, classification);
        let _ = writeln!(out);
        render_cloud(&mut out, SentimentLabel::Negative, classification);
    } else {
        let _ = writeln!(out, "No reviews found.");
    }

    let _ = writeln!(
        out,
        "\nGenerated: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out
}

#[derive(Serialize)]
struct Export<'a> {
    company: Option<&'a CompanyDetails>,
    overview: &'a ReviewOverview,
    summary: &'a SentimentSummary,
    reviews: &'a [ScoredReview],
}

pub fn export_json(
    details: Option<&CompanyDetails>,
    overview: &ReviewOverview,
    classification: &Classification,
) -> Result<String> {
    let export = Export {
        company: details,
        overview,
        summary: &classification.summary,
        reviews: &classification.reviews,
    };
    serde_json::to_string_pretty(&export).context("Failed to serialize report")
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
