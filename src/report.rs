//! Plain-text rendering of analysis results

use crate::data::BatchResult;
use crate::sentiment::{Category, CategoryCounts, DocumentSentiment, TokenAnalysisResult};
use std::fmt;

/// Score table, category label and category bars for one document
pub struct DocumentReport<'a>(pub &'a DocumentSentiment);

impl fmt::Display for DocumentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let breakdown = result.score.breakdown();

        writeln!(f, "Sentiment: {} {}", result.category, result.category.emoji())?;
        writeln!(f, "{:<14}{:>8}", "metric", "value")?;
        for (metric, value) in &breakdown.metrics {
            writeln!(f, "{:<14}{:>8.3}", metric, value)?;
        }
        writeln!(f)?;
        for (category, value) in &breakdown.categories {
            writeln!(f, "{:<10}{:>6.3} {}", category.as_str(), value, bar(*value, 1.0))?;
        }
        Ok(())
    }
}

/// Token lists by category followed by their distribution
pub struct TokenReport<'a>(pub &'a TokenAnalysisResult);

impl fmt::Display for TokenReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            let tokens = self.0.get(category);
            writeln!(f, "{} {} ({}):", category, category.emoji(), tokens.len())?;
            for token in tokens {
                writeln!(f, "  {:<20}{:>8.4}", token.token, token.compound)?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", DistributionReport(&self.0.counts()))
    }
}

/// Per-row categories, distribution and warnings for one batch
pub struct BatchReport<'a>(pub &'a BatchResult);

impl fmt::Display for BatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Column: {}", result.column)?;
        writeln!(f, "{:>6}  {:<10}  {}", "row", "category", result.column)?;
        for row in &result.rows {
            writeln!(
                f,
                "{:>6}  {:<10}  {}",
                row.row,
                row.category.as_str(),
                truncate(&row.text, 60)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Sentiment Distribution:")?;
        write!(f, "{}", DistributionReport(&result.counts))?;

        if result.has_errors() {
            writeln!(f)?;
            writeln!(f, "Warning: {} row(s) could not be analyzed", result.errors.len())?;
            for err in &result.errors {
                writeln!(f, "  {}", err)?;
            }
        }
        if result.cancelled {
            writeln!(
                f,
                "Warning: analysis cancelled, {} row(s) not processed",
                result.unprocessed()
            )?;
        }
        Ok(())
    }
}

/// `Label emoji: count` lines, largest first
pub struct DistributionReport<'a>(pub &'a CategoryCounts);

impl fmt::Display for DistributionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranked = self.0.ranked();
        let max = ranked.first().map(|(_, n)| *n).unwrap_or(0);
        for (category, count) in ranked {
            writeln!(
                f,
                "{} {}: {:<6}{}",
                category,
                category.emoji(),
                count,
                bar(count as f64, max as f64)
            )?;
        }
        Ok(())
    }
}

pub fn render_document(result: &DocumentSentiment) -> String {
    DocumentReport(result).to_string()
}

pub fn render_tokens(result: &TokenAnalysisResult) -> String {
    TokenReport(result).to_string()
}

pub fn render_batch(result: &BatchResult) -> String {
    BatchReport(result).to_string()
}

pub fn render_distribution(counts: &CategoryCounts) -> String {
    DistributionReport(counts).to_string()
}

fn bar(value: f64, max: f64) -> String {
    const WIDTH: f64 = 30.0;
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    "#".repeat(((value / max) * WIDTH).round() as usize)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
