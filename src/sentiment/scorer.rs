//! Lexicon scorer capability and the score it produces

use super::classifier::Category;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Polarity and subjectivity of a document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Valence (-1.0 to 1.0)
    pub polarity: f64,
    /// Opinion vs fact (0.0 to 1.0)
    pub subjectivity: f64,
}

impl SentimentScore {
    /// Build a score, clamping both values into range. NaN becomes 0.
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: clamp_or_zero(polarity, -1.0, 1.0),
            subjectivity: clamp_or_zero(subjectivity, 0.0, 1.0),
        }
    }

    /// Score of text with no sentiment-bearing content
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::from_score(self)
    }
}

impl Default for SentimentScore {
    fn default() -> Self {
        Self::neutral()
    }
}

pub(crate) fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

/// Chart-ready views of a score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// `("polarity", p)` and `("subjectivity", s)`
    pub metrics: Vec<(&'static str, f64)>,
    /// Bar height per category derived from polarity
    pub categories: Vec<(Category, f64)>,
}

impl ScoreBreakdown {
    pub fn from_score(score: &SentimentScore) -> Self {
        let p = score.polarity;
        Self {
            metrics: vec![("polarity", p), ("subjectivity", score.subjectivity)],
            categories: vec![
                (Category::Positive, if p > 0.0 { p } else { 0.0 }),
                (Category::Negative, if p < 0.0 { p.abs() } else { 0.0 }),
                (Category::Neutral, if p == 0.0 { 1.0 } else { 0.0 }),
            ],
        }
    }
}

/// Source of sentiment scores for text and single tokens.
///
/// Implementations are shared read-only across analyses and threads, so any
/// expensive state (a loaded lexicon or model) is built once and reused.
#[cfg_attr(test, mockall::automock)]
pub trait LexiconScorer: Send + Sync {
    /// Polarity and subjectivity of a whole text. Empty text scores (0, 0).
    fn score_text(&self, text: &str) -> Result<SentimentScore>;

    /// Compound score of one token (-1.0 to 1.0)
    fn score_token(&self, token: &str) -> Result<f64>;
}
