//! Token-level sentiment
//!
//! Text is split on whitespace only. Every occurrence is scored on its own and
//! lands in exactly one of the three output sequences, in source order.

use super::classifier::{classify_token, Category, CategoryCounts};
use super::scorer::{clamp_or_zero, LexiconScorer};
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;

/// Compound score and category of one token occurrence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSentiment {
    pub token: String,
    /// Compound score (-1.0 to 1.0)
    pub compound: f64,
    pub category: Category,
}

impl TokenSentiment {
    pub fn new(token: impl Into<String>, compound: f64) -> Self {
        let compound = clamp_or_zero(compound, -1.0, 1.0);
        Self {
            token: token.into(),
            compound,
            category: classify_token(compound),
        }
    }
}

/// Tokens partitioned by category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenAnalysisResult {
    pub positives: Vec<TokenSentiment>,
    pub negatives: Vec<TokenSentiment>,
    pub neutrals: Vec<TokenSentiment>,
}

impl TokenAnalysisResult {
    fn push(&mut self, token: TokenSentiment) {
        match token.category {
            Category::Positive => self.positives.push(token),
            Category::Negative => self.negatives.push(token),
            Category::Neutral => self.neutrals.push(token),
        }
    }

    /// Total number of tokens analyzed
    pub fn len(&self) -> usize {
        self.positives.len() + self.negatives.len() + self.neutrals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, category: Category) -> &[TokenSentiment] {
        match category {
            Category::Positive => &self.positives,
            Category::Negative => &self.negatives,
            Category::Neutral => &self.neutrals,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for category in Category::ALL {
            counts.add(category, self.get(category).len() as u64);
        }
        counts
    }
}

/// Scores each whitespace-delimited token with the token policy
#[derive(Clone)]
pub struct TokenAnalyzer {
    scorer: Arc<dyn LexiconScorer>,
}

impl TokenAnalyzer {
    pub fn new(scorer: Arc<dyn LexiconScorer>) -> Self {
        Self { scorer }
    }

    pub fn analyze(&self, text: &str) -> Result<TokenAnalysisResult> {
        let mut result = TokenAnalysisResult::default();
        for token in text.split_whitespace() {
            let compound = self.scorer.score_token(token)?;
            result.push(TokenSentiment::new(token, compound));
        }
        Ok(result)
    }

    /// Analyze raw bytes, rejecting anything that is not UTF-8
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<TokenAnalysisResult> {
        let text = std::str::from_utf8(bytes)?;
        self.analyze(text)
    }
}
