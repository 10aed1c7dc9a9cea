//! Document-level sentiment

use super::classifier::{classify_document, Category};
use super::scorer::{LexiconScorer, SentimentScore};
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;

/// Score and category of one document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentSentiment {
    pub score: SentimentScore,
    pub category: Category,
}

/// Scores whole documents and labels them with the document policy
#[derive(Clone)]
pub struct DocumentAnalyzer {
    scorer: Arc<dyn LexiconScorer>,
}

impl DocumentAnalyzer {
    pub fn new(scorer: Arc<dyn LexiconScorer>) -> Self {
        Self { scorer }
    }

    pub fn analyze(&self, text: &str) -> Result<DocumentSentiment> {
        let raw = self.scorer.score_text(text)?;
        let score = SentimentScore::new(raw.polarity, raw.subjectivity);
        Ok(DocumentSentiment {
            score,
            category: classify_document(score.polarity),
        })
    }

    /// Analyze raw bytes, rejecting anything that is not UTF-8
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<DocumentSentiment> {
        let text = std::str::from_utf8(bytes)?;
        self.analyze(text)
    }
}
