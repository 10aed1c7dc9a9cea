//! Sentiment engine facade
//!
//! Owns the shared scorer and wires the analyzers together for callers that
//! want document, token and table analysis from one handle.

use crate::config::{BatchConfig, Config};
use crate::data::{
    detect_text_column, BatchAggregator, BatchResult, CancellationFlag, Column, Schema,
    TabularRow, Table,
};
use crate::error::{Result, SentimentError};
use crate::sentiment::{
    DocumentAnalyzer, DocumentSentiment, LexiconAnalyzer, LexiconScorer, TokenAnalysisResult,
    TokenAnalyzer,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SentimentEngine {
    documents: DocumentAnalyzer,
    tokens: TokenAnalyzer,
    batch: BatchAggregator,
}

impl SentimentEngine {
    /// Engine over the process-wide default lexicon
    pub fn new() -> Self {
        Self::with_scorer(LexiconAnalyzer::shared(), BatchConfig::default())
    }

    pub fn with_scorer(scorer: Arc<dyn LexiconScorer>, batch_config: BatchConfig) -> Self {
        let documents = DocumentAnalyzer::new(scorer.clone());
        Self {
            tokens: TokenAnalyzer::new(scorer),
            batch: BatchAggregator::new(documents.clone(), batch_config),
            documents,
        }
    }

    /// Build from configuration. The default lexicon is reused unless overrides are configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let scorer: Arc<dyn LexiconScorer> = match &config.lexicon.overrides_path {
            Some(path) => {
                let expanded = shellexpand::tilde(path).into_owned();
                info!(path = %expanded, "Loading lexicon overrides");
                let overrides = LexiconAnalyzer::load_overrides(&expanded)?;
                Arc::new(LexiconAnalyzer::with_overrides(overrides)?)
            }
            None => LexiconAnalyzer::shared(),
        };
        Ok(Self::with_scorer(scorer, config.batch.clone()))
    }

    pub fn analyze_document(&self, text: &str) -> Result<DocumentSentiment> {
        let result = self.documents.analyze(text)?;
        debug!(
            polarity = result.score.polarity,
            subjectivity = result.score.subjectivity,
            category = %result.category,
            "Document analyzed"
        );
        Ok(result)
    }

    pub fn analyze_document_bytes(&self, bytes: &[u8]) -> Result<DocumentSentiment> {
        self.documents.analyze_bytes(bytes)
    }

    pub fn analyze_tokens(&self, text: &str) -> Result<TokenAnalysisResult> {
        let result = self.tokens.analyze(text)?;
        debug!(tokens = result.len(), "Tokens analyzed");
        Ok(result)
    }

    pub fn analyze_tokens_bytes(&self, bytes: &[u8]) -> Result<TokenAnalysisResult> {
        self.tokens.analyze_bytes(bytes)
    }

    pub fn detect_text_column<'a>(&self, schema: &'a Schema) -> Option<&'a Column> {
        detect_text_column(schema)
    }

    pub fn analyze_batch(&self, rows: &[TabularRow], column: &str) -> BatchResult {
        self.batch.analyze(rows, column)
    }

    /// Analyze a table, detecting the text column unless one is given
    pub fn analyze_table(&self, table: &Table, column: Option<&str>) -> Result<BatchResult> {
        let column = match column {
            Some(name) => name.to_string(),
            None => match detect_text_column(&table.schema) {
                Some(found) => {
                    info!(column = %found.name, "Detected text column");
                    found.name.clone()
                }
                None => {
                    warn!("No suitable text column found");
                    return Err(SentimentError::NoTextColumnFound);
                }
            },
        };
        Ok(self.batch.analyze(&table.rows, &column))
    }

    /// Flag that stops a running batch between rows
    pub fn cancellation(&self) -> CancellationFlag {
        self.batch.cancellation()
    }
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::new()
    }
}
