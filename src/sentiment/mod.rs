//! Sentiment Scoring Module
//!
//! Turns raw text into scores and categories:
//! - Lexicon scoring behind the `LexiconScorer` trait, with a VADER-style default
//! - Document policy and token policy classification
//! - Whole-document and per-token analyzers sharing one scorer

pub mod classifier;
pub mod document;
pub mod scorer;
pub mod sentiment_analyzer;
pub mod tokens;


pub use classifier::{classify_document, classify_token, Category, CategoryCounts};
pub use document::{DocumentAnalyzer, DocumentSentiment};
pub use scorer::{LexiconScorer, ScoreBreakdown, SentimentScore};
pub use sentiment_analyzer::{LexiconAnalyzer, LexiconOverride};
pub use tokens::{TokenAnalysisResult, TokenAnalyzer, TokenSentiment};
