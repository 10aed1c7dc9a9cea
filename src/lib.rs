//! Sentiment Engine
//!
//! Lexicon-based sentiment scoring for single documents, their tokens, and
//! text columns of CSV tables.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod report;
pub mod sentiment;


pub use engine::SentimentEngine;
pub use error::{Result, RowProcessingError, SentimentError};
