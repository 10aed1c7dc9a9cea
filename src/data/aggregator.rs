//! Batch sentiment aggregation
//!
//! Runs the document analyzer over one column of a table:
//! - per-row score and category, in input order
//! - category distribution across the analyzed rows
//! - per-row failures collected instead of aborting the batch
//! - optional worker pool and best-effort cancellation between rows

use super::table::TabularRow;
use crate::config::BatchConfig;
use crate::error::RowProcessingError;
use crate::sentiment::{Category, CategoryCounts, DocumentAnalyzer, SentimentScore};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Shared flag for stopping a running batch
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sentiment of one analyzed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSentiment {
    /// Zero-based index of the row in the input
    pub row: usize,
    pub text: String,
    pub score: SentimentScore,
    pub category: Category,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub run_id: Uuid,
    pub column: String,
    /// Successfully analyzed rows, in input order
    pub rows: Vec<RowSentiment>,
    /// Tally of `rows` by category
    pub counts: CategoryCounts,
    pub errors: Vec<RowProcessingError>,
    /// Rows in the input, including any not reached
    pub input_rows: usize,
    /// True when the run stopped early on cancellation
    pub cancelled: bool,
    pub analyzed_at: DateTime<Utc>,
}

impl BatchResult {
    pub fn analyzed(&self) -> usize {
        self.rows.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Rows neither analyzed nor failed (row cap or cancellation)
    pub fn unprocessed(&self) -> usize {
        self.input_rows - self.rows.len() - self.errors.len()
    }
}

enum RowOutcome {
    Analyzed(RowSentiment),
    Failed(RowProcessingError),
    Cancelled,
}

/// Applies the document analyzer to every row of a column
pub struct BatchAggregator {
    analyzer: DocumentAnalyzer,
    config: BatchConfig,
    cancel: CancellationFlag,
}

impl BatchAggregator {
    pub fn new(analyzer: DocumentAnalyzer, config: BatchConfig) -> Self {
        Self {
            analyzer,
            config,
            cancel: CancellationFlag::new(),
        }
    }

    /// Use an externally owned cancellation flag
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    pub fn analyze(&self, rows: &[TabularRow], column: &str) -> BatchResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("batch", %run_id, column);
        let _guard = span.enter();

        let limit = match self.config.max_rows {
            0 => rows.len(),
            max => max.min(rows.len()),
        };
        let selected = &rows[..limit];
        info!(
            rows = selected.len(),
            parallel = self.config.parallel,
            "Starting batch analysis"
        );

        let outcomes: Vec<RowOutcome> = if self.config.parallel {
            selected
                .par_iter()
                .enumerate()
                .map(|(i, row)| self.process_row(i, row, column))
                .collect()
        } else {
            selected
                .iter()
                .enumerate()
                .map(|(i, row)| self.process_row(i, row, column))
                .collect()
        };

        let mut analyzed = Vec::with_capacity(outcomes.len());
        let mut errors = Vec::new();
        let mut cancelled = false;
        for outcome in outcomes {
            match outcome {
                RowOutcome::Analyzed(row) => analyzed.push(row),
                RowOutcome::Failed(err) => {
                    warn!(row = err.row, kind = ?err.kind, "Row skipped: {}", err.message);
                    errors.push(err);
                }
                RowOutcome::Cancelled => cancelled = true,
            }
        }

        let counts: CategoryCounts = analyzed.iter().map(|r: &RowSentiment| r.category).collect();

        info!(
            analyzed = analyzed.len(),
            failed = errors.len(),
            positive = counts.positive,
            negative = counts.negative,
            neutral = counts.neutral,
            cancelled,
            "Batch analysis finished"
        );

        BatchResult {
            run_id,
            column: column.to_string(),
            rows: analyzed,
            counts,
            errors,
            input_rows: rows.len(),
            cancelled,
            analyzed_at: Utc::now(),
        }
    }

    fn process_row(&self, index: usize, row: &TabularRow, column: &str) -> RowOutcome {
        if self.cancel.is_cancelled() {
            return RowOutcome::Cancelled;
        }

        let cell = match row.get(column) {
            Some(cell) => cell,
            None => return RowOutcome::Failed(RowProcessingError::missing_column(index, column)),
        };

        let text = match cell.to_text() {
            Some(text) => text,
            None => return RowOutcome::Failed(RowProcessingError::undecodable(index, column)),
        };

        match self.analyzer.analyze(&text) {
            Ok(sentiment) => RowOutcome::Analyzed(RowSentiment {
                row: index,
                text,
                score: sentiment.score,
                category: sentiment.category,
            }),
            Err(e) => RowOutcome::Failed(RowProcessingError::scoring(index, column, &e)),
        }
    }
}
