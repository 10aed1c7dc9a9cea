//! Tabular data module
//!
//! - Typed tables loaded from CSV
//! - Text column detection over a schema
//! - Batch aggregation of document sentiment across rows

pub mod aggregator;
pub mod detector;
pub mod table;

#[cfg(test)]
mod tests;

pub use aggregator::{BatchAggregator, BatchResult, CancellationFlag, RowSentiment};
pub use detector::detect_text_column;
pub use table::{CellValue, Column, ColumnType, Schema, TabularRow, Table};
