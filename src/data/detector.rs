//! Text column detection

use super::table::{Column, Schema};

/// First column, in declared order, whose type is string-like.
///
/// First match rather than best match, so the same schema always yields the
/// same column. `None` means the table has no text to analyze.
pub fn detect_text_column(schema: &Schema) -> Option<&Column> {
    schema.columns.iter().find(|c| c.dtype.is_string_like())
}
