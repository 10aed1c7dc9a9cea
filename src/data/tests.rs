//! Unit tests for the data module

use super::*;
use crate::config::BatchConfig;
use crate::error::{RowErrorKind, SentimentError};
use crate::sentiment::scorer::MockLexiconScorer;
use crate::sentiment::{Category, DocumentAnalyzer, LexiconAnalyzer, LexiconScorer, SentimentScore};
use mockall::predicate::eq;
use std::sync::Arc;

fn row(cells: &[(&str, CellValue)]) -> TabularRow {
    cells
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn scripted_polarities(polarities: &[(&'static str, f64)]) -> Arc<dyn LexiconScorer> {
    let mut mock = MockLexiconScorer::new();
    for &(text, polarity) in polarities {
        mock.expect_score_text()
            .with(eq(text))
            .returning(move |_| Ok(SentimentScore::new(polarity, 0.5)));
    }
    Arc::new(mock)
}

fn aggregator(scorer: Arc<dyn LexiconScorer>, parallel: bool) -> BatchAggregator {
    BatchAggregator::new(
        DocumentAnalyzer::new(scorer),
        BatchConfig {
            parallel,
            max_rows: 0,
        },
    )
}

// ==================== Column detection ====================

#[test]
fn test_detect_first_string_column() {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
        Column::new("age", ColumnType::Integer),
    ]);
    assert_eq!(detect_text_column(&schema).map(|c| c.name.as_str()), Some("name"));
}

#[test]
fn test_detect_no_string_column() {
    let schema = Schema::new(vec![
        Column::new("a", ColumnType::Integer),
        Column::new("b", ColumnType::Integer),
    ]);
    assert!(detect_text_column(&schema).is_none());
}

#[test]
fn test_detect_is_first_match_and_stable() {
    let schema = Schema::new(vec![
        Column::new("score", ColumnType::Float),
        Column::new("title", ColumnType::Text),
        Column::new("review", ColumnType::Text),
    ]);
    for _ in 0..5 {
        assert_eq!(detect_text_column(&schema).unwrap().name, "title");
    }
}

#[test]
fn test_detect_ignores_non_text_types() {
    let schema = Schema::new(vec![
        Column::new("flag", ColumnType::Boolean),
        Column::new("blank", ColumnType::Empty),
        Column::new("ratio", ColumnType::Float),
    ]);
    assert!(detect_text_column(&schema).is_none());
    assert!(detect_text_column(&Schema::default()).is_none());
}

// ==================== CSV loading ====================

#[test]
fn test_csv_type_inference() {
    let data = "id,review,rating,verified,note\n\
                1,Great phone,4.5,true,\n\
                2,Battery died,2,FALSE,\n\
                3,,3.0,true,\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();

    let types: Vec<ColumnType> = table.schema.columns.iter().map(|c| c.dtype).collect();
    assert_eq!(
        types,
        vec![
            ColumnType::Integer,
            ColumnType::Text,
            ColumnType::Float,
            ColumnType::Boolean,
            ColumnType::Empty,
        ]
    );
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows[0]["id"], CellValue::Integer(1));
    assert_eq!(table.rows[0]["review"], CellValue::Text("Great phone".to_string()));
    assert_eq!(table.rows[1]["rating"], CellValue::Float(2.0));
    assert_eq!(table.rows[1]["verified"], CellValue::Boolean(false));
    assert_eq!(table.rows[2]["review"], CellValue::Null);
    assert_eq!(table.rows[0]["note"], CellValue::Null);
}

#[test]
fn test_csv_mixed_column_is_text() {
    let data = "code,value\n12,1\nA7,2\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(table.schema.column("code").unwrap().dtype, ColumnType::Text);
    assert_eq!(table.rows[0]["code"], CellValue::Text("12".to_string()));
    assert_eq!(detect_text_column(&table.schema).unwrap().name, "code");
}

#[test]
fn test_csv_quoted_fields() {
    let data = "id,comment\n1,\"Loved it, would buy again\"\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(
        table.rows[0]["comment"],
        CellValue::Text("Loved it, would buy again".to_string())
    );
}

#[test]
fn test_csv_malformed_cell() {
    let mut data = b"id,comment\n1,fine\n2,".to_vec();
    data.extend_from_slice(&[0xff, 0xfe]);
    data.push(b'\n');
    let table = Table::from_csv_reader(data.as_slice()).unwrap();

    assert_eq!(table.schema.column("comment").unwrap().dtype, ColumnType::Text);
    assert_eq!(table.rows[1]["comment"], CellValue::Malformed(vec![0xff, 0xfe]));
    assert!(table.rows[1]["comment"].to_text().is_none());
}

#[test]
fn test_csv_short_row_drops_cells() {
    let data = "id,comment\n1,ok\n2\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert!(!table.rows[1].contains_key("comment"));
}

#[test]
fn test_csv_missing_file() {
    let result = Table::from_csv_path("/nonexistent/reviews.csv");
    assert!(matches!(result, Err(SentimentError::Io(_))));
}

#[test]
fn test_csv_repeated_headers_are_renamed() {
    let data = "id,comment,comment,comment.1,comment\n1,love it,hate it,meh,fine\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    let names: Vec<&str> = table.schema.names().collect();
    assert_eq!(names, ["id", "comment", "comment.2", "comment.1", "comment.3"]);
    assert_eq!(table.rows[0]["comment"], CellValue::from("love it"));
    assert_eq!(table.rows[0]["comment.2"], CellValue::from("hate it"));
    assert_eq!(table.rows[0]["comment.1"], CellValue::from("meh"));
    assert_eq!(table.rows[0]["comment.3"], CellValue::from("fine"));
}

#[test]
fn test_repeated_text_column_analyzes_first_occurrence() {
    let data = "id,comment,comment\n1,love it,hate it\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    let names: Vec<&str> = table.schema.names().collect();
    assert_eq!(names, ["id", "comment", "comment.1"]);

    let detected = detect_text_column(&table.schema).unwrap();
    assert_eq!(detected.name, "comment");

    let result = aggregator(LexiconAnalyzer::shared(), false).analyze(&table.rows, &detected.name);
    assert_eq!(result.rows[0].text, "love it");
    assert_eq!(result.rows[0].category, Category::Positive);
}

#[test]
fn test_csv_headers_kept_as_written() {
    let data = "id, review\n1,good\n";
    let table = Table::from_csv_reader(data.as_bytes()).unwrap();
    assert!(table.schema.column(" review").is_some());
    assert!(table.schema.column("review").is_none());
    assert!(table.rows[0].contains_key(" review"));
}

#[test]
fn test_cell_to_text() {
    assert_eq!(CellValue::Null.to_text().unwrap(), "");
    assert_eq!(CellValue::from(42i64).to_text().unwrap(), "42");
    assert_eq!(CellValue::from(2.5).to_text().unwrap(), "2.5");
    assert_eq!(CellValue::from(3.0).to_text().unwrap(), "3.0");
    assert_eq!(CellValue::from(-0.5).to_text().unwrap(), "-0.5");
    assert_eq!(CellValue::from(true).to_text().unwrap(), "true");
    assert_eq!(CellValue::from("hi").to_text().unwrap(), "hi");
}

// ==================== Batch aggregation ====================

#[test]
fn test_batch_counts_and_order() {
    let scorer = scripted_polarities(&[("first", 0.5), ("second", -0.2), ("third", 0.0)]);
    let rows = vec![
        row(&[("text", "first".into())]),
        row(&[("text", "second".into())]),
        row(&[("text", "third".into())]),
    ];

    let result = aggregator(scorer, false).analyze(&rows, "text");

    assert_eq!(result.counts.get(Category::Positive), 1);
    assert_eq!(result.counts.get(Category::Negative), 1);
    assert_eq!(result.counts.get(Category::Neutral), 1);
    assert_eq!(result.counts.total(), 3);
    let order: Vec<&str> = result.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
    let categories: Vec<Category> = result.rows.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![Category::Positive, Category::Negative, Category::Neutral]
    );
    assert!(!result.has_errors());
    assert!(!result.cancelled);
    assert_eq!(result.column, "text");
}

#[test]
fn test_batch_parallel_matches_sequential() {
    let scorer = LexiconAnalyzer::shared();
    let texts = [
        "great service",
        "awful food",
        "the bus",
        "not bad at all",
        "I love it :)",
        "worst day ever",
        "",
        "fine",
    ];
    let rows: Vec<TabularRow> = texts
        .iter()
        .cycle()
        .take(200)
        .map(|t| row(&[("body", (*t).into())]))
        .collect();

    let sequential = aggregator(scorer.clone(), false).analyze(&rows, "body");
    let parallel = aggregator(scorer, true).analyze(&rows, "body");

    assert_eq!(sequential.rows, parallel.rows);
    assert_eq!(sequential.counts, parallel.counts);
    assert_eq!(parallel.analyzed(), 200);
    for (i, r) in parallel.rows.iter().enumerate() {
        assert_eq!(r.row, i);
    }
}

#[test]
fn test_batch_coerces_non_text_cells() {
    let scorer = scripted_polarities(&[("", 0.0), ("7", 0.0), ("1.5", 0.0), ("false", 0.0)]);
    let rows = vec![
        row(&[("c", CellValue::Null)]),
        row(&[("c", CellValue::Integer(7))]),
        row(&[("c", CellValue::Float(1.5))]),
        row(&[("c", CellValue::Boolean(false))]),
    ];

    let result = aggregator(scorer, true).analyze(&rows, "c");
    assert_eq!(result.analyzed(), 4);
    assert_eq!(result.counts.get(Category::Neutral), 4);
    assert_eq!(result.rows[1].text, "7");
}

#[test]
fn test_batch_isolates_row_failures() {
    let scorer = scripted_polarities(&[("good", 0.4), ("bad", -0.4)]);
    let rows = vec![
        row(&[("text", "good".into())]),
        row(&[("other", "missing".into())]),
        row(&[("text", CellValue::Malformed(vec![0xc3, 0x28]))]),
        row(&[("text", "bad".into())]),
    ];

    let result = aggregator(scorer, true).analyze(&rows, "text");

    assert_eq!(result.analyzed(), 2);
    assert_eq!(result.counts.total(), 2);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].row, 1);
    assert_eq!(result.errors[0].kind, RowErrorKind::MissingColumn);
    assert_eq!(result.errors[1].row, 2);
    assert_eq!(result.errors[1].kind, RowErrorKind::Undecodable);
    assert_eq!(result.rows[1].row, 3);
    assert_eq!(result.unprocessed(), 0);
}

#[test]
fn test_batch_scorer_error_is_row_error() {
    let mut mock = MockLexiconScorer::new();
    mock.expect_score_text()
        .with(eq("boom"))
        .returning(|_| Err(SentimentError::Input("cannot score".to_string())));
    mock.expect_score_text()
        .with(eq("ok"))
        .returning(|_| Ok(SentimentScore::new(0.2, 0.3)));
    let rows = vec![
        row(&[("t", "boom".into())]),
        row(&[("t", "ok".into())]),
    ];

    let result = aggregator(Arc::new(mock), false).analyze(&rows, "t");
    assert_eq!(result.analyzed(), 1);
    assert_eq!(result.errors[0].kind, RowErrorKind::Scoring);
    assert!(result.errors[0].message.contains("cannot score"));
}

#[test]
fn test_batch_empty_input() {
    let mut mock = MockLexiconScorer::new();
    mock.expect_score_text().never();
    let result = aggregator(Arc::new(mock), true).analyze(&[], "text");
    assert_eq!(result.analyzed(), 0);
    assert_eq!(result.counts.total(), 0);
    assert_eq!(result.input_rows, 0);
}

#[test]
fn test_batch_max_rows() {
    let rows: Vec<TabularRow> = (0..10)
        .map(|_| row(&[("text", "great".into())]))
        .collect();
    let batch = BatchAggregator::new(
        DocumentAnalyzer::new(LexiconAnalyzer::shared()),
        BatchConfig {
            parallel: false,
            max_rows: 4,
        },
    );

    let result = batch.analyze(&rows, "text");
    assert_eq!(result.analyzed(), 4);
    assert_eq!(result.input_rows, 10);
    assert_eq!(result.unprocessed(), 6);
    assert!(!result.cancelled);
}

#[test]
fn test_batch_cancellation() {
    let flag = CancellationFlag::new();
    let batch = aggregator(LexiconAnalyzer::shared(), true).with_cancellation(flag.clone());
    flag.cancel();

    let rows = vec![row(&[("text", "great".into())]); 5];
    let result = batch.analyze(&rows, "text");
    assert!(result.cancelled);
    assert_eq!(result.analyzed(), 0);
    assert!(result.errors.is_empty());
    assert_eq!(result.unprocessed(), 5);
}

#[test]
fn test_batch_cancel_midway() {
    let flag = CancellationFlag::new();
    let trigger = flag.clone();
    let mut mock = MockLexiconScorer::new();
    mock.expect_score_text().returning(move |text| {
        if text == "stop" {
            trigger.cancel();
        }
        Ok(SentimentScore::new(0.1, 0.1))
    });
    let batch = aggregator(Arc::new(mock), false).with_cancellation(flag);

    let rows = vec![
        row(&[("t", "a".into())]),
        row(&[("t", "stop".into())]),
        row(&[("t", "b".into())]),
        row(&[("t", "c".into())]),
    ];
    let result = batch.analyze(&rows, "t");
    assert!(result.cancelled);
    assert_eq!(result.analyzed(), 2);
    assert_eq!(result.counts.total(), 2);
}

#[test]
fn test_batch_result_serialization() {
    let rows = vec![row(&[("text", "great".into())])];
    let result = aggregator(LexiconAnalyzer::shared(), false).analyze(&rows, "text");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["counts"]["positive"], 1);
    assert_eq!(json["rows"][0]["category"], "Positive");
    assert_eq!(json["column"], "text");
}
