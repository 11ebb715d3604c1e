//! Result types for query execution

use serde::Serialize;

use crate::dataset::{Dataset, Row};

/// A previewed row with its dataset position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub row: Row,
}

/// Outcome of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Raw query as received
    pub original_query: String,
    /// Distinct normalized tokens in first-occurrence order
    pub tokens: Vec<String>,
    /// Tokens no clause could consume; non-empty means nothing was scanned
    pub uncovered_tokens: Vec<String>,
    pub match_count: usize,
    /// Accepted row positions, ascending
    pub matched_rows: Vec<usize>,
    /// First matched rows by position
    pub preview: Vec<ResultRow>,
    pub scanned_rows: usize,
    pub scan_skipped: bool,
}

impl QueryResult {
    /// Result of a query that was never scanned
    pub fn skipped(query: &str, tokens: Vec<String>, uncovered_tokens: Vec<String>) -> Self {
        Self {
            original_query: query.to_string(),
            tokens,
            uncovered_tokens,
            match_count: 0,
            matched_rows: Vec::new(),
            preview: Vec::new(),
            scanned_rows: 0,
            scan_skipped: true,
        }
    }

    /// Result of a completed scan; previews the first `preview_limit` rows
    pub fn scanned(
        query: &str,
        tokens: Vec<String>,
        matched_rows: Vec<usize>,
        scanned_rows: usize,
        dataset: &Dataset,
        preview_limit: usize,
    ) -> Self {
        let preview = matched_rows
            .iter()
            .take(preview_limit)
            .filter_map(|&index| {
                dataset.get(index).map(|row| ResultRow {
                    index,
                    row: row.clone(),
                })
            })
            .collect();

        Self {
            original_query: query.to_string(),
            tokens,
            uncovered_tokens: Vec::new(),
            match_count: matched_rows.len(),
            matched_rows,
            preview,
            scanned_rows,
            scan_skipped: false,
        }
    }

    /// Returns true if no rows matched
    pub fn is_empty(&self) -> bool {
        self.matched_rows.is_empty()
    }

    /// Renders the result as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FieldValue;

    fn dataset() -> Dataset {
        (0..5)
            .map(|i| Row::new(vec![FieldValue::Integer(i)]))
            .collect()
    }

    #[test]
    fn test_skipped_result() {
        let result = QueryResult::skipped("zzz", vec!["zzz".into()], vec!["zzz".into()]);
        assert!(result.scan_skipped);
        assert!(result.is_empty());
        assert_eq!(result.scanned_rows, 0);
    }

    #[test]
    fn test_preview_limited() {
        let result = QueryResult::scanned("q", vec!["q".into()], vec![0, 2, 4], 5, &dataset(), 2);
        assert_eq!(result.match_count, 3);
        assert_eq!(result.preview.len(), 2);
        assert_eq!(result.preview[1].index, 2);
        assert_eq!(result.preview[1].row.get(0), Some(&FieldValue::Integer(2)));
    }

    #[test]
    fn test_json_shape() {
        let result = QueryResult::scanned("q", vec!["q".into()], vec![1], 5, &dataset(), 10);
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["match_count"], 1);
        assert_eq!(json["preview"][0]["index"], 1);
        assert_eq!(json["preview"][0]["row"][0], 1);
        assert_eq!(json["scan_skipped"], false);
    }
}
