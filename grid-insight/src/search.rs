//! Multi-term substring search over data rows.
//!
//! A query is split on whitespace into lower-cased terms. A row matches when
//! any term occurs in the row's cells joined by single spaces, compared
//! case-insensitively. There is no ranking or stemming; a blank query returns
//! the rows unchanged.
//!
//! # Example
//!
//! ```rust
//! use grid_insight::grid::CellValue;
//! use grid_insight::search::search;
//!
//! let rows = vec![
//!     vec![CellValue::from("wait"), CellValue::from("5")],
//!     vec![CellValue::from("foo"), CellValue::from("bar")],
//! ];
//!
//! assert_eq!(search(&rows, "WAIT"), vec![rows[0].clone()]);
//! assert_eq!(search(&rows, "  "), rows);
//! ```

use tracing::{debug, instrument};

use crate::grid::Row;

/// A pre-tokenized query, reusable across many rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatcher {
    terms: Vec<String>,
}

impl SearchMatcher {
    /// Tokenizes a query into lower-cased terms.
    pub fn new(query: &str) -> Self {
        Self {
            terms: query
                .split_whitespace()
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// Lower-cased query terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when the query has no terms and therefore matches everything.
    pub fn is_blank(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if any term occurs in the row text.
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_blank() {
            return true;
        }
        let haystack = row_text(row);
        self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }

    /// Keeps the matching rows, preserving order.
    #[instrument(skip(self, rows), fields(rows = rows.len(), terms = self.terms.len()))]
    pub fn filter(&self, rows: &[Row]) -> Vec<Row> {
        if self.is_blank() {
            return rows.to_vec();
        }
        let matched: Vec<Row> = rows.iter().filter(|row| self.matches(row)).cloned().collect();
        debug!(matched = matched.len(), "Filtered rows");
        matched
    }
}

/// Lower-cased cell text joined by single spaces.
fn row_text(row: &Row) -> String {
    row.iter()
        .map(|cell| cell.render())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Filters rows by a whitespace-separated query, matching any term.
pub fn search(rows: &[Row], query: &str) -> Vec<Row> {
    SearchMatcher::new(query).filter(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValue;

    fn rows() -> Vec<Row> {
        vec![
            vec!["Alice".into(), "Cardiology".into(), 42.into()],
            vec!["Bob".into(), "Radiology".into(), CellValue::Empty],
            vec!["Carol".into(), "Emergency".into(), true.into()],
        ]
    }

    #[test]
    fn test_blank_query_is_identity() {
        let rows = rows();
        assert_eq!(search(&rows, ""), rows);
        assert_eq!(search(&rows, " \t\n "), rows);
    }

    #[test]
    fn test_single_term_case_insensitive() {
        let rows = rows();
        assert_eq!(search(&rows, "CARDIO"), vec![rows[0].clone()]);
    }

    #[test]
    fn test_terms_are_or_combined() {
        let rows = rows();
        assert_eq!(
            search(&rows, "bob carol"),
            vec![rows[1].clone(), rows[2].clone()]
        );
    }

    #[test]
    fn test_empty_cells_do_not_match_text() {
        let rows = rows();
        assert!(search(&rows, "null").is_empty());
        assert!(search(&rows, "undefined").is_empty());
    }

    #[test]
    fn test_numbers_and_booleans_are_searchable() {
        let rows = rows();
        assert_eq!(search(&rows, "42"), vec![rows[0].clone()]);
        assert_eq!(search(&rows, "TRUE"), vec![rows[2].clone()]);
    }

    #[test]
    fn test_no_match() {
        assert!(search(&rows(), "oncology").is_empty());
    }

    #[test]
    fn test_matcher_tokenization() {
        let matcher = SearchMatcher::new("  Wait   TIME ");
        assert_eq!(matcher.terms(), &["wait".to_string(), "time".to_string()]);
        assert!(!matcher.is_blank());
        assert!(SearchMatcher::new("").is_blank());
    }

    #[test]
    fn test_filters_to_matching_row() {
        let rows = vec![
            vec![CellValue::from("wait"), CellValue::from("5")],
            vec![CellValue::from("foo"), CellValue::from("bar")],
        ];
        assert_eq!(search(&rows, "wait"), vec![rows[0].clone()]);
    }
}
