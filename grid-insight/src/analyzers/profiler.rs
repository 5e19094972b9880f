//! Column profiling: semantic type detection and cardinality statistics.
//!
//! Each column is profiled from its non-empty values. Type detection is ratio
//! based so a few stray cells do not flip a column's type; the tests run in a
//! fixed precedence order and the first one to reach its threshold wins:
//!
//! 1. **numeric**: at least 80% of values coerce to a finite number
//! 2. **date**: at least 80% look like `D-M-Y` / `Y-M-D` (`-` or `/` separated)
//! 3. **time**: at least 80% look like `H:MM[:SS][ AM/PM]`
//! 4. **boolean**: at least 80% are one of `true/false/yes/no/1/0`
//! 5. **categorical**: fewer than 20 distinct values, and fewer distinct values
//!    than half the non-empty count
//! 6. **text**: everything else, including columns with no values at all
//!
//! # Example
//!
//! ```rust
//! use grid_insight::analyzers::profiler::{ColumnProfiler, ColumnType};
//! use grid_insight::grid::Grid;
//!
//! let grid = Grid::from_json_str(r#"[["qty", "when"], ["1", "2024-01-05"], [2, "2024-01-06"]]"#).unwrap();
//! let profiles = ColumnProfiler::new().profile(grid.headers(), grid.rows());
//!
//! assert_eq!(profiles[0].column_type, ColumnType::Numeric);
//! assert_eq!(profiles[1].column_type, ColumnType::Date);
//! ```

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{AnalysisConfig, DEFAULT_SAMPLE_LIMIT};
use crate::grid::{cell_at, CellValue, Row, ValueKey};
use crate::log_column;
use crate::logging::{truncate_field, LogConfig};

/// Share of non-empty values that must match a type test.
pub const TYPE_MATCH_RATIO: f64 = 0.8;

/// Distinct-value count a categorical column must stay below.
pub const CATEGORICAL_MAX_UNIQUE: usize = 20;

/// Distinct-to-non-empty ratio a categorical column must stay below.
pub const CATEGORICAL_MAX_UNIQUE_RATIO: f64 = 0.5;

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Date,
    Time,
    Boolean,
    Categorical,
    Text,
}

impl ColumnType {
    /// Lower-case name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::Boolean => "boolean",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred type and basic statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    /// Header label
    pub name: String,
    /// Detected semantic type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// First non-empty values in row order, not deduplicated
    pub sample_values: Vec<CellValue>,
    /// Number of distinct non-empty values
    pub unique_count: usize,
    /// Number of rows where the column is empty or missing
    pub null_count: usize,
}

impl ColumnProfile {
    /// Fraction of rows where the column is empty. Zero for an empty dataset.
    pub fn null_ratio(&self, total_rows: usize) -> f64 {
        if total_rows == 0 {
            0.0
        } else {
            self.null_count as f64 / total_rows as f64
        }
    }

    /// True when the column was classified as numeric.
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

/// Pattern matching utilities for type detection
struct TypePatterns {
    date: Regex,
    time: Regex,
}

impl TypePatterns {
    fn new() -> Self {
        Self {
            date: Regex::new(r"^\d{1,4}[-/]\d{1,4}[-/]\d{1,4}(?:[T\s].*)?$")
                .expect("date pattern is valid"),
            time: Regex::new(r"(?i)^\d{1,2}:\d{2}(:\d{2})?(\s?(AM|PM))?$")
                .expect("time pattern is valid"),
        }
    }
}

static PATTERNS: Lazy<TypePatterns> = Lazy::new(TypePatterns::new);

/// Returns true if the text looks like a loose numeric date.
pub fn looks_like_date(value: &str) -> bool {
    PATTERNS.date.is_match(value)
}

/// Returns true if the text looks like a clock time.
pub fn looks_like_time(value: &str) -> bool {
    PATTERNS.time.is_match(value)
}

fn looks_like_boolean(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "1" | "0"
    )
}

/// Type detection statistics for a single column
#[derive(Debug, Default, Clone)]
pub struct TypeStats {
    pub total_rows: usize,
    pub non_empty: usize,
    pub numeric_matches: usize,
    pub date_matches: usize,
    pub time_matches: usize,
    pub boolean_matches: usize,
    pub unique_values: HashSet<ValueKey>,
}

impl TypeStats {
    /// Collects statistics over one column's cells, in row order.
    pub fn collect<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut stats = Self::default();
        for cell in cells {
            stats.record(cell);
        }
        stats
    }

    /// Records a single cell.
    pub fn record(&mut self, cell: &CellValue) {
        self.total_rows += 1;
        if cell.is_empty() {
            return;
        }

        self.non_empty += 1;
        self.unique_values.insert(cell.key());

        if cell.as_number().is_some() {
            self.numeric_matches += 1;
        }

        let rendered = cell.render();
        let rendered = rendered.trim();
        if looks_like_date(rendered) {
            self.date_matches += 1;
        }
        if looks_like_time(rendered) {
            self.time_matches += 1;
        }
        if looks_like_boolean(rendered) {
            self.boolean_matches += 1;
        }
    }

    /// Rows where the column is empty.
    pub fn null_count(&self) -> usize {
        self.total_rows - self.non_empty
    }

    fn ratio(&self, matches: usize) -> f64 {
        matches as f64 / self.non_empty as f64
    }

    /// Picks the column type from the collected statistics.
    pub fn detect_type(&self) -> ColumnType {
        if self.non_empty == 0 {
            return ColumnType::Text;
        }

        let unique = self.unique_values.len();
        if self.ratio(self.numeric_matches) >= TYPE_MATCH_RATIO {
            ColumnType::Numeric
        } else if self.ratio(self.date_matches) >= TYPE_MATCH_RATIO {
            ColumnType::Date
        } else if self.ratio(self.time_matches) >= TYPE_MATCH_RATIO {
            ColumnType::Time
        } else if self.ratio(self.boolean_matches) >= TYPE_MATCH_RATIO {
            ColumnType::Boolean
        } else if unique < CATEGORICAL_MAX_UNIQUE
            && (unique as f64) < self.non_empty as f64 * CATEGORICAL_MAX_UNIQUE_RATIO
        {
            ColumnType::Categorical
        } else {
            ColumnType::Text
        }
    }
}

/// Builder for [`ColumnProfiler`]
#[derive(Debug, Clone)]
pub struct ColumnProfilerBuilder {
    sample_limit: usize,
    log: LogConfig,
}

impl ColumnProfilerBuilder {
    /// Set how many sample values each profile keeps
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Build the ColumnProfiler
    pub fn build(self) -> ColumnProfiler {
        ColumnProfiler {
            sample_limit: self.sample_limit,
            log: self.log,
        }
    }
}

/// Profiles every column of a grid.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    sample_limit: usize,
    log: LogConfig,
}

impl ColumnProfiler {
    /// Create a new builder for ColumnProfiler
    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            log: LogConfig::default(),
        }
    }

    /// Create a ColumnProfiler with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a ColumnProfiler matching an analysis configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::builder()
            .sample_limit(config.sample_limit)
            .log_config(config.log.clone())
            .build()
    }

    /// Profiles one column per header position.
    ///
    /// Rows shorter than the header contribute empty cells for the missing
    /// positions; cells past the last header are ignored.
    #[instrument(skip_all, fields(columns = headers.len(), rows = rows.len()))]
    pub fn profile(&self, headers: &[String], rows: &[Row]) -> Vec<ColumnProfile> {
        let profiles: Vec<ColumnProfile> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| self.profile_column(name, idx, rows))
            .collect();

        debug!(columns = profiles.len(), "Profiled columns");
        profiles
    }

    /// Profiles the column at `column` across all rows.
    pub fn profile_column(&self, name: &str, column: usize, rows: &[Row]) -> ColumnProfile {
        let cells = rows.iter().map(|row| cell_at(row, column));
        let stats = TypeStats::collect(cells.clone());
        let column_type = stats.detect_type();

        let sample_values: Vec<CellValue> = cells
            .filter(|cell| !cell.is_empty())
            .take(self.sample_limit)
            .cloned()
            .collect();

        log_column!(
            self.log,
            column = name,
            column_type = column_type.as_str(),
            unique = stats.unique_values.len(),
            nulls = stats.null_count(),
            first_sample = %truncate_field(
                &sample_values.first().map(CellValue::render).unwrap_or_default(),
                self.log.max_field_length,
            ),
            "Profiled column"
        );

        ColumnProfile {
            name: name.to_string(),
            column_type,
            sample_values,
            unique_count: stats.unique_values.len(),
            null_count: stats.null_count(),
        }
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}
