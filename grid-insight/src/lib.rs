//! # grid-insight - Typed knowledge from untyped spreadsheet grids
//!
//! grid-insight takes a decoded sheet (a header row followed by rows of mixed
//! scalars) and derives:
//!
//! - a semantic type and cardinality profile for every column
//! - human-readable insights: missing data, outliers and a dataset overview
//! - healthcare summary metrics when column names or types suggest clinical data
//! - multi-term row search
//! - one bounded, chart-ready series
//!
//! Every analysis is a pure, synchronous transformation of an in-memory grid.
//! There is no shared state, so independent sheets can be analyzed in parallel.
//!
//! ## Quick Start
//!
//! ```rust
//! use grid_insight::prelude::*;
//!
//! # fn main() -> grid_insight::error::Result<()> {
//! let grid = Grid::from_json_str(
//!     r#"[
//!         ["patient", "department", "wait"],
//!         ["P-1", "ER", 12],
//!         ["P-2", "ICU", 30],
//!         ["P-3", "ER", 18],
//!         ["P-4", "ER", 6],
//!         ["P-5", "ICU", 24]
//!     ]"#,
//! )?;
//!
//! let analysis = analyze(&grid, "Triage");
//! assert_eq!(analysis.total_rows, 5);
//! assert_eq!(analysis.columns[1].column_type, ColumnType::Categorical);
//! assert_eq!(analysis.insights.last().map(|i| i.kind), Some(InsightKind::Summary));
//!
//! let chart = prepare_chart_data(&analysis.columns, grid.rows());
//! assert_eq!(chart.len(), 2);
//!
//! let er_rows = search(grid.rows(), "er");
//! assert_eq!(er_rows.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`grid`]: the cell tagged union and the header/row split
//! - [`analyzers`]: column profiler, statistics, healthcare metrics, insight rules
//! - [`search`] and [`chart`]: row filtering and chart aggregation
//! - [`analysis`]: the one-call façade tying the pieces together
//! - [`formatters`]: human, Markdown and JSON rendering of results
//! - [`config`], [`logging`], [`error`]: ambient configuration and plumbing
//!
//! ## Logging
//!
//! The crate emits `tracing` spans and events. Embedding applications can
//! install a subscriber with [`logging::setup::init_logging`]; per-column and
//! per-rule detail logs are gated by [`logging::LogConfig`].

pub mod analysis;
pub mod analyzers;
pub mod chart;
pub mod config;
pub mod error;
pub mod formatters;
pub mod grid;
pub mod logging;
pub mod prelude;
pub mod search;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
