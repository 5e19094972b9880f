//! Rendering of analysis results.
//!
//! Three formatters share the [`AnalysisFormatter`] trait:
//!
//! - [`HumanFormatter`]: console text, optionally colorized
//! - [`MarkdownFormatter`]: headings and tables for reports
//! - [`JsonFormatter`]: the camelCase serde shape, pretty or compact
//!
//! # Examples
//!
//! ```rust
//! use grid_insight::analysis::analyze;
//! use grid_insight::formatters::{AnalysisFormatter, FormatterConfig, HumanFormatter};
//! use grid_insight::grid::Grid;
//!
//! let grid = Grid::from_json_str(r#"[["a"], [1], [2]]"#).unwrap();
//! let analysis = analyze(&grid, "Sheet1");
//!
//! let text = HumanFormatter::with_config(FormatterConfig::minimal())
//!     .format(&analysis)
//!     .unwrap();
//! assert!(text.contains("Rows: 2"));
//! ```

use std::fmt::Write;

use serde_json::{json, Value};

use crate::analysis::DatasetAnalysis;
use crate::analyzers::insights::{Insight, Severity};
use crate::error::Result;
use crate::grid::CellValue;

/// Configuration options for rendering an analysis.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the per-column profile table
    pub include_columns: bool,
    /// Include the generated insights
    pub include_insights: bool,
    /// Include healthcare metrics when present
    pub include_healthcare: bool,
    /// Maximum number of insights to show; `None` shows all
    pub max_insights: Option<usize>,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_columns: true,
            include_insights: true,
            include_healthcare: true,
            max_insights: None,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Only the row and column counts.
    pub fn minimal() -> Self {
        Self {
            include_columns: false,
            include_insights: false,
            include_healthcare: false,
            max_insights: Some(0),
            use_colors: false,
        }
    }

    /// Everything, without colors, with a bounded insight list.
    pub fn ci() -> Self {
        Self {
            max_insights: Some(50),
            use_colors: false,
            ..Self::default()
        }
    }

    /// Sets whether to include the column table.
    pub fn with_columns(mut self, include: bool) -> Self {
        self.include_columns = include;
        self
    }

    /// Sets whether to include insights.
    pub fn with_insights(mut self, include: bool) -> Self {
        self.include_insights = include;
        self
    }

    /// Sets whether to include healthcare metrics.
    pub fn with_healthcare(mut self, include: bool) -> Self {
        self.include_healthcare = include;
        self
    }

    /// Sets the maximum number of insights to show.
    pub fn with_max_insights(mut self, max: Option<usize>) -> Self {
        self.max_insights = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn visible_insights<'a>(&self, insights: &'a [Insight]) -> &'a [Insight] {
        if !self.include_insights {
            return &[];
        }
        match self.max_insights {
            Some(max) => &insights[..max.min(insights.len())],
            None => insights,
        }
    }
}

/// Trait for rendering a [`DatasetAnalysis`] into text.
///
/// # Examples
///
/// ```rust
/// use grid_insight::analysis::DatasetAnalysis;
/// use grid_insight::formatters::AnalysisFormatter;
///
/// struct RowCount;
///
/// impl AnalysisFormatter for RowCount {
///     fn format(&self, analysis: &DatasetAnalysis) -> grid_insight::error::Result<String> {
///         Ok(format!("{} rows", analysis.total_rows))
///     }
/// }
///
/// assert_eq!(RowCount.format(&DatasetAnalysis::empty()).unwrap(), "0 rows");
/// ```
pub trait AnalysisFormatter {
    /// Formats an analysis with the formatter's own configuration.
    fn format(&self, analysis: &DatasetAnalysis) -> Result<String>;

    /// Formats an analysis with an explicit configuration.
    fn format_with_config(
        &self,
        analysis: &DatasetAnalysis,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(analysis)
    }
}

/// Formats an analysis as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for JsonFormatter {
    fn format(&self, analysis: &DatasetAnalysis) -> Result<String> {
        self.format_with_config(analysis, &self.config)
    }

    fn format_with_config(
        &self,
        analysis: &DatasetAnalysis,
        config: &FormatterConfig,
    ) -> Result<String> {
        let value = filtered_json(analysis, config)?;
        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

/// Drops the sections the configuration excludes from the serde shape.
fn filtered_json(analysis: &DatasetAnalysis, config: &FormatterConfig) -> Result<Value> {
    let mut value = serde_json::to_value(analysis)?;
    if let Value::Object(map) = &mut value {
        if !config.include_columns {
            map.remove("columns");
        }
        if config.include_insights {
            let shown = config.visible_insights(&analysis.insights);
            map.insert("insights".to_string(), serde_json::to_value(shown)?);
            if shown.len() < analysis.insights.len() {
                map.insert(
                    "omittedInsights".to_string(),
                    json!(analysis.insights.len() - shown.len()),
                );
            }
        } else {
            map.remove("insights");
        }
        if !config.include_healthcare {
            map.remove("healthcareMetrics");
        }
    }
    Ok(value)
}

/// Formats an analysis for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for HumanFormatter {
    fn format(&self, analysis: &DatasetAnalysis) -> Result<String> {
        self.format_with_config(analysis, &self.config)
    }

    fn format_with_config(
        &self,
        analysis: &DatasetAnalysis,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "📊 Dataset Analysis")?;
        writeln!(output, "   Rows: {}", analysis.total_rows)?;
        writeln!(output, "   Columns: {}", analysis.total_columns)?;

        if config.include_columns && !analysis.columns.is_empty() {
            writeln!(output)?;
            writeln!(output, "🧾 Columns:")?;
            for profile in &analysis.columns {
                writeln!(
                    output,
                    "   {} ({}) unique: {}, empty: {}, samples: {}",
                    profile.name,
                    profile.column_type,
                    profile.unique_count,
                    profile.null_count,
                    join_samples(&profile.sample_values)
                )?;
            }
        }

        let shown = config.visible_insights(&analysis.insights);
        if !shown.is_empty() {
            writeln!(output)?;
            writeln!(output, "🔍 Insights:")?;
            for insight in shown {
                let symbol = severity_symbol(insight.severity, config.use_colors);
                writeln!(output, "   {symbol} {}", insight.title)?;
                writeln!(output, "      {}", insight.description)?;
                if let Some(value) = &insight.value {
                    writeln!(output, "      Value: {value}")?;
                }
            }
            if shown.len() < analysis.insights.len() {
                writeln!(
                    output,
                    "   ... and {} more insights",
                    analysis.insights.len() - shown.len()
                )?;
            }
        }

        if config.include_healthcare {
            if let Some(metrics) = &analysis.healthcare_metrics {
                writeln!(output)?;
                writeln!(output, "🏥 Healthcare Metrics:")?;
                if let Some(volume) = metrics.patient_volume {
                    writeln!(output, "   Patient Volume: {volume}")?;
                }
                if let Some(wait) = metrics.average_wait_time {
                    writeln!(output, "   Average Wait Time: {wait:.1}")?;
                }
                if let Some(peaks) = &metrics.peak_hours {
                    writeln!(output, "   Peak Hours: {}", peaks.join(", "))?;
                }
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}

fn severity_symbol(severity: Option<Severity>, use_colors: bool) -> &'static str {
    match (severity, use_colors) {
        (Some(Severity::High), true) => "\x1b[31m🚨\x1b[0m",
        (Some(Severity::High), false) => "🚨",
        (Some(Severity::Medium), true) => "\x1b[33m⚠️\x1b[0m",
        (Some(Severity::Medium), false) => "⚠️",
        (Some(Severity::Low), true) => "\x1b[34mℹ️\x1b[0m",
        (Some(Severity::Low), false) => "ℹ️",
        (None, _) => "•",
    }
}

fn join_samples(samples: &[CellValue]) -> String {
    samples
        .iter()
        .map(CellValue::render)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats an analysis as Markdown.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level, clamped to 1..=5 so subsections stay valid.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for MarkdownFormatter {
    fn format(&self, analysis: &DatasetAnalysis) -> Result<String> {
        self.format_with_config(analysis, &self.config)
    }

    fn format_with_config(
        &self,
        analysis: &DatasetAnalysis,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let h = "#".repeat(self.heading_level as usize);
        let sub = "#".repeat(self.heading_level as usize + 1);

        writeln!(output, "{h} Dataset Analysis")?;
        writeln!(output)?;
        writeln!(output, "- **Rows:** {}", analysis.total_rows)?;
        writeln!(output, "- **Columns:** {}", analysis.total_columns)?;

        if config.include_columns && !analysis.columns.is_empty() {
            writeln!(output)?;
            writeln!(output, "{sub} Columns")?;
            writeln!(output)?;
            writeln!(output, "| Name | Type | Unique | Empty | Samples |")?;
            writeln!(output, "|------|------|--------|-------|---------|")?;
            for profile in &analysis.columns {
                writeln!(
                    output,
                    "| {} | {} | {} | {} | {} |",
                    escape_cell(&profile.name),
                    profile.column_type,
                    profile.unique_count,
                    profile.null_count,
                    escape_cell(&join_samples(&profile.sample_values))
                )?;
            }
        }

        let shown = config.visible_insights(&analysis.insights);
        if !shown.is_empty() {
            writeln!(output)?;
            writeln!(output, "{sub} Insights")?;
            writeln!(output)?;
            for insight in shown {
                match insight.severity {
                    Some(severity) => writeln!(
                        output,
                        "- **{}** ({}, {severity}): {}",
                        insight.title, insight.kind, insight.description
                    )?,
                    None => writeln!(
                        output,
                        "- **{}** ({}): {}",
                        insight.title, insight.kind, insight.description
                    )?,
                }
            }
            if shown.len() < analysis.insights.len() {
                writeln!(
                    output,
                    "- _{} more insights omitted_",
                    analysis.insights.len() - shown.len()
                )?;
            }
        }

        if config.include_healthcare {
            if let Some(metrics) = &analysis.healthcare_metrics {
                writeln!(output)?;
                writeln!(output, "{sub} Healthcare Metrics")?;
                writeln!(output)?;
                if let Some(volume) = metrics.patient_volume {
                    writeln!(output, "- **Patient Volume:** {volume}")?;
                }
                if let Some(wait) = metrics.average_wait_time {
                    writeln!(output, "- **Average Wait Time:** {wait:.1}")?;
                }
                if let Some(peaks) = &metrics.peak_hours {
                    writeln!(output, "- **Peak Hours:** {}", peaks.join(", "))?;
                }
            }
        }

        Ok(output)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
