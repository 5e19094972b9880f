//! Configuration for analysis runs.
//!
//! Only presentation-side limits are configurable. Classification thresholds
//! live as constants next to the code that applies them, since changing them
//! changes which type a column gets and which insights fire.

use crate::error::{InsightError, Result};
use crate::logging::LogConfig;

/// Default number of sample values kept per column profile.
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

/// Default cap on time-series chart points.
pub const DEFAULT_MAX_TIME_SERIES_POINTS: usize = 50;

/// Default cap on categorical chart groups.
pub const DEFAULT_MAX_CATEGORY_GROUPS: usize = 20;

/// Configuration for an [`Analyzer`](crate::analysis::Analyzer).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of non-empty sample values kept per column (default: 5)
    pub sample_limit: usize,
    /// Maximum number of time-series chart points (default: 50)
    pub max_time_series_points: usize,
    /// Maximum number of categorical chart groups (default: 20)
    pub max_category_groups: usize,
    /// Logging behaviour for the run
    pub log: LogConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            max_time_series_points: DEFAULT_MAX_TIME_SERIES_POINTS,
            max_category_groups: DEFAULT_MAX_CATEGORY_GROUPS,
            log: LogConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a builder starting from the default configuration.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }

    /// Checks that every limit admits at least one item.
    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(InsightError::invalid_config(
                "sample_limit must be at least 1",
            ));
        }
        if self.max_time_series_points == 0 {
            return Err(InsightError::invalid_config(
                "max_time_series_points must be at least 1",
            ));
        }
        if self.max_category_groups == 0 {
            return Err(InsightError::invalid_config(
                "max_category_groups must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Clone)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set the number of sample values kept per column
    pub fn sample_limit(mut self, limit: usize) -> Self {
        self.config.sample_limit = limit;
        self
    }

    /// Set the cap on time-series chart points
    pub fn max_time_series_points(mut self, max: usize) -> Self {
        self.config.max_time_series_points = max;
        self
    }

    /// Set the cap on categorical chart groups
    pub fn max_category_groups(mut self, max: usize) -> Self {
        self.config.max_category_groups = max;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.config.log = log;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_limit, 5);
        assert_eq!(config.max_time_series_points, 50);
        assert_eq!(config.max_category_groups, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::builder()
            .sample_limit(3)
            .max_time_series_points(10)
            .max_category_groups(4)
            .log_config(LogConfig::verbose())
            .build()
            .unwrap();

        assert_eq!(config.sample_limit, 3);
        assert_eq!(config.max_time_series_points, 10);
        assert_eq!(config.max_category_groups, 4);
        assert!(config.log.log_column_details);
    }

    #[test]
    fn test_builder_rejects_zero_limits() {
        assert!(AnalysisConfig::builder().sample_limit(0).build().is_err());
        assert!(AnalysisConfig::builder()
            .max_time_series_points(0)
            .build()
            .is_err());
        assert!(matches!(
            AnalysisConfig::builder().max_category_groups(0).build(),
            Err(InsightError::Configuration(_))
        ));
    }
}
