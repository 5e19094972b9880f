//! Heuristic healthcare metrics derived from column names and types.
//!
//! Metrics are only produced when the sheet carries a domain signal: a column
//! name mentioning patients, admissions, discharges, waits, times or durations,
//! or any column typed as a date or time. Without a signal the extractor
//! returns `None`, which is the common case for non-clinical sheets.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::profiler::{ColumnProfile, ColumnType};
use crate::analyzers::statistics::numeric_values;
use crate::grid::{cell_at, Row};

/// Column-name fragments that mark a sheet as patient-flow data.
pub const PATIENT_FLOW_TERMS: [&str; 3] = ["patient", "admission", "discharge"];

/// Column-name fragments that mark a sheet as carrying timing data.
pub const TIMING_TERMS: [&str; 3] = ["wait", "time", "duration"];

static CLOCK_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):\d{2}").expect("clock pattern is valid"));

/// Summary figures for healthcare-style sheets.
///
/// `department_utilization` and `critical_alerts` are part of the shape but no
/// heuristic fills them; absence means "not computed", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_volume: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_wait_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hours: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_utilization: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_alerts: Option<usize>,
}

/// Derives [`HealthcareMetrics`] from profiles and rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthcareMetricExtractor;

impl HealthcareMetricExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if any column name or type carries a domain signal.
    pub fn has_domain_signal(&self, profiles: &[ColumnProfile]) -> bool {
        profiles.iter().any(|profile| {
            let name = profile.name.to_lowercase();
            PATIENT_FLOW_TERMS.iter().any(|term| name.contains(term))
                || TIMING_TERMS.iter().any(|term| name.contains(term))
                || matches!(profile.column_type, ColumnType::Date | ColumnType::Time)
        })
    }

    /// Extracts metrics, or `None` when the sheet has no domain signal.
    #[instrument(skip_all, fields(columns = profiles.len(), rows = rows.len()))]
    pub fn extract(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Option<HealthcareMetrics> {
        if !self.has_domain_signal(profiles) {
            debug!("No healthcare signal in column names or types");
            return None;
        }

        let metrics = HealthcareMetrics {
            patient_volume: Some(rows.len()),
            average_wait_time: self.average_wait_time(profiles, rows),
            peak_hours: self.peak_hours(profiles, rows),
            ..HealthcareMetrics::default()
        };

        debug!(
            patient_volume = rows.len(),
            has_wait_time = metrics.average_wait_time.is_some(),
            has_peak_hours = metrics.peak_hours.is_some(),
            "Extracted healthcare metrics"
        );
        Some(metrics)
    }

    /// Mean of the first numeric column whose name mentions a wait.
    fn average_wait_time(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Option<f64> {
        let column = profiles.iter().position(|profile| {
            profile.is_numeric() && profile.name.to_lowercase().contains("wait")
        })?;

        let values = numeric_values(rows, column);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Busiest clock hour of the first time-like column, as `"H:00 - H+1:00"`.
    ///
    /// Ties go to the hour seen first.
    fn peak_hours(&self, profiles: &[ColumnProfile], rows: &[Row]) -> Option<Vec<String>> {
        let column = profiles.iter().position(|profile| {
            profile.column_type == ColumnType::Time || profile.name.to_lowercase().contains("time")
        })?;

        let mut counts: HashMap<u32, usize> = HashMap::new();
        let mut first_seen: Vec<u32> = Vec::new();
        for row in rows {
            let Some(hour) = clock_hour(&cell_at(row, column).render()) else {
                continue;
            };
            let count = counts.entry(hour).or_insert(0);
            if *count == 0 {
                first_seen.push(hour);
            }
            *count += 1;
        }

        let mut peak: Option<(u32, usize)> = None;
        for hour in first_seen {
            let count = counts[&hour];
            if peak.map_or(true, |(_, best)| count > best) {
                peak = Some((hour, count));
            }
        }

        peak.map(|(hour, _)| vec![format!("{hour}:00 - {}:00", hour + 1)])
    }
}

/// Extracts the hour from the first `H:MM` occurrence in a value.
pub fn clock_hour(value: &str) -> Option<u32> {
    CLOCK_HOUR
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|hour| hour.as_str().parse().ok())
}
