//! End-to-end tests for the analysis façade, search and chart building.

use grid_insight::analysis::{analyze, prepare_chart_data, search, Analyzer, DatasetAnalysis};
use grid_insight::analyzers::insights::{InsightKind, InsightValue, Severity};
use grid_insight::analyzers::profiler::ColumnType;
use grid_insight::analyzers::statistics::StatisticalAnalyzer;
use grid_insight::chart::ChartPoint;
use grid_insight::config::AnalysisConfig;
use grid_insight::error::InsightError;
use grid_insight::grid::{CellValue, Grid, Row};

fn grid(json: &str) -> Grid {
    Grid::from_json_str(json).unwrap()
}

fn text_rows(rows: &[&[&str]]) -> Vec<Row> {
    rows.iter()
        .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
        .collect()
}

#[test]
fn test_columns_match_headers_and_rows() {
    let grid = grid(
        r#"[["id", "name", "score", "notes"],
            [1, "Ada", 90.5, null],
            [2, "Grace", "88", "late"],
            [3, "Linus"],
            [4, "Barbara", 77, ""]]"#,
    );
    let analysis = analyze(&grid, "Scores");

    assert_eq!(analysis.total_rows, 4);
    assert_eq!(analysis.total_columns, 4);
    assert_eq!(analysis.columns.len(), grid.headers().len());

    for (idx, profile) in analysis.columns.iter().enumerate() {
        let non_empty = grid
            .rows()
            .iter()
            .filter(|row| row.get(idx).is_some_and(|cell| !cell.is_empty()))
            .count();
        assert_eq!(profile.null_count + non_empty, analysis.total_rows);
    }
}

#[test]
fn test_type_classification_examples() {
    let numeric = analyze(&grid(r#"[["n"], ["1"], ["2"], ["3"]]"#), "S");
    assert_eq!(numeric.columns[0].column_type, ColumnType::Numeric);

    let free_text = analyze(
        &grid(r#"[["comment"], ["first visit"], ["follow-up"], ["referred"], ["discharged home"]]"#),
        "S",
    );
    assert_eq!(free_text.columns[0].column_type, ColumnType::Text);

    // 15 distinct of 20 is below the unique cap but not below half the rows
    let mut rows: Vec<Vec<serde_json::Value>> = vec![vec!["code".into()]];
    for i in 0..20 {
        rows.push(vec![format!("c{}", i % 15).into()]);
    }
    let json = serde_json::to_string(&rows).unwrap();
    let fifteen = analyze(&grid(&json), "S");
    assert_eq!(fifteen.columns[0].unique_count, 15);
    assert_eq!(fifteen.columns[0].column_type, ColumnType::Text);

    // 9 distinct of 20 is categorical
    let mut rows: Vec<Vec<serde_json::Value>> = vec![vec!["code".into()]];
    for i in 0..20 {
        rows.push(vec![format!("c{}", i % 9).into()]);
    }
    let json = serde_json::to_string(&rows).unwrap();
    let nine = analyze(&grid(&json), "S");
    assert_eq!(nine.columns[0].column_type, ColumnType::Categorical);
}

#[test]
fn test_header_only_grid_has_summary() {
    let analysis = analyze(&grid(r#"[["only"]]"#), "Blank");
    assert_eq!(analysis.total_rows, 0);
    assert_eq!(analysis.insights.len(), 1);

    let summary = &analysis.insights[0];
    assert_eq!(summary.kind, InsightKind::Summary);
    assert_eq!(summary.title, "Dataset Overview");
    assert_eq!(
        summary.description,
        "Sheet \"Blank\" contains 0 rows and 1 columns."
    );
}

#[test]
fn test_empty_grid_is_zero_valued() {
    let analysis = analyze(&grid("[]"), "Nothing");
    assert_eq!(analysis, DatasetAnalysis::empty());
}

#[test]
fn test_outlier_insight_end_to_end() {
    let mut json = String::from(r#"[["wait"]"#);
    for _ in 0..30 {
        json.push_str(", [10]");
    }
    json.push_str(", [1000]]");
    let analysis = analyze(&grid(&json), "Waits");

    let anomaly = analysis
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::Anomaly)
        .expect("outlier should be reported");
    assert_eq!(anomaly.value, Some(InsightValue::Number(1.0)));
    assert_eq!(anomaly.severity, Some(Severity::Low));
    assert_eq!(anomaly.metric.as_deref(), Some("wait"));
}

#[test]
fn test_five_value_column_has_no_outlier() {
    let summary = StatisticalAnalyzer::new()
        .summarize(&[10.0, 10.0, 10.0, 10.0, 1000.0])
        .unwrap();
    assert!(summary.outliers.is_empty());

    let analysis = analyze(&grid(r#"[["v"], [10], [10], [10], [10], [1000]]"#), "S");
    assert!(analysis
        .insights
        .iter()
        .all(|i| i.kind != InsightKind::Anomaly));
}

#[test]
fn test_missing_data_alert_comes_first() {
    let analysis = analyze(
        &grid(
            r#"[["id", "email", "phone"],
                [1, "a@x.org", null], [2, null, null], [3, null, "555"], [4, "d@x.org", null]]"#,
        ),
        "Contacts",
    );

    assert_eq!(analysis.insights[0].kind, InsightKind::Alert);
    assert_eq!(
        analysis.insights[0].description,
        "2 column(s) have more than 30% missing values: email, phone"
    );
    assert_eq!(
        analysis.insights.last().map(|i| i.kind),
        Some(InsightKind::Summary)
    );
}

#[test]
fn test_healthcare_metrics_detection() {
    let clinical = analyze(
        &grid(
            r#"[["Patient ID", "Wait Time", "Arrival"],
                ["A1", 15, "08:05"], ["A2", 25, "08:35"], ["A3", 20, "11:20"]]"#,
        ),
        "ER",
    );
    let metrics = clinical.healthcare_metrics.expect("clinical sheet");
    assert_eq!(metrics.patient_volume, Some(3));
    assert_eq!(metrics.average_wait_time, Some(20.0));
    assert!(metrics.department_utilization.is_none());
    assert!(metrics.critical_alerts.is_none());

    let retail = analyze(
        &grid(r#"[["sku", "price", "stock"], ["x1", 2.5, 10], ["x2", 4.0, 3]]"#),
        "Retail",
    );
    assert!(retail.healthcare_metrics.is_none());
    let json = serde_json::to_value(&retail).unwrap();
    assert!(json.get("healthcareMetrics").is_none());
}

#[test]
fn test_peak_hours_from_time_column() {
    let analysis = analyze(
        &grid(
            r#"[["Arrival", "n"],
                ["07:10", 1], ["14:05", 2], ["14:55", 3], ["7:40", 4], ["14:20", 5]]"#,
        ),
        "Arrivals",
    );
    let metrics = analysis.healthcare_metrics.unwrap();
    assert_eq!(metrics.peak_hours, Some(vec!["14:00 - 15:00".to_string()]));
}

#[test]
fn test_search_examples() {
    let rows = text_rows(&[&["wait", "5"], &["foo", "bar"]]);
    assert_eq!(search(&rows, "wait"), text_rows(&[&["wait", "5"]]));
    assert_eq!(search(&rows, ""), rows);
    assert_eq!(search(&rows, "BAR wait"), rows);
}

#[test]
fn test_chart_caps_on_large_sheets() {
    let mut json = String::from(r#"[["day", "visits", "ward"]"#);
    for i in 0..400 {
        json.push_str(&format!(
            r#", ["2024-{:02}-{:02}", {}, "w{}"]"#,
            i % 12 + 1,
            i % 28 + 1,
            i + 1,
            i % 3
        ));
    }
    json.push(']');
    let grid = grid(&json);
    let analysis = analyze(&grid, "Visits");

    let points = prepare_chart_data(&analysis.columns, grid.rows());
    assert_eq!(points.len(), 50);
    assert!(points
        .iter()
        .all(|p| matches!(p, ChartPoint::TimeSeries { .. })));
}

#[test]
fn test_category_chart_group_cap() {
    let mut json = String::from(r#"[["group", "amount"]"#);
    for i in 0..1000 {
        json.push_str(&format!(r#", ["g{}", {}]"#, i % 19, i % 50 + 1));
    }
    json.push(']');
    let grid = grid(&json);
    let analysis = analyze(&grid, "Groups");
    assert_eq!(analysis.columns[0].column_type, ColumnType::Categorical);

    let analyzer = Analyzer::with_config(
        AnalysisConfig::builder()
            .max_category_groups(20)
            .build()
            .unwrap(),
    );
    let points = analyzer.prepare_chart_data(&analysis.columns, grid.rows());
    assert_eq!(points.len(), 19);
    let total: usize = points
        .iter()
        .map(|p| match p {
            ChartPoint::Category { count, .. } => *count,
            ChartPoint::TimeSeries { .. } => 0,
        })
        .sum();
    assert_eq!(total, 1000);
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(matches!(
        Grid::from_json_str(r#"{"not": "a grid"}"#),
        Err(InsightError::InvalidGrid(_))
    ));
    assert!(matches!(
        Grid::from_json_str(r#"[["a"], "oops"]"#),
        Err(InsightError::InvalidGrid(_))
    ));
    assert!(matches!(
        Grid::from_json_str("[[1,"),
        Err(InsightError::Serialization(_))
    ));
}
