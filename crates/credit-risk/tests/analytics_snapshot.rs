//! Analytics catalog served from exported CSV snapshots.

use std::fs;
use std::path::PathBuf;

use credit_risk::analytics::{
    catalog, correlation_insight, AnalyticsQuery, CorrelationStrength, QueryExecutor,
    SnapshotQueryExecutor,
};
use serde_json::Value;

fn export_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "credit-risk-analytics-export-{name}-{}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create export dir");
    dir
}

#[test]
fn every_catalog_entry_reads_its_own_snapshot() {
    let dir = export_dir("catalog");
    for query in AnalyticsQuery::ALL {
        fs::write(
            dir.join(format!("{}.csv", query.key())),
            format!("query,rows\n{},1\n", query.key()),
        )
        .expect("write snapshot");
    }

    let executor = SnapshotQueryExecutor::from_dir(&dir);
    for descriptor in catalog() {
        let query = AnalyticsQuery::from_key(descriptor.key).expect("catalog key resolves");
        let result = executor.execute(query).expect("snapshot loads");
        assert_eq!(result.first_value("query"), Some(&Value::from(descriptor.key)));
    }

    fs::remove_dir_all(dir).ok();
}

#[test]
fn unemployment_snapshot_yields_a_notable_reading() {
    let dir = export_dir("notable");
    fs::write(
        dir.join("unemployment_correlation.csv"),
        "Correlation\n-0.215\n",
    )
    .expect("write snapshot");

    let result = SnapshotQueryExecutor::from_dir(&dir)
        .execute(AnalyticsQuery::UnemploymentCorrelation)
        .expect("snapshot loads");
    let insight = correlation_insight(AnalyticsQuery::UnemploymentCorrelation, &result)
        .expect("numeric correlation");

    assert_eq!(insight.value, -0.215);
    assert_eq!(insight.strength, CorrelationStrength::Notable);

    fs::remove_dir_all(dir).ok();
}
