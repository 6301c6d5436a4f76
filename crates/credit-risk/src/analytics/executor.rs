use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Number, Value};

use super::catalog::AnalyticsQuery;

/// Tabular result of one analytics query: column names plus row tuples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// First-row value of a column, matched case-insensitively like unquoted SQL identifiers.
    pub fn first_value(&self, column: &str) -> Option<&Value> {
        let index = self
            .columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))?;
        self.rows.first().and_then(|row| row.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Capability that executes one of the fixed named queries.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, query: AnalyticsQuery) -> Result<QueryResult, AnalyticsError>;
}

/// Error enumeration for analytics lookups.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("unknown analytics query `{0}`")]
    UnknownQuery(String),
    #[error("no snapshot recorded for query `{query}` at {path}")]
    MissingSnapshot { query: AnalyticsQuery, path: String },
    #[error("failed to read snapshot for query `{query}`: {source}")]
    Snapshot {
        query: AnalyticsQuery,
        #[source]
        source: csv::Error,
    },
    #[error("analytics source unavailable: {0}")]
    Unavailable(String),
}

/// Executor used when no analytics source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredExecutor;

impl QueryExecutor for UnconfiguredExecutor {
    fn execute(&self, _query: AnalyticsQuery) -> Result<QueryResult, AnalyticsError> {
        Err(AnalyticsError::Unavailable(
            "no analytics snapshot directory configured".to_string(),
        ))
    }
}

/// Serves query results exported to `<dir>/<query key>.csv`.
///
/// Files are read on every call, so refreshed exports are picked up without a restart.
#[derive(Debug, Clone)]
pub struct SnapshotQueryExecutor {
    dir: PathBuf,
}

impl SnapshotQueryExecutor {
    pub fn from_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self, query: AnalyticsQuery) -> PathBuf {
        self.dir.join(format!("{}.csv", query.key()))
    }
}

impl QueryExecutor for SnapshotQueryExecutor {
    fn execute(&self, query: AnalyticsQuery) -> Result<QueryResult, AnalyticsError> {
        let path = self.snapshot_path(query);
        let file = File::open(&path).map_err(|_| AnalyticsError::MissingSnapshot {
            query,
            path: path.display().to_string(),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let columns: Vec<String> = reader
            .headers()
            .map_err(|source| AnalyticsError::Snapshot { query, source })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| AnalyticsError::Snapshot { query, source })?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        Ok(QueryResult { columns, rows })
    }
}

fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    match raw.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}
