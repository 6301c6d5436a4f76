use serde::Serialize;

use super::catalog::AnalyticsQuery;
use super::executor::QueryResult;

/// Correlations weaker than this are reported as practically zero.
pub const NEGLIGIBLE_CORRELATION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Negligible,
    Notable,
}

impl CorrelationStrength {
    pub fn classify(value: f64) -> Self {
        if value.abs() < NEGLIGIBLE_CORRELATION {
            CorrelationStrength::Negligible
        } else {
            CorrelationStrength::Notable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationInsight {
    pub value: f64,
    pub strength: CorrelationStrength,
}

/// Reading attached to the unemployment correlation result, when it holds a number.
pub fn correlation_insight(
    query: AnalyticsQuery,
    result: &QueryResult,
) -> Option<CorrelationInsight> {
    if query != AnalyticsQuery::UnemploymentCorrelation {
        return None;
    }
    let value = result.first_value("correlation")?.as_f64()?;
    Some(CorrelationInsight {
        value,
        strength: CorrelationStrength::classify(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn single_value(column: &str, value: Value) -> QueryResult {
        QueryResult {
            columns: vec![column.to_string()],
            rows: vec![vec![value]],
        }
    }

    #[test]
    fn weak_correlations_are_negligible() {
        assert_eq!(CorrelationStrength::classify(0.0), CorrelationStrength::Negligible);
        assert_eq!(CorrelationStrength::classify(-0.099), CorrelationStrength::Negligible);
        assert_eq!(CorrelationStrength::classify(0.1), CorrelationStrength::Notable);
        assert_eq!(CorrelationStrength::classify(-0.42), CorrelationStrength::Notable);
    }

    #[test]
    fn insight_reads_the_correlation_column() {
        let result = single_value("Correlation", Value::from(0.027));
        let insight = correlation_insight(AnalyticsQuery::UnemploymentCorrelation, &result)
            .expect("numeric correlation");

        assert_eq!(insight.value, 0.027);
        assert_eq!(insight.strength, CorrelationStrength::Negligible);
    }

    #[test]
    fn other_queries_carry_no_insight() {
        let result = single_value("correlation", Value::from(0.5));
        assert!(correlation_insight(AnalyticsQuery::DurationCorrelation, &result).is_none());

        let empty = single_value("correlation", Value::Null);
        assert!(correlation_insight(AnalyticsQuery::UnemploymentCorrelation, &empty).is_none());
    }
}
