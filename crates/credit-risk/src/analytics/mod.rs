//! Read-only exploratory analytics over the historical banking schema.

pub mod catalog;
pub mod executor;
pub mod insights;
pub mod router;


pub use catalog::{catalog, AnalyticsQuery, QueryDescriptor};
pub use executor::{
    AnalyticsError, QueryExecutor, QueryResult, SnapshotQueryExecutor, UnconfiguredExecutor,
};
pub use insights::{
    correlation_insight, CorrelationInsight, CorrelationStrength, NEGLIGIBLE_CORRELATION,
};
pub use router::{analytics_router, AnalyticsResponse};
