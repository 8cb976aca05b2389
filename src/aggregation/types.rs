//! Core types for the aggregation builders

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Single-value and multi-value metrics aggregations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricsKind {
    Avg,
    Max,
    Min,
    Sum,
    ValueCount,
    Cardinality,
    Stats,
    ExtendedStats,
    Percentiles,
}

impl MetricsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsKind::Avg => "avg",
            MetricsKind::Max => "max",
            MetricsKind::Min => "min",
            MetricsKind::Sum => "sum",
            MetricsKind::ValueCount => "value_count",
            MetricsKind::Cardinality => "cardinality",
            MetricsKind::Stats => "stats",
            MetricsKind::ExtendedStats => "extended_stats",
            MetricsKind::Percentiles => "percentiles",
        }
    }
}

/// Bucket aggregations driven by a field or script
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Terms,
    Histogram,
    DateHistogram,
    Range,
    SignificantTerms,
}

impl BucketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKind::Terms => "terms",
            BucketKind::Histogram => "histogram",
            BucketKind::DateHistogram => "date_histogram",
            BucketKind::Range => "range",
            BucketKind::SignificantTerms => "significant_terms",
        }
    }
}

/// Pipeline aggregations reading other aggregations through `buckets_path`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    AvgBucket,
    SumBucket,
    MaxBucket,
    MinBucket,
    StatsBucket,
    Derivative,
    CumulativeSum,
    BucketScript,
    BucketSelector,
    SerialDiff,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::AvgBucket => "avg_bucket",
            PipelineKind::SumBucket => "sum_bucket",
            PipelineKind::MaxBucket => "max_bucket",
            PipelineKind::MinBucket => "min_bucket",
            PipelineKind::StatsBucket => "stats_bucket",
            PipelineKind::Derivative => "derivative",
            PipelineKind::CumulativeSum => "cumulative_sum",
            PipelineKind::BucketScript => "bucket_script",
            PipelineKind::BucketSelector => "bucket_selector",
            PipelineKind::SerialDiff => "serial_diff",
        }
    }
}

/// Path from a pipeline aggregation to the metrics it consumes
///
/// Either a single path (`"sales_per_month>sales"`) or named paths used as
/// script variables (`{ "my_var": "the_sum" }`). Not checked against the
/// aggregation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketsPath {
    Single(String),
    Multi(BTreeMap<String, String>),
}

impl BucketsPath {
    pub fn is_empty(&self) -> bool {
        match self {
            BucketsPath::Single(path) => path.is_empty(),
            BucketsPath::Multi(paths) => paths.is_empty(),
        }
    }
}

impl From<&str> for BucketsPath {
    fn from(path: &str) -> Self {
        BucketsPath::Single(path.to_string())
    }
}

impl From<String> for BucketsPath {
    fn from(path: String) -> Self {
        BucketsPath::Single(path)
    }
}

impl From<BTreeMap<String, String>> for BucketsPath {
    fn from(paths: BTreeMap<String, String>) -> Self {
        BucketsPath::Multi(paths)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for BucketsPath {
    fn from(paths: [(K, V); N]) -> Self {
        BucketsPath::Multi(
            paths
                .into_iter()
                .map(|(var, path)| (var.into(), path.into()))
                .collect(),
        )
    }
}

impl From<BucketsPath> for Value {
    fn from(path: BucketsPath) -> Self {
        match path {
            BucketsPath::Single(path) => Value::String(path),
            BucketsPath::Multi(paths) => Value::Object(
                paths
                    .into_iter()
                    .map(|(var, path)| (var, Value::String(path)))
                    .collect(),
            ),
        }
    }
}

/// Policies for gaps in the bucket series
pub const GAP_POLICIES: &[&str] = &["skip", "insert_zeros", "keep_values"];

/// Sort directions accepted by bucket `order`
pub const SORT_ORDERS: &[&str] = &["asc", "desc"];
