//! Metrics aggregations - compute values over the aggregated documents

use crate::base::node::impl_serialize_via_json;
use crate::base::{AggregationNode, DslNode, NodeCategory};
use crate::Result;
use serde_json::Value;

use super::base::{AggregationCore, AggregationOptions, SubAggregations, ValueSourceOptions};
use super::types::MetricsKind;

/// Metrics aggregation over a field or script
///
/// ```json
/// { "max_price": { "max": { "field": "price" } } }
/// ```
#[derive(Clone, Debug)]
pub struct MetricsAggregation {
    kind: MetricsKind,
    core: AggregationCore,
}

impl MetricsAggregation {
    /// Create a metrics aggregation; `None` leaves the field unset
    pub fn new(name: impl Into<String>, kind: MetricsKind, field: Option<&str>) -> Self {
        let agg = Self {
            kind,
            core: AggregationCore::new(name, kind.as_str()),
        };
        match field {
            Some(field) => agg.field(field),
            None => agg,
        }
    }

    /// Average of the extracted values
    pub fn avg(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Avg, field)
    }

    /// Maximum of the extracted values
    pub fn max(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Max, field)
    }

    /// Minimum of the extracted values
    pub fn min(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Min, field)
    }

    /// Sum of the extracted values
    pub fn sum(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Sum, field)
    }

    /// Number of extracted values
    pub fn value_count(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::ValueCount, field)
    }

    /// Approximate count of distinct values
    pub fn cardinality(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Cardinality, field)
    }

    /// min, max, sum, count and avg in one aggregation
    pub fn stats(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Stats, field)
    }

    /// stats plus variance, std deviation and bounds
    pub fn extended_stats(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::ExtendedStats, field)
    }

    /// Percentiles over the extracted values
    pub fn percentiles(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, MetricsKind::Percentiles, field)
    }

    pub fn kind(&self) -> MetricsKind {
        self.kind
    }

    /// Counts below this threshold are close to exact (cardinality)
    pub fn precision_threshold(mut self, threshold: u32) -> Self {
        self.core.options_mut().set("precision_threshold", threshold);
        self
    }

    /// Percentiles to compute (percentiles)
    pub fn percents(mut self, percents: impl IntoIterator<Item = f64>) -> Self {
        let percents: Vec<Value> = percents.into_iter().map(Value::from).collect();
        self.core.options_mut().set("percents", percents);
        self
    }

    /// Standard deviations for the bounds (extended_stats)
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.core.options_mut().set("sigma", sigma);
        self
    }

    /// Return results as a keyed object (percentiles)
    pub fn keyed(mut self, keyed: bool) -> Self {
        self.core.options_mut().set("keyed", keyed);
        self
    }

    /// Set an arbitrary plain option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.core.options_mut().set(key, value);
        self
    }
}

impl AggregationOptions for MetricsAggregation {
    fn core(&self) -> &AggregationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AggregationCore {
        &mut self.core
    }
}

impl ValueSourceOptions for MetricsAggregation {}
impl SubAggregations for MetricsAggregation {}

impl DslNode for MetricsAggregation {
    fn category(&self) -> NodeCategory {
        NodeCategory::Aggregation
    }

    fn node_type(&self) -> String {
        self.core.agg_type().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        self.core.to_json()
    }
}

impl AggregationNode for MetricsAggregation {}

impl_serialize_via_json!(MetricsAggregation);
