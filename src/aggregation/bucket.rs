//! Bucket aggregations - group documents into buckets

use crate::base::node::impl_serialize_via_json;
use crate::base::util::check_one_of;
use crate::base::{AggregationNode, DslNode, NodeCategory};
use crate::Result;
use serde_json::{Map, Value};

use super::base::{AggregationCore, AggregationOptions, SubAggregations, ValueSourceOptions};
use super::types::{BucketKind, SORT_ORDERS};

/// Bucket aggregation over a field or script
///
/// ```json
/// {
///   "genres": {
///     "terms": { "field": "genre", "size": 5 },
///     "aggs": { "avg_price": { "avg": { "field": "price" } } }
///   }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct BucketAggregation {
    kind: BucketKind,
    core: AggregationCore,
    ranges: Vec<Value>,
}

impl BucketAggregation {
    /// Create a bucket aggregation; `None` leaves the field unset
    pub fn new(name: impl Into<String>, kind: BucketKind, field: Option<&str>) -> Self {
        let agg = Self {
            kind,
            core: AggregationCore::new(name, kind.as_str()),
            ranges: Vec::new(),
        };
        match field {
            Some(field) => agg.field(field),
            None => agg,
        }
    }

    /// One bucket per unique value
    pub fn terms(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, BucketKind::Terms, field)
    }

    /// Fixed-width numeric buckets
    pub fn histogram(name: impl Into<String>, field: Option<&str>, interval: Option<f64>) -> Self {
        let agg = Self::new(name, BucketKind::Histogram, field);
        match interval {
            Some(interval) => agg.interval(interval),
            None => agg,
        }
    }

    /// Date buckets
    pub fn date_histogram(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, BucketKind::DateHistogram, field)
    }

    /// Buckets for caller-defined ranges
    pub fn range(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, BucketKind::Range, field)
    }

    /// Unusually frequent terms
    pub fn significant_terms(name: impl Into<String>, field: Option<&str>) -> Self {
        Self::new(name, BucketKind::SignificantTerms, field)
    }

    pub fn kind(&self) -> BucketKind {
        self.kind
    }

    /// Number of buckets returned
    pub fn size(mut self, size: u32) -> Self {
        self.core.options_mut().set("size", size);
        self
    }

    /// Number of candidates each shard returns
    pub fn shard_size(mut self, size: u32) -> Self {
        self.core.options_mut().set("shard_size", size);
        self
    }

    /// Only return buckets with at least this many documents
    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.core.options_mut().set("min_doc_count", count);
        self
    }

    /// Bucket width (histogram) or legacy interval (date_histogram)
    pub fn interval(mut self, interval: impl Into<Value>) -> Self {
        self.core.options_mut().set("interval", interval);
        self
    }

    /// Calendar-aware interval, e.g. `"month"` (date_histogram)
    pub fn calendar_interval(mut self, interval: impl Into<String>) -> Self {
        self.core
            .options_mut()
            .set("calendar_interval", interval.into());
        self
    }

    /// Fixed interval, e.g. `"90m"` (date_histogram)
    pub fn fixed_interval(mut self, interval: impl Into<String>) -> Self {
        self.core.options_mut().set("fixed_interval", interval.into());
        self
    }

    /// Sort buckets by `key` (`_count`, `_key` or a sub-aggregation path)
    ///
    /// `direction` is `asc` or `desc`. Repeated calls add sort keys.
    pub fn order(mut self, key: impl Into<String>, direction: &str) -> Result<Self> {
        let direction = check_one_of(direction, SORT_ORDERS, self.kind.as_str(), "order")?;
        self.core.options_mut().map_entry("order").set(key, direction);
        Ok(self)
    }

    /// Return buckets as an object keyed by bucket key
    pub fn keyed(mut self, keyed: bool) -> Self {
        self.core.options_mut().set("keyed", keyed);
        self
    }

    /// Add a range bucket; `None` leaves that end open (range)
    pub fn add_range(mut self, from: Option<f64>, to: Option<f64>, key: Option<&str>) -> Self {
        let mut range = Map::new();
        if let Some(key) = key {
            range.insert("key".to_string(), Value::from(key));
        }
        if let Some(from) = from {
            range.insert("from".to_string(), Value::from(from));
        }
        if let Some(to) = to {
            range.insert("to".to_string(), Value::from(to));
        }
        self.ranges.push(Value::Object(range));
        self.core.options_mut().set("ranges", self.ranges.clone());
        self
    }

    /// Set an arbitrary plain option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.core.options_mut().set(key, value);
        self
    }
}

impl AggregationOptions for BucketAggregation {
    fn core(&self) -> &AggregationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AggregationCore {
        &mut self.core
    }
}

impl ValueSourceOptions for BucketAggregation {}
impl SubAggregations for BucketAggregation {}

impl DslNode for BucketAggregation {
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

impl AggregationNode for BucketAggregation {}

impl_serialize_via_json!(BucketAggregation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::MetricsAggregation;
    use crate::error::DslError;
    use crate::query::Query;
    use crate::base::NodeRef;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_terms_with_sub_aggregations() {
        let agg = BucketAggregation::terms("genres", Some("genre"))
            .size(5)
            .agg(MetricsAggregation::avg("avg_price", Some("price")))
            .agg(MetricsAggregation::max("max_price", Some("price")));
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "genres": {
                    "terms": { "field": "genre", "size": 5 },
                    "aggs": {
                        "avg_price": { "avg": { "field": "price" } },
                        "max_price": { "max": { "field": "price" } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_duplicate_child_name_keeps_last() {
        let agg = BucketAggregation::terms("genres", Some("genre"))
            .agg(MetricsAggregation::avg("stat", Some("price")))
            .agg(MetricsAggregation::sum("stat", Some("quantity")));
        assert_eq!(agg.core().children().len(), 2);
        assert_eq!(
            agg.to_json().unwrap()["genres"]["aggs"],
            json!({ "stat": { "sum": { "field": "quantity" } } })
        );
    }

    #[test]
    fn test_order() {
        let agg = BucketAggregation::terms("genres", Some("genre"))
            .order("_count", "DESC")
            .unwrap()
            .order("_key", "asc")
            .unwrap();
        assert_eq!(
            agg.to_json().unwrap()["genres"]["terms"]["order"],
            json!({ "_count": "desc", "_key": "asc" })
        );

        let err = BucketAggregation::terms("genres", Some("genre"))
            .order("_count", "up")
            .unwrap_err();
        assert!(matches!(err, DslError::InvalidParameter { param: "order", .. }));
    }

    #[test]
    fn test_histogram_interval() {
        let agg = BucketAggregation::histogram("prices", Some("price"), Some(50.0))
            .min_doc_count(1);
        assert_eq!(
            agg.to_json().unwrap(),
            json!({ "prices": { "histogram": { "field": "price", "interval": 50.0, "min_doc_count": 1 } } })
        );
    }

    #[test]
    fn test_date_histogram() {
        let agg = BucketAggregation::date_histogram("sales_over_time", Some("date"))
            .calendar_interval("month")
            .format("yyyy-MM-dd")
            .unwrap();
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "sales_over_time": {
                    "date_histogram": {
                        "field": "date",
                        "calendar_interval": "month",
                        "format": "yyyy-MM-dd"
                    }
                }
            })
        );
    }

    #[test]
    fn test_ranges() {
        let agg = BucketAggregation::range("price_ranges", Some("price"))
            .add_range(None, Some(100.0), None)
            .add_range(Some(100.0), Some(200.0), Some("mid"))
            .add_range(Some(200.0), None, None);
        assert_eq!(
            agg.to_json().unwrap()["price_ranges"]["range"]["ranges"],
            json!([
                { "to": 100.0 },
                { "key": "mid", "from": 100.0, "to": 200.0 },
                { "from": 200.0 }
            ])
        );
    }

    #[test]
    fn test_try_agg_rejects_query() {
        let query: NodeRef = Arc::new(Query::match_all());
        let err = BucketAggregation::terms("genres", Some("genre"))
            .try_agg(query)
            .unwrap_err();
        assert!(matches!(
            err,
            DslError::InvalidNodeType { expected: "aggregation", actual: "query", .. }
        ));
    }
}
