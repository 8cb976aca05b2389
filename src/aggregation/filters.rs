//! Filters aggregation - one bucket per named query

use crate::base::node::impl_serialize_via_json;
use crate::base::{
    AggregationNode, DslNode, NodeCategory, NodeRef, OptionValue, QueryRef,
};
use crate::error::DslError;
use crate::Result;
use serde_json::Value;

use super::base::{AggregationCore, AggregationOptions, SubAggregations};

const CONSTRUCT: &str = "filters";

/// Multi-bucket aggregation where each bucket is defined by a query
///
/// ```json
/// {
///   "messages": {
///     "filters": {
///       "filters": {
///         "errors": { "match": { "body": { "query": "error" } } },
///         "warnings": { "match": { "body": { "query": "warning" } } }
///       },
///       "other_bucket_key": "other"
///     }
///   }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct FiltersAggregation {
    core: AggregationCore,
}

impl FiltersAggregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: AggregationCore::new(name, CONSTRUCT),
        }
    }

    /// Add a named bucket; a repeated name replaces the earlier query
    pub fn filter(mut self, bucket: impl Into<String>, query: impl Into<QueryRef>) -> Self {
        self.core
            .options_mut()
            .map_entry("filters")
            .set_node(bucket, query.into().into_node());
        self
    }

    /// Add several named buckets
    pub fn filters<I, K, Q>(self, buckets: I) -> Self
    where
        I: IntoIterator<Item = (K, Q)>,
        K: Into<String>,
        Q: Into<QueryRef>,
    {
        buckets
            .into_iter()
            .fold(self, |agg, (bucket, query)| agg.filter(bucket, query))
    }

    /// Add a named bucket from a type-erased node
    ///
    /// Fails with `InvalidNodeType` when `node` is not a query.
    pub fn try_filter(self, bucket: impl Into<String>, node: NodeRef) -> Result<Self> {
        let query = QueryRef::check(node, CONSTRUCT, "filters")?;
        Ok(self.filter(bucket, query))
    }

    /// Add a bucket for documents matching none of the filters
    pub fn other_bucket(mut self, enable: bool) -> Self {
        self.core.options_mut().set("other_bucket", enable);
        self
    }

    /// Key of the other bucket; implies `other_bucket`
    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.core.options_mut().set("other_bucket_key", key.into());
        self
    }
}

impl AggregationOptions for FiltersAggregation {
    fn core(&self) -> &AggregationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AggregationCore {
        &mut self.core
    }
}

impl SubAggregations for FiltersAggregation {}

impl DslNode for FiltersAggregation {
    fn category(&self) -> NodeCategory {
        NodeCategory::Aggregation
    }

    fn node_type(&self) -> String {
        self.core.agg_type().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        match self.core.options().get("filters") {
            Some(OptionValue::Map(buckets)) if !buckets.is_empty() => self.core.to_json(),
            _ => Err(DslError::MissingRequiredField {
                construct: CONSTRUCT.to_string(),
                field: "filters",
            }),
        }
    }
}

impl AggregationNode for FiltersAggregation {}

impl_serialize_via_json!(FiltersAggregation);
