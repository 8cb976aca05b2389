//! Constant score query - wraps a filter and scores every hit with the boost

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::{DslNode, NodeCategory, NodeRef, Options, QueryNode, QueryRef};
use crate::query::ast::QueryOptions;
use crate::Result;
use serde_json::Value;

const CONSTRUCT: &str = "constant_score";

/// Query where every document matching the inner filter gets a constant
/// score equal to the query boost
///
/// ```json
/// { "constant_score": { "filter": { "term": { "user": "kimchy" } }, "boost": 1.2 } }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConstantScoreQuery {
    options: Options,
}

impl ConstantScoreQuery {
    /// Create a constant score query, optionally with its filter
    pub fn new(filter: Option<QueryRef>) -> Self {
        let query = Self::default();
        match filter {
            Some(filter) => query.filter(filter),
            None => query,
        }
    }

    /// Set the query to apply a constant score to
    pub fn filter(mut self, filter: impl Into<QueryRef>) -> Self {
        self.options.set_node("filter", filter.into().into_node());
        self
    }

    /// Alias for [`filter`](Self::filter)
    pub fn query(self, filter: impl Into<QueryRef>) -> Self {
        self.filter(filter)
    }

    /// Set the filter from a type-erased node
    ///
    /// Fails with `InvalidNodeType` when `node` is not a query.
    pub fn try_filter(self, node: NodeRef) -> Result<Self> {
        Ok(self.filter(QueryRef::check(node, CONSTRUCT, "filter")?))
    }
}

impl QueryOptions for ConstantScoreQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for ConstantScoreQuery {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        CONSTRUCT.to_string()
    }

    fn to_json(&self) -> Result<Value> {
        Ok(keyed(CONSTRUCT, Value::Object(self.options.expand()?)))
    }
}

impl QueryNode for ConstantScoreQuery {}

impl_serialize_via_json!(ConstantScoreQuery);
