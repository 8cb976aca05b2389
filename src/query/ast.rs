//! Query base shared by every query builder
//!
//! All query builders serialize to `{ <type>: { ...options } }` and share the
//! `boost` and `_name` options through the [`QueryOptions`] trait.

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::util::require_non_empty;
use crate::base::{DslNode, NodeCategory, NodeRef, Options, QueryNode};
use crate::Result;
use serde_json::Value;

use super::types::QueryKind;

/// Options shared by every query builder
pub trait QueryOptions: Sized {
    /// Mutable access to the options emitted under the query's type key
    fn options_mut(&mut self) -> &mut Options;

    /// Set the boost factor; no range validation is applied
    fn boost(mut self, boost: f64) -> Self {
        self.options_mut().set("boost", boost);
        self
    }

    /// Label the clause with `_name` so matches report it back
    fn name(mut self, name: impl Into<String>) -> Self {
        self.options_mut().set("_name", name.into());
        self
    }
}

/// Generic query node: a type tag plus its options
///
/// Constructs without behavior of their own (`match_all`, `exists`, ...) are
/// expressed through this node.
#[derive(Clone, Debug)]
pub struct Query {
    kind: QueryKind,
    options: Options,
}

impl Query {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            options: Options::new(),
        }
    }

    /// `{ "match_all": {} }`
    pub fn match_all() -> Self {
        Self::new(QueryKind::MatchAll)
    }

    /// `{ "match_none": {} }`
    pub fn match_none() -> Self {
        Self::new(QueryKind::MatchNone)
    }

    /// Documents that have a value for `field`
    pub fn exists(field: impl Into<String>) -> Self {
        Self::new(QueryKind::Exists).option("field", field.into())
    }

    /// Documents by `_id`
    pub fn ids<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = values.into_iter().map(|v| Value::String(v.into())).collect();
        Self::new(QueryKind::Ids).option("values", values)
    }

    pub fn kind(&self) -> &QueryKind {
        &self.kind
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Set an arbitrary plain option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(key, value);
        self
    }

    /// Nest a type-erased query under `key`
    ///
    /// Fails with `InvalidNodeType` when `node` is not a query.
    pub fn try_query_option(mut self, key: &'static str, node: NodeRef) -> Result<Self> {
        let query = crate::base::QueryRef::check(node, self.kind.as_str(), key)?;
        self.options.set_node(key, query.into_node());
        Ok(self)
    }
}

impl QueryOptions for Query {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for Query {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        self.kind.as_str().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        require_non_empty(self.kind.as_str(), "query", "type")?;
        Ok(keyed(
            self.kind.as_str(),
            Value::Object(self.options.expand()?),
        ))
    }
}

impl QueryNode for Query {}

impl_serialize_via_json!(Query);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::MetricsAggregation;
    use crate::error::DslError;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_match_all() {
        assert_eq!(
            Query::match_all().to_json().unwrap(),
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn test_boost_and_name() {
        let query = Query::match_all().boost(1.5).name("everything");
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "match_all": { "boost": 1.5, "_name": "everything" } })
        );
    }

    #[test]
    fn test_boost_omitted_when_unset() {
        let json = Query::exists("user").to_json().unwrap();
        assert!(json["exists"].get("boost").is_none());
        assert_eq!(json, json!({ "exists": { "field": "user" } }));
    }

    #[test]
    fn test_ids() {
        assert_eq!(
            Query::ids(["1", "4", "100"]).to_json().unwrap(),
            json!({ "ids": { "values": ["1", "4", "100"] } })
        );
    }

    #[test]
    fn test_other_kind_requires_type() {
        let err = Query::new(QueryKind::Other(String::new()))
            .to_json()
            .unwrap_err();
        assert!(matches!(err, DslError::MissingRequiredField { field: "type", .. }));

        let query = Query::new(QueryKind::Other("rank_feature".to_string()))
            .option("field", "pagerank");
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "rank_feature": { "field": "pagerank" } })
        );
    }

    #[test]
    fn test_try_query_option_checks_category() {
        let inner: NodeRef = Arc::new(Query::match_all());
        let query = Query::new(QueryKind::Other("boosting".to_string()))
            .try_query_option("positive", inner)
            .unwrap();
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "boosting": { "positive": { "match_all": {} } } })
        );

        let agg: NodeRef = Arc::new(MetricsAggregation::max("max_price", Some("price")));
        let err = Query::new(QueryKind::Other("boosting".to_string()))
            .try_query_option("negative", agg)
            .unwrap_err();
        assert!(matches!(
            err,
            DslError::InvalidNodeType { field: "negative", actual: "aggregation", .. }
        ));
    }

    #[test]
    fn test_serialize_delegates_to_json() {
        let text = serde_json::to_string(&Query::match_none()).unwrap();
        assert_eq!(text, r#"{"match_none":{}}"#);
    }
}
