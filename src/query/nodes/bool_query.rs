//! Boolean query - combines multiple clauses with AND, OR, NOT semantics

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::{DslNode, NodeCategory, NodeRef, Options, QueryNode, QueryRef};
use crate::query::ast::QueryOptions;
use crate::query::types::{MinimumShouldMatch, Occur};
use crate::Result;
use serde_json::Value;

const CONSTRUCT: &str = "bool";

/// Boolean query combining multiple clauses
///
/// The boolean query supports four types of clauses:
/// - `must`: All clauses must match (AND). Contributes to score.
/// - `should`: At least one clause should match (OR). Contributes to score.
/// - `must_not`: No clause must match (NOT). Does not contribute to score.
/// - `filter`: All clauses must match (AND). Does not contribute to score.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "must": [
///       { "match": { "content": { "query": "rust programming" } } }
///     ],
///     "must_not": [
///       { "term": { "status": "draft" } }
///     ],
///     "filter": [
///       { "range": { "created_at": { "gte": "2024-01-01" } } }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoolQuery {
    options: Options,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause with the given occurrence
    pub fn clause(mut self, occur: Occur, query: impl Into<QueryRef>) -> Self {
        self.options
            .push_node(occur.as_str(), query.into().into_node());
        self
    }

    /// Append a type-erased clause
    ///
    /// Fails with `InvalidNodeType` when `node` is not a query.
    pub fn try_clause(self, occur: Occur, node: NodeRef) -> Result<Self> {
        let query = QueryRef::check(node, CONSTRUCT, occur.as_str())?;
        Ok(self.clause(occur, query))
    }

    /// Add a must clause
    pub fn must(self, query: impl Into<QueryRef>) -> Self {
        self.clause(Occur::Must, query)
    }

    /// Add a should clause
    pub fn should(self, query: impl Into<QueryRef>) -> Self {
        self.clause(Occur::Should, query)
    }

    /// Add a filter clause
    pub fn filter(self, query: impl Into<QueryRef>) -> Self {
        self.clause(Occur::Filter, query)
    }

    /// Add a must_not clause
    pub fn must_not(self, query: impl Into<QueryRef>) -> Self {
        self.clause(Occur::MustNot, query)
    }

    /// Set minimum should match
    pub fn minimum_should_match(mut self, msm: impl Into<MinimumShouldMatch>) -> Self {
        self.options
            .set("minimum_should_match", Value::from(msm.into()));
        self
    }

    /// Get total number of clauses
    pub fn clause_count(&self) -> usize {
        [Occur::Must, Occur::Should, Occur::Filter, Occur::MustNot]
            .iter()
            .map(|occur| match self.options.get(occur.as_str()) {
                Some(crate::base::OptionValue::Nodes(nodes)) => nodes.len(),
                _ => 0,
            })
            .sum()
    }
}

impl QueryOptions for BoolQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for BoolQuery {
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

impl QueryNode for BoolQuery {}

impl_serialize_via_json!(BoolQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Script;
    use crate::error::DslError;
    use crate::query::ast::Query;
    use crate::query::nodes::{MatchQuery, RangeQuery, ValueTermQuery};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_empty_bool_query() {
        let query = BoolQuery::new();
        assert_eq!(query.clause_count(), 0);
        assert_eq!(query.to_json().unwrap(), json!({ "bool": {} }));
    }

    #[test]
    fn test_clauses_keep_order() {
        let query = BoolQuery::new()
            .must(MatchQuery::new("content", "rust programming"))
            .must(ValueTermQuery::term("lang", "en"))
            .must_not(ValueTermQuery::term("status", "draft"))
            .filter(RangeQuery::new("created_at").gte("2024-01-01"))
            .should(Query::exists("tags"))
            .minimum_should_match(1i64);

        assert_eq!(query.clause_count(), 5);
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "bool": {
                    "must": [
                        { "match": { "content": { "query": "rust programming" } } },
                        { "term": { "lang": "en" } }
                    ],
                    "must_not": [{ "term": { "status": "draft" } }],
                    "filter": [{ "range": { "created_at": { "gte": "2024-01-01" } } }],
                    "should": [{ "exists": { "field": "tags" } }],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_try_clause_rejects_script() {
        let script: NodeRef = Arc::new(Script::source("return true"));
        let err = BoolQuery::new()
            .try_clause(Occur::Must, script)
            .unwrap_err();
        assert!(matches!(
            err,
            DslError::InvalidNodeType { field: "must", actual: "script", .. }
        ));
    }

    #[test]
    fn test_nested_failure_propagates() {
        let incomplete = ValueTermQuery::new(
            crate::query::types::ValueTermKind::Term,
            Some("user".to_string()),
            None,
        );
        let query = BoolQuery::new().filter(incomplete);
        assert!(matches!(
            query.to_json().unwrap_err(),
            DslError::MissingRequiredField { field: "value", .. }
        ));
    }
}
