//! Match query family - full-text search on one field

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::util::{check_one_of, require, require_non_empty};
use crate::base::{DslNode, NodeCategory, Options, QueryNode};
use crate::query::ast::QueryOptions;
use crate::query::types::{MatchKind, MatchOperator, MinimumShouldMatch};
use crate::Result;
use serde_json::Value;

const ZERO_TERMS_QUERY: &[&str] = &["none", "all"];

/// Full-text query that analyzes the input before matching
///
/// Always serialized in the expanded form:
///
/// ```json
/// { "match": { "content": { "query": "rust python", "operator": "and" } } }
/// ```
#[derive(Clone, Debug)]
pub struct MatchQuery {
    kind: MatchKind,
    field: String,
    options: Options,
}

impl MatchQuery {
    /// Create a `match` query
    pub fn new(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::with_kind(MatchKind::Match, field, query)
    }

    /// Create a `match_phrase` query
    pub fn phrase(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::with_kind(MatchKind::MatchPhrase, field, query)
    }

    /// Create a `match_phrase_prefix` query
    pub fn phrase_prefix(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::with_kind(MatchKind::MatchPhrasePrefix, field, query)
    }

    pub fn with_kind(kind: MatchKind, field: impl Into<String>, query: impl Into<String>) -> Self {
        let mut options = Options::new();
        options.set("query", query.into());
        Self {
            kind,
            field: field.into(),
            options,
        }
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Set the field to search on
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the query text
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.options.set("query", query.into());
        self
    }

    /// Set how analyzed terms are combined
    pub fn operator(mut self, operator: MatchOperator) -> Self {
        self.options.set("operator", operator.as_str());
        self
    }

    /// Set the analyzer applied to the query text
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.options.set("analyzer", analyzer.into());
        self
    }

    /// Set the fuzziness, e.g. `"AUTO"` (match)
    pub fn fuzziness(mut self, fuzziness: impl Into<Value>) -> Self {
        self.options.set("fuzziness", fuzziness);
        self
    }

    /// Set minimum should match (match)
    pub fn minimum_should_match(mut self, msm: impl Into<MinimumShouldMatch>) -> Self {
        self.options
            .set("minimum_should_match", Value::from(msm.into()));
        self
    }

    /// Behavior when the analyzer removes every token: `none` or `all`
    pub fn zero_terms_query(mut self, behavior: &str) -> Result<Self> {
        let behavior = check_one_of(
            behavior,
            ZERO_TERMS_QUERY,
            self.kind.as_str(),
            "zero_terms_query",
        )?;
        self.options.set("zero_terms_query", behavior);
        Ok(self)
    }

    /// Allowed distance between phrase terms (phrase family)
    pub fn slop(mut self, slop: u32) -> Self {
        self.options.set("slop", slop);
        self
    }

    /// Maximum terms the last term expands to (phrase prefix)
    pub fn max_expansions(mut self, limit: u32) -> Self {
        self.options.set("max_expansions", limit);
        self
    }
}

impl QueryOptions for MatchQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for MatchQuery {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        self.kind.as_str().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        let construct = self.kind.as_str();
        require_non_empty(&self.field, construct, "field")?;
        require(self.options.get("query"), construct, "query")?;
        Ok(keyed(
            construct,
            keyed(self.field.as_str(), Value::Object(self.options.expand()?)),
        ))
    }
}

impl QueryNode for MatchQuery {}

impl_serialize_via_json!(MatchQuery);
