//! Value term queries - one field, one `value`
//!
//! Covers `term`, `prefix`, `wildcard`, `regexp` and `fuzzy`. When `value` is
//! the only option the body collapses to the bare value:
//!
//! ```json
//! { "term": { "user": "kimchy" } }
//! { "term": { "user": { "value": "kimchy", "boost": 2.0 } } }
//! ```

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::util::{check_rewrite_method, require, require_non_empty};
use crate::base::{DslNode, NodeCategory, Options, QueryNode};
use crate::query::ast::QueryOptions;
use crate::query::types::ValueTermKind;
use crate::Result;
use serde_json::Value;

/// Term-level query matching a single value in a field
#[derive(Clone, Debug)]
pub struct ValueTermQuery {
    kind: ValueTermKind,
    field: Option<String>,
    options: Options,
}

impl ValueTermQuery {
    /// Create a value term query; `None` or a JSON `null` leaves the argument unset
    pub fn new(kind: ValueTermKind, field: Option<String>, value: Option<Value>) -> Self {
        let mut options = Options::new();
        if let Some(value) = value.filter(|value| !value.is_null()) {
            options.set("value", value);
        }
        Self {
            kind,
            field,
            options,
        }
    }

    /// Exact term
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ValueTermKind::Term, Some(field.into()), Some(value.into()))
    }

    /// Terms starting with `value`
    pub fn prefix(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ValueTermKind::Prefix, Some(field.into()), Some(value.into()))
    }

    /// Terms matching a `*`/`?` pattern
    pub fn wildcard(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ValueTermKind::Wildcard, Some(field.into()), Some(value.into()))
    }

    /// Terms matching a regular expression
    pub fn regexp(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ValueTermKind::Regexp, Some(field.into()), Some(value.into()))
    }

    /// Terms within an edit distance of `value`
    pub fn fuzzy(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(ValueTermKind::Fuzzy, Some(field.into()), Some(value.into()))
    }

    pub fn kind(&self) -> ValueTermKind {
        self.kind
    }

    /// Set the field to search on
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the value to match
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.options.set("value", value);
        self
    }

    /// Match ASCII case-insensitively (term, prefix, wildcard, regexp)
    pub fn case_insensitive(mut self, enable: bool) -> Self {
        self.options.set("case_insensitive", enable);
        self
    }

    /// Multi-term rewrite method (prefix, wildcard, regexp, fuzzy)
    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        let method = check_rewrite_method(method, self.kind.as_str())?;
        self.options.set("rewrite", method);
        Ok(self)
    }

    /// Maximum edit distance, e.g. `2` or `"AUTO"` (fuzzy)
    pub fn fuzziness(mut self, fuzziness: impl Into<Value>) -> Self {
        self.options.set("fuzziness", fuzziness);
        self
    }

    /// Number of leading characters left unchanged (fuzzy)
    pub fn prefix_length(mut self, len: u32) -> Self {
        self.options.set("prefix_length", len);
        self
    }

    /// Maximum number of variations created (fuzzy)
    pub fn max_expansions(mut self, limit: u32) -> Self {
        self.options.set("max_expansions", limit);
        self
    }

    /// Allow swaps of adjacent characters (fuzzy)
    pub fn transpositions(mut self, enable: bool) -> Self {
        self.options.set("transpositions", enable);
        self
    }

    /// Enabled regular expression operators, e.g. `"ALL"` (regexp)
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.options.set("flags", flags.into());
        self
    }

    /// Cap on automaton states (regexp)
    pub fn max_determinized_states(mut self, limit: u32) -> Self {
        self.options.set("max_determinized_states", limit);
        self
    }
}

impl QueryOptions for ValueTermQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for ValueTermQuery {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        self.kind.as_str().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        let construct = self.kind.as_str();
        let value = require(self.options.get("value"), construct, "value")?;
        let field = require(self.field.as_deref(), construct, "field")?;
        require_non_empty(field, construct, "field")?;

        // Sole `value` collapses to the bare value.
        let body = if self.options.len() == 1 {
            value.expand()?
        } else {
            Value::Object(self.options.expand()?)
        };
        Ok(keyed(construct, keyed(field, body)))
    }
}

impl QueryNode for ValueTermQuery {}

impl_serialize_via_json!(ValueTermQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DslError;
    use serde_json::json;

    #[test]
    fn test_missing_value_fails() {
        let query = ValueTermQuery::new(ValueTermKind::Term, Some("user".to_string()), None);
        let err = query.to_json().unwrap_err();
        assert!(matches!(
            err,
            DslError::MissingRequiredField { field: "value", .. }
        ));
    }

    #[test]
    fn test_null_value_is_skipped() {
        for query in [
            ValueTermQuery::term("user", Value::Null),
            ValueTermQuery::new(ValueTermKind::Term, Some("user".to_string()), Some(Value::Null)),
        ] {
            let err = query.to_json().unwrap_err();
            assert!(matches!(
                err,
                DslError::MissingRequiredField { field: "value", .. }
            ));
        }
    }

    #[test]
    fn test_sole_value_collapses() {
        let query = ValueTermQuery::new(ValueTermKind::Term, Some("user".to_string()), None)
            .value("x");
        assert_eq!(query.to_json().unwrap(), json!({ "term": { "user": "x" } }));
    }

    #[test]
    fn test_extra_options_keep_object_form() {
        let query = ValueTermQuery::term("user", "kimchy").boost(2.0);
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "term": { "user": { "value": "kimchy", "boost": 2.0 } } })
        );
    }

    #[test]
    fn test_missing_field_fails() {
        let query = ValueTermQuery::new(ValueTermKind::Prefix, None, Some(json!("ki")));
        let err = query.to_json().unwrap_err();
        assert!(matches!(
            err,
            DslError::MissingRequiredField { field: "field", .. }
        ));

        let query = query.field("user");
        assert_eq!(query.to_json().unwrap(), json!({ "prefix": { "user": "ki" } }));
    }

    #[test]
    fn test_numeric_value() {
        let query = ValueTermQuery::term("age", 42);
        assert_eq!(query.to_json().unwrap(), json!({ "term": { "age": 42 } }));
    }

    #[test]
    fn test_fuzzy_options() {
        let query = ValueTermQuery::fuzzy("user", "ki")
            .fuzziness("AUTO")
            .prefix_length(1)
            .max_expansions(50)
            .transpositions(true);
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "fuzzy": {
                    "user": {
                        "value": "ki",
                        "fuzziness": "AUTO",
                        "prefix_length": 1,
                        "max_expansions": 50,
                        "transpositions": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_rewrite_validation() {
        let query = ValueTermQuery::wildcard("user", "ki*y")
            .rewrite("top_terms_boost_10")
            .unwrap();
        assert_eq!(
            query.to_json().unwrap(),
            json!({ "wildcard": { "user": { "value": "ki*y", "rewrite": "top_terms_boost_10" } } })
        );

        let query = ValueTermQuery::prefix("user", "ki")
            .rewrite("Constant_Score")
            .unwrap();
        assert_eq!(
            query.to_json().unwrap()["prefix"]["user"]["rewrite"],
            json!("constant_score")
        );

        let err = ValueTermQuery::regexp("user", "k.*y")
            .rewrite("fastest")
            .unwrap_err();
        assert!(matches!(err, DslError::InvalidParameter { param: "rewrite", .. }));
    }

    #[test]
    fn test_to_json_is_idempotent() {
        let query = ValueTermQuery::regexp("user", "k.*y").flags("ALL").name("re");
        assert_eq!(query.to_json().unwrap(), query.to_json().unwrap());
    }
}
