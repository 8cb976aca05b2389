//! Terms query - matches any of multiple exact terms

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::util::require_non_empty;
use crate::base::{DslNode, NodeCategory, Options, QueryNode};
use crate::error::DslError;
use crate::query::ast::QueryOptions;
use crate::Result;
use serde_json::Value;

const CONSTRUCT: &str = "terms";

/// Query that matches documents containing any of the given terms
///
/// The field is a sibling of the other options, so a field named like a set
/// option (`boost`, `_name`) fails with `KeyConflict`:
///
/// ```json
/// { "terms": { "tags": ["rust", "search"], "boost": 1.5 } }
/// ```
#[derive(Clone, Debug)]
pub struct TermsQuery {
    field: String,
    values: Vec<Value>,
    options: Options,
}

impl TermsQuery {
    /// Create a new terms query
    pub fn new<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            options: Options::new(),
        }
    }

    /// Add a single term
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl QueryOptions for TermsQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for TermsQuery {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        CONSTRUCT.to_string()
    }

    fn to_json(&self) -> Result<Value> {
        require_non_empty(&self.field, CONSTRUCT, "field")?;
        if self.options.contains_key(&self.field) {
            return Err(DslError::KeyConflict {
                construct: CONSTRUCT.to_string(),
                key: self.field.clone(),
            });
        }
        let mut body = self.options.expand()?;
        body.insert(self.field.clone(), Value::Array(self.values.clone()));
        Ok(keyed(CONSTRUCT, Value::Object(body)))
    }
}

impl QueryNode for TermsQuery {}

impl_serialize_via_json!(TermsQuery);
