//! Range query - matches documents with field values in a range

use crate::base::node::{impl_serialize_via_json, keyed};
use crate::base::util::{check_one_of, require_non_empty};
use crate::base::{DslNode, NodeCategory, Options, QueryNode};
use crate::query::ast::QueryOptions;
use crate::Result;
use serde_json::Value;

const CONSTRUCT: &str = "range";
const RELATIONS: &[&str] = &["intersects", "contains", "within"];

/// Query that matches documents with field values within a specified range
///
/// Works with numeric, date and keyword fields:
///
/// ```json
/// { "range": { "age": { "gte": 10, "lt": 20 } } }
/// ```
#[derive(Clone, Debug)]
pub struct RangeQuery {
    field: String,
    options: Options,
}

impl RangeQuery {
    /// Create a new range query
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            options: Options::new(),
        }
    }

    /// Set the field to query
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.options.set("gte", value);
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.options.set("gt", value);
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.options.set("lte", value);
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.options.set("lt", value);
        self
    }

    /// Date format used to parse the bounds
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.set("format", format.into());
        self
    }

    /// Time zone used to convert date bounds to UTC
    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.options.set("time_zone", zone.into());
        self
    }

    /// How ranges on range fields match: `intersects`, `contains` or `within`
    pub fn relation(mut self, relation: &str) -> Result<Self> {
        let relation = check_one_of(relation, RELATIONS, CONSTRUCT, "relation")?;
        self.options.set("relation", relation);
        Ok(self)
    }
}

impl QueryOptions for RangeQuery {
    fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl DslNode for RangeQuery {
    fn category(&self) -> NodeCategory {
        NodeCategory::Query
    }

    fn node_type(&self) -> String {
        CONSTRUCT.to_string()
    }

    fn to_json(&self) -> Result<Value> {
        require_non_empty(&self.field, CONSTRUCT, "field")?;
        Ok(keyed(
            CONSTRUCT,
            keyed(self.field.as_str(), Value::Object(self.options.expand()?)),
        ))
    }
}

impl QueryNode for RangeQuery {}

impl_serialize_via_json!(RangeQuery);
