//! Aggregation base shared by metrics, bucket and pipeline builders
//!
//! Every aggregation serializes to
//!
//! ```json
//! { "<name>": { "<type>": { ...options }, "aggs": { ... }, "meta": { ... } } }
//! ```
//!
//! `aggs` and `meta` are only emitted when set.

use crate::base::node::keyed;
use crate::base::util::require_non_empty;
use crate::base::{AggregationRef, NodeRef, Options, ScriptArg};
use crate::error::DslError;
use crate::Result;
use serde_json::{Map, Value};
use tracing::debug;

/// Name, type, options and children of one aggregation
#[derive(Clone, Debug)]
pub struct AggregationCore {
    name: String,
    agg_type: &'static str,
    options: Options,
    children: AggregationMap,
    meta: Option<Map<String, Value>>,
}

impl AggregationCore {
    pub fn new(name: impl Into<String>, agg_type: &'static str) -> Self {
        Self {
            name: name.into(),
            agg_type,
            options: Options::new(),
            children: AggregationMap::default(),
            meta: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agg_type(&self) -> &'static str {
        self.agg_type
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn children(&self) -> &AggregationMap {
        &self.children
    }

    pub fn push_child(&mut self, child: AggregationRef) {
        self.children.push(child);
    }

    pub fn set_meta(&mut self, meta: Map<String, Value>) {
        self.meta = Some(meta);
    }

    /// Serialize as `{ name: { type: options, aggs, meta } }`
    pub fn to_json(&self) -> Result<Value> {
        require_non_empty(&self.name, self.agg_type, "name")?;

        let mut body = Map::new();
        body.insert(
            self.agg_type.to_string(),
            Value::Object(self.options.expand()?),
        );
        if !self.children.is_empty() {
            body.insert("aggs".to_string(), self.children.to_json()?);
        }
        if let Some(meta) = &self.meta {
            body.insert("meta".to_string(), Value::Object(meta.clone()));
        }
        Ok(keyed(self.name.as_str(), Value::Object(body)))
    }
}

/// Registered sub-aggregations
///
/// Registration appends; serialization merges children by name so a later
/// child replaces an earlier one with the same name.
#[derive(Clone, Debug, Default)]
pub struct AggregationMap {
    entries: Vec<AggregationRef>,
}

impl AggregationMap {
    pub fn push(&mut self, child: AggregationRef) {
        self.entries.push(child);
    }

    /// Number of registrations, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregationRef> {
        self.entries.iter()
    }

    /// Merge children into a single `{ name: body }` object
    pub fn to_json(&self) -> Result<Value> {
        let mut merged = Map::new();
        for child in &self.entries {
            let Value::Object(entries) = child.node().to_json()? else {
                return Err(DslError::MalformedNode {
                    construct: child.node().node_type(),
                    reason: "sub-aggregation did not serialize to an object",
                });
            };
            for (name, body) in entries {
                if merged.contains_key(&name) {
                    debug!(aggregation = %name, "sub-aggregation registered twice, keeping the last");
                }
                merged.insert(name, body);
            }
        }
        Ok(Value::Object(merged))
    }
}

/// Options shared by every aggregation builder
pub trait AggregationOptions: Sized {
    fn core(&self) -> &AggregationCore;

    /// Raw access used by the option traits; builders still validate their
    /// own constraints in `to_json()`
    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut AggregationCore;

    /// Name the aggregation is nested under
    fn agg_name(&self) -> &str {
        self.core().name()
    }

    /// Attach metadata returned alongside the aggregation result
    fn meta(mut self, meta: Map<String, Value>) -> Self {
        self.core_mut().set_meta(meta);
        self
    }

    /// Display format for the aggregation output, e.g. `"0.00"`
    fn format(mut self, format: impl Into<String>) -> Result<Self> {
        self.core_mut().options_mut().set("format", format.into());
        Ok(self)
    }
}

/// `field`, `script` and `missing` for aggregations reading document values
///
/// `field` and `script` are independent; both may be set.
pub trait ValueSourceOptions: AggregationOptions {
    /// Set the document field to aggregate on
    fn field(mut self, field: impl Into<String>) -> Self {
        self.core_mut().options_mut().set("field", field.into());
        self
    }

    /// Set a script producing the values, raw source or a `Script`
    fn script(mut self, script: impl Into<ScriptArg>) -> Self {
        self.core_mut()
            .options_mut()
            .set_value("script", script.into());
        self
    }

    /// Value used for documents missing the field
    fn missing(mut self, value: impl Into<Value>) -> Self {
        self.core_mut().options_mut().set("missing", value);
        self
    }
}

/// Sub-aggregation registration
pub trait SubAggregations: AggregationOptions {
    /// Register a child aggregation
    fn agg(mut self, child: impl Into<AggregationRef>) -> Self {
        self.core_mut().push_child(child.into());
        self
    }

    /// Register several child aggregations in order
    fn aggs<I, A>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AggregationRef>,
    {
        for child in children {
            self.core_mut().push_child(child.into());
        }
        self
    }

    /// Register a type-erased child
    ///
    /// Fails with `InvalidNodeType` when `node` is not an aggregation.
    fn try_agg(self, node: NodeRef) -> Result<Self> {
        let child = AggregationRef::check(node, self.core().agg_type(), "aggs")?;
        Ok(self.agg(child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{AggregationNode, DslNode, NodeCategory};
    use serde_json::json;

    #[derive(Debug)]
    struct BareValue;

    impl DslNode for BareValue {
        fn category(&self) -> NodeCategory {
            NodeCategory::Aggregation
        }

        fn node_type(&self) -> String {
            "bare".to_string()
        }

        fn to_json(&self) -> Result<Value> {
            Ok(json!("not an object"))
        }
    }

    impl AggregationNode for BareValue {}

    #[test]
    fn test_empty_core() {
        let core = AggregationCore::new("all", "global");
        assert_eq!(core.to_json().unwrap(), json!({ "all": { "global": {} } }));
    }

    #[test]
    fn test_name_is_required() {
        let err = AggregationCore::new("", "max").to_json().unwrap_err();
        assert!(matches!(
            err,
            DslError::MissingRequiredField { field: "name", .. }
        ));
    }

    #[test]
    fn test_meta() {
        let mut core = AggregationCore::new("titles", "terms");
        let mut meta = Map::new();
        meta.insert("color".to_string(), json!("blue"));
        core.set_meta(meta);
        assert_eq!(
            core.to_json().unwrap(),
            json!({ "titles": { "terms": {}, "meta": { "color": "blue" } } })
        );
    }

    #[test]
    fn test_empty_map() {
        let map = AggregationMap::default();
        assert!(map.is_empty());
        assert_eq!(map.to_json().unwrap(), json!({}));
    }

    #[test]
    fn test_non_object_child_fails() {
        let mut core = AggregationCore::new("genres", "terms");
        core.push_child(BareValue.into());
        let err = core.to_json().unwrap_err();
        assert!(matches!(
            err,
            DslError::MalformedNode { ref construct, .. } if construct == "bare"
        ));
    }
}
