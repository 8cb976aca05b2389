//! Options mapping carried by every builder
//!
//! Values are plain JSON, nested nodes, ordered sequences of nodes, or nested
//! mappings of the same. Expansion walks the mapping and replaces every node
//! by its own `to_json()` output.

use super::node::NodeRef;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single option value
#[derive(Clone, Debug)]
pub enum OptionValue {
    /// Plain JSON value, emitted unchanged
    Value(Value),
    /// Nested builder
    Node(NodeRef),
    /// Ordered sequence of nested builders
    Nodes(Vec<NodeRef>),
    /// Nested mapping, expanded recursively
    Map(Options),
}

impl OptionValue {
    /// Recursively convert into plain JSON
    pub fn expand(&self) -> Result<Value> {
        match self {
            OptionValue::Value(value) => Ok(value.clone()),
            OptionValue::Node(node) => node.to_json(),
            OptionValue::Nodes(nodes) => nodes
                .iter()
                .map(|node| node.to_json())
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            OptionValue::Map(options) => options.expand().map(Value::Object),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        OptionValue::Value(value)
    }
}

impl From<NodeRef> for OptionValue {
    fn from(node: NodeRef) -> Self {
        OptionValue::Node(node)
    }
}

impl From<Options> for OptionValue {
    fn from(options: Options) -> Self {
        OptionValue::Map(options)
    }
}

/// Mapping from option name to value; last write wins per key
#[derive(Clone, Debug, Default)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain JSON option
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .insert(key.into(), OptionValue::Value(value.into()));
    }

    /// Set any kind of option value
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Set a nested node
    pub fn set_node(&mut self, key: impl Into<String>, node: NodeRef) {
        self.entries.insert(key.into(), OptionValue::Node(node));
    }

    /// Append a node to the sequence stored under `key`
    ///
    /// A single node already stored there becomes the first element; any
    /// other value is replaced by a fresh sequence.
    pub fn push_node(&mut self, key: impl Into<String>, node: NodeRef) {
        let key = key.into();
        let nodes = match self.entries.remove(&key) {
            Some(OptionValue::Nodes(mut nodes)) => {
                nodes.push(node);
                nodes
            }
            Some(OptionValue::Node(first)) => vec![first, node],
            _ => vec![node],
        };
        self.entries.insert(key, OptionValue::Nodes(nodes));
    }

    /// Nested mapping under `key`, created when absent
    ///
    /// A non-mapping value stored under `key` is replaced.
    pub fn map_entry(&mut self, key: impl Into<String>) -> &mut Options {
        let slot = self
            .entries
            .entry(key.into())
            .or_insert_with(|| OptionValue::Map(Options::new()));
        if !matches!(slot, OptionValue::Map(_)) {
            *slot = OptionValue::Map(Options::new());
        }
        match slot {
            OptionValue::Map(options) => options,
            _ => unreachable!("slot was just set to a mapping"),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Recursively convert the mapping into a JSON object
    pub fn expand(&self) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        for (key, value) in &self.entries {
            out.insert(key.clone(), value.expand()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::node::{keyed, DslNode, NodeCategory};
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl DslNode for Fixed {
        fn category(&self) -> NodeCategory {
            NodeCategory::Query
        }

        fn node_type(&self) -> String {
            self.0.to_string()
        }

        fn to_json(&self) -> Result<Value> {
            Ok(keyed(self.0, json!({})))
        }
    }

    fn node(tag: &'static str) -> NodeRef {
        Arc::new(Fixed(tag))
    }

    #[test]
    fn test_plain_values_pass_through() {
        let mut options = Options::new();
        options.set("field", "price");
        options.set("window", 7);
        assert_eq!(
            Value::Object(options.expand().unwrap()),
            json!({ "field": "price", "window": 7 })
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut options = Options::new();
        options.set("field", "a");
        options.set("field", "b");
        assert_eq!(options.len(), 1);
        assert_eq!(
            Value::Object(options.expand().unwrap()),
            json!({ "field": "b" })
        );
    }

    #[test]
    fn test_nested_nodes_expand_in_order() {
        let mut options = Options::new();
        options.set_node("filter", node("match_all"));
        options.push_node("must", node("first"));
        options.push_node("must", node("second"));

        assert_eq!(
            Value::Object(options.expand().unwrap()),
            json!({
                "filter": { "match_all": {} },
                "must": [{ "first": {} }, { "second": {} }]
            })
        );
    }

    #[test]
    fn test_push_node_promotes_single_node() {
        let mut options = Options::new();
        options.set_node("should", node("a"));
        options.push_node("should", node("b"));
        assert_eq!(
            options.get("should").unwrap().expand().unwrap(),
            json!([{ "a": {} }, { "b": {} }])
        );
    }

    #[test]
    fn test_map_entry_nests() {
        let mut options = Options::new();
        options.set("order", "broken");
        options.map_entry("order").set("_count", "desc");
        options.map_entry("order").set_node("inner", node("x"));

        assert_eq!(
            Value::Object(options.expand().unwrap()),
            json!({ "order": { "_count": "desc", "inner": { "x": {} } } })
        );
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut options = Options::new();
        options.set("boost", 2.0);
        options.push_node("must", node("a"));
        assert_eq!(options.expand().unwrap(), options.expand().unwrap());
    }

    #[test]
    fn test_empty_options() {
        let options = Options::new();
        assert!(options.is_empty());
        assert_eq!(Value::Object(options.expand().unwrap()), json!({}));
    }
}
