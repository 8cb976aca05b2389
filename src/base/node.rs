//! Base node abstraction shared by every DSL builder
//!
//! Every builder in this crate implements [`DslNode`], which ties together a
//! node category and the conversion into a plain JSON tree. Nested builders
//! are stored as [`NodeRef`]s, so a parent never deep-copies its children.

use crate::error::DslError;
use crate::Result;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::sync::Arc;

/// Reference-counted, type-erased DSL node
pub type NodeRef = Arc<dyn DslNode>;

/// The family a node belongs to
///
/// Nested option values are checked against the category their setter
/// expects, e.g. a constant score `filter` only accepts query nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Query,
    Aggregation,
    Script,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Query => "query",
            NodeCategory::Aggregation => "aggregation",
            NodeCategory::Script => "script",
        }
    }
}

/// Core trait for all nodes of the DSL tree
pub trait DslNode: Send + Sync + Debug {
    /// Category used for nesting checks
    fn category(&self) -> NodeCategory;

    /// Type tag of the construct, e.g. `"term"` or `"moving_fn"`
    fn node_type(&self) -> String;

    /// Convert the node into its JSON representation
    ///
    /// Nested nodes are expanded recursively. Fails when a required option
    /// was never set; there is no partial output.
    fn to_json(&self) -> Result<Value>;
}

/// Marker for nodes usable wherever the DSL expects a query clause
pub trait QueryNode: DslNode {}

/// Marker for nodes usable as sub-aggregations
pub trait AggregationNode: DslNode {}

/// Marker for nodes usable as a script definition
pub trait ScriptNode: DslNode {}

/// Builds a typed handle around a [`NodeRef`] that is known to belong to one
/// category. Typed setters take these handles, so category mismatches are
/// caught by the compiler; `check` covers type-erased nodes at runtime.
macro_rules! typed_ref {
    ($(#[$doc:meta])* $name:ident, $marker:ident, $category:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name(NodeRef);

        impl<N: $marker + 'static> From<N> for $name {
            fn from(node: N) -> Self {
                Self(Arc::new(node))
            }
        }

        impl $name {
            /// Wrap a type-erased node after checking its category
            pub fn check(node: NodeRef, construct: &str, field: &'static str) -> Result<Self> {
                check_category(&node, $category, construct, field)?;
                Ok(Self(node))
            }

            pub fn node(&self) -> &NodeRef {
                &self.0
            }

            pub fn into_node(self) -> NodeRef {
                self.0
            }
        }
    };
}

typed_ref!(
    /// Node statically known to be a query
    QueryRef,
    QueryNode,
    NodeCategory::Query
);
typed_ref!(
    /// Node statically known to be an aggregation
    AggregationRef,
    AggregationNode,
    NodeCategory::Aggregation
);
typed_ref!(
    /// Node statically known to be a script
    ScriptRef,
    ScriptNode,
    NodeCategory::Script
);

/// Fail with `InvalidNodeType` unless `node` belongs to `expected`
pub fn check_category(
    node: &NodeRef,
    expected: NodeCategory,
    construct: &str,
    field: &'static str,
) -> Result<()> {
    let actual = node.category();
    if actual != expected {
        return Err(DslError::InvalidNodeType {
            construct: construct.to_string(),
            field,
            expected: expected.as_str(),
            actual: actual.as_str(),
        });
    }
    Ok(())
}

/// Aliasable handle to a node that may keep changing after it was nested
///
/// Cloning the handle shares the node. A parent holding one clone sees every
/// later update made through another clone on its next `to_json()`.
#[derive(Debug)]
pub struct Shared<N>(Arc<RwLock<N>>);

impl<N> Clone for Shared<N> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<N: Clone> Shared<N> {
    pub fn new(node: N) -> Self {
        Self(Arc::new(RwLock::new(node)))
    }

    /// Apply chained setters to the shared node in place
    pub fn update(&self, f: impl FnOnce(N) -> N) {
        let mut guard = self.0.write();
        *guard = f(guard.clone());
    }

    /// Apply fallible setters; the node is left untouched on error
    pub fn try_update(&self, f: impl FnOnce(N) -> Result<N>) -> Result<()> {
        let mut guard = self.0.write();
        *guard = f(guard.clone())?;
        Ok(())
    }

    /// Read the current state of the shared node
    pub fn read<R>(&self, f: impl FnOnce(&N) -> R) -> R {
        f(&self.0.read())
    }
}

impl<N: DslNode> DslNode for Shared<N> {
    fn category(&self) -> NodeCategory {
        self.0.read().category()
    }

    fn node_type(&self) -> String {
        self.0.read().node_type()
    }

    fn to_json(&self) -> Result<Value> {
        self.0.read().to_json()
    }
}

impl<N: QueryNode> QueryNode for Shared<N> {}
impl<N: AggregationNode> AggregationNode for Shared<N> {}
impl<N: ScriptNode> ScriptNode for Shared<N> {}

/// Build a single-key JSON object
pub(crate) fn keyed(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.into(), value);
    Value::Object(map)
}

/// Implements `serde::Serialize` for builders by delegating to `to_json`
macro_rules! impl_serialize_via_json {
    ($($ty:ty),* $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let value = crate::base::node::DslNode::to_json(self)
                    .map_err(serde::ser::Error::custom)?;
                serde::Serialize::serialize(&value, serializer)
            }
        }
    )*};
}

pub(crate) use impl_serialize_via_json;
