//! Script definitions used by scripted options
//!
//! A script is not keyed by a type tag: it serializes to its body directly,
//! e.g. `{ "source": "...", "lang": "painless", "params": { ... } }`.

use super::node::{DslNode, NodeCategory, ScriptNode, ScriptRef, Shared};
use super::options::OptionValue;
use super::util::{check_one_of, require};
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// How the script body is supplied
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptRepr {
    /// Inline source (current syntax)
    Source(String),
    /// Inline source (legacy syntax)
    Inline(String),
    /// Stored script id
    Id(String),
    /// Script file name
    File(String),
}

const SCRIPT_TYPES: &[&str] = &["inline", "source", "stored", "id", "file"];

/// Script definition
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Script {
    #[serde(flatten)]
    repr: Option<ScriptRepr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Map<String, Value>>,
}

impl Script {
    /// Create a script from a type name and its body
    ///
    /// `script_type` is one of `inline`, `source`, `stored`, `id` or `file`.
    pub fn new(script_type: &str, body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        let repr = match check_one_of(script_type, SCRIPT_TYPES, "script", "type")?.as_str() {
            "inline" => ScriptRepr::Inline(body),
            "source" => ScriptRepr::Source(body),
            "file" => ScriptRepr::File(body),
            _ => ScriptRepr::Id(body),
        };
        Ok(Self::default().with_repr(repr))
    }

    /// Inline script using the `source` key
    pub fn source(source: impl Into<String>) -> Self {
        Self::default().with_repr(ScriptRepr::Source(source.into()))
    }

    /// Inline script using the legacy `inline` key
    pub fn inline(source: impl Into<String>) -> Self {
        Self::default().with_repr(ScriptRepr::Inline(source.into()))
    }

    /// Reference to a stored script
    pub fn stored(id: impl Into<String>) -> Self {
        Self::default().with_repr(ScriptRepr::Id(id.into()))
    }

    /// Reference to a script file
    pub fn file(file: impl Into<String>) -> Self {
        Self::default().with_repr(ScriptRepr::File(file.into()))
    }

    /// Replace the script body; only one representation is kept
    pub fn with_repr(mut self, repr: ScriptRepr) -> Self {
        if let Some(previous) = &self.repr {
            debug!(?previous, "script type already set, overwriting");
        }
        self.repr = Some(repr);
        self
    }

    /// Set the script language
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Replace all script parameters
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Add a single script parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn repr(&self) -> Option<&ScriptRepr> {
        self.repr.as_ref()
    }
}

impl DslNode for Script {
    fn category(&self) -> NodeCategory {
        NodeCategory::Script
    }

    fn node_type(&self) -> String {
        "script".to_string()
    }

    fn to_json(&self) -> Result<Value> {
        require(self.repr.as_ref(), "script", "source")?;
        Ok(serde_json::to_value(self)?)
    }
}

impl ScriptNode for Script {}

/// Value accepted by `script` setters: a raw source string or a script node
#[derive(Clone, Debug)]
pub enum ScriptArg {
    Raw(String),
    Node(ScriptRef),
}

impl From<&str> for ScriptArg {
    fn from(source: &str) -> Self {
        ScriptArg::Raw(source.to_string())
    }
}

impl From<String> for ScriptArg {
    fn from(source: String) -> Self {
        ScriptArg::Raw(source)
    }
}

impl From<Script> for ScriptArg {
    fn from(script: Script) -> Self {
        ScriptArg::Node(script.into())
    }
}

impl From<Shared<Script>> for ScriptArg {
    fn from(script: Shared<Script>) -> Self {
        ScriptArg::Node(script.into())
    }
}

impl From<ScriptRef> for ScriptArg {
    fn from(script: ScriptRef) -> Self {
        ScriptArg::Node(script)
    }
}

impl From<ScriptArg> for OptionValue {
    fn from(arg: ScriptArg) -> Self {
        match arg {
            ScriptArg::Raw(source) => OptionValue::Value(Value::String(source)),
            ScriptArg::Node(script) => OptionValue::Node(script.into_node()),
        }
    }
}
