//! Rendering of node trees to JSON text

use super::node::DslNode;
use crate::config::RenderSettings;
use crate::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::trace;

/// Render a node to a JSON string according to `settings`
pub fn render<N: DslNode + ?Sized>(node: &N, settings: &RenderSettings) -> Result<String> {
    let value = node.to_json()?;
    trace!(
        category = node.category().as_str(),
        node_type = %node.node_type(),
        pretty = settings.pretty,
        "rendering node"
    );

    if !settings.pretty {
        return Ok(serde_json::to_string(&value)?);
    }

    let indent = " ".repeat(settings.indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::node::{keyed, NodeCategory};
    use serde_json::{json, Value};

    #[derive(Debug)]
    struct Fixed;

    impl DslNode for Fixed {
        fn category(&self) -> NodeCategory {
            NodeCategory::Query
        }

        fn node_type(&self) -> String {
            "match_all".to_string()
        }

        fn to_json(&self) -> Result<Value> {
            Ok(keyed("match_all", json!({ "boost": 2 })))
        }
    }

    #[test]
    fn test_compact() {
        let out = render(&Fixed, &RenderSettings::default()).unwrap();
        assert_eq!(out, r#"{"match_all":{"boost":2}}"#);
    }

    #[test]
    fn test_pretty_with_indent() {
        let settings = RenderSettings::new(true).with_indent(4);
        let out = render(&Fixed, &settings).unwrap();
        assert_eq!(out, "{\n    \"match_all\": {\n        \"boost\": 2\n    }\n}");
    }
}
