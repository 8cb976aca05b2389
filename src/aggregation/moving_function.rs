//! Moving function aggregation - slides a window over a histogram series

use crate::base::node::impl_serialize_via_json;
use crate::base::{AggregationNode, DslNode, NodeCategory, ScriptArg};
use crate::error::DslError;
use crate::Result;
use serde_json::Value;
use tracing::debug;

use super::base::{AggregationCore, AggregationOptions};
use super::pipeline::{check_buckets_path, PipelineOptions};
use super::types::BucketsPath;

const CONSTRUCT: &str = "moving_fn";
const REFERENCE_URL: &str =
    "https://www.elastic.co/guide/en/elasticsearch/reference/current/search-aggregations-pipeline-movfn-aggregation.html";

/// Runs a script on each window of an ordered series
///
/// Must be nested in a `histogram` or `date_histogram` aggregation.
///
/// ```json
/// { "the_movfn": { "moving_fn": { "buckets_path": "the_sum", "window": 5, "script": "MovingFunctions.min(values)" } } }
/// ```
#[derive(Clone, Debug)]
pub struct MovingFunctionAggregation {
    core: AggregationCore,
}

impl MovingFunctionAggregation {
    /// Create a moving function aggregation; `None` leaves window or script unset
    pub fn new(
        name: impl Into<String>,
        buckets_path: impl Into<BucketsPath>,
        window: Option<u32>,
        script: Option<ScriptArg>,
    ) -> Self {
        let mut agg = Self {
            core: AggregationCore::new(name, CONSTRUCT),
        }
        .buckets_path(buckets_path);
        if let Some(window) = window {
            agg = agg.window(window);
        }
        if let Some(script) = script {
            agg = agg.script(script);
        }
        agg
    }

    /// Size of the window slid across the histogram
    pub fn window(mut self, window: u32) -> Self {
        self.core.options_mut().set("window", window);
        self
    }

    /// Shift of the window position
    pub fn shift(mut self, shift: i32) -> Self {
        self.core.options_mut().set("shift", shift);
        self
    }

    /// Script executed on each window
    pub fn script(mut self, script: impl Into<ScriptArg>) -> Self {
        self.core.options_mut().set_value("script", script.into());
        self
    }
}

impl AggregationOptions for MovingFunctionAggregation {
    fn core(&self) -> &AggregationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AggregationCore {
        &mut self.core
    }

    /// Always fails: `moving_fn` takes no `format`
    fn format(self, _format: impl Into<String>) -> Result<Self> {
        debug!(reference = REFERENCE_URL, "format is not supported in moving_fn");
        Err(DslError::UnsupportedOperation {
            construct: CONSTRUCT.to_string(),
            operation: "format",
        })
    }
}

impl PipelineOptions for MovingFunctionAggregation {}

impl DslNode for MovingFunctionAggregation {
    fn category(&self) -> NodeCategory {
        NodeCategory::Aggregation
    }

    fn node_type(&self) -> String {
        self.core.agg_type().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        check_buckets_path(&self.core)?;
        if self.core.options().contains_key("format") {
            return Err(DslError::UnsupportedOperation {
                construct: CONSTRUCT.to_string(),
                operation: "format",
            });
        }
        self.core.to_json()
    }
}

impl AggregationNode for MovingFunctionAggregation {}

impl_serialize_via_json!(MovingFunctionAggregation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Script;
    use serde_json::json;

    fn instance(window: Option<u32>, script: Option<ScriptArg>) -> MovingFunctionAggregation {
        MovingFunctionAggregation::new("my_agg", "my_buckets_path", window, script)
    }

    #[test]
    fn test_sets_agg_type() {
        let json = instance(None, None).to_json().unwrap();
        assert_eq!(
            json,
            json!({ "my_agg": { "moving_fn": { "buckets_path": "my_buckets_path" } } })
        );
    }

    #[test]
    fn test_constructor_sets_arguments() {
        let agg = instance(Some(7), Some("MovingFunctions.sum(my_buckets_path)".into()));
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "my_agg": {
                    "moving_fn": {
                        "buckets_path": "my_buckets_path",
                        "window": 7,
                        "script": "MovingFunctions.sum(my_buckets_path)"
                    }
                }
            })
        );
    }

    #[test]
    fn test_format_is_unsupported() {
        let err = instance(None, None).format("0.00").unwrap_err();
        assert!(matches!(
            err,
            DslError::UnsupportedOperation { operation: "format", .. }
        ));

        let configured = instance(Some(5), Some("MovingFunctions.min(values)".into()))
            .shift(1)
            .gap_policy("insert_zeros")
            .unwrap();
        assert!(configured.format("0.00").is_err());
    }

    #[test]
    fn test_format_written_through_core_fails() {
        let mut agg = instance(Some(7), None);
        agg.core_mut().options_mut().set("format", "0.00");
        let err = agg.to_json().unwrap_err();
        assert!(matches!(
            err,
            DslError::UnsupportedOperation { operation: "format", .. }
        ));
    }

    #[test]
    fn test_shift() {
        let agg = instance(Some(30), None).shift(10);
        assert_eq!(
            agg.to_json().unwrap()["my_agg"]["moving_fn"]["shift"],
            json!(10)
        );
    }

    #[test]
    fn test_script_node() {
        let agg = instance(Some(10), None).script(Script::source("MovingFunctions.unweightedAvg(values)"));
        assert_eq!(
            agg.to_json().unwrap()["my_agg"]["moving_fn"]["script"],
            json!({ "source": "MovingFunctions.unweightedAvg(values)" })
        );
    }
}
