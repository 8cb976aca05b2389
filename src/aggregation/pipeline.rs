//! Pipeline aggregations - work on the output of other aggregations

use crate::base::node::impl_serialize_via_json;
use crate::base::util::check_one_of;
use crate::base::{AggregationNode, DslNode, NodeCategory, OptionValue, ScriptArg};
use crate::error::DslError;
use crate::Result;
use serde_json::Value;

use super::base::{AggregationCore, AggregationOptions};
use super::types::{BucketsPath, PipelineKind, GAP_POLICIES};

/// Options shared by pipeline aggregations
pub trait PipelineOptions: AggregationOptions {
    /// Replace the path to the consumed metrics
    fn buckets_path(mut self, path: impl Into<BucketsPath>) -> Self {
        self.core_mut()
            .options_mut()
            .set("buckets_path", Value::from(path.into()));
        self
    }

    /// Policy for gaps in the data: `skip`, `insert_zeros` or `keep_values`
    fn gap_policy(mut self, policy: &str) -> Result<Self> {
        let construct = self.core().agg_type();
        let policy = check_one_of(policy, GAP_POLICIES, construct, "gap_policy")?;
        self.core_mut().options_mut().set("gap_policy", policy);
        Ok(self)
    }
}

/// Fail unless a non-empty `buckets_path` is present
pub(crate) fn check_buckets_path(core: &AggregationCore) -> Result<()> {
    let present = match core.options().get("buckets_path") {
        Some(OptionValue::Value(Value::String(path))) => !path.is_empty(),
        Some(OptionValue::Value(Value::Object(paths))) => !paths.is_empty(),
        _ => false,
    };
    if !present {
        return Err(DslError::MissingRequiredField {
            construct: core.agg_type().to_string(),
            field: "buckets_path",
        });
    }
    Ok(())
}

/// Pipeline aggregation reading sibling or parent metrics
///
/// ```json
/// { "avg_monthly_sales": { "avg_bucket": { "buckets_path": "sales_per_month>sales" } } }
/// ```
#[derive(Clone, Debug)]
pub struct PipelineAggregation {
    kind: PipelineKind,
    core: AggregationCore,
}

impl PipelineAggregation {
    pub fn new(name: impl Into<String>, kind: PipelineKind, buckets_path: impl Into<BucketsPath>) -> Self {
        Self {
            kind,
            core: AggregationCore::new(name, kind.as_str()),
        }
        .buckets_path(buckets_path)
    }

    /// Mean of a sibling metric across buckets
    pub fn avg_bucket(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::AvgBucket, buckets_path)
    }

    /// Sum of a sibling metric across buckets
    pub fn sum_bucket(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::SumBucket, buckets_path)
    }

    /// Bucket(s) with the maximum value of a sibling metric
    pub fn max_bucket(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::MaxBucket, buckets_path)
    }

    /// Bucket(s) with the minimum value of a sibling metric
    pub fn min_bucket(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::MinBucket, buckets_path)
    }

    /// Stats of a sibling metric across buckets
    pub fn stats_bucket(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::StatsBucket, buckets_path)
    }

    /// Derivative of a parent histogram metric
    pub fn derivative(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::Derivative, buckets_path)
    }

    /// Running total of a parent histogram metric
    pub fn cumulative_sum(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::CumulativeSum, buckets_path)
    }

    /// Per-bucket script over named metrics
    pub fn bucket_script(
        name: impl Into<String>,
        buckets_path: impl Into<BucketsPath>,
        script: Option<ScriptArg>,
    ) -> Self {
        let agg = Self::new(name, PipelineKind::BucketScript, buckets_path);
        match script {
            Some(script) => agg.script(script),
            None => agg,
        }
    }

    /// Drops buckets for which the script returns false
    pub fn bucket_selector(
        name: impl Into<String>,
        buckets_path: impl Into<BucketsPath>,
        script: Option<ScriptArg>,
    ) -> Self {
        let agg = Self::new(name, PipelineKind::BucketSelector, buckets_path);
        match script {
            Some(script) => agg.script(script),
            None => agg,
        }
    }

    /// Difference between values `lag` buckets apart
    pub fn serial_diff(name: impl Into<String>, buckets_path: impl Into<BucketsPath>) -> Self {
        Self::new(name, PipelineKind::SerialDiff, buckets_path)
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    /// Script run for each bucket (bucket_script, bucket_selector)
    pub fn script(mut self, script: impl Into<ScriptArg>) -> Self {
        self.core.options_mut().set_value("script", script.into());
        self
    }

    /// Bucket distance to subtract (serial_diff)
    pub fn lag(mut self, lag: u32) -> Self {
        self.core.options_mut().set("lag", lag);
        self
    }

    /// Unit the derivative is normalized to, e.g. `"day"` (derivative)
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.core.options_mut().set("unit", unit.into());
        self
    }

    /// Set an arbitrary plain option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.core.options_mut().set(key, value);
        self
    }
}

impl AggregationOptions for PipelineAggregation {
    fn core(&self) -> &AggregationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AggregationCore {
        &mut self.core
    }
}

impl PipelineOptions for PipelineAggregation {}

impl DslNode for PipelineAggregation {
    fn category(&self) -> NodeCategory {
        NodeCategory::Aggregation
    }

    fn node_type(&self) -> String {
        self.core.agg_type().to_string()
    }

    fn to_json(&self) -> Result<Value> {
        check_buckets_path(&self.core)?;
        self.core.to_json()
    }
}

impl AggregationNode for PipelineAggregation {}

impl_serialize_via_json!(PipelineAggregation);
