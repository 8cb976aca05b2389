//! Aggregation DSL builders
//!
//! Aggregations are keyed by a caller-chosen name and carry their type below
//! it. Three families share the [`AggregationCore`]:
//! - Metrics (max, avg, cardinality, ...)
//! - Bucket (terms, histogram, filters, ...), which nest sub-aggregations
//! - Pipeline (avg_bucket, derivative, moving_fn, ...), which read other
//!   aggregations through `buckets_path`
//!
//! # Example
//!
//! ```
//! use elastic_dsl::aggregation::{
//!     BucketAggregation, MetricsAggregation, MovingFunctionAggregation, SubAggregations,
//! };
//! use elastic_dsl::DslNode;
//!
//! let agg = BucketAggregation::date_histogram("my_date_histo", Some("timestamp"))
//!     .calendar_interval("day")
//!     .agg(MetricsAggregation::sum("the_sum", Some("lemmings")))
//!     .agg(MovingFunctionAggregation::new(
//!         "the_movfn",
//!         "the_sum",
//!         Some(5),
//!         Some("MovingFunctions.min(values)".into()),
//!     ));
//! let json = agg.to_json().unwrap();
//! assert_eq!(json["my_date_histo"]["aggs"]["the_movfn"]["moving_fn"]["window"], 5);
//! ```

pub mod base;
pub mod bucket;
pub mod filters;
pub mod metrics;
pub mod moving_function;
pub mod pipeline;
pub mod types;

pub use base::{
    AggregationCore, AggregationMap, AggregationOptions, SubAggregations, ValueSourceOptions,
};
pub use bucket::BucketAggregation;
pub use filters::FiltersAggregation;
pub use metrics::MetricsAggregation;
pub use moving_function::MovingFunctionAggregation;
pub use pipeline::{PipelineAggregation, PipelineOptions};
pub use types::*;
