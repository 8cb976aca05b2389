pub mod aggregation;
pub mod base;
pub mod config;
pub mod error;
pub mod query;

pub use base::{
    render, AggregationNode, AggregationRef, DslNode, NodeCategory, NodeRef, QueryNode, QueryRef,
    Script, ScriptArg, ScriptNode, ScriptRef, Shared,
};
pub use config::{RenderProfile, RenderSettings};
pub use error::{DslError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
