//! Shared serialization and validation layer
//!
//! This module provides the pieces every builder is made of:
//! - the [`DslNode`] trait and the category markers used for nesting checks
//! - the [`Options`] mapping and its recursive expansion
//! - script definitions
//! - rendering to JSON text

pub mod node;
pub mod options;
pub mod render;
pub mod script;
pub mod util;

pub use node::{
    check_category, AggregationNode, AggregationRef, DslNode, NodeCategory, NodeRef, QueryNode,
    QueryRef, ScriptNode, ScriptRef, Shared,
};
pub use options::{OptionValue, Options};
pub use render::render;
pub use script::{Script, ScriptArg, ScriptRepr};
