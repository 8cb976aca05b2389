//! Query DSL builders
//!
//! This module provides builders for the query half of the DSL:
//! - Generic queries (match_all, exists, ids, ...)
//! - Value term queries (term, prefix, wildcard, regexp, fuzzy)
//! - Full-text queries (match, match_phrase, match_phrase_prefix)
//! - Range and terms queries
//! - Compound queries (bool, constant_score)
//!
//! # Example
//!
//! ```
//! use elastic_dsl::query::{BoolQuery, MatchQuery, QueryOptions, RangeQuery};
//! use elastic_dsl::DslNode;
//!
//! let query = BoolQuery::new()
//!     .must(MatchQuery::new("content", "rust programming"))
//!     .filter(RangeQuery::new("year").gte(2024))
//!     .boost(1.5);
//! let json = query.to_json().unwrap();
//! assert_eq!(json["bool"]["boost"], 1.5);
//! ```

pub mod ast;
pub mod nodes;
pub mod types;

pub use ast::{Query, QueryOptions};
pub use nodes::{
    BoolQuery, ConstantScoreQuery, MatchQuery, RangeQuery, TermsQuery, ValueTermQuery,
};
pub use types::*;
