//! Concrete query builders
//!
//! Each builder implements `DslNode` and `QueryNode`, and shares `boost` and
//! `_name` through `QueryOptions`.

mod bool_query;
mod constant_score_query;
mod match_query;
mod range_query;
mod term_query;
mod terms_query;

pub use bool_query::BoolQuery;
pub use constant_score_query::ConstantScoreQuery;
pub use match_query::MatchQuery;
pub use range_query::RangeQuery;
pub use term_query::ValueTermQuery;
pub use terms_query::TermsQuery;
