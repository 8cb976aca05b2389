//! Core types for the query builders

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag of a query built with the generic [`Query`](super::Query) node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryKind {
    MatchAll,
    MatchNone,
    Exists,
    Ids,
    /// Any construct without a dedicated builder
    Other(String),
}

impl QueryKind {
    pub fn as_str(&self) -> &str {
        match self {
            QueryKind::MatchAll => "match_all",
            QueryKind::MatchNone => "match_none",
            QueryKind::Exists => "exists",
            QueryKind::Ids => "ids",
            QueryKind::Other(name) => name,
        }
    }
}

/// Term-level queries that carry a single `value` for one field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueTermKind {
    Term,
    Prefix,
    Wildcard,
    Regexp,
    Fuzzy,
}

impl ValueTermKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTermKind::Term => "term",
            ValueTermKind::Prefix => "prefix",
            ValueTermKind::Wildcard => "wildcard",
            ValueTermKind::Regexp => "regexp",
            ValueTermKind::Fuzzy => "fuzzy",
        }
    }
}

/// Full-text queries scoped to one field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Match,
    MatchPhrase,
    MatchPhrasePrefix,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Match => "match",
            MatchKind::MatchPhrase => "match_phrase",
            MatchKind::MatchPhrasePrefix => "match_phrase_prefix",
        }
    }
}

/// Operator for combining terms in a match query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOperator {
    /// All terms must match (AND)
    And,
    /// At least one term must match (OR)
    #[default]
    Or,
}

impl MatchOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOperator::And => "and",
            MatchOperator::Or => "or",
        }
    }
}

/// Clause occurrence inside a bool query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occur {
    /// Must match, contributes to score
    Must,
    /// Should match, contributes to score
    Should,
    /// Must match, no scoring
    Filter,
    /// Must not match
    MustNot,
}

impl Occur {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Should => "should",
            Occur::Filter => "filter",
            Occur::MustNot => "must_not",
        }
    }
}

/// Minimum should match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Exact count
    Count(i64),
    /// Percentage or combination spec (e.g., "75%", "3<90%")
    Spec(String),
}

impl From<i64> for MinimumShouldMatch {
    fn from(count: i64) -> Self {
        MinimumShouldMatch::Count(count)
    }
}

impl From<&str> for MinimumShouldMatch {
    fn from(spec: &str) -> Self {
        MinimumShouldMatch::Spec(spec.to_string())
    }
}

impl From<MinimumShouldMatch> for Value {
    fn from(msm: MinimumShouldMatch) -> Self {
        match msm {
            MinimumShouldMatch::Count(n) => Value::from(n),
            MinimumShouldMatch::Spec(s) => Value::String(s),
        }
    }
}
