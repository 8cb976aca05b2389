//! Validation helpers shared by the builders

use crate::error::DslError;
use crate::Result;

/// Fail with `MissingRequiredField` when `value` is absent
pub fn require<T>(value: Option<T>, construct: &str, field: &'static str) -> Result<T> {
    value.ok_or_else(|| DslError::MissingRequiredField {
        construct: construct.to_string(),
        field,
    })
}

/// Fail with `MissingRequiredField` when `value` is empty
pub fn require_non_empty(value: &str, construct: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(DslError::MissingRequiredField {
            construct: construct.to_string(),
            field,
        });
    }
    Ok(())
}

/// Normalize an enumerated parameter and check it against `allowed`
///
/// Matching is case-insensitive; the lowercase form is returned.
pub fn check_one_of(
    value: &str,
    allowed: &'static [&'static str],
    construct: &str,
    param: &'static str,
) -> Result<String> {
    let normalized = value.to_lowercase();
    if !allowed.contains(&normalized.as_str()) {
        return Err(DslError::InvalidParameter {
            construct: construct.to_string(),
            param,
            value: value.to_string(),
            expected: allowed,
        });
    }
    Ok(normalized)
}

const REWRITE_METHODS: &[&str] = &[
    "constant_score",
    "constant_score_boolean",
    "scoring_boolean",
    "top_terms_blended_freqs_N",
    "top_terms_boost_N",
    "top_terms_N",
];

/// Check a multi-term `rewrite` parameter
///
/// The `top_terms_*` methods carry a numeric suffix, e.g. `top_terms_boost_10`.
/// Matching is case-insensitive; the lowercase form is returned.
pub fn check_rewrite_method(value: &str, construct: &str) -> Result<String> {
    let normalized = value.to_lowercase();
    let sized = ["top_terms_blended_freqs_", "top_terms_boost_", "top_terms_"]
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix))
        .is_some_and(|size| !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()));

    if sized || REWRITE_METHODS[..3].contains(&normalized.as_str()) {
        return Ok(normalized);
    }
    Err(DslError::InvalidParameter {
        construct: construct.to_string(),
        param: "rewrite",
        value: value.to_string(),
        expected: REWRITE_METHODS,
    })
}
